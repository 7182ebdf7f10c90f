//! Archive entries for finished matches

use serde::{Deserialize, Serialize};

use super::state::{MatchId, MatchState, Outcome, PlayerId};
use crate::board::{Board, Color};
use crate::error::{BoardError, ReviewError};

/// Longest review the winner may leave, in characters
pub const MAX_REVIEW_CHARS: usize = 60;

/// History entry written once a match finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub room_id: MatchId,
    pub black: PlayerId,
    pub white: PlayerId,
    pub winner: Outcome,
    /// Cell indices in play order, Black first
    pub moves: Vec<usize>,
    pub final_board: Board,
    /// Short note left by the winner after the match
    #[serde(default)]
    pub winner_review: Option<String>,
}

impl MatchRecord {
    /// Build the record for `state`, or `None` while the match is still open
    pub fn from_state(room_id: MatchId, state: &MatchState) -> Option<MatchRecord> {
        let winner = state.outcome()?;
        let seats = state.seats();
        Some(MatchRecord {
            room_id,
            black: seats.black.clone()?,
            white: seats.white.clone()?,
            winner,
            moves: state.moves().iter().map(|m| m.cell).collect(),
            final_board: *state.board(),
            winner_review: None,
        })
    }

    /// Store the winner's review, trimmed.
    ///
    /// Drawn matches take no review, only the actor in the winning seat may
    /// write one, and the trimmed text is capped at [`MAX_REVIEW_CHARS`].
    /// A later review replaces an earlier one.
    pub fn add_review(&mut self, actor: &PlayerId, text: &str) -> Result<(), ReviewError> {
        let winner = match self.winner.winner() {
            Some(Color::Black) => &self.black,
            Some(Color::White) => &self.white,
            None => return Err(ReviewError::NoWinner),
        };
        if winner != actor {
            return Err(ReviewError::NotWinner);
        }
        let text = text.trim();
        let len = text.chars().count();
        if len > MAX_REVIEW_CHARS {
            return Err(ReviewError::TooLong(len));
        }
        self.winner_review = Some(text.to_string());
        Ok(())
    }

    /// Check that the move list reproduces the final board
    pub fn verify(&self) -> bool {
        replay(&self.moves).is_ok_and(|board| board == self.final_board)
    }
}

/// Rebuild a board from cell indices played alternately by Black and White
pub fn replay(moves: &[usize]) -> Result<Board, BoardError> {
    let mut board = Board::empty();
    let mut color = Color::Black;
    for &cell in moves {
        board = board.place(cell, color)?;
        color = color.opponent();
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    #[test]
    fn test_replay_alternates_colors() {
        let board = replay(&[112, 0, 113]).unwrap();
        assert_eq!(board.get(112), Ok(Stone::Black));
        assert_eq!(board.get(0), Ok(Stone::White));
        assert_eq!(board.get(113), Ok(Stone::Black));
        assert_eq!(board.stone_count(), 3);
    }

    #[test]
    fn test_replay_rejects_bad_cells() {
        assert_eq!(replay(&[5, 5]), Err(BoardError::CellOccupied(5)));
        assert_eq!(replay(&[300]), Err(BoardError::OutOfRange(300)));
        assert_eq!(replay(&[]), Ok(Board::empty()));
    }

    #[test]
    fn test_open_match_has_no_record() {
        let state = MatchState::new(PlayerId::new("alice"));
        assert!(MatchRecord::from_state(MatchId::new("r"), &state).is_none());
    }

    #[test]
    fn test_verify_detects_tampering() {
        let mut record = MatchRecord {
            room_id: MatchId::new("r"),
            black: PlayerId::new("alice"),
            white: PlayerId::new("bob"),
            winner: Outcome::Draw,
            moves: vec![112, 0],
            final_board: replay(&[112, 0]).unwrap(),
            winner_review: None,
        };
        assert!(record.verify());

        record.moves.push(1);
        assert!(!record.verify());
    }

    #[test]
    fn test_record_json_fields() {
        let record = MatchRecord {
            room_id: MatchId::new("room-7"),
            black: PlayerId::new("alice"),
            white: PlayerId::new("bob"),
            winner: Outcome::WhiteWins,
            moves: vec![112],
            final_board: replay(&[112]).unwrap(),
            winner_review: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["roomId"], "room-7");
        assert_eq!(json["winner"], "W");
        assert_eq!(json["moves"], serde_json::json!([112]));
        assert_eq!(json["winnerReview"], serde_json::Value::Null);
        assert_eq!(json["finalBoard"].as_str().map(|s| s.chars().nth(112)), Some(Some('B')));
    }

    fn won_by(winner: Outcome) -> MatchRecord {
        MatchRecord {
            room_id: MatchId::new("room-3"),
            black: PlayerId::new("alice"),
            white: PlayerId::new("bob"),
            winner,
            moves: vec![112],
            final_board: replay(&[112]).unwrap(),
            winner_review: None,
        }
    }

    #[test]
    fn test_review_by_winner_is_trimmed() {
        let mut record = won_by(Outcome::WhiteWins);
        record.add_review(&PlayerId::new("bob"), "  good game  ").unwrap();
        assert_eq!(record.winner_review.as_deref(), Some("good game"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["winnerReview"], "good game");
    }

    #[test]
    fn test_review_rejected_for_draw() {
        let mut record = won_by(Outcome::Draw);
        assert_eq!(
            record.add_review(&PlayerId::new("alice"), "close one"),
            Err(ReviewError::NoWinner)
        );
        assert_eq!(record.winner_review, None);
    }

    #[test]
    fn test_review_rejected_for_loser() {
        let mut record = won_by(Outcome::BlackWins);
        assert_eq!(
            record.add_review(&PlayerId::new("bob"), "lucky"),
            Err(ReviewError::NotWinner)
        );
        assert_eq!(
            record.add_review(&PlayerId::new("carol"), "nice"),
            Err(ReviewError::NotWinner)
        );
        assert_eq!(record.winner_review, None);
    }

    #[test]
    fn test_review_length_cap() {
        let mut record = won_by(Outcome::BlackWins);
        let alice = PlayerId::new("alice");

        assert_eq!(
            record.add_review(&alice, &"x".repeat(61)),
            Err(ReviewError::TooLong(61))
        );
        assert_eq!(record.winner_review, None);

        // Surrounding whitespace does not count, and the cap is in characters
        let padded = format!("   {}   ", "가".repeat(60));
        record.add_review(&alice, &padded).unwrap();
        assert_eq!(record.winner_review.map(|r| r.chars().count()), Some(60));
    }
}
