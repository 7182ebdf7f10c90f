//! Move arbitration against shared match state
//!
//! Every request runs as a read-evaluate-commit cycle against a
//! [`MatchStore`]:
//! 1. Read the snapshot and its version
//! 2. Evaluate the request against that snapshot only (pure)
//! 3. Commit on the condition that the version has not moved
//!
//! A lost race throws the evaluation away and starts over from a fresh
//! read, since the turn or even the status may have changed in between.
//! Rejections never write, so a rejected request leaves the stored
//! snapshot exactly as it was.

use tracing::{debug, info, instrument, warn};

use super::state::{MatchId, MatchState, MatchStatus, Move, Outcome, PlayerId};
use super::store::MatchStore;
use crate::board::{Pos, TOTAL_CELLS};
use crate::config::CoordinatorConfig;
use crate::error::{CoordinatorError, MoveError, StoreError};
use crate::rules::{check_forbidden, find_winning_line, is_win};

/// Evaluate `actor` playing `cell` on `state`, producing the next snapshot.
///
/// Pure: `state` is never modified and nothing is written anywhere.
pub(crate) fn evaluate_move(
    state: &MatchState,
    actor: &PlayerId,
    cell: usize,
    config: &CoordinatorConfig,
) -> Result<MatchState, MoveError> {
    if state.status != MatchStatus::Playing {
        return Err(MoveError::GameNotActive);
    }
    let color = state.seats.color_of(actor).ok_or(MoveError::NotAPlayer)?;
    if color != state.turn {
        return Err(MoveError::NotYourTurn);
    }
    let pos = Pos::try_from_index(cell)?;
    let tentative = state.board.place(cell, color)?;

    let wins = is_win(&tentative, pos, color);
    if let Some(reason) = check_forbidden(&tentative, pos, color) {
        if !(wins && config.five_beats_forbidden) {
            return Err(MoveError::ForbiddenMove(reason));
        }
    }

    let mut next = state.clone();
    next.board = tentative;
    next.moves.push(Move {
        cell,
        color,
        seq: state.moves.len() as u32 + 1,
    });

    if wins {
        next.status = MatchStatus::Finished;
        next.outcome = Some(Outcome::win_for(color));
        next.winning_line = find_winning_line(&tentative, pos, color)
            .map(|line| line.into_iter().map(Pos::to_index).collect());
    } else if state.moves.len() + 1 == TOTAL_CELLS {
        next.status = MatchStatus::Finished;
        next.outcome = Some(Outcome::Draw);
    } else {
        next.turn = color.opponent();
    }
    Ok(next)
}

/// Single authority for state transitions of the matches in a store
#[derive(Debug)]
pub struct MoveCoordinator<S> {
    store: S,
    config: CoordinatorConfig,
}

impl<S: MatchStore> MoveCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, CoordinatorConfig::default())
    }

    /// Every request gets at least one attempt, whatever the configured budget
    pub fn with_config(store: S, mut config: CoordinatorConfig) -> Self {
        config.max_commit_attempts = config.max_commit_attempts.max(1);
        Self { store, config }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a match with `black` in the Black seat
    #[instrument(skip_all, fields(match_id = %id, black = %black))]
    pub fn create_match(&self, id: MatchId, black: PlayerId) -> Result<MatchState, CoordinatorError> {
        let state = MatchState::new(black);
        self.store
            .insert(&id, state.clone())
            .map_err(|err| store_error(&id, err))?;
        info!("match created");
        Ok(state)
    }

    /// Seat `white` and start play
    #[instrument(skip_all, fields(match_id = %id, white = %white))]
    pub fn join_match(&self, id: &MatchId, white: PlayerId) -> Result<MatchState, CoordinatorError> {
        let state = self.transact(id, |current| {
            current
                .seat_white(white.clone())
                .map_err(CoordinatorError::from)
        })?;
        info!("match started");
        Ok(state)
    }

    /// Apply `actor`'s stone at `cell`, committing the result exactly once.
    ///
    /// Returns the committed snapshot, or the rejection with the stored
    /// match left untouched.
    #[instrument(skip_all, fields(match_id = %id, actor = %actor, cell = cell))]
    pub fn apply_move(
        &self,
        id: &MatchId,
        actor: &PlayerId,
        cell: usize,
    ) -> Result<MatchState, CoordinatorError> {
        let state = self.transact(id, |current| {
            evaluate_move(current, actor, cell, &self.config).map_err(CoordinatorError::from)
        })?;
        if let Some(outcome) = state.outcome() {
            info!(?outcome, moves = state.moves().len(), "match finished");
        }
        Ok(state)
    }

    /// Current committed snapshot
    pub fn snapshot(&self, id: &MatchId) -> Result<MatchState, CoordinatorError> {
        self.store
            .load(id)
            .map(|current| current.value)
            .map_err(|err| store_error(id, err))
    }

    fn transact<F>(&self, id: &MatchId, mut transition: F) -> Result<MatchState, CoordinatorError>
    where
        F: FnMut(&MatchState) -> Result<MatchState, CoordinatorError>,
    {
        for attempt in 1..=self.config.max_commit_attempts {
            let current = self.store.load(id).map_err(|err| store_error(id, err))?;

            let next = match transition(&current.value) {
                Ok(next) => next,
                Err(err) => {
                    debug!(attempt, error = %err, "request rejected");
                    return Err(err);
                }
            };

            match self.store.commit(id, current.version, next.clone()) {
                Ok(version) => {
                    debug!(attempt, version = version.get(), "committed");
                    return Ok(next);
                }
                Err(StoreError::Conflict) => {
                    warn!(attempt, "snapshot changed during evaluation, retrying");
                }
                Err(err) => return Err(store_error(id, err)),
            }
        }

        warn!(
            attempts = self.config.max_commit_attempts,
            "commit retry budget exhausted"
        );
        Err(CoordinatorError::Unavailable(format!(
            "could not commit to match {id} after {} attempts",
            self.config.max_commit_attempts
        )))
    }
}

fn store_error(id: &MatchId, err: StoreError) -> CoordinatorError {
    match err {
        StoreError::NotFound(_) => CoordinatorError::NotFound(id.clone()),
        StoreError::AlreadyExists(_) => CoordinatorError::AlreadyExists(id.clone()),
        StoreError::Conflict => {
            CoordinatorError::Unavailable(format!("unexpected conflict on match {id}"))
        }
        StoreError::Unavailable(msg) => CoordinatorError::Unavailable(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Color};
    use crate::game::store::InMemoryStore;
    use crate::rules::ForbiddenReason;

    fn playing() -> MatchState {
        MatchState::new(PlayerId::new("alice"))
            .seat_white(PlayerId::new("bob"))
            .unwrap()
    }

    fn alice() -> PlayerId {
        PlayerId::new("alice")
    }

    fn bob() -> PlayerId {
        PlayerId::new("bob")
    }

    #[test]
    fn test_evaluate_does_not_touch_input() {
        let state = playing();
        let next = evaluate_move(&state, &alice(), 112, &CoordinatorConfig::default()).unwrap();
        assert_eq!(state.board(), &Board::empty());
        assert_eq!(next.board().get(112), Ok(crate::board::Stone::Black));
        assert_eq!(next.turn(), Color::White);
        assert_eq!(next.moves(), &[Move { cell: 112, color: Color::Black, seq: 1 }]);
    }

    #[test]
    fn test_evaluate_precondition_order() {
        let config = CoordinatorConfig::default();
        let waiting = MatchState::new(alice());
        assert_eq!(
            evaluate_move(&waiting, &alice(), 0, &config),
            Err(MoveError::GameNotActive)
        );

        let state = playing();
        assert_eq!(
            evaluate_move(&state, &PlayerId::new("carol"), 0, &config),
            Err(MoveError::NotAPlayer)
        );
        // Turn is checked before the cell
        assert_eq!(
            evaluate_move(&state, &bob(), 999, &config),
            Err(MoveError::NotYourTurn)
        );
        assert_eq!(
            evaluate_move(&state, &alice(), 225, &config),
            Err(MoveError::OutOfRange(225))
        );

        let after = evaluate_move(&state, &alice(), 7, &config).unwrap();
        assert_eq!(
            evaluate_move(&after, &bob(), 7, &config),
            Err(MoveError::CellOccupied(7))
        );
    }

    /// Black to move at (7,7): completes an exact five on row 7 while also
    /// making a vertical four and an anti-diagonal four.
    fn five_with_double_four() -> MatchState {
        let black = [(7, 5), (7, 6), (7, 8), (7, 9), (4, 7), (5, 7), (6, 7), (4, 10), (5, 9), (6, 8)];
        let white = [(14, 0), (14, 2), (14, 4), (14, 6), (14, 8), (14, 10), (14, 12), (14, 14), (12, 0), (12, 2)];
        let mut state = playing();
        for (seq, (b, w)) in black.iter().zip(white.iter()).enumerate() {
            let b = Pos::new(b.0, b.1).to_index();
            let w = Pos::new(w.0, w.1).to_index();
            state.board = state.board.place(b, Color::Black).unwrap();
            state.board = state.board.place(w, Color::White).unwrap();
            state.moves.push(Move { cell: b, color: Color::Black, seq: 2 * seq as u32 + 1 });
            state.moves.push(Move { cell: w, color: Color::White, seq: 2 * seq as u32 + 2 });
        }
        state
    }

    #[test]
    fn test_forbidden_checked_before_win_by_default() {
        let state = five_with_double_four();
        let cell = Pos::new(7, 7).to_index();
        assert_eq!(
            evaluate_move(&state, &alice(), cell, &CoordinatorConfig::default()),
            Err(MoveError::ForbiddenMove(ForbiddenReason::DoubleFour))
        );
    }

    #[test]
    fn test_five_beats_forbidden_when_configured() {
        let state = five_with_double_four();
        let cell = Pos::new(7, 7).to_index();
        let config = CoordinatorConfig {
            five_beats_forbidden: true,
            ..CoordinatorConfig::default()
        };
        let next = evaluate_move(&state, &alice(), cell, &config).unwrap();
        assert_eq!(next.status(), MatchStatus::Finished);
        assert_eq!(next.outcome(), Some(Outcome::BlackWins));
        let expected: Vec<usize> = (5..=9).map(|c| Pos::new(7, c).to_index()).collect();
        assert_eq!(next.winning_line(), Some(expected.as_slice()));
    }

    #[test]
    fn test_zero_retry_budget_still_evaluates() {
        let config = CoordinatorConfig {
            max_commit_attempts: 0,
            ..CoordinatorConfig::default()
        };
        let coordinator = MoveCoordinator::with_config(InMemoryStore::new(), config);
        assert_eq!(coordinator.config().max_commit_attempts, 1);

        let id = MatchId::new("room-0");
        coordinator.create_match(id.clone(), alice()).unwrap();
        coordinator.join_match(&id, bob()).unwrap();
        assert_eq!(
            coordinator.apply_move(&id, &bob(), 112),
            Err(CoordinatorError::Rejected(MoveError::NotYourTurn))
        );
        let state = coordinator.apply_move(&id, &alice(), 112).unwrap();
        assert_eq!(state.moves().len(), 1);
    }
}
