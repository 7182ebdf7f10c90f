use super::*;
use crate::error::{BoardError, ParseBoardError};

#[test]
fn test_color_opponent() {
    assert_eq!(Color::Black.opponent(), Color::White);
    assert_eq!(Color::White.opponent(), Color::Black);
    assert_eq!(Stone::from(Color::White), Stone::White);
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 15);
    assert_eq!(TOTAL_CELLS, 225);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7); // Center
    assert_eq!(pos.to_index(), 7 * 15 + 7);
    assert_eq!(pos.to_index(), 112);

    let pos2 = Pos::from_index(112);
    assert_eq!(pos2, pos);
    assert_eq!(pos2.to_coord(), (7, 7));
}

#[test]
fn test_pos_corner_indices() {
    // Top-left
    assert_eq!(Pos::new(0, 0).to_index(), 0);
    // Top-right
    assert_eq!(Pos::new(0, 14).to_index(), 14);
    // Bottom-left
    assert_eq!(Pos::new(14, 0).to_index(), 210);
    // Bottom-right
    assert_eq!(Pos::new(14, 14).to_index(), 224);
}

#[test]
fn test_pos_checked_constructors() {
    assert_eq!(Pos::try_from_index(224), Ok(Pos::new(14, 14)));
    assert_eq!(Pos::try_from_index(225), Err(BoardError::OutOfRange(225)));
    assert_eq!(Pos::from_coord(3, 4), Ok(Pos::new(3, 4)));
    assert!(Pos::from_coord(15, 0).is_err());
    assert!(Pos::from_coord(0, 15).is_err());
}

#[test]
fn test_pos_validity_and_offset() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(14, 14));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, 15));

    let pos = Pos::new(0, 13);
    assert_eq!(pos.offset(1, 1, 1), Some(Pos::new(1, 14)));
    assert_eq!(pos.offset(0, 1, 2), None);
    assert_eq!(pos.offset(-1, 0, 1), None);
}

#[test]
fn test_pos_ordering() {
    assert!(Pos::new(0, 0) < Pos::new(0, 1));
    assert!(Pos::new(0, 14) < Pos::new(1, 0));
}

#[test]
fn test_empty_board() {
    let board = Board::empty();
    assert_eq!(board.stone_count(), 0);
    assert!(!board.is_full());
    assert!(board.cells().all(|s| s == Stone::Empty));
    assert_eq!(board.serialize(), ".".repeat(225));
}

#[test]
fn test_place_changes_exactly_one_cell() {
    let before = Board::empty().place(0, Color::White).unwrap();
    let after = before.place(112, Color::Black).unwrap();

    // Snapshot semantics: the original board is unchanged
    assert_eq!(before.get(112), Ok(Stone::Empty));
    assert_eq!(after.get(112), Ok(Stone::Black));

    let changed: Vec<usize> = before
        .cells()
        .zip(after.cells())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(changed, vec![112]);
}

#[test]
fn test_place_rejections() {
    let board = Board::empty().place(40, Color::Black).unwrap();
    assert_eq!(board.place(40, Color::White), Err(BoardError::CellOccupied(40)));
    assert_eq!(board.place(40, Color::Black), Err(BoardError::CellOccupied(40)));
    assert_eq!(board.place(225, Color::Black), Err(BoardError::OutOfRange(225)));
    assert_eq!(board.get(225), Err(BoardError::OutOfRange(225)));
}

#[test]
fn test_serialize_round_trip() {
    let board = Board::empty()
        .place(0, Color::Black)
        .and_then(|b| b.place(14, Color::White))
        .and_then(|b| b.place(224, Color::Black))
        .unwrap();
    let s = board.serialize();
    assert_eq!(s.len(), 225);
    assert_eq!(&s[0..1], "B");
    assert_eq!(&s[14..15], "W");
    assert_eq!(&s[224..], "B");
    assert_eq!(Board::deserialize(&s), Ok(board));
    assert_eq!(s.parse::<Board>(), Ok(board));
}

#[test]
fn test_string_round_trip() {
    // Mixed pattern touching both ends of the string
    let s: String = (0..TOTAL_CELLS)
        .map(|i| match i % 7 {
            0 | 4 => 'B',
            2 | 5 => 'W',
            _ => '.',
        })
        .collect();
    assert_eq!(&s[..7], "B.W.BW.");

    let board = Board::deserialize(&s).unwrap();
    assert_eq!(board.stone_count(), 129);
    assert_eq!(board.get(0), Ok(Stone::Black));
    assert_eq!(board.get(224), Ok(Stone::Black)); // 224 % 7 == 0
    assert_eq!(board.serialize(), s);
    assert_eq!(board.to_string(), s);
}

#[test]
fn test_deserialize_rejects_bad_input() {
    assert_eq!(
        Board::deserialize(&".".repeat(224)),
        Err(ParseBoardError::InvalidLength(224))
    );

    let mut s = ".".repeat(225);
    s.replace_range(10..11, "x");
    assert_eq!(
        Board::deserialize(&s),
        Err(ParseBoardError::InvalidSymbol { index: 10, symbol: 'x' })
    );
}

#[test]
fn test_board_json_is_flat_string() {
    let board = Board::empty().place(1, Color::White).unwrap();
    let json = serde_json::to_string(&board).unwrap();
    assert_eq!(json, format!("\".W{}\"", ".".repeat(223)));
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
}
