use super::*;
use std::str::FromStr;

fn sq(s: &str) -> Square {
    Square::from_str(s).unwrap()
}

#[test]
fn start_position_layout() {
    let b = Board::new();
    assert_eq!(b.piece_at(sq("e1")), Some((Color::White, Piece::King)));
    assert_eq!(b.piece_at(sq("d8")), Some((Color::Black, Piece::Queen)));
    assert_eq!(b.piece_at(sq("a2")), Some((Color::White, Piece::Pawn)));
    assert_eq!(b.piece_at(sq("h7")), Some((Color::Black, Piece::Pawn)));
    assert!(b.is_empty(sq("e4")));
    assert_eq!(b.pieces(Color::White).count(), 16);
    assert_eq!(b.pieces(Color::Black).count(), 16);
    assert_eq!(b.count(Color::White, Piece::Knight), 2);
}

#[test]
fn king_cache_follows_placement() {
    let mut b = Board::new();
    assert_eq!(b.king_square(Color::White), Some(sq("e1")));
    assert_eq!(b.king_square(Color::Black), Some(sq("e8")));

    b.remove(sq("e1"));
    assert_eq!(b.king_square(Color::White), None);
    b.place(sq("f1"), Color::White, Piece::King);
    assert_eq!(b.king_square(Color::White), Some(sq("f1")));
    // f1 bishop was overwritten
    assert_eq!(b.count(Color::White, Piece::Bishop), 1);
}

#[test]
fn validate_flags_missing_king() {
    let mut b = Board::new();
    assert!(b.validate().is_ok());
    b.remove(sq("e8"));
    assert!(matches!(
        b.validate(),
        Err(ChessError::InvariantViolation(_))
    ));
}

#[test]
fn validate_flags_second_king() {
    let mut b = Board::new();
    b.cells[4][4] = Some((Color::White, Piece::King));
    assert!(b.validate().is_err());
}

#[test]
fn restore_writes_empty_and_occupied_cells() {
    let mut b = Board::new();
    let pawn = b.remove(sq("e2"));
    assert!(b.is_empty(sq("e2")));
    b.restore(sq("e2"), pawn);
    b.restore(sq("e7"), None);
    assert_eq!(b.piece_at(sq("e2")), Some((Color::White, Piece::Pawn)));
    assert!(b.is_empty(sq("e7")));
}

#[test]
fn display_draws_rank_eight_first() {
    let text = Board::new().to_string();
    let first = text.lines().next().unwrap();
    assert_eq!(first, "8  r n b q k b n r");
    assert!(text.ends_with("a b c d e f g h"));
}

#[test]
fn promotion_choices_exclude_pawn_and_king() {
    for p in Piece::PROMOTION_CHOICES {
        assert!(p.is_promotion_choice());
    }
    assert!(!Piece::King.is_promotion_choice());
    assert!(!Piece::Pawn.is_promotion_choice());
    assert_eq!(Piece::from_char('Q'), Some(Piece::Queen));
    assert_eq!(Piece::from_char('x'), None);
}
