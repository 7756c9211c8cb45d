use crate::board::{Board, Color, Piece};
use crate::moves::rays::{Direction, knight_targets, ray};
use crate::square::Square;
use arrayvec::ArrayVec;
use tracing::trace;

/// A friendly piece that may only move along `direction` (or its opposite)
/// without exposing the king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    /// Direction from the king towards the pinned piece.
    pub direction: Direction,
}

/// An enemy piece giving check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub square: Square,
    /// Direction from the king towards the checker; `None` for a knight.
    pub direction: Option<Direction>,
}

/// What the analyzer found around one king square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KingSafety {
    pub in_check: bool,
    pub pins: ArrayVec<Pin, 8>,
    pub checks: ArrayVec<Check, 16>,
}

impl KingSafety {
    #[inline(always)]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }

    /// Pin axis of the piece on `sq`, if it is pinned.
    #[inline]
    pub fn pin_direction(&self, sq: Square) -> Option<Direction> {
        self.pins
            .iter()
            .find(|pin| pin.square == sq)
            .map(|pin| pin.direction)
    }

    /// Whether a piece on `sq` may travel along `dir`.
    #[inline]
    pub fn allows(&self, sq: Square, dir: Direction) -> bool {
        self.pin_direction(sq).is_none_or(|axis| axis.same_axis(dir))
    }
}

/// Can `piece` of color `owner`, standing `distance` steps from a target in
/// direction `dir` (target -> piece), hit that target along the line?
#[inline]
fn attacks_along(piece: Piece, owner: Color, dir: Direction, distance: usize) -> bool {
    match piece {
        Piece::Rook => dir.is_orthogonal(),
        Piece::Bishop => !dir.is_orthogonal(),
        Piece::Queen => true,
        Piece::King => distance == 1,
        Piece::Pawn => {
            // A pawn attacks forward-diagonally, so seen from its target it
            // sits one row *behind* its own forward direction.
            let (dr, dc) = dir.delta();
            distance == 1 && dc != 0 && dr == -owner.forward()
        }
        Piece::Knight => false,
    }
}

/// Ray-cast from `king_sq` to classify checks and collect absolute pins
/// against `friendly`.
///
/// Friendly kings are transparent. Analyzing from a square the king is only
/// considering moving to therefore sees straight through the king's current
/// square, which is what a king stepping away from a slider needs.
pub fn analyze(board: &Board, king_sq: Square, friendly: Color) -> KingSafety {
    let enemy = friendly.opposite();
    let mut safety = KingSafety::default();

    for dir in Direction::ALL {
        let mut candidate: Option<Square> = None;
        for (step, &sq) in ray(king_sq, dir).iter().enumerate() {
            let Some((color, piece)) = board.piece_at(sq) else {
                continue;
            };
            if color == friendly {
                if piece == Piece::King {
                    continue;
                }
                if candidate.is_some() {
                    break;
                }
                candidate = Some(sq);
                continue;
            }

            if attacks_along(piece, enemy, dir, step + 1) {
                match candidate {
                    None => {
                        safety.in_check = true;
                        safety.checks.push(Check {
                            square: sq,
                            direction: Some(dir),
                        });
                    }
                    Some(pinned) => safety.pins.push(Pin {
                        square: pinned,
                        direction: dir,
                    }),
                }
            }
            break;
        }
    }

    for &sq in knight_targets(king_sq) {
        if board.piece_at(sq) == Some((enemy, Piece::Knight)) {
            safety.in_check = true;
            safety.checks.push(Check {
                square: sq,
                direction: None,
            });
        }
    }

    trace!(
        king = %king_sq,
        ?friendly,
        checks = safety.checks.len(),
        pins = safety.pins.len(),
        "analyze"
    );
    safety
}

/// Is `target` attacked by any piece of `attacker` on this exact board?
///
/// Pure: callers wanting a hypothetical answer pass a hypothetical board.
/// The defending king is treated as absent, so squares a king would walk
/// through keep the attacks it currently shadows.
pub fn is_square_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    let defender = attacker.opposite();

    for dir in Direction::ALL {
        for (step, &sq) in ray(target, dir).iter().enumerate() {
            match board.piece_at(sq) {
                None => continue,
                Some((color, Piece::King)) if color == defender => continue,
                Some((color, piece)) => {
                    if color == attacker && attacks_along(piece, attacker, dir, step + 1) {
                        return true;
                    }
                    break;
                }
            }
        }
    }

    knight_targets(target)
        .iter()
        .any(|&sq| board.piece_at(sq) == Some((attacker, Piece::Knight)))
}

/// Is `side`'s king attacked right now?
#[inline]
pub fn in_check(board: &Board, side: Color) -> bool {
    board
        .king_square(side)
        .is_some_and(|king| is_square_attacked(board, king, side.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    fn board(fen: &str) -> Board {
        GameState::from_fen(fen).unwrap().board().clone()
    }

    #[test]
    fn quiet_start_position() {
        let b = Board::new();
        let safety = analyze(&b, sq("e1"), Color::White);
        assert!(!safety.in_check);
        assert!(safety.pins.is_empty());
        assert!(safety.checks.is_empty());
    }

    #[test]
    fn pawn_checks_only_from_its_capture_diagonal() {
        // Black pawn d2 attacks e1; black pawn e2 (straight ahead) does not.
        let b = board("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1");
        let safety = analyze(&b, sq("e1"), Color::White);
        assert_eq!(safety.checks.len(), 1);
        assert_eq!(safety.checks[0].square, sq("d2"));
        assert_eq!(safety.checks[0].direction, Some(Direction::NorthWest));

        let b = board("4k3/8/8/8/8/8/4p3/4K3 w - - 0 1");
        assert!(!analyze(&b, sq("e1"), Color::White).in_check);

        // White pawn d2 sitting below the black king's square never checks it.
        let b = board("8/8/8/8/8/8/3P4/4k2K b - - 0 1");
        assert!(!analyze(&b, sq("e1"), Color::Black).in_check);
    }

    #[test]
    fn blocked_slider_pins_instead_of_checking() {
        let b = board("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let safety = analyze(&b, sq("e1"), Color::White);
        assert!(!safety.in_check);
        assert_eq!(
            safety.pins.as_slice(),
            &[Pin {
                square: sq("e2"),
                direction: Direction::North
            }]
        );
        assert!(safety.allows(sq("e2"), Direction::South));
        assert!(!safety.allows(sq("e2"), Direction::East));
    }

    #[test]
    fn knight_checks_have_no_direction() {
        let b = board("4k3/8/8/8/8/3n4/8/4K3 w - - 0 1");
        let safety = analyze(&b, sq("e1"), Color::White);
        assert!(safety.in_check);
        assert_eq!(
            safety.checks.as_slice(),
            &[Check {
                square: sq("d3"),
                direction: None
            }]
        );
    }

    #[test]
    fn attack_probe_treats_defending_king_as_absent() {
        // Rook a1 looks through the white king on e1 to f1.
        let b = board("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert!(is_square_attacked(&b, sq("f1"), Color::Black));
        assert!(!is_square_attacked(&b, sq("f2"), Color::Black));
        assert!(in_check(&b, Color::White));
        assert!(!in_check(&b, Color::Black));
    }
}
