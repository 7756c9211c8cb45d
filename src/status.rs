use crate::board::{Board, Color, Piece};
use crate::game::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay,
    Check,
    DrawDeadPosition,
    Stalemate,
    Checkmate,
}

impl GameStatus {
    /// No further moves will be played.
    pub fn is_over(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::DrawDeadPosition
        )
    }
}

/// Neither side can ever deliver mate: bare kings, a single minor piece,
/// or bishops only with every bishop on one square colour.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = 0;
    let mut knights = 0;
    let mut bishop_shades = [false; 2];
    for color in [Color::White, Color::Black] {
        for (sq, piece) in board.pieces(color) {
            match piece {
                Piece::King => {}
                Piece::Knight => {
                    minors += 1;
                    knights += 1;
                }
                Piece::Bishop => {
                    minors += 1;
                    bishop_shades[usize::from((sq.row() + sq.col()) % 2)] = true;
                }
                Piece::Pawn | Piece::Rook | Piece::Queen => return false,
            }
        }
    }

    match minors {
        0 | 1 => true,
        // KNN v K and one minor each can still end in mate
        _ => knights == 0 && !(bishop_shades[0] && bishop_shades[1]),
    }
}

/// Determine the game status for the current position.
///
/// Priority (highest to lowest):
///  1) `Checkmate` / `Stalemate`
///  2) `DrawDeadPosition` (insufficient material)
///  3) `Check`
///  4) `InPlay`
pub fn position_status(state: &GameState) -> GameStatus {
    let in_check = state.in_check();
    if state.legal_moves().is_empty() {
        return if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
    }
    if is_insufficient_material(state.board()) {
        return GameStatus::DrawDeadPosition;
    }
    if in_check {
        GameStatus::Check
    } else {
        GameStatus::InPlay
    }
}
