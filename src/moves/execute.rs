use crate::board::{Color, Piece};
use crate::error::ChessError;
use crate::game::GameState;
use crate::moves::types::Move;
use crate::square::Square;
use tracing::{debug, warn};

/// Rook origin and destination for a castling king move.
#[inline(always)]
fn rook_castle_squares(mv: &Move) -> (Square, Square) {
    let row = mv.from.row();
    if mv.is_kingside_castle() {
        (Square::new(row, 7), Square::new(row, 5))
    } else {
        (Square::new(row, 0), Square::new(row, 3))
    }
}

#[cfg(debug_assertions)]
#[inline]
fn debug_assert_valid(board: &crate::board::Board) {
    debug_assert_eq!(board.validate(), Ok(()), "board invariant broken:\n{board}");
}

impl GameState {
    /// Play `mv` if it is legal here.
    ///
    /// Only the origin and destination of `mv` are looked at; the flags come
    /// from the matching generated move. `promotion` must be given exactly
    /// when the move promotes a pawn.
    pub fn make_move(&mut self, mv: Move, promotion: Option<Piece>) -> Result<(), ChessError> {
        let Some(legal) = self.find_move(mv.from, mv.to) else {
            warn!(mv = %mv, fen = %self.to_fen(), "rejected illegal move");
            return Err(ChessError::InvalidMove(mv));
        };

        match (legal.is_pawn_promotion, promotion) {
            (true, None) => return Err(ChessError::MissingPromotionChoice(legal)),
            (true, Some(kind)) if !kind.is_promotion_choice() => {
                return Err(ChessError::InvalidPromotion(kind));
            }
            (false, Some(kind)) => return Err(ChessError::InvalidPromotion(kind)),
            _ => {}
        }

        self.apply_move(legal, promotion);
        Ok(())
    }

    /// Apply a move already known to be legal. Promotions without a kind
    /// become queens.
    pub(crate) fn apply_move(&mut self, mv: Move, promotion: Option<Piece>) {
        let (color, piece) = mv.piece_moved;
        debug_assert_eq!(color, self.side_to_move, "moving out of turn: {mv:#}");

        self.en_passant_log.push(self.en_passant);

        self.board.remove(mv.from);
        if mv.is_en_passant {
            self.board.remove(mv.en_passant_victim());
        }
        let placed = if mv.is_pawn_promotion {
            promotion.unwrap_or(Piece::Queen)
        } else {
            piece
        };
        self.board.place(mv.to, color, placed);

        if mv.is_castle {
            let (rook_from, rook_to) = rook_castle_squares(&mv);
            self.board.remove(rook_from);
            self.board.place(rook_to, color, Piece::Rook);
        }

        // Rights only ever shrink going forward.
        let mut rights = self.castle_rights;
        match piece {
            Piece::King => rights.clear_color(color),
            Piece::Rook => rights.clear_for_rook_square(color, mv.from.row(), mv.from.col()),
            _ => {}
        }
        if let Some((victim, Piece::Rook)) = mv.piece_captured {
            rights.clear_for_rook_square(victim, mv.to.row(), mv.to.col());
        }
        self.castle_rights = rights;
        self.castle_log.push(rights);

        self.en_passant = if mv.is_double_pawn_push() {
            Some(Square::new((mv.from.row() + mv.to.row()) / 2, mv.from.col()))
        } else {
            None
        };

        let mut logged = mv;
        logged.promotion = mv.is_pawn_promotion.then_some(placed);
        self.move_log.push(logged);
        self.side_to_move = color.opposite();

        debug!(mv = %logged, ply = self.move_log.len(), "make");

        #[cfg(debug_assertions)]
        debug_assert_valid(&self.board);
    }

    /// Take back the last move and return it.
    pub fn undo_move(&mut self) -> Result<Move, ChessError> {
        if self.move_log.is_empty() {
            return Err(ChessError::EmptyHistory);
        }
        if self.castle_log.len() != self.move_log.len() + 1
            || self.en_passant_log.len() != self.move_log.len()
        {
            return Err(ChessError::InvariantViolation(format!(
                "history logs out of step: {} moves, {} rights, {} en passant",
                self.move_log.len(),
                self.castle_log.len(),
                self.en_passant_log.len()
            )));
        }
        let Some(mv) = self.move_log.pop() else {
            return Err(ChessError::EmptyHistory);
        };
        let color: Color = mv.piece_moved.0;

        self.board.restore(mv.from, Some(mv.piece_moved));
        if mv.is_en_passant {
            self.board.remove(mv.to);
            self.board.restore(mv.en_passant_victim(), mv.piece_captured);
        } else {
            self.board.restore(mv.to, mv.piece_captured);
        }

        if mv.is_castle {
            let (rook_from, rook_to) = rook_castle_squares(&mv);
            self.board.remove(rook_to);
            self.board.place(rook_from, color, Piece::Rook);
        }

        self.castle_log.pop();
        if let Some(&rights) = self.castle_log.last() {
            self.castle_rights = rights;
        }
        self.en_passant = self.en_passant_log.pop().flatten();
        self.side_to_move = color;

        debug!(mv = %mv, ply = self.move_log.len(), "undo");

        #[cfg(debug_assertions)]
        debug_assert_valid(&self.board);

        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn castle_moves_the_rook_and_back() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let before = state.clone();
        let castle = state.find_move(sq("e1"), sq("g1")).unwrap();
        assert!(castle.is_castle);

        state.make_move(castle, None).unwrap();
        assert_eq!(state.board().piece_at(sq("f1")), Some((Color::White, Piece::Rook)));
        assert!(state.board().is_empty(sq("h1")));
        assert!(!state.castle_rights().white_kingside);
        assert!(!state.castle_rights().white_queenside);
        assert!(state.castle_rights().black_kingside);

        state.undo_move().unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn capturing_a_home_rook_clears_the_victims_right() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = state.find_move(sq("a1"), sq("a8")).unwrap();
        state.make_move(mv, None).unwrap();
        let rights = state.castle_rights();
        assert!(!rights.white_queenside, "rook left a1");
        assert!(!rights.black_queenside, "rook on a8 was taken");
        assert!(rights.white_kingside && rights.black_kingside);
    }

    #[test]
    fn promotion_kind_is_recorded_and_undone() {
        let mut state = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = state.find_move(sq("b7"), sq("b8")).unwrap();
        assert!(mv.is_pawn_promotion);

        state.make_move(mv, Some(Piece::Knight)).unwrap();
        assert_eq!(state.board().piece_at(sq("b8")), Some((Color::White, Piece::Knight)));
        assert_eq!(state.move_log()[0].promotion, Some(Piece::Knight));
        assert_eq!(state.move_log()[0].to_string(), "b7b8n");

        let undone = state.undo_move().unwrap();
        assert_eq!(undone.promotion, Some(Piece::Knight));
        assert_eq!(state.board().piece_at(sq("b7")), Some((Color::White, Piece::Pawn)));
        assert!(state.board().is_empty(sq("b8")));
    }
}
