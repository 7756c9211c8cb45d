use crate::board::{Board, CastleRights, Color, Piece};
use crate::error::ChessError;
use crate::moves::attacks::{self, Check, analyze};
use crate::moves::movegen::{
    GenContext, generate_castle_moves, generate_king_moves, generate_pseudo_legal,
};
use crate::moves::rays::ray;
use crate::moves::types::Move;
use crate::square::Square;
use arrayvec::ArrayVec;
use std::str::FromStr;
use tracing::{debug, error};

mod fen;

pub use fen::START_FEN;

/// The authoritative state of one game.
///
/// Every history log grows by exactly one entry per `make_move` and shrinks
/// by one per `undo_move`. `castle_log` is seeded with the starting rights, so
/// it is always one longer than `move_log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) en_passant: Option<Square>,
    pub(crate) castle_rights: CastleRights,
    pub(crate) castle_log: Vec<CastleRights>,
    pub(crate) en_passant_log: Vec<Option<Square>>,
    pub(crate) move_log: Vec<Move>,
}

impl GameState {
    /// Standard starting position, white to move, all rights held.
    pub fn new() -> Self {
        GameState::from_parts(Board::new(), Color::White, CastleRights::ALL, None)
    }

    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        castle_rights: CastleRights,
        en_passant: Option<Square>,
    ) -> Self {
        GameState {
            board,
            side_to_move,
            en_passant,
            castle_rights,
            castle_log: vec![castle_rights],
            en_passant_log: Vec::new(),
            move_log: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Square a pawn may capture onto en passant this ply.
    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline(always)]
    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    pub fn castle_log(&self) -> &[CastleRights] {
        &self.castle_log
    }

    pub fn en_passant_log(&self) -> &[Option<Square>] {
        &self.en_passant_log
    }

    /// Moves played so far, oldest first, with promotion kinds recorded.
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Legal moves for the side to move.
    ///
    /// # Panics
    /// If the position breaks a board invariant. Use
    /// [`GameState::try_legal_moves`] to get the error instead.
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.try_legal_moves() {
            Ok(moves) => moves,
            Err(e) => {
                error!(error = %e, fen = %self.to_fen(), "legal move generation failed");
                panic!("{e}");
            }
        }
    }

    pub fn try_legal_moves(&self) -> Result<Vec<Move>, ChessError> {
        let side = self.side_to_move;
        let king = self.board.king_square(side).ok_or_else(|| {
            ChessError::InvariantViolation(format!("{side:?} king is missing"))
        })?;

        let safety = analyze(&self.board, king, side);
        let ctx = GenContext {
            board: &self.board,
            side,
            en_passant: self.en_passant,
            safety: &safety,
        };

        let mut moves = Vec::with_capacity(64);
        if safety.is_double_check() {
            generate_king_moves(&ctx, king, &mut moves);
        } else {
            generate_pseudo_legal(&ctx, &mut moves);
            if let Some(check) = safety.checks.first() {
                let targets = check_resolution_squares(king, check);
                // En passant was already verified on a board with the
                // capture played, so it needs no second look here.
                moves.retain(|mv| {
                    mv.piece_moved.1 == Piece::King
                        || mv.is_en_passant
                        || targets.contains(&mv.to)
                });
            }
        }
        generate_castle_moves(&ctx, self.castle_rights, &mut moves);

        ensure_unique(&moves)?;

        #[cfg(feature = "paranoid_checks")]
        self.cross_check(&moves)?;

        debug!(
            side = ?side,
            in_check = safety.in_check,
            moves = moves.len(),
            "legal moves"
        );
        Ok(moves)
    }

    /// The legal move between two squares, if there is one.
    pub fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to)
    }

    /// Resolve coordinate notation (`e2e4`, `e7e8q`) to a legal move and the
    /// promotion kind it names.
    pub fn parse_move(&self, text: &str) -> Result<(Move, Option<Piece>), ChessError> {
        let bad = || ChessError::InvalidNotation(text.to_string());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(bad());
        }
        let from = Square::from_str(&text[0..2]).map_err(|_| bad())?;
        let to = Square::from_str(&text[2..4]).map_err(|_| bad())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => Some(Piece::from_char(c).ok_or_else(bad)?),
        };
        let mv = self.find_move(from, to).ok_or_else(bad)?;
        Ok((mv, promotion))
    }

    pub fn in_check(&self) -> bool {
        attacks::in_check(&self.board, self.side_to_move)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.legal_moves().is_empty()
    }

    /// Play every move on a copy and probe the mover's king directly.
    #[cfg(feature = "paranoid_checks")]
    fn cross_check(&self, moves: &[Move]) -> Result<(), ChessError> {
        let side = self.side_to_move;
        for &mv in moves {
            let mut next = self.clone();
            let promotion = mv.is_pawn_promotion.then_some(Piece::Queen);
            next.apply_move(mv, promotion);
            if attacks::in_check(&next.board, side) {
                return Err(ChessError::InvariantViolation(format!(
                    "{mv:#} leaves the {side:?} king attacked in {}",
                    self.to_fen()
                )));
            }
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

/// Squares a non-king move may land on to answer a single check: the checker
/// itself, plus every square between it and the king for a slider.
fn check_resolution_squares(king: Square, check: &Check) -> ArrayVec<Square, 7> {
    let mut out = ArrayVec::new();
    match check.direction {
        None => out.push(check.square),
        Some(dir) => {
            for &sq in ray(king, dir) {
                out.push(sq);
                if sq == check.square {
                    break;
                }
            }
        }
    }
    out
}

/// Two moves with the same origin and destination would be indistinguishable
/// to `make_move`.
fn ensure_unique(moves: &[Move]) -> Result<(), ChessError> {
    let mut seen = [0u64; 64];
    for mv in moves {
        let bit = 1u64 << mv.to.index();
        let slot = &mut seen[mv.from.index()];
        if *slot & bit != 0 {
            return Err(ChessError::InvariantViolation(format!(
                "generator produced {mv} twice"
            )));
        }
        *slot |= bit;
    }
    Ok(())
}
