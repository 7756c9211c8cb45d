use crate::board::{Board, Cell, Color, Piece};
use crate::square::Square;
use arrayvec::ArrayVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

pub trait MoveBuffer: Deref<Target = [Move]> + DerefMut {
    fn push(&mut self, mv: Move);
    fn clear(&mut self);
}

impl MoveBuffer for Vec<Move> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<const N: usize> MoveBuffer for ArrayVec<Move, N> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// How a generator wants a move built; the special kinds cannot be read off
/// the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveKind {
    Normal,
    EnPassant,
    Castle,
}

/// One ply.
///
/// Identity is the origin/destination pair only: two moves between the same
/// squares compare equal whatever their flags. The generator never produces
/// two such moves in one position, which is why a promotion is a single move
/// and the promotion kind is chosen at `make_move` time.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece_moved: (Color, Piece),
    /// For en passant this is the pawn beside the origin, not the (empty)
    /// destination.
    pub piece_captured: Cell,
    pub is_en_passant: bool,
    pub is_castle: bool,
    pub is_pawn_promotion: bool,
    /// Kind the pawn became. Only set on moves taken from the move log (or
    /// perft rows).
    pub promotion: Option<Piece>,
}

impl Move {
    /// Build a move from whatever stands on `from`. `None` if it is empty.
    pub fn new(from: Square, to: Square, board: &Board) -> Option<Self> {
        let moved = board.piece_at(from)?;
        Some(Move::build(from, to, moved, board, MoveKind::Normal))
    }

    pub(crate) fn build(
        from: Square,
        to: Square,
        moved: (Color, Piece),
        board: &Board,
        kind: MoveKind,
    ) -> Self {
        let (color, piece) = moved;
        let piece_captured = match kind {
            MoveKind::EnPassant => board.piece_at(Square::new(from.row(), to.col())),
            MoveKind::Castle => None,
            MoveKind::Normal => board.piece_at(to),
        };
        Move {
            from,
            to,
            piece_moved: moved,
            piece_captured,
            is_en_passant: kind == MoveKind::EnPassant,
            is_castle: kind == MoveKind::Castle,
            is_pawn_promotion: piece == Piece::Pawn && to.row() == color.promotion_row(),
            promotion: None,
        }
    }

    /// Square of the pawn removed by an en-passant capture.
    #[inline(always)]
    pub fn en_passant_victim(&self) -> Square {
        Square::new(self.from.row(), self.to.col())
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    #[inline(always)]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece_moved.1 == Piece::Pawn && self.from.row().abs_diff(self.to.row()) == 2
    }

    #[inline(always)]
    pub fn is_kingside_castle(&self) -> bool {
        self.is_castle && self.to.col() > self.from.col()
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }

        // "{:#}" adds a tag for the special kinds
        if f.alternate() {
            if self.is_castle {
                write!(f, " (castle)")?;
            } else if self.is_en_passant {
                write!(f, " (ep)")?;
            } else if self.is_capture() {
                write!(f, " (x)")?;
            }
        }
        Ok(())
    }
}
