use crate::error::ChessError;
use crate::square::Square;
use std::fmt;

pub mod castle_rights;
pub(crate) mod fen_tables;
pub use castle_rights::CastleRights;

/// Back rank layout from the a-file to the h-file.
const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// Which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

/// Piece enum to hold all kinds of pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Contents of one square: `None` is empty.
pub type Cell = Option<(Color, Piece)>;

/// The 8×8 grid plus a cached king square per color.
///
/// Mutation is crate-private: a `GameState` is the only owner that moves
/// pieces, and every placement or removal keeps the king cache in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 8]; 8],
    kings: [Option<Square>; 2],
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn push.
    #[inline(always)]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start.
    #[inline(always)]
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row pawns may double-push from.
    #[inline(always)]
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Farthest row, where pawns promote.
    #[inline(always)]
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl Piece {
    /// Kinds a pawn may become, in the order perft expands them.
    pub const PROMOTION_CHOICES: [Piece; 4] =
        [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    #[inline(always)]
    pub fn is_promotion_choice(self) -> bool {
        !matches!(self, Piece::Pawn | Piece::King)
    }

    /// Lowercase letter used in coordinate notation (`e7e8q`).
    pub fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// Inverse of [`Piece::to_char`], case-insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }
}

impl Board {
    /// A board with no pieces at all. Not a valid position until both kings
    /// are placed.
    pub(crate) fn new_empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
            kings: [None; 2],
        }
    }

    /// The standard starting array.
    pub fn new() -> Self {
        let mut b = Board::new_empty();
        for (col, &piece) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            b.place(Square::new(Color::Black.home_row(), col), Color::Black, piece);
            b.place(Square::new(Color::Black.pawn_row(), col), Color::Black, Piece::Pawn);
            b.place(Square::new(Color::White.pawn_row(), col), Color::White, Piece::Pawn);
            b.place(Square::new(Color::White.home_row(), col), Color::White, piece);
        }
        b
    }

    /// Returns the piece and color at a given square, or None if empty.
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Cell {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    /// Returns just the piece at a given square (ignoring color), or None if empty.
    #[inline(always)]
    pub fn piece_type_at(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// Returns just the color at a given square, or None if empty.
    #[inline(always)]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    #[inline(always)]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Read-only grid for rendering, `rows()[0]` is rank 8.
    pub fn rows(&self) -> &[[Cell; 8]; 8] {
        &self.cells
    }

    /// Cached square of `color`'s king.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color as usize]
    }

    /// Every piece of one color, scanning from a8.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some((c, piece)) if c == color => Some((sq, piece)),
            _ => None,
        })
    }

    pub fn count(&self, color: Color, piece: Piece) -> usize {
        self.pieces(color).filter(|&(_, p)| p == piece).count()
    }

    /// Put a piece on `sq`, replacing whatever stood there.
    pub(crate) fn place(&mut self, sq: Square, color: Color, piece: Piece) {
        self.remove(sq);
        self.cells[sq.row() as usize][sq.col() as usize] = Some((color, piece));
        if piece == Piece::King {
            self.kings[color as usize] = Some(sq);
        }
    }

    /// Empty `sq` and hand back what was on it.
    pub(crate) fn remove(&mut self, sq: Square) -> Cell {
        let old = self.cells[sq.row() as usize][sq.col() as usize].take();
        if let Some((color, Piece::King)) = old
            && self.kings[color as usize] == Some(sq)
        {
            self.kings[color as usize] = None;
        }
        old
    }

    /// Write a cell back verbatim (used by undo).
    pub(crate) fn restore(&mut self, sq: Square, cell: Cell) {
        match cell {
            Some((color, piece)) => self.place(sq, color, piece),
            None => {
                self.remove(sq);
            }
        }
    }

    /// Exactly one king per color, and the cache points at it.
    pub fn validate(&self) -> Result<(), ChessError> {
        for color in [Color::White, Color::Black] {
            let kings: Vec<Square> = self
                .pieces(color)
                .filter(|&(_, p)| p == Piece::King)
                .map(|(sq, _)| sq)
                .collect();
            if kings.len() != 1 {
                return Err(ChessError::InvariantViolation(format!(
                    "{color:?} has {} kings",
                    kings.len()
                )));
            }
            if self.king_square(color) != Some(kings[0]) {
                return Err(ChessError::InvariantViolation(format!(
                    "{color:?} king cached at {:?} but stands on {}",
                    self.king_square(color),
                    kings[0]
                )));
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Text diagram, rank 8 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{} ", 8 - r)?;
            for cell in row {
                let c = match cell {
                    Some((color, piece)) => fen_tables::glyph(*color, *piece),
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests;
