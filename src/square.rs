use crate::error::ChessError;
use std::fmt;
use std::str::FromStr;

/// A board coordinate. Row 0 is rank 8, row 7 is rank 1; col 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Build a square from row/col. Both must be in `0..8`.
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Square { row, col }
    }

    /// Like [`Square::new`] but returns `None` when off the board.
    #[inline]
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline(always)]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Dense 0..64 index, row-major from a8.
    #[inline(always)]
    pub const fn index(self) -> usize {
        (self.row as usize) * 8 + self.col as usize
    }

    #[inline(always)]
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < 64, "square index out of range: {idx}");
        Square::new((idx / 8) as u8, (idx % 8) as u8)
    }

    /// Step by a (row, col) delta, `None` if that leaves the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Square::try_new(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Iterate all 64 squares, a8 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        Ok(Square::new(7 - rank, file))
    }
}
