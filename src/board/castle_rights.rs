// src/board/castle_rights.rs

use super::Color;
use std::fmt;

/// Castling eligibility for both sides.
///
/// This is a plain `Copy` value: snapshots pushed into the game's rights log
/// are independent of the live rights and never alias them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastleRights {
    pub const ALL: CastleRights = CastleRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastleRights = CastleRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    #[inline(always)]
    pub fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    #[inline(always)]
    pub fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    pub fn clear_kingside(&mut self, color: Color) {
        match color {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
        }
    }

    pub fn clear_queenside(&mut self, color: Color) {
        match color {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
        }
    }

    /// King moved: both sides are gone for good.
    pub fn clear_color(&mut self, color: Color) {
        self.clear_kingside(color);
        self.clear_queenside(color);
    }

    /// Clear whichever right depends on a rook standing on `(row, col)`.
    /// Squares other than the four home corners are ignored.
    pub fn clear_for_rook_square(&mut self, color: Color, row: u8, col: u8) {
        if row != color.home_row() {
            return;
        }
        match col {
            0 => self.clear_queenside(color),
            7 => self.clear_kingside(color),
            _ => {}
        }
    }

    pub fn any(self) -> bool {
        self.white_kingside || self.white_queenside || self.black_kingside || self.black_queenside
    }
}

impl Default for CastleRights {
    fn default() -> Self {
        CastleRights::ALL
    }
}

/// FEN castling field: `KQkq`, a subset of it, or `-`.
impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.any() {
            return write!(f, "-");
        }
        let flags = [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ];
        for (held, glyph) in flags {
            if held {
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_corner_clears_only_its_side() {
        let mut rights = CastleRights::ALL;
        rights.clear_for_rook_square(Color::White, 7, 0);
        assert!(!rights.white_queenside);
        assert!(rights.white_kingside);
        assert!(rights.black_queenside);

        // A black rook on a1 says nothing about black's rights.
        rights.clear_for_rook_square(Color::Black, 7, 0);
        assert!(rights.black_queenside);

        rights.clear_for_rook_square(Color::Black, 0, 7);
        assert!(!rights.black_kingside);
    }

    #[test]
    fn snapshots_are_independent_values() {
        let mut live = CastleRights::ALL;
        let log = vec![live];
        live.clear_color(Color::White);
        assert_eq!(log[0], CastleRights::ALL);
        assert_ne!(live, log[0]);
    }

    #[test]
    fn fen_field_formatting() {
        assert_eq!(CastleRights::ALL.to_string(), "KQkq");
        assert_eq!(CastleRights::NONE.to_string(), "-");
        let mut r = CastleRights::ALL;
        r.clear_kingside(Color::White);
        r.clear_queenside(Color::Black);
        assert_eq!(r.to_string(), "Qk");
    }
}
