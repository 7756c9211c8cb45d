// src/board/fen_tables.rs
// Glyph <-> (color, piece) lookups shared by FEN parsing and board printing.

use super::{Color, Piece};

const CHAR_TO_CELL: [Option<(Color, Piece)>; 128] = {
    let mut table: [Option<(Color, Piece)>; 128] = [None; 128];

    // Uppercase = White
    table['P' as usize] = Some((Color::White, Piece::Pawn));
    table['N' as usize] = Some((Color::White, Piece::Knight));
    table['B' as usize] = Some((Color::White, Piece::Bishop));
    table['R' as usize] = Some((Color::White, Piece::Rook));
    table['Q' as usize] = Some((Color::White, Piece::Queen));
    table['K' as usize] = Some((Color::White, Piece::King));

    // Lowercase = Black
    table['p' as usize] = Some((Color::Black, Piece::Pawn));
    table['n' as usize] = Some((Color::Black, Piece::Knight));
    table['b' as usize] = Some((Color::Black, Piece::Bishop));
    table['r' as usize] = Some((Color::Black, Piece::Rook));
    table['q' as usize] = Some((Color::Black, Piece::Queen));
    table['k' as usize] = Some((Color::Black, Piece::King));

    table
};

#[inline]
const fn cell_index(color: Color, piece: Piece) -> usize {
    (color as usize) * 6 + (piece as usize)
}

const CELL_TO_CHAR: [char; 12] = {
    let mut t = ['\0'; 12];
    t[cell_index(Color::White, Piece::Pawn)] = 'P';
    t[cell_index(Color::White, Piece::Knight)] = 'N';
    t[cell_index(Color::White, Piece::Bishop)] = 'B';
    t[cell_index(Color::White, Piece::Rook)] = 'R';
    t[cell_index(Color::White, Piece::Queen)] = 'Q';
    t[cell_index(Color::White, Piece::King)] = 'K';
    t[cell_index(Color::Black, Piece::Pawn)] = 'p';
    t[cell_index(Color::Black, Piece::Knight)] = 'n';
    t[cell_index(Color::Black, Piece::Bishop)] = 'b';
    t[cell_index(Color::Black, Piece::Rook)] = 'r';
    t[cell_index(Color::Black, Piece::Queen)] = 'q';
    t[cell_index(Color::Black, Piece::King)] = 'k';
    t
};

#[inline]
pub(crate) fn parse_glyph(c: char) -> Option<(Color, Piece)> {
    if c.is_ascii() {
        CHAR_TO_CELL[c as usize]
    } else {
        None
    }
}

#[inline]
pub(crate) fn glyph(color: Color, piece: Piece) -> char {
    CELL_TO_CHAR[cell_index(color, piece)]
}
