// Reduced FEN: placement, side to move, castling, en passant.
// Move clocks are accepted on input and never written.

use super::GameState;
use crate::board::fen_tables::{glyph, parse_glyph};
use crate::board::{Board, CastleRights, Color, Piece};
use crate::error::ChessError;
use crate::moves::attacks;
use crate::square::Square;
use std::fmt;
use std::str::FromStr;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

fn invalid(msg: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(msg.into())
}

fn parse_placement(field: &str) -> Result<Board, ChessError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut board = Board::new_empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0u8;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(invalid(format!("bad empty-run '{c}' in rank {rank}")));
                }
                col += skip as u8;
            } else {
                let (color, piece) =
                    parse_glyph(c).ok_or_else(|| invalid(format!("unknown piece '{c}'")))?;
                if col >= 8 {
                    return Err(invalid(format!("rank {rank} is longer than 8 squares")));
                }
                if piece == Piece::King && board.king_square(color).is_some() {
                    return Err(invalid(format!("more than one {color:?} king")));
                }
                board.place(Square::new(row as u8, col), color, piece);
                col += 1;
            }
            if col > 8 {
                return Err(invalid(format!("rank {rank} is longer than 8 squares")));
            }
        }
        if col != 8 {
            return Err(invalid(format!("rank {rank} covers {col} squares, not 8")));
        }
    }
    Ok(board)
}

fn parse_side(field: &str) -> Result<Color, ChessError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("side to move must be 'w' or 'b', got '{field}'"))),
    }
}

fn parse_castling(field: &str) -> Result<CastleRights, ChessError> {
    let mut rights = CastleRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let flag = match c {
            'K' => &mut rights.white_kingside,
            'Q' => &mut rights.white_queenside,
            'k' => &mut rights.black_kingside,
            'q' => &mut rights.black_queenside,
            _ => return Err(invalid(format!("bad castling flag '{c}'"))),
        };
        if *flag {
            return Err(invalid(format!("castling flag '{c}' repeated")));
        }
        *flag = true;
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, ChessError> {
    if field == "-" {
        return Ok(None);
    }
    Square::from_str(field)
        .map(Some)
        .map_err(|_| invalid(format!("bad en passant square '{field}'")))
}

/// A right is only meaningful while its king and rook are still at home.
fn check_castle_pieces(board: &Board, rights: CastleRights) -> Result<(), ChessError> {
    for color in [Color::White, Color::Black] {
        let row = color.home_row();
        let king_home = board.piece_at(Square::new(row, 4)) == Some((color, Piece::King));
        let wings = [
            (rights.kingside(color), 7u8, "kingside"),
            (rights.queenside(color), 0u8, "queenside"),
        ];
        for (held, rook_col, wing) in wings {
            if !held {
                continue;
            }
            let rook_home = board.piece_at(Square::new(row, rook_col)) == Some((color, Piece::Rook));
            if !king_home || !rook_home {
                return Err(invalid(format!(
                    "{color:?} {wing} castling claimed without king and rook at home"
                )));
            }
        }
    }
    Ok(())
}

/// The target must sit right behind a pawn of the side that just moved.
fn check_en_passant(board: &Board, side: Color, ep: Square) -> Result<(), ChessError> {
    let pusher = side.opposite();
    let expected_row = (pusher.pawn_row() as i8 + pusher.forward()) as u8;
    if ep.row() != expected_row {
        return Err(invalid(format!("en passant square {ep} is on the wrong rank")));
    }
    let pawn_sq = ep.offset(pusher.forward(), 0);
    if !board.is_empty(ep) || pawn_sq.and_then(|sq| board.piece_at(sq)) != Some((pusher, Piece::Pawn))
    {
        return Err(invalid(format!(
            "en passant square {ep} has no pushed pawn in front of it"
        )));
    }
    Ok(())
}

impl GameState {
    /// Parse a position. Clock fields, if present, are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(invalid("need at least placement and side to move"));
        }
        if fields.len() > 6 {
            return Err(invalid(format!("too many fields ({})", fields.len())));
        }

        let board = parse_placement(fields[0])?;
        let side = parse_side(fields[1])?;
        let rights = parse_castling(fields.get(2).copied().unwrap_or("-"))?;
        let en_passant = parse_en_passant(fields.get(3).copied().unwrap_or("-"))?;
        for clock in fields.iter().skip(4) {
            clock
                .parse::<u32>()
                .map_err(|_| invalid(format!("bad move clock '{clock}'")))?;
        }

        board.validate().map_err(|e| invalid(e.to_string()))?;
        for (sq, piece) in [Color::White, Color::Black]
            .into_iter()
            .flat_map(|color| board.pieces(color))
        {
            if piece == Piece::Pawn && (sq.row() == 0 || sq.row() == 7) {
                return Err(invalid(format!("pawn on back rank at {sq}")));
            }
        }
        check_castle_pieces(&board, rights)?;
        if let Some(ep) = en_passant {
            check_en_passant(&board, side, ep)?;
        }
        if attacks::in_check(&board, side.opposite()) {
            return Err(invalid(format!(
                "{:?} is in check but it is {side:?} to move",
                side.opposite()
            )));
        }

        Ok(GameState::from_parts(board, side, rights, en_passant))
    }

    /// The four reduced-FEN fields for the current position.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(64);
        for (r, row) in self.board.rows().iter().enumerate() {
            let mut empty = 0;
            for cell in row {
                match cell {
                    Some((color, piece)) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(glyph(*color, *piece));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if r < 7 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });
        out.push(' ');
        out.push_str(&self.castle_rights.to_string());
        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }
        out
    }
}

impl FromStr for GameState {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::from_fen(s)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
