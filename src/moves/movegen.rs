use crate::board::{Board, CastleRights, Color, Piece};
use crate::moves::attacks::{KingSafety, analyze, is_square_attacked};
use crate::moves::rays::{Direction, knight_targets, ray};
use crate::moves::types::{Move, MoveBuffer, MoveKind};
use crate::square::Square;

/// Everything the per-piece generators read. Built once per position.
pub struct GenContext<'a> {
    pub board: &'a Board,
    pub side: Color,
    pub en_passant: Option<Square>,
    pub safety: &'a KingSafety,
}

/// Board columns a castle touches, for one wing.
struct CastleLane {
    rook_col: u8,
    king_to_col: u8,
    /// Must be empty.
    between: &'static [u8],
    /// Must not be attacked: the square the king crosses and the one it lands on.
    king_path: &'static [u8],
}

const KINGSIDE: CastleLane = CastleLane {
    rook_col: 7,
    king_to_col: 6,
    between: &[5, 6],
    king_path: &[5, 6],
};

const QUEENSIDE: CastleLane = CastleLane {
    rook_col: 0,
    king_to_col: 2,
    between: &[1, 2, 3],
    king_path: &[3, 2],
};

const KING_HOME_COL: u8 = 4;

/// Helper to push a plain move for `piece`
#[inline(always)]
fn push_move(ctx: &GenContext, from: Square, to: Square, piece: Piece, list: &mut impl MoveBuffer) {
    list.push(Move::build(
        from,
        to,
        (ctx.side, piece),
        ctx.board,
        MoveKind::Normal,
    ));
}

/// Empty squares and enemy pieces other than the king.
#[inline(always)]
fn is_target(ctx: &GenContext, to: Square) -> bool {
    match ctx.board.piece_at(to) {
        None => true,
        Some((color, piece)) => color != ctx.side && piece != Piece::King,
    }
}

fn generate_slider_moves(
    ctx: &GenContext,
    from: Square,
    piece: Piece,
    dirs: &[Direction],
    list: &mut impl MoveBuffer,
) {
    for &dir in dirs {
        if !ctx.safety.allows(from, dir) {
            continue;
        }
        for &to in ray(from, dir) {
            if is_target(ctx, to) {
                push_move(ctx, from, to, piece, list);
            }
            if !ctx.board.is_empty(to) {
                break;
            }
        }
    }
}

/// Would capturing en passant leave our own king attacked? Checked on a
/// copy with both pawns gone from their squares, which also catches the
/// case of two pawns shielding the king along a rank.
fn en_passant_is_safe(ctx: &GenContext, from: Square, to: Square) -> bool {
    let Some(king) = ctx.board.king_square(ctx.side) else {
        return true;
    };
    let mut hypothetical = ctx.board.clone();
    hypothetical.remove(Square::new(from.row(), to.col()));
    hypothetical.remove(from);
    hypothetical.place(to, ctx.side, Piece::Pawn);
    !is_square_attacked(&hypothetical, king, ctx.side.opposite())
}

pub fn generate_pawn_moves(ctx: &GenContext, from: Square, list: &mut impl MoveBuffer) {
    let side = ctx.side;
    let fwd = side.forward();

    // Pushes
    let push_dir = if fwd < 0 {
        Direction::North
    } else {
        Direction::South
    };
    if ctx.safety.allows(from, push_dir)
        && let Some(one) = from.offset(fwd, 0)
        && ctx.board.is_empty(one)
    {
        push_move(ctx, from, one, Piece::Pawn, list);
        if from.row() == side.pawn_row()
            && let Some(two) = one.offset(fwd, 0)
            && ctx.board.is_empty(two)
        {
            push_move(ctx, from, two, Piece::Pawn, list);
        }
    }

    // Captures, en passant included
    for dc in [-1, 1] {
        let (Some(to), Some(dir)) = (from.offset(fwd, dc), Direction::from_delta(fwd, dc)) else {
            continue;
        };
        if !ctx.safety.allows(from, dir) {
            continue;
        }
        match ctx.board.piece_at(to) {
            Some((color, piece)) if color != side && piece != Piece::King => {
                push_move(ctx, from, to, Piece::Pawn, list);
            }
            None if ctx.en_passant == Some(to) => {
                let victim = Square::new(from.row(), to.col());
                if ctx.board.piece_at(victim) == Some((side.opposite(), Piece::Pawn))
                    && en_passant_is_safe(ctx, from, to)
                {
                    list.push(Move::build(
                        from,
                        to,
                        (side, Piece::Pawn),
                        ctx.board,
                        MoveKind::EnPassant,
                    ));
                }
            }
            _ => {}
        }
    }
}

pub fn generate_knight_moves(ctx: &GenContext, from: Square, list: &mut impl MoveBuffer) {
    // A pinned knight can never stay on its pin line.
    if ctx.safety.pin_direction(from).is_some() {
        return;
    }
    for &to in knight_targets(from) {
        if is_target(ctx, to) {
            push_move(ctx, from, to, Piece::Knight, list);
        }
    }
}

pub fn generate_bishop_moves(ctx: &GenContext, from: Square, list: &mut impl MoveBuffer) {
    generate_slider_moves(ctx, from, Piece::Bishop, &Direction::DIAGONAL, list);
}

pub fn generate_rook_moves(ctx: &GenContext, from: Square, list: &mut impl MoveBuffer) {
    generate_slider_moves(ctx, from, Piece::Rook, &Direction::ORTHOGONAL, list);
}

pub fn generate_queen_moves(ctx: &GenContext, from: Square, list: &mut impl MoveBuffer) {
    generate_slider_moves(ctx, from, Piece::Queen, &Direction::ORTHOGONAL, list);
    generate_slider_moves(ctx, from, Piece::Queen, &Direction::DIAGONAL, list);
}

/// One step in each of the eight directions, kept only if the analyzer sees
/// no check from the destination.
pub fn generate_king_moves(ctx: &GenContext, from: Square, list: &mut impl MoveBuffer) {
    for dir in Direction::ALL {
        let Some(&to) = ray(from, dir).first() else {
            continue;
        };
        if !is_target(ctx, to) {
            continue;
        }
        if !analyze(ctx.board, to, ctx.side).in_check {
            push_move(ctx, from, to, Piece::King, list);
        }
    }
}

fn try_castle(ctx: &GenContext, king_from: Square, lane: &CastleLane, list: &mut impl MoveBuffer) {
    let row = king_from.row();
    let enemy = ctx.side.opposite();

    if ctx.board.piece_at(Square::new(row, lane.rook_col)) != Some((ctx.side, Piece::Rook)) {
        return;
    }
    if lane
        .between
        .iter()
        .any(|&col| !ctx.board.is_empty(Square::new(row, col)))
    {
        return;
    }
    if lane
        .king_path
        .iter()
        .any(|&col| is_square_attacked(ctx.board, Square::new(row, col), enemy))
    {
        return;
    }

    list.push(Move::build(
        king_from,
        Square::new(row, lane.king_to_col),
        (ctx.side, Piece::King),
        ctx.board,
        MoveKind::Castle,
    ));
}

/// Castles for the side to move. Guards itself against check, so callers may
/// run it unconditionally.
pub fn generate_castle_moves(ctx: &GenContext, rights: CastleRights, list: &mut impl MoveBuffer) {
    if ctx.safety.in_check {
        return;
    }
    let king_from = Square::new(ctx.side.home_row(), KING_HOME_COL);
    if ctx.board.piece_at(king_from) != Some((ctx.side, Piece::King)) {
        return;
    }
    if rights.kingside(ctx.side) {
        try_castle(ctx, king_from, &KINGSIDE, list);
    }
    if rights.queenside(ctx.side) {
        try_castle(ctx, king_from, &QUEENSIDE, list);
    }
}

#[inline]
pub fn generate_piece_moves(
    ctx: &GenContext,
    from: Square,
    piece: Piece,
    list: &mut impl MoveBuffer,
) {
    match piece {
        Piece::Pawn => generate_pawn_moves(ctx, from, list),
        Piece::Knight => generate_knight_moves(ctx, from, list),
        Piece::Bishop => generate_bishop_moves(ctx, from, list),
        Piece::Rook => generate_rook_moves(ctx, from, list),
        Piece::Queen => generate_queen_moves(ctx, from, list),
        Piece::King => generate_king_moves(ctx, from, list),
    }
}

/// Pin-aware moves for every piece of the side to move, castles excluded.
/// Resolving a check is left to the caller.
pub fn generate_pseudo_legal(ctx: &GenContext, list: &mut impl MoveBuffer) {
    for (from, piece) in ctx.board.pieces(ctx.side) {
        generate_piece_moves(ctx, from, piece, list);
    }
}
