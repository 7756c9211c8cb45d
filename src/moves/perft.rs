use crate::board::Piece;
use crate::game::GameState;
use crate::moves::types::Move;
use crate::output::report_line;
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 3; // only trace details for shallow nodes

const NO_PROMOTION: [Option<Piece>; 1] = [None];
const ALL_PROMOTIONS: [Option<Piece>; 4] = [
    Some(Piece::PROMOTION_CHOICES[0]),
    Some(Piece::PROMOTION_CHOICES[1]),
    Some(Piece::PROMOTION_CHOICES[2]),
    Some(Piece::PROMOTION_CHOICES[3]),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub ep_captures: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounters {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn add(&mut self, o: &PerftCounters) {
        self.nodes += o.nodes;
        self.captures += o.captures;
        self.ep_captures += o.ep_captures;
        self.castles += o.castles;
        self.promotions += o.promotions;
        self.checks += o.checks;
        self.checkmates += o.checkmates;
    }
}

/// Perft counts every promotion kind as its own node.
#[inline(always)]
fn promotion_choices(mv: &Move) -> &'static [Option<Piece>] {
    if mv.is_pawn_promotion {
        &ALL_PROMOTIONS
    } else {
        &NO_PROMOTION
    }
}

/// Make/undo pair around `f`. Undo right after a make cannot fail.
#[inline(always)]
fn with_move<R>(
    state: &mut GameState,
    mv: Move,
    promotion: Option<Piece>,
    f: impl FnOnce(&mut GameState) -> R,
) -> R {
    state.apply_move(mv, promotion);
    let out = f(state);
    let undone = state.undo_move();
    debug_assert!(undone.is_ok(), "undo after make failed: {undone:?}");
    out
}

fn perft_recursive(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.legal_moves();
    if depth == 1 {
        return moves
            .iter()
            .map(|mv| promotion_choices(mv).len() as u64)
            .sum();
    }

    let mut node_count = 0;
    for mv in moves {
        for &promo in promotion_choices(&mv) {
            node_count += with_move(state, mv, promo, |s| perft_recursive(s, depth - 1));
        }
    }
    node_count
}

#[instrument(skip(state), fields(depth))]
pub fn perft(state: &mut GameState, depth: u32) -> u64 {
    perft_recursive(state, depth)
}

/// Per-root-move node counts, promotion kinds listed separately.
pub fn perft_divide_rows(state: &mut GameState, depth: u32) -> Vec<(Move, u64)> {
    let mut rows = Vec::new();
    perft_divide_each(state, depth, |mv, count| rows.push((mv, count)));
    rows
}

/// Divide that hands each root row to `on_row` as soon as it is counted.
/// Rows carry their promotion kind. Returns the total.
pub fn perft_divide_each(
    state: &mut GameState,
    depth: u32,
    mut on_row: impl FnMut(Move, u64),
) -> u64 {
    if depth == 0 {
        return 0;
    }
    let moves = state.legal_moves();
    if depth <= MAX_LOG_DEPTH {
        debug!(depth, moves = moves.len(), "divide: root legal moves");
    }

    let mut total = 0;
    for mv in moves {
        for &promo in promotion_choices(&mv) {
            let count = with_move(state, mv, promo, |s| perft_recursive(s, depth - 1));
            let mut row = mv;
            row.promotion = promo;
            if depth <= MAX_LOG_DEPTH {
                debug!(mv = %row, nodes = count, "divide: root child total");
            }
            total += count;
            on_row(row, count);
        }
    }
    total
}

/// Number of rows a divide at this position prints.
pub fn perft_root_rows(state: &GameState) -> usize {
    state
        .legal_moves()
        .iter()
        .map(|mv| promotion_choices(mv).len())
        .sum()
}

#[instrument(skip(state), fields(depth))]
pub fn perft_divide(state: &mut GameState, depth: u32) -> u64 {
    let rows = perft_divide_rows(state, depth);
    let mut total = 0;
    for (mv, count) in &rows {
        report_line!("{}: {}", mv, count);
        total += count;
    }
    debug!(depth, total, "divide: total");
    report_line!("Total: {}", total);
    total
}

// Recursive implementation for breakdown. Move tags are counted on the last
// ply only, so the totals line up with the published perft tables.
fn perft_count_recursive(state: &mut GameState, depth: u32, out: &mut PerftCounters) {
    if depth == 0 {
        out.nodes += 1;

        if state.in_check() {
            out.checks += 1;
            if state.legal_moves().is_empty() {
                out.checkmates += 1;
            }
        }
        return;
    }

    for mv in state.legal_moves() {
        for &promo in promotion_choices(&mv) {
            if depth == 1 {
                tag_move(&mv, promo, out);
            }

            #[cfg(debug_assertions)]
            let before = state.clone();

            with_move(state, mv, promo, |s| perft_count_recursive(s, depth - 1, out));

            #[cfg(debug_assertions)]
            debug_assert_eq!(*state, before, "state changed across make/undo of {mv:#}");
        }
    }
}

#[inline]
fn tag_move(mv: &Move, promo: Option<Piece>, out: &mut PerftCounters) {
    if mv.is_capture() {
        out.captures += 1;
        if mv.is_en_passant {
            out.ep_captures += 1;
        }
    }
    if mv.is_castle {
        out.castles += 1;
    }
    if promo.is_some() {
        out.promotions += 1;
    }
}

#[instrument(skip(state, out), fields(depth))]
pub fn perft_count_with_breakdown(state: &mut GameState, depth: u32, out: &mut PerftCounters) {
    perft_count_recursive(state, depth, out);
}

pub fn perft_divide_with_breakdown(
    state: &mut GameState,
    depth: u32,
) -> Vec<(Move, PerftCounters)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = state.legal_moves();
    let mut out = Vec::with_capacity(moves.len());

    for mv in moves {
        for &promo in promotion_choices(&mv) {
            let mut pc = PerftCounters::zero();
            if depth == 1 {
                tag_move(&mv, promo, &mut pc);
            }
            with_move(state, mv, promo, |s| perft_count_recursive(s, depth - 1, &mut pc));
            let mut row = mv;
            row.promotion = promo;
            out.push((row, pc));
        }
    }
    out
}
