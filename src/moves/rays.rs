// src/moves/rays.rs
// Compass directions and the per-square ray / knight-hop tables built from them.

use crate::square::Square;
use arrayvec::ArrayVec;
use once_cell::sync::Lazy;

/// One of the eight compass directions. North points at rank 8 (row 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Orthogonals first, then diagonals.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// (row, col) step.
    #[inline(always)]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }

    #[inline(always)]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    #[inline(always)]
    pub const fn is_orthogonal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    /// Same line through the origin, either way along it.
    #[inline(always)]
    pub fn same_axis(self, other: Direction) -> bool {
        self == other || self == other.opposite()
    }

    /// Direction of a one-step (row, col) delta, if it is one.
    pub fn from_delta(dr: i8, dc: i8) -> Option<Self> {
        Direction::ALL.into_iter().find(|d| d.delta() == (dr, dc))
    }
}

/// Knight hops as (row, col) deltas.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

type RayTable = Vec<[ArrayVec<Square, 7>; 8]>;

static RAYS: Lazy<RayTable> = Lazy::new(|| {
    Square::all()
        .map(|from| {
            Direction::ALL.map(|dir| {
                let (dr, dc) = dir.delta();
                let mut ray = ArrayVec::new();
                let mut cur = from;
                while let Some(next) = cur.offset(dr, dc) {
                    ray.push(next);
                    cur = next;
                }
                ray
            })
        })
        .collect()
});

static KNIGHT_TARGETS: Lazy<Vec<ArrayVec<Square, 8>>> = Lazy::new(|| {
    Square::all()
        .map(|from| {
            KNIGHT_OFFSETS
                .iter()
                .filter_map(|&(dr, dc)| from.offset(dr, dc))
                .collect()
        })
        .collect()
});

/// Squares walked from `from` (exclusive) to the board edge along `dir`.
#[inline(always)]
pub fn ray(from: Square, dir: Direction) -> &'static [Square] {
    &RAYS[from.index()][dir as usize]
}

/// On-board knight destinations from `from`.
#[inline(always)]
pub fn knight_targets(from: Square) -> &'static [Square] {
    &KNIGHT_TARGETS[from.index()]
}
