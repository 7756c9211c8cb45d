pub mod board;
pub mod error;
pub mod game;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub(crate) mod output;
pub mod square;
pub mod status;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use board::{Board, CastleRights, Color, Piece};
pub use error::ChessError;
pub use game::GameState;
pub use moves::types::Move;
pub use square::Square;
pub use status::{GameStatus, position_status};
