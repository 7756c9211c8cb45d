use wasm_bindgen::prelude::*;

use crate::board::Color;
use crate::game::GameState;
use crate::moves::types::Move;
use crate::square::Square;
use crate::status::{GameStatus, position_status};
use std::str::FromStr;

#[wasm_bindgen]
pub struct ChessGame {
    state: GameState,
}

fn json_move_list<'a>(moves: impl Iterator<Item = &'a Move>) -> String {
    let items: Vec<String> = moves.map(|m| format!("\"{}\"", m.to_uci())).collect();
    format!("[{}]", items.join(","))
}

#[wasm_bindgen]
impl ChessGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChessGame {
        console_error_panic_hook::set_once();
        ChessGame {
            state: GameState::new(),
        }
    }

    /// Reset to the starting position.
    pub fn new_game(&mut self) {
        self.state = GameState::new();
    }

    /// Set position from FEN string. Returns true on success.
    pub fn set_position_fen(&mut self, fen: &str) -> bool {
        match GameState::from_str(fen) {
            Ok(state) => {
                self.state = state;
                true
            }
            Err(_) => false,
        }
    }

    pub fn get_fen(&self) -> String {
        self.state.to_fen()
    }

    /// Get all legal moves as a JSON array: ["e2e4", "d2d4", ...]
    pub fn get_legal_moves(&self) -> String {
        json_move_list(self.state.legal_moves().iter())
    }

    /// Legal moves from one square (e.g. "e2"); empty array for a bad square.
    pub fn get_legal_moves_for_square(&self, square: &str) -> String {
        let Ok(from) = Square::from_str(square) else {
            return "[]".to_string();
        };
        let moves = self.state.legal_moves();
        json_move_list(moves.iter().filter(|m| m.from == from))
    }

    /// Get whose turn it is: "white" or "black"
    pub fn side_to_move(&self) -> String {
        match self.state.side_to_move() {
            Color::White => "white".to_string(),
            Color::Black => "black".to_string(),
        }
    }

    pub fn is_move_legal(&self, uci_move: &str) -> bool {
        self.state.parse_move(uci_move).is_ok()
    }

    /// Make a move and return success status.
    /// Returns JSON: {"valid": true/false, "fen": "...", "status": "...", "error": "..."}
    /// where "error" is a fixed code such as "invalid_notation".
    pub fn make_move(&mut self, uci_move: &str) -> String {
        let result = self
            .state
            .parse_move(uci_move)
            .and_then(|(mv, promo)| self.state.make_move(mv, promo));
        match result {
            Ok(()) => format!(
                r#"{{"valid":true,"fen":"{}","status":"{}"}}"#,
                self.state.to_fen(),
                self.status_text()
            ),
            Err(e) => format!(
                r#"{{"valid":false,"fen":"","status":"","error":"{}"}}"#,
                e.code()
            ),
        }
    }

    /// Take back the last move. Returns the undone move, or "" if there was none.
    pub fn undo_move(&mut self) -> String {
        self.state
            .undo_move()
            .map(|mv| mv.to_uci())
            .unwrap_or_default()
    }

    /// "active", "check", "checkmate", "stalemate" or "draw_dead"
    pub fn get_game_status(&self) -> String {
        self.status_text().to_string()
    }

    /// Board as a JSON array of 8 strings, rank 8 first, '.' for empty.
    pub fn get_board(&self) -> String {
        let rows: Vec<String> = self
            .state
            .board()
            .to_string()
            .lines()
            .take(8)
            .map(|line| format!("\"{}\"", line[3..].replace(' ', "")))
            .collect();
        format!("[{}]", rows.join(","))
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        ChessGame::new()
    }
}

// Private helper methods (not exposed to JS)
impl ChessGame {
    fn status_text(&self) -> &'static str {
        match position_status(&self.state) {
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::DrawDeadPosition => "draw_dead",
            GameStatus::Check => "check",
            GameStatus::InPlay => "active",
        }
    }
}
