use std::str::FromStr;

use ply::status::is_insufficient_material;
use ply::{GameState, GameStatus, position_status};

fn status(fen: &str) -> GameStatus {
    position_status(&GameState::from_str(fen).unwrap())
}

#[test]
fn start_position_is_in_play() {
    assert_eq!(position_status(&GameState::new()), GameStatus::InPlay);
}

#[test]
fn fools_mate_is_checkmate() {
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let state = GameState::from_str(fen).unwrap();
    assert!(state.in_check());
    assert!(state.is_checkmate());
    assert!(!state.is_stalemate());
    assert_eq!(position_status(&state), GameStatus::Checkmate);
    assert!(GameStatus::Checkmate.is_over());
}

#[test]
fn fools_mate_played_out() {
    let mut state = GameState::new();
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let (mv, promo) = state.parse_move(text).unwrap();
        state.make_move(mv, promo).unwrap();
    }
    assert!(state.legal_moves().is_empty());
    assert_eq!(position_status(&state), GameStatus::Checkmate);

    state.undo_move().unwrap();
    assert_eq!(position_status(&state), GameStatus::InPlay);
}

#[test]
fn cornered_king_is_stalemated() {
    let state = GameState::from_str("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(!state.in_check());
    assert!(state.is_stalemate());
    assert!(!state.is_checkmate());
    assert_eq!(position_status(&state), GameStatus::Stalemate);
}

#[test]
fn check_with_escapes_is_reported_as_check() {
    assert_eq!(status("4k3/8/8/8/8/8/8/4RK2 b - - 0 1"), GameStatus::Check);
    assert!(!GameStatus::Check.is_over());
}

#[test]
fn back_rank_mate() {
    assert_eq!(
        status("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"),
        GameStatus::Checkmate
    );
}

#[test]
fn dead_positions() {
    for fen in [
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1",            // K v K
        "4k3/8/8/8/8/8/8/2B1K3 w - - 0 1",          // KB v K
        "4k3/8/8/8/8/8/8/1N2K3 b - - 0 1",          // KN v K
        "2b1k3/8/8/8/8/8/8/4KB2 w - - 0 1",         // KB v KB, same shade
        "4k3/8/8/8/8/4B3/8/2B1K3 w - - 0 1",        // KBB v K, same shade
    ] {
        assert_eq!(status(fen), GameStatus::DrawDeadPosition, "{fen}");
    }
}

#[test]
fn knight_mate_is_not_a_dead_draw() {
    let state = GameState::from_str("6nk/5N2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(state.is_checkmate());
    assert_eq!(position_status(&state), GameStatus::Checkmate);

    // KNN v K in check with one escape: still a game
    let state = GameState::from_str("k7/2K5/1N6/8/8/8/8/6N1 b - - 0 1").unwrap();
    assert_eq!(state.legal_moves().len(), 1);
    assert!(!is_insufficient_material(state.board()));
    assert_eq!(position_status(&state), GameStatus::Check);
}

#[test]
fn mixed_minor_endings_keep_playing() {
    for fen in [
        "4k3/8/8/8/8/8/8/1NN1K3 w - - 0 1",  // KNN v K
        "2b1k3/8/8/8/8/8/8/1N2K3 w - - 0 1", // KN v KB
        "1n2k3/8/8/8/8/8/8/1N2K3 w - - 0 1", // KN v KN
        "2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1", // KB v KB, opposite shades
    ] {
        let state = GameState::from_str(fen).unwrap();
        assert!(!is_insufficient_material(state.board()), "{fen}");
        assert_eq!(position_status(&state), GameStatus::InPlay, "{fen}");
    }
}

#[test]
fn mating_material_is_not_dead() {
    for fen in [
        "4k3/8/8/8/8/8/8/2BBK3 w - - 0 1", // KBB v K
        "4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1", // KBN v K
        "4k3/8/8/8/8/8/8/R3K3 w - - 0 1",  // KR v K
        "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", // KP v K
    ] {
        let state = GameState::from_str(fen).unwrap();
        assert!(!is_insufficient_material(state.board()), "{fen}");
        assert_eq!(position_status(&state), GameStatus::InPlay, "{fen}");
    }
}
