use indicatif::{ProgressBar, ProgressStyle};
use ply::game::START_FEN;
use ply::logger::init_logging;
use ply::moves::perft::{
    PerftCounters, perft, perft_count_with_breakdown, perft_divide_each, perft_root_rows,
};
use ply::{GameState, position_status};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::time::Instant;

const HELP: &str = "\
commands:
  d | display              print the board
  fen                      print the current FEN
  position startpos|fen <fen> [moves <m1> <m2> ...]
  moves                    list legal moves
  move <e2e4|e7e8q>        play a move
  undo                     take back the last move
  status                   in play / check / checkmate / stalemate / draw
  perft <depth>            count leaf nodes
  divide <depth>           per-move node counts
  breakdown <depth>        perft with capture/castle/check counters
  quit";

fn main() {
    if let Err(e) = init_logging("logs/ply.log", "info") {
        eprintln!("warning: file logging disabled: {e}");
    }

    let mut state = GameState::new();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            continue;
        };

        match command {
            "help" | "?" => println!("{HELP}"),
            "d" | "display" => {
                println!("{}", state.board());
                println!("fen: {state}");
            }
            "fen" => println!("{state}"),
            "position" => match handle_position(&parts) {
                Ok(new_state) => state = new_state,
                Err(e) => println!("error: {e}"),
            },
            "moves" => {
                let moves: Vec<String> = state
                    .legal_moves()
                    .iter()
                    .map(|m| format!("{m:#}"))
                    .collect();
                println!("{} legal: {}", moves.len(), moves.join(", "));
            }
            "move" => match parts.get(1) {
                Some(text) => match state
                    .parse_move(text)
                    .and_then(|(mv, promo)| state.make_move(mv, promo))
                {
                    Ok(()) => println!("ok {:?}", position_status(&state)),
                    Err(e) => println!("error: {e}"),
                },
                None => println!("usage: move <e2e4>"),
            },
            "undo" => match state.undo_move() {
                Ok(mv) => println!("undid {mv}"),
                Err(e) => println!("error: {e}"),
            },
            "status" => println!("{:?}", position_status(&state)),
            "perft" => {
                let depth = parse_depth(&parts);
                let start = Instant::now();
                let nodes = perft(&mut state, depth);
                report(depth, nodes, start);
            }
            "divide" => {
                let depth = parse_depth(&parts);
                let start = Instant::now();
                let nodes = divide_with_progress(&mut state, depth);
                report(depth, nodes, start);
            }
            "breakdown" => {
                let depth = parse_depth(&parts);
                let mut counters = PerftCounters::zero();
                perft_count_with_breakdown(&mut state, depth, &mut counters);
                println!("{counters:#?}");
            }
            "quit" | "exit" => break,
            other => println!("unknown command '{other}', try 'help'"),
        }
        let _ = io::stdout().flush();
    }
}

fn parse_depth(parts: &[&str]) -> u32 {
    parts.get(1).and_then(|d| d.parse().ok()).unwrap_or(1)
}

fn report(depth: u32, nodes: u64, start: Instant) {
    let secs = start.elapsed().as_secs_f64();
    let nps = if secs > 0.0 { nodes as f64 / secs } else { 0.0 };
    println!("depth {depth}: {nodes} nodes in {secs:.3}s ({nps:.0} nps)");
}

/// Divide, with a bar over the root moves for deep runs.
fn divide_with_progress(state: &mut GameState, depth: u32) -> u64 {
    let bar = (depth >= 4).then(|| {
        let bar = ProgressBar::new(perft_root_rows(state) as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    });

    let total = perft_divide_each(state, depth, |mv, count| match &bar {
        Some(bar) => {
            bar.println(format!("{mv}: {count}"));
            bar.inc(1);
        }
        None => println!("{mv}: {count}"),
    });
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    println!("Total: {total}");
    total
}

fn handle_position(parts: &[&str]) -> Result<GameState, ply::ChessError> {
    let moves_idx = parts.iter().position(|&p| p == "moves");
    let end = moves_idx.unwrap_or(parts.len());

    let mut state = match parts.get(1) {
        Some(&"fen") => GameState::from_str(&parts[2..end].join(" "))?,
        _ => GameState::from_str(START_FEN)?,
    };

    if let Some(idx) = moves_idx {
        for text in &parts[idx + 1..] {
            let (mv, promo) = state.parse_move(text)?;
            state.make_move(mv, promo)?;
        }
    }
    Ok(state)
}
