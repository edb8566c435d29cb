//! tengen: CLI binary for the Go MCTS engine.
//!
//! Subcommands:
//! - selfplay

use std::env;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use tengen_go::{Board, Color, Move};
use tengen_logging::{GameFinishedEventV1, MoveChosenEventV1, NdjsonWriter, VersionInfoV1};
use tengen_mcts::{Config, Mcts};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn color_label(c: Color) -> &'static str {
    match c {
        Color::Black => "black",
        Color::White => "white",
    }
}

fn parse_flag_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    if i + 1 >= args.len() {
        eprintln!("Missing value for {flag}");
        process::exit(1);
    }
    args[i + 1].parse().unwrap_or_else(|_| {
        eprintln!("Invalid {flag} value: {}", args[i + 1]);
        process::exit(1);
    })
}

fn cmd_selfplay(args: &[String]) {
    let mut config = Config::default();
    let mut iters: u32 = 1000;
    let mut games: u64 = 1;
    let mut log_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"tengen selfplay

USAGE:
    tengen selfplay [OPTIONS]

OPTIONS:
    --config PATH   Load YAML settings (flags below override it)
    --size N        Board edge length (default: 9)
    --komi F        Komi added to White (default: 6.5)
    --iters N       Search iterations per move (default: 1000)
    --seed S        RNG seed (default: 0)
    --games G       Number of games to play (default: 1)
    --log PATH      Append NDJSON events to PATH
    --quiet         Skip per-move output
"#
                );
                return;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --config");
                    process::exit(1);
                }
                config = Config::load(&args[i + 1]).unwrap_or_else(|e| {
                    eprintln!("Failed to load {}: {e}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--size" => {
                config.game.size = parse_flag_value(args, i, "--size");
                i += 2;
            }
            "--komi" => {
                config.game.komi = parse_flag_value(args, i, "--komi");
                i += 2;
            }
            "--iters" => {
                iters = parse_flag_value(args, i, "--iters");
                i += 2;
            }
            "--seed" => {
                config.mcts.seed = parse_flag_value(args, i, "--seed");
                i += 2;
            }
            "--games" => {
                games = parse_flag_value(args, i, "--games");
                i += 2;
            }
            "--log" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --log");
                    process::exit(1);
                }
                log_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--quiet" => {
                quiet = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `tengen selfplay`: {other}");
                eprintln!("Run `tengen selfplay --help` for usage.");
                process::exit(1);
            }
        }
    }

    let mut log = log_path.map(|p| {
        NdjsonWriter::open_append(&p).unwrap_or_else(|e| {
            eprintln!("Failed to open log {p}: {e:?}");
            process::exit(1);
        })
    });

    let mut mcts = Mcts::new(config.mcts).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    for game_id in 0..games {
        let mut board = Board::new(config.game.size, config.game.komi);
        let max_plies = 3 * board.size() * board.size();
        let mut passes = 0;

        while passes < 2 && board.ply_count() < max_plies {
            let to_play = board.to_play();
            let m = mcts.search(board.clone(), iters);
            let chosen = board.coord_str(m);

            // The best child is pseudo-legal but not vetted for suicide;
            // treat a rejection like a pass so the game still ends.
            if m.is_pass() || board.play(m).is_err() {
                let _ = board.play(Move::PASS);
                passes += 1;
            } else {
                passes = 0;
            }

            if !quiet {
                println!(
                    "game {game_id} ply {:>3}: {} {}",
                    board.ply_count(),
                    color_label(to_play),
                    chosen
                );
            }
            if let Some(w) = log.as_mut() {
                let stats = mcts.last_stats();
                let ev = MoveChosenEventV1 {
                    event: "move_chosen",
                    ts_ms: now_ms(),
                    v: VersionInfoV1::current(),
                    game_id,
                    ply: board.ply_count() as u32,
                    to_play: color_label(to_play),
                    chosen,
                    iterations: iters,
                    node_count: stats.node_count,
                    expansions: stats.expansions,
                    playouts: stats.playouts,
                    playout_moves: stats.playout_moves,
                };
                if let Err(e) = w.write_event(&ev) {
                    eprintln!("Failed to write log event: {e:?}");
                    process::exit(1);
                }
            }
        }

        let score_black = board.evaluate(Color::Black);
        let winner = if score_black > 0.0 {
            "black"
        } else if score_black < 0.0 {
            "white"
        } else {
            "draw"
        };

        println!();
        print!("{board}");
        println!(
            "game {game_id} over after {} plies: B+{score_black:.1} -> {winner}",
            board.ply_count()
        );

        if let Some(w) = log.as_mut() {
            let ev = GameFinishedEventV1 {
                event: "game_finished",
                ts_ms: now_ms(),
                v: VersionInfoV1::current(),
                game_id,
                plies: board.ply_count() as u32,
                score_black,
                winner,
            };
            if let Err(e) = w.write_event(&ev) {
                eprintln!("Failed to write log event: {e:?}");
                process::exit(1);
            }
            if let Err(e) = w.flush() {
                eprintln!("Failed to flush log: {e:?}");
                process::exit(1);
            }
        }
    }
}

fn print_help() {
    eprintln!(
        r#"tengen - Monte Carlo Tree Search engine for Go

USAGE:
    tengen <COMMAND> [OPTIONS]

COMMANDS:
    selfplay    Play engine-vs-engine games and optionally log NDJSON events

Run `tengen <COMMAND> --help` for command options.
"#
    );
}

fn main() {
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("selfplay") => cmd_selfplay(&args[2..]),
        Some("--help") | Some("-h") | None => print_help(),
        Some(other) => {
            eprintln!("Unknown command: {other}");
            print_help();
            process::exit(1);
        }
    }
}
