//! mcc: Monte-Carlo chess CLI.
//!
//! Subcommands:
//! - selfplay: play advisor-vs-advisor games, printing each position and
//!   optionally writing NDJSON events

use std::env;
use std::process;
use std::time::Instant;

use mc_advisor::{Advisor, AdvisorConfig};
use mc_core::{outcome, validate_move, Board, Config, Outcome, Team};
use mc_logging::{now_ms, AdviceEventV1, GameResultEventV1, MoveEventV1, NdjsonWriter};

fn print_help() {
    eprintln!(
        r#"mcc - Monte-Carlo chess CLI

USAGE:
    mcc <COMMAND> [OPTIONS]

COMMANDS:
    selfplay            Play advisor-vs-advisor games

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version
"#
    );
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_help();
        process::exit(1);
    }

    match args[1].as_str() {
        "selfplay" => cmd_selfplay(&args[2..]),
        "--help" | "-h" | "help" => print_help(),
        "--version" | "-V" => println!("mcc {}", env!("CARGO_PKG_VERSION")),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!("Run `mcc --help` for usage.");
            process::exit(1);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
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
    let mut quiet = false;

    // A --config file loads first; explicit flags override it.
    if let Some(i) = args.iter().position(|a| a == "--config") {
        if i + 1 >= args.len() {
            eprintln!("Missing value for --config");
            process::exit(1);
        }
        config = Config::load(&args[i + 1]).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {e}", args[i + 1]);
            process::exit(1);
        });
    }

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"mcc selfplay

USAGE:
    mcc selfplay [--config PATH] [--depth N] [--trials N] [--seed S]
                 [--games N] [--max-plies N] [--events PATH] [--quiet]

OPTIONS:
    --config PATH    Load a YAML config (flags below override it)
    --depth N        Rollout depth in rounds (default: 2)
    --trials N       Trials per candidate move (default: 10)
    --seed S         Base RNG seed (default: 0)
    --games N        Number of games to play (default: 1)
    --max-plies N    Abort a game as undecided after N plies (default: 200)
    --events PATH    Append NDJSON events to PATH
    --quiet          Don't print the board after each move
"#
                );
                return;
            }
            "--config" => i += 2,
            "--depth" => {
                config.advisor.depth = parse_or_exit(args, i, "--depth");
                i += 2;
            }
            "--trials" => {
                config.advisor.trials = parse_or_exit(args, i, "--trials");
                i += 2;
            }
            "--seed" => {
                config.advisor.seed = parse_or_exit(args, i, "--seed");
                i += 2;
            }
            "--games" => {
                config.selfplay.games = parse_or_exit(args, i, "--games");
                i += 2;
            }
            "--max-plies" => {
                config.selfplay.max_plies = parse_or_exit(args, i, "--max-plies");
                i += 2;
            }
            "--events" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --events");
                    process::exit(1);
                }
                config.logging.events_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--quiet" => {
                quiet = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `mcc selfplay`: {other}");
                eprintln!("Run `mcc selfplay --help` for usage.");
                process::exit(1);
            }
        }
    }

    run_selfplay(&config, quiet);
}

fn run_selfplay(config: &Config, quiet: bool) {
    let mut events = config.logging.events_path.as_deref().map(|path| {
        NdjsonWriter::open_append_with_flush(path, config.logging.flush_every_lines)
            .unwrap_or_else(|e| {
                eprintln!("Failed to open event log {path}: {e}");
                process::exit(1);
            })
    });

    for game_id in 0..u64::from(config.selfplay.games) {
        let (state, plies, score) = play_game(game_id, config, quiet, events.as_mut());
        match state {
            Outcome::WhiteWins => println!("White wins!"),
            Outcome::BlackWins => println!("Black wins!"),
            Outcome::Draw => println!("Stalemate!"),
            Outcome::Ongoing => println!("Undecided after {plies} plies (score {score})"),
        }
    }

    if let Some(w) = events.as_mut() {
        if let Err(e) = w.flush() {
            eprintln!("Failed to flush event log: {e}");
            process::exit(1);
        }
    }
}

/// Play one advisor-vs-advisor game to its outcome or the ply cap.
///
/// The driver owns all turn state and validates every advisor move through
/// the rules layer before applying it; the core's legality filter is never
/// bypassed.
fn play_game(
    game_id: u64,
    config: &Config,
    quiet: bool,
    mut events: Option<&mut NdjsonWriter>,
) -> (Outcome, u32, i32) {
    let advisor = Advisor::new(AdvisorConfig {
        depth: config.advisor.depth,
        trials: config.advisor.trials,
        seed: config.advisor.seed.wrapping_add(game_id),
    })
    .unwrap_or_else(|e| {
        eprintln!("Invalid advisor settings: {e}");
        process::exit(1);
    });

    let mut board = Board::new();
    let mut to_move = Team::White;
    let mut ply: u32 = 0;
    let state = loop {
        if ply >= config.selfplay.max_plies {
            break Outcome::Ongoing;
        }
        let state = outcome(&board);
        if state.is_decided() {
            break state;
        }

        let started = Instant::now();
        let advice = advisor
            .advise(&board, to_move)
            .expect("position was checked to be non-terminal");
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if let Err(e) = validate_move(&board, to_move, advice.from, advice.to) {
            eprintln!("Advisor produced an invalid move: {e}");
            process::exit(1);
        }
        let record = board
            .apply_move(advice.from, advice.to)
            .expect("validated move applies cleanly");

        if let Some(w) = events.as_deref_mut() {
            log_or_exit(
                w,
                &AdviceEventV1 {
                    event: "advice",
                    ts_ms: now_ms(),
                    game_id,
                    ply,
                    team: to_move,
                    depth: config.advisor.depth,
                    trials: config.advisor.trials,
                    seed: config.advisor.seed.wrapping_add(game_id),
                    candidates: advice.stats.candidates,
                    trials_run: advice.stats.trials_run,
                    from: advice.from,
                    to: advice.to,
                    expected_score: advice.expected_score,
                    elapsed_ms,
                },
            );
            log_or_exit(
                w,
                &MoveEventV1 {
                    event: "move",
                    ts_ms: now_ms(),
                    game_id,
                    ply,
                    team: to_move,
                    from: record.from,
                    to: record.to,
                    captured: record.captured.map(|p| p.to_string()),
                    score: board.score(),
                },
            );
        }

        if !quiet {
            println!(
                "game {game_id} ply {ply}: {} {} -> {}",
                record.piece, record.from, record.to
            );
            println!("{}", board.render_text());
        }

        to_move = to_move.opponent();
        ply += 1;
    };

    if let Some(w) = events.as_deref_mut() {
        log_or_exit(
            w,
            &GameResultEventV1 {
                event: "game_result",
                ts_ms: now_ms(),
                game_id,
                outcome: state,
                plies: ply,
                final_score: board.score(),
            },
        );
    }

    (state, ply, board.score())
}

fn log_or_exit<T: serde::Serialize>(w: &mut NdjsonWriter, event: &T) {
    if let Err(e) = w.write_event(event) {
        eprintln!("Failed to write event log: {e}");
        process::exit(1);
    }
}
