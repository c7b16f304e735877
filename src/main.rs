use std::io::{stdin, stdout, BufRead, Write};
use std::process::ExitCode;
use std::time::Instant;

use mailbox_chess::chess_board::fen::INITIAL_POSITION;
use mailbox_chess::chess_board::perft::{divide, perft};
use mailbox_chess::chess_board::{to_algebraic_square, ChessBoard, Move};
use mailbox_chess::error::FenResult;
use mailbox_chess::ui::{InputQueue, ReleaseOutcome, TurnController};

use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use tracing::{info, warn, Level};

const BENCHMARK_POSITION: &str = "1rb2rk1/p4ppp/1p1qp1n1/3n2N1/2pP4/2P3P1/PPQ2PBP/R1B1R1K1 w - - 4 17";

fn fen_arg() -> clap::Arg {
    arg!(
    -f --fen <FEN> "Board position"
            )
    .default_value(INITIAL_POSITION)
}

fn main() -> ExitCode {
    let matches = command!()
        .version("v0.1.0")
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .subcommand(Command::new("play").about("Play moves typed as e2e4").arg(fen_arg()))
        .subcommand(Command::new("moves").about("List the generated moves").arg(fen_arg()))
        .subcommand(
            Command::new("perft").about("Run Perft test").arg(fen_arg()).arg(
                arg!(
                -x --depth <d> "depth"
                        )
                .default_value("3")
                .value_parser(clap::value_parser!(u8)),
            ),
        )
        .subcommand(
            Command::new("random")
                .about("Play random moves from a position")
                .arg(fen_arg())
                .arg(
                    arg!(
                    -s --seed <seed> "Random seed"
                            )
                    .default_value("0")
                    .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(
                    -p --plies <plies> "Number of half moves"
                            )
                    .default_value("20")
                    .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(Command::new("benchmark").about("Runs a benchmark"))
        .get_matches();

    let level = if matches.get_flag("debug") { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match matches.subcommand() {
        Some(("play", arg_matches)) => play(fen_of(arg_matches)),
        Some(("moves", arg_matches)) => list_moves(fen_of(arg_matches)),
        Some(("perft", arg_matches)) => {
            let depth = arg_matches.get_one::<u8>("depth").copied().unwrap_or(3);
            run_perft(fen_of(arg_matches), depth)
        }
        Some(("random", arg_matches)) => {
            let seed = arg_matches.get_one::<u64>("seed").copied().unwrap_or(0);
            let plies = arg_matches.get_one::<usize>("plies").copied().unwrap_or(20);
            random_playout(fen_of(arg_matches), seed, plies)
        }
        Some(("benchmark", _)) => benchmark(),
        None => play(INITIAL_POSITION),
        _ => unreachable!("Exhausted list of subcommands"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn fen_of(matches: &ArgMatches) -> &str {
    matches.get_one::<String>("fen").map(String::as_str).unwrap_or(INITIAL_POSITION)
}

fn print_outcome(controller: &TurnController, outcome: ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::Moved(mv) => {
            println!("{}", controller.board().render_to_string());
            println!("{} played, {} to move", mv, controller.active_color());
        }
        ReleaseOutcome::Rejected { from } => {
            println!("Not a move, piece returned to {}", to_algebraic_square(from));
        }
        ReleaseOutcome::Ignored => {}
    }
}

/// Text front end: every move is replayed as a drag between square centres.
fn play(fen: &str) -> FenResult<()> {
    let mut controller = TurnController::from_fen(fen)?;
    let mut queue = InputQueue::new();
    info!("Starting game from {}", fen);

    println!("{}", controller.board().render_to_string());
    println!("Enter moves like e2e4, 'moves', 'fen', 'board' or 'quit'.");

    for line in stdin().lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };

        match line.as_str() {
            "" => continue,
            "quit" => break,
            "board" => println!("{}", controller.board().render_to_string()),
            "fen" => println!("{}", controller.board().to_fen()),
            "moves" => {
                let moves: Vec<String> = controller.moves().iter().map(Move::as_algebraic).collect();
                println!("{} moves: {}", moves.len(), moves.join(" "));
            }
            text => match Move::from_algebraic(text) {
                Ok(mv) => {
                    if !controller.is_selectable(mv.from) {
                        println!("No {} piece on {}", controller.active_color(), to_algebraic_square(mv.from));
                        continue;
                    }
                    queue.drag_and_drop(mv.from, mv.to);
                    for outcome in controller.poll(&mut queue) {
                        print_outcome(&controller, outcome);
                    }
                }
                Err(e) => println!("{}", e),
            },
        }
        let _ = stdout().flush();
    }

    Ok(())
}

#[derive(Tabled)]
struct MoveRow {
    piece: char,
    from: String,
    to: String,
    capture: bool,
}

fn list_moves(fen: &str) -> FenResult<()> {
    let board = ChessBoard::from_fen(fen)?;
    let moves = board.generate_pseudo_moves();

    let rows: Vec<MoveRow> = moves
        .iter()
        .map(|mv| MoveRow {
            piece: board.piece_at(mv.from).map(|p| p.to_char()).unwrap_or(' '),
            from: to_algebraic_square(mv.from),
            to: to_algebraic_square(mv.to),
            capture: !board.square(mv.to).is_empty(),
        })
        .collect();

    println!("{}", board.render_to_string());
    println!("{}", Table::new(rows).with(Style::modern()));
    println!("{} moves for {}", moves.len(), board.active_color);
    Ok(())
}

fn run_perft(fen: &str, depth: u8) -> FenResult<()> {
    println!("Perft test for {} with depth {}", fen, depth);
    let board = ChessBoard::from_fen(fen)?;
    let start_time = Instant::now();

    let mut num_nodes = 0;
    for (mv, count) in divide(&board, depth) {
        println!("{}: {}", mv.as_algebraic(), count);
        num_nodes += count;
    }
    println!("\nNodes searched: {}", num_nodes);
    info!("perft {} finished in {:.3}s", depth, start_time.elapsed().as_secs_f32());
    Ok(())
}

fn random_playout(fen: &str, seed: u64, plies: usize) -> FenResult<()> {
    let mut controller = TurnController::from_fen(fen)?;
    let mut rng = Pcg64::seed_from_u64(seed);
    info!("Random playout of {} plies with seed {}", plies, seed);

    let mut played = Vec::with_capacity(plies);
    for _ in 0..plies {
        let mv = match controller.moves().as_slice().choose(&mut rng) {
            Some(mv) => *mv,
            None => {
                warn!("{} has no moves, stopping", controller.active_color());
                break;
            }
        };
        if let ReleaseOutcome::Moved(mv) = controller.play(mv) {
            played.push(mv.as_algebraic());
        }
    }

    println!("{}", played.join(" "));
    println!("{}", controller.board().render_to_string());
    println!("{}", controller.board().to_fen());
    Ok(())
}

#[derive(Tabled)]
struct BenchmarkRow {
    depth: u8,
    node_count: u64,
    elapsed_time: f32,
    knodes_per_sec: f32,
}

fn benchmark() -> FenResult<()> {
    let board = ChessBoard::from_fen(BENCHMARK_POSITION)?;
    let mut table_rows = Vec::new();
    for depth in 1..=5 {
        let start_time = Instant::now();
        let node_count = perft(&board, depth);
        let elapsed = start_time.elapsed();
        table_rows.push(BenchmarkRow {
            depth,
            node_count,
            elapsed_time: elapsed.as_secs_f32(),
            knodes_per_sec: node_count as f32 / elapsed.as_secs_f32().max(f32::EPSILON) / 1000f32,
        });
        if elapsed.as_secs() > 10 {
            break;
        }
    }
    println!("{}", Table::new(table_rows).with(Style::modern()));
    Ok(())
}
