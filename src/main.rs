use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use kestrel_chess::engines::engine_negamax::NegamaxEngine;
use kestrel_chess::engines::engine_random::RandomEngine;
use kestrel_chess::engines::engine_trait::{Engine, GoParams};
use kestrel_chess::errors::{ChessError, ChessResult};
use kestrel_chess::game_state::chess_move::ChessMove;
use kestrel_chess::game_state::chess_types::{Color, PieceKind};
use kestrel_chess::game_state::position::Position;
use kestrel_chess::move_generation::legal_move_generator::LegalMoveGenerator;
use kestrel_chess::move_generation::move_generator::MoveGenerator;
use kestrel_chess::move_generation::perft::{perft, perft_divide};
use kestrel_chess::search::negamax::{SearchConfig, DEFAULT_SEARCH_DEPTH};

#[derive(Debug, Parser)]
#[command(name = "kestrel", version, about = "Bitboard chess engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play against the engine on the terminal.
    Play {
        #[command(flatten)]
        search: SearchArgs,
        /// Colour played by the human.
        #[arg(long, value_enum, default_value_t = Side::White)]
        human: Side,
        /// Start from this FEN instead of the standard setup.
        #[arg(long)]
        fen: Option<String>,
    },
    /// Let two engines play each other.
    Selfplay {
        #[command(flatten)]
        search: SearchArgs,
        #[arg(long, value_enum, default_value_t = EngineKind::Negamax)]
        white: EngineKind,
        #[arg(long, value_enum, default_value_t = EngineKind::Random)]
        black: EngineKind,
        #[arg(long, default_value_t = 200)]
        max_plies: u32,
        /// Seed for random engines.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        fen: Option<String>,
    },
    /// Count legal move paths to a fixed depth.
    Perft {
        #[arg(long, default_value_t = 4)]
        depth: u8,
        #[arg(long)]
        fen: Option<String>,
        /// Print the node count below each root move.
        #[arg(long)]
        divide: bool,
    },
}

#[derive(Debug, Clone, Copy, Args)]
struct SearchArgs {
    /// Search depth in plies.
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,
    /// Node budget per move.
    #[arg(long)]
    nodes: Option<u64>,
    /// Time budget per move in milliseconds.
    #[arg(long)]
    movetime: Option<u64>,
}

impl From<SearchArgs> for SearchConfig {
    fn from(args: SearchArgs) -> Self {
        SearchConfig {
            depth: args.depth,
            node_limit: args.nodes,
            movetime_ms: args.movetime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    Negamax,
    Random,
}

fn build_engine(kind: EngineKind, search: SearchArgs, seed: Option<u64>) -> Box<dyn Engine> {
    match kind {
        EngineKind::Negamax => Box::new(NegamaxEngine::new(search.into())),
        EngineKind::Random => Box::new(match seed {
            Some(seed) => RandomEngine::seeded(seed),
            None => RandomEngine::new(),
        }),
    }
}

fn starting_position(fen: Option<&str>) -> ChessResult<Position> {
    match fen {
        Some(fen) => Position::from_fen(fen),
        None => Ok(Position::new_game()),
    }
}

/// Accepts `E2 E4`, `E7 E8 Q` or the canonical `E2 -> E4` form, any case.
fn parse_move_input(line: &str) -> ChessResult<ChessMove> {
    let text = line.trim().to_ascii_uppercase();
    if text.contains("->") {
        return text.parse();
    }

    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        [from, to] => Ok(ChessMove::new(from.parse()?, to.parse()?)),
        [from, to, promo] => {
            let piece = promo
                .chars()
                .next()
                .filter(|_| promo.len() == 1)
                .and_then(PieceKind::from_char)
                .filter(|piece| !matches!(piece, PieceKind::Pawn | PieceKind::King))
                .ok_or_else(|| ChessError::InvalidMoveText(line.trim().to_owned()))?;
            Ok(ChessMove::with_promotion(from.parse()?, to.parse()?, piece))
        }
        _ => Err(ChessError::InvalidMoveText(line.trim().to_owned())),
    }
}

/// Result text for a finished game, `None` while moves remain.
fn game_outcome<G: MoveGenerator>(generator: &G, position: &Position) -> Option<String> {
    if !generator.generate_legal_moves(position).is_empty() {
        return None;
    }
    if generator.side_to_move_in_check(position) {
        let winner = match position.side_to_move() {
            Color::White => "Black",
            Color::Black => "White",
        };
        Some(format!("Checkmate, {winner} wins"))
    } else {
        Some("Stalemate".to_owned())
    }
}

fn engine_move(
    engine: &mut dyn Engine,
    generator: &LegalMoveGenerator<'_>,
    position: &Position,
) -> ChessResult<(ChessMove, Position)> {
    let out = engine.choose_move(position, &GoParams::default())?;
    for line in &out.info_lines {
        info!(engine = engine.name(), "{line}");
    }
    let mv = out.best_move.ok_or(ChessError::NoLegalMoves)?;
    let next = generator.apply_legal_move(position, mv)?;
    Ok((mv, next))
}

fn run_play(search: SearchArgs, human: Side, fen: Option<&str>) -> Result<(), Box<dyn Error>> {
    let generator = LegalMoveGenerator::default();
    let mut engine = NegamaxEngine::new(search.into());
    let human: Color = human.into();
    let mut position = starting_position(fen)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{position}\n");
        if let Some(outcome) = game_outcome(&generator, &position) {
            println!("{outcome}");
            return Ok(());
        }

        if position.side_to_move() == human {
            print!("Your move (e.g. E2 E4, E7 E8 Q): ");
            io::stdout().flush()?;

            let Some(line) = lines.next().transpose()? else {
                return Ok(());
            };
            if line.trim().eq_ignore_ascii_case("quit") {
                return Ok(());
            }

            match parse_move_input(&line).and_then(|mv| generator.apply_legal_move(&position, mv)) {
                Ok(next) => position = next,
                Err(err) => println!("{err}"),
            }
        } else {
            let (mv, next) = engine_move(&mut engine, &generator, &position)?;
            println!("{} plays {mv}", engine.name());
            position = next;
        }
    }
}

fn run_selfplay(
    search: SearchArgs,
    white: EngineKind,
    black: EngineKind,
    max_plies: u32,
    seed: Option<u64>,
    fen: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let generator = LegalMoveGenerator::default();
    let mut engines = [
        build_engine(white, search, seed),
        build_engine(black, search, seed.map(|s| s.wrapping_add(1))),
    ];
    for engine in engines.iter_mut() {
        engine.new_game();
    }

    let mut position = starting_position(fen)?;
    for ply in 0..max_plies {
        if let Some(outcome) = game_outcome(&generator, &position) {
            println!("{position}\n\n{outcome} after {ply} plies");
            return Ok(());
        }

        let engine = &mut engines[position.side_to_move().index()];
        let (mv, next) = engine_move(engine.as_mut(), &generator, &position)?;
        println!("{:>3}. {:<16} {mv}", ply + 1, engine.name());
        position = next;
    }

    println!("{position}\n\nStopped after {max_plies} plies");
    Ok(())
}

fn run_perft(depth: u8, fen: Option<&str>, divide: bool) -> Result<(), Box<dyn Error>> {
    let generator = LegalMoveGenerator::default();
    let position = starting_position(fen)?;
    let start = Instant::now();

    if divide {
        for (mv, nodes) in perft_divide(&generator, &position, depth) {
            println!("{mv}: {nodes}");
        }
    }

    let counts = perft(&generator, &position, depth);
    let elapsed = start.elapsed();
    println!(
        "depth {depth} nodes {} captures {} promotions {} checks {} checkmates {}",
        counts.nodes, counts.captures, counts.promotions, counts.checks, counts.checkmates
    );
    info!(elapsed_ms = elapsed.as_millis() as u64, "perft finished");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play { search, human, fen } => run_play(search, human, fen.as_deref()),
        Command::Selfplay {
            search,
            white,
            black,
            max_plies,
            seed,
            fen,
        } => run_selfplay(search, white, black, max_plies, seed, fen.as_deref()),
        Command::Perft { depth, fen, divide } => run_perft(depth, fen.as_deref(), divide),
    }
}
