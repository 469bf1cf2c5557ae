//! chesskit - command-line driver for the rules engine.
//!
//! Counts perft nodes, reports game status, replays saved records, checks FEN
//! strings and plays games interactively on stdin.

mod config;
mod play;
mod report;

use anyhow::Context;
use chesskit_core::Position;
use chesskit_engine::{perft, perft_divide, GameRecord, Session};
use clap::{Parser, Subcommand};
use config::ChesskitConfig;
use play::Player;
use report::StatusReport;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chesskit")]
#[command(about = "Chess rules engine driver")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Search depth in plies
        depth: u32,
        /// Position to start from (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Print the status of a position as JSON
    Status {
        /// Position to start from
        #[arg(long)]
        fen: Option<String>,
        /// Moves in SAN or UCI to play first
        #[arg(long, num_args = 0..)]
        moves: Vec<String>,
    },
    /// Replay a saved game record (JSON)
    Replay {
        /// Path to the record file
        path: PathBuf,
    },
    /// Check whether a FEN string is well formed
    Validate {
        /// FEN string to check
        fen: String,
    },
    /// Play a game interactively on stdin
    Play {
        /// Position to start from
        #[arg(long)]
        fen: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(ChesskitConfig::config_path);
    let config = ChesskitConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Perft { depth, fen, divide } => {
            let position = match fen {
                Some(fen) => Position::from_fen(&fen)?,
                None => Position::startpos(),
            };
            tracing::info!(depth, fen = %position, "Running perft");
            let started = Instant::now();
            let nodes = if divide {
                let rows = perft_divide(&position, depth);
                for (uci, count) in &rows {
                    println!("{}: {}", uci, count);
                }
                println!();
                rows.iter().map(|(_, count)| count).sum()
            } else {
                perft(&position, depth)
            };
            println!("Nodes searched: {}", nodes);
            let elapsed_ms = started.elapsed().as_millis() as u64;
            tracing::info!(nodes, elapsed_ms, "Perft done");
        }
        Commands::Status { fen, moves } => {
            let session = new_session(fen.as_deref(), &config)?;
            let mut player = Player::new(session, config.promotion_piece()?);
            for text in &moves {
                player
                    .play(text)
                    .with_context(|| format!("playing {}", text))?;
            }
            println!("{}", StatusReport::new(player.session()).to_json()?);
        }
        Commands::Replay { path } => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let record: GameRecord = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            let session = Session::replay(&record)?;
            tracing::debug!(plies = session.ply_count(), "Replayed record");
            let result = session.outcome().map_or("*", |o| o.result_text());
            println!("{} {}", session.movetext(), result);
            println!("{}", session.to_fen());
            if let Some(outcome) = session.outcome() {
                println!("{}", outcome);
            }
        }
        Commands::Validate { fen } => match Position::from_fen(&fen) {
            Ok(position) => println!("valid: {}", position),
            Err(e) => anyhow::bail!("invalid FEN: {}", e),
        },
        Commands::Play { fen } => {
            let session = new_session(fen.as_deref(), &config)?;
            let mut player = Player::new(session, config.promotion_piece()?);
            let stdin = std::io::stdin();
            player.run(stdin.lock(), std::io::stdout().lock())?;
            tracing::info!(plies = player.session().ply_count(), "Session ended");
        }
    }

    Ok(())
}

/// Starts a session from the given FEN, else the configured one, else the
/// standard position.
fn new_session(fen: Option<&str>, config: &ChesskitConfig) -> anyhow::Result<Session> {
    let fen = fen.or(config.start_fen.as_deref());
    Ok(Session::new_game(fen)?)
}
