//! `otb-fen`: read a FEN position from chessboard detections.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use otb_fen::io::{self, FenReadConfig, FenReport};
use otb_fen::{BoardOrientation, BoardReader, BoardReading};
use otb_fen::board::SquareSelection;

#[derive(Debug, Parser)]
#[command(name = "otb-fen", version, about = "Turn chessboard detections into a FEN string")]
struct Cli {
    /// Log level for the otb-fen crates; `RUST_LOG` overrides it.
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order and label square detections, writing the layout cache.
    Squares {
        /// JSON array of square detections.
        #[arg(long)]
        detections: PathBuf,
        #[command(flatten)]
        grid: GridOpts,
        #[command(flatten)]
        opts: ReadOpts,
    },
    /// Place piece detections on a cached square layout.
    Pieces {
        /// Layout JSON written by `otb-fen squares`.
        #[arg(long)]
        layout: PathBuf,
        /// JSON array of piece detections.
        #[arg(long)]
        detections: PathBuf,
        #[command(flatten)]
        opts: ReadOpts,
    },
    /// Locate squares and read pieces in one go.
    Read {
        #[arg(long)]
        squares: PathBuf,
        #[arg(long)]
        pieces: PathBuf,
        #[command(flatten)]
        grid: GridOpts,
        #[command(flatten)]
        opts: ReadOpts,
    },
}

/// Square-finding overrides. A cached layout already fixes both, so
/// `pieces` does not take them.
#[derive(Debug, Args)]
struct GridOpts {
    /// `right_white` or `left_white`.
    #[arg(long)]
    orientation: Option<BoardOrientation>,
    /// Keep the 64 most confident squares when more are detected.
    #[arg(long)]
    top_k: bool,
}

#[derive(Debug, Args)]
struct ReadOpts {
    /// JSON reader configuration; other flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the layout (squares) or the JSON report (pieces, read) here.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl ReadOpts {
    fn build_config(&self, grid: Option<&GridOpts>) -> Result<FenReadConfig, io::FenIoError> {
        let mut cfg = match &self.config {
            Some(path) => FenReadConfig::load_json(path)?,
            None => FenReadConfig::default(),
        };
        if let Some(grid) = grid {
            if let Some(orientation) = grid.orientation {
                cfg.params.orientation = orientation;
            }
            if grid.top_k {
                cfg.params.squares.policy = SquareSelection::TopKByConfidence;
            }
        }
        Ok(cfg)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Squares {
            detections,
            grid,
            opts,
        } => {
            let cfg = opts.build_config(Some(&grid))?;
            let squares = io::load_square_detections(&detections)?;
            let layout = BoardReader::new(cfg.params).locate_squares(&squares)?;
            match &opts.out {
                Some(path) => {
                    io::write_layout(&layout, path)?;
                    info!("wrote square layout to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&layout)?),
            }
        }
        Command::Pieces {
            layout,
            detections,
            opts,
        } => {
            let cfg = opts.build_config(None)?;
            let layout = io::load_layout(&layout)?;
            let pieces = io::load_piece_detections(&detections, cfg.piece_anchor)?;
            let reading = BoardReader::new(cfg.params).read_pieces(&layout, &pieces)?;
            emit(&reading, opts.out.as_deref())?;
        }
        Command::Read {
            squares,
            pieces,
            grid,
            opts,
        } => {
            let cfg = opts.build_config(Some(&grid))?;
            let squares = io::load_square_detections(&squares)?;
            let pieces = io::load_piece_detections(&pieces, cfg.piece_anchor)?;
            let reading = BoardReader::new(cfg.params).read_board(&squares, &pieces)?;
            emit(&reading, opts.out.as_deref())?;
        }
    }

    Ok(())
}

fn emit(reading: &BoardReading, out: Option<&Path>) -> Result<(), io::FenIoError> {
    println!("{}", reading.fen);
    if let Some(path) = out {
        FenReport::new(reading, true).write_json(path)?;
        info!("wrote report to {}", path.display());
    }
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) {
    otb_fen::logging::init_tracing(level);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) {
    otb_fen::logging::init_with_level(level);
}
