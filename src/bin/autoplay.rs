//! Let the brain play a game by itself and print the final board.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use brain_core::{Board, Shape};
use brain_engine::play_move;
use brain_search::MoveSearch;
use brain_tetris::{next_move, AutoplayConfig, Dealer};

#[derive(Parser)]
#[command(name = "autoplay")]
#[command(about = "Drop pieces with the placement brain until the stack tops out")]
struct Cli {
    /// TOML file with board size, weights and search settings
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Stop after this many pieces
    #[arg(long, default_value_t = 500)]
    pieces: usize,
    /// Shape tags dealt in a loop, e.g. "TTSZ"
    #[arg(long, default_value = "ILJSZOT", value_parser = parse_order)]
    order: ShapeOrder,
    /// Deal the piece the brain likes least instead of following --order
    #[arg(long)]
    adversarial: bool,
    /// Score candidates on the rayon pool
    #[arg(long)]
    parallel: bool,
    /// Print the board after every piece
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Debug)]
struct ShapeOrder(Vec<Shape>);

fn parse_order(tags: &str) -> Result<ShapeOrder, String> {
    let order = tags
        .chars()
        .map(|tag| Shape::from_tag(tag).ok_or_else(|| format!("unknown shape tag {tag:?}")))
        .collect::<Result<Vec<_>, _>>()?;
    if order.is_empty() {
        return Err("piece order is empty".to_owned());
    }
    Ok(ShapeOrder(order))
}

struct Summary {
    pieces: usize,
    rows_cleared: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AutoplayConfig::load(path)?,
        None => AutoplayConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    config.search.parallel |= cli.parallel;
    config.validate()?;

    info!(
        width = config.width,
        height = config.height,
        adversarial = cli.adversarial,
        parallel = config.search.parallel,
        "starting"
    );

    let mut board = Board::new(config.width, config.height);
    let summary = run(&cli, &config, &mut board)?;

    println!("{board}");
    println!(
        "pieces: {}  rows cleared: {}  height: {}",
        summary.pieces,
        summary.rows_cleared,
        board.max_height()
    );
    Ok(())
}

fn run(cli: &Cli, config: &AutoplayConfig, board: &mut Board) -> Result<Summary> {
    let search = MoveSearch::with_rater(config.weights.clone(), config.search.clone());
    let mut summary = Summary {
        pieces: 0,
        rows_cleared: 0,
    };

    let dealer = if cli.adversarial {
        Dealer::Adversarial
    } else {
        Dealer::Order(cli.order.0.clone())
    };

    for turn in 0..cli.pieces {
        let Some((shape, mv)) = next_move(&search, &dealer, board, turn, config.height)
            .context("searching for a move")?
        else {
            warn!(turn, "no legal move, game over");
            break;
        };

        let outcome = play_move(board, &mv)
            .with_context(|| format!("playing {} at x={} y={}", shape.tag(), mv.x, mv.y))?;
        summary.pieces += 1;
        summary.rows_cleared += outcome.rows_cleared;

        if cli.verbose {
            println!("{} -> x={} rotation={}\n{board}", shape.tag(), mv.x, mv.rotation);
        }
        if board.max_height() > config.height_limit() {
            info!(turn, height = board.max_height(), "stack reached the top margin");
            break;
        }
    }

    info!(pieces = summary.pieces, rows_cleared = summary.rows_cleared, "finished");
    Ok(summary)
}
