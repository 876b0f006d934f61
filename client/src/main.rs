mod cli;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use book::{BestUnplayed, Book, BookOptions, Data, HeuristicStrategy, NodeKind};
use clap::Parser;
use cli::{Cli, Commands, ConfigArgs};
use common::ConfigLoader;
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use othello::{Board, Game, NUM_SQUARES};
use serde_json::json;

const CONFIG_SCOPE: &str = "book";
const DEFAULT_BOOK_PATH: &str = "othello.book";

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Import(import_args) => {
            let (_, book_path) = load_config(&import_args.config)?;
            let mut book = load_book(&book_path)?;

            let transcripts = fs::read_to_string(&import_args.games)
                .with_context(|| format!("Failed to read games from {:?}", import_args.games))?;

            let mut imported = 0;
            for (line_number, line) in transcripts.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                match line.parse::<Game>().and_then(|game| book.import_game(&game)) {
                    Ok(_) => imported += 1,
                    Err(err) => warn!("Skipping game on line {}: {:#}", line_number + 1, err),
                }
            }

            info!("Imported {} games, book holds {} positions", imported, book.len());
            book.save(&book_path)?;
        }
        Commands::Propagate(config_args) => {
            let (config, book_path) = load_config(config_args)?;
            let options: BookOptions = config.load()?;
            let mut book = load_book(&book_path)?;

            let strategy = HeuristicStrategy::from_options(&options);
            let stats = book.propagate(&strategy)?;

            info!("Solved {} and merged {} positions", stats.solved, stats.merged);
            book.save(&book_path)?;
        }
        Commands::Grow(grow_args) => {
            let (config, book_path) = load_config(&grow_args.config)?;
            let options: BookOptions = config.load()?;
            let mut book = load_book(&book_path)?;

            let root = position_after(&grow_args.moves)?;
            let max_expansions = grow_args.max_expansions.unwrap_or(options.max_expansions);

            let strategy = HeuristicStrategy::from_options(&options);
            let added = book.grow(&strategy, &root, max_expansions)?;

            info!("Added {} positions, book holds {}", added, book.len());
            book.save(&book_path)?;
        }
        Commands::Stats(config_args) => {
            let (_, book_path) = load_config(config_args)?;
            let book = load_book(&book_path)?;

            println!("{:>7} {:>8} {:>8} {:>8}", "empties", "leaf", "branch", "solved");
            for empty_count in (0..=NUM_SQUARES).rev() {
                if book.size_at_empty_count(empty_count) == 0 {
                    continue;
                }

                let mut counts = [0usize; 3];
                for key in book.keys_at_empty_count(empty_count) {
                    if let Some(data) = book.get_key(&key) {
                        counts[data.kind().tag() as usize] += 1;
                    }
                }

                println!(
                    "{:>7} {:>8} {:>8} {:>8}",
                    empty_count,
                    counts[NodeKind::Leaf.tag() as usize],
                    counts[NodeKind::Branch.tag() as usize],
                    counts[NodeKind::Solved.tag() as usize]
                );
            }
            println!("{} positions, min depth {:?}", book.len(), book.min_depth());
        }
        Commands::Lookup(lookup_args) => {
            let (_, book_path) = load_config(&lookup_args.config)?;
            let book = load_book(&book_path)?;

            let board = position_after(&lookup_args.moves)?;
            let entry = book.get(&board).map(|data| {
                json!({
                    "kind": data.kind(),
                    "score": data.score(),
                    "move": best_move(&data),
                })
            });

            let output = json!({
                "empties": board.empty_count(),
                "entry": entry,
                "successors": book.successors(&board),
            });

            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn load_config(args: &ConfigArgs) -> Result<(ConfigLoader, PathBuf)> {
    let config_path = Path::new(&args.config);
    let config = if config_path.is_file() {
        ConfigLoader::new(config_path, CONFIG_SCOPE.to_string())?
    } else {
        warn!("{:?} not found, using defaults", config_path);
        ConfigLoader::load_str("{}", CONFIG_SCOPE.to_string())?
    };

    let book_path = config
        .get_relative_path("book_path")
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_BOOK_PATH));

    Ok((config, book_path))
}

fn load_book(path: &Path) -> Result<Book> {
    if path.is_file() {
        Book::load(path)
    } else {
        info!("No book at {:?}, starting empty", path);
        Ok(Book::new())
    }
}

fn position_after(moves: &str) -> Result<Board> {
    let game: Game = moves.parse()?;
    let positions = game.positions()?;

    Ok(positions.last().copied().unwrap_or_else(Board::initial))
}

fn best_move(data: &Data) -> Option<String> {
    match data {
        Data::Branch { best_unplayed, .. } => match best_unplayed {
            BestUnplayed::Square(square) => Some(square.to_string()),
            BestUnplayed::InBook => Some("book".to_string()),
            BestUnplayed::NoLegalMoves => Some("pass".to_string()),
        },
        Data::Solved { best_move, .. } => best_move.map(|square| square.to_string()),
        Data::Leaf { .. } => None,
    }
}
