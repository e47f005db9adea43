mod config;
mod session;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::Env;
use log::info;
use twenty48_core::engine::{BoardEngine, Direction};

use config::{Config, StrategyKind};
use session::Session;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Play the 2048 rule engine headlessly and print every step"
)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Seed for tile spawns (overrides the config)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Comma-separated moves to play, e.g. "left,up,right" (implies the scripted strategy)
    #[arg(long, value_name = "MOVES", value_delimiter = ',')]
    moves: Option<Vec<String>>,

    /// Only print the per-game summary
    #[arg(long)]
    quiet: bool,

    /// Log filter, e.g. "info", "debug"
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log.as_str())).init();

    let mut config = match &args.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path)?
        }
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(moves) = &args.moves {
        config.play.moves = parse_moves(moves)?;
        config.play.kind = StrategyKind::Scripted;
    }
    if config.play.kind == StrategyKind::Scripted && config.play.moves.is_empty() {
        bail!("scripted strategy needs at least one move (use --moves or [play].moves)");
    }

    let initial = config.initial_grid()?;
    let mut engine = match config.seed {
        Some(seed) => BoardEngine::with_seed(initial, seed),
        None => BoardEngine::new(initial),
    };

    let stdout = io::stdout();
    let summaries = Session::new(&mut engine, &config.play, stdout.lock(), args.quiet).run()?;
    let best = summaries.iter().map(|s| s.score).max().unwrap_or(0);
    info!("Completed {} game(s), best score {}", summaries.len(), best);
    Ok(())
}

fn parse_moves(names: &[String]) -> Result<Vec<Direction>> {
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| {
            name.parse::<Direction>()
                .with_context(|| format!("bad --moves entry {name:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move_list() {
        let names: Vec<String> = ["left", " Up", "", "RIGHT"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            parse_moves(&names).unwrap(),
            vec![Direction::Left, Direction::Up, Direction::Right]
        );
        assert!(parse_moves(&["north".to_string()]).is_err());
    }

    #[test]
    fn cli_flags_parse() {
        let args = Args::try_parse_from([
            "twenty48", "--seed", "7", "--moves", "left,down", "--quiet",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.moves, Some(vec!["left".to_string(), "down".to_string()]));
        assert!(args.quiet);
        assert_eq!(args.log, "info");
        assert!(args.config.is_none());
    }
}
