use std::path::Path;

use anyhow::{Context, Result};
use twenty48_core::engine::{Direction, Grid};

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub enum StrategyKind {
    /// Play the listed moves in order, then stop.
    Scripted,
    /// Try up, left, down, right in turn, skipping moves that change nothing.
    Cycle,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Play {
    #[serde(rename = "strategy", default = "defaults::strategy")]
    pub kind: StrategyKind,

    /// Moves for the scripted strategy, by name ("up", "left", ...).
    #[serde(default)]
    pub moves: Vec<Direction>,

    /// Upper bound on effective moves per game.
    #[serde(default = "defaults::max_moves")]
    pub max_moves: u32,

    /// Extra games played after the first, each via `restart`.
    #[serde(default)]
    pub restarts: u32,
}

impl Default for Play {
    fn default() -> Self {
        Self {
            kind: defaults::strategy(),
            moves: Vec::new(),
            max_moves: defaults::max_moves(),
            restarts: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Config {
    /// Seed for tile spawns; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Board the engine starts from (and returns to on restart).
    #[serde(default)]
    pub initial_state: Option<Vec<Vec<i64>>>,

    #[serde(default)]
    pub play: Play,
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(cfg)
    }

    /// Validated initial grid; all zeros when the config leaves it out.
    pub fn initial_grid(&self) -> Result<Grid> {
        match &self.initial_state {
            Some(rows) => Grid::from_rows(rows).context("invalid initial_state in config"),
            None => Ok(Grid::EMPTY),
        }
    }
}

mod defaults {
    use super::StrategyKind;

    pub fn strategy() -> StrategyKind { StrategyKind::Cycle }
    pub fn max_moves() -> u32 { 10_000 }
}
