use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::ops::has_legal_move;
use super::state::{Grid, WIN_TILE};

/// Classification of a game, always derived from the grid contents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Playing,
    Win,
    Lose,
}

impl Status {
    /// Derive the status of `grid`.
    ///
    /// The win check runs before the lose check, so a stuck board that
    /// holds a 2048 tile still counts as won.
    ///
    /// ```
    /// use twenty48_core::engine::{Grid, Status};
    /// assert_eq!(Status::of(&Grid::EMPTY), Status::Idle);
    /// ```
    pub fn of(grid: &Grid) -> Status {
        if grid.is_empty() {
            Status::Idle
        } else if grid.tiles().any(|v| v == WIN_TILE) {
            Status::Win
        } else if !has_legal_move(grid) {
            Status::Lose
        } else {
            Status::Playing
        }
    }

    /// True for `Win` and `Lose`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Win | Status::Lose)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Playing => "playing",
            Status::Win => "win",
            Status::Lose => "lose",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Status::Idle),
            "playing" => Ok(Status::Playing),
            "win" => Ok(Status::Win),
            "lose" => Ok(Status::Lose),
            other => Err(EngineError::InvalidStatus(other.to_string())),
        }
    }
}
