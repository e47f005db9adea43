//! Engine module: fixed 4x4 grid, slide/merge ops, tile spawning, status and
//! score. The public API stays small; presentation code only ever sees copies.
//!
//! - `Grid` is the 16-cell state with bounds-checked accessors.
//! - `BoardEngine` ties the pieces together behind `start`/`apply`/`restart`.
//! - Free functions mirror the pieces when convenient (e.g., `shift`, `spawn_tile`).

mod error;
pub mod game;
mod ops;
mod score;
pub mod spawn;
pub mod state;
mod status;

pub use error::EngineError;
pub use game::BoardEngine;
pub use score::ScoreTracker;
pub use spawn::{spawn_tile, RngSource, SequenceSource, SpawnSource};
pub use state::{Direction, Grid, MAX_TILE, SIZE, WIN_TILE};
pub use status::Status;

pub use ops::{compact_line, has_legal_move, shift, LineOutcome, MoveOutcome};
