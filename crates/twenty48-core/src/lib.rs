//! twenty48-core: the rule engine of the 4x4 sliding-tile merge puzzle.
//!
//! This crate provides:
//! - A fixed 16-cell `Grid` with bounds-checked access (`engine::state`)
//! - One line-compaction routine that slides and merges once per move (`engine::ops`)
//! - Injectable tile spawning (`engine::spawn`), derived `Status` and a score tracker
//! - The `BoardEngine` facade that a presentation layer polls after each call
//!
//! Quick start:
//! ```
//! use twenty48_core::engine::{BoardEngine, Direction, Grid, Status};
//!
//! // Deterministic engine seeded from a fixed value
//! let mut game = BoardEngine::with_seed(Grid::EMPTY, 42);
//! assert_eq!(game.status(), Status::Idle);
//!
//! game.start();
//! assert_eq!(game.status(), Status::Playing);
//!
//! let _ = game.apply(Direction::Left);
//! let snapshot = game.state();
//! assert_eq!(snapshot.len(), 4);
//! ```
//!
//! For reproducible spawn locations in tests, build the engine with
//! `BoardEngine::with_source` and a `SequenceSource`.

pub mod engine;
