use log::{debug, info, trace};
use rand::rngs::StdRng;

use super::error::EngineError;
use super::ops::{self, MoveOutcome};
use super::score::ScoreTracker;
use super::spawn::{spawn_tile, RngSource, SpawnSource};
use super::state::{Direction, Grid, SIZE};
use super::status::Status;

/// Tiles placed by `start` and `restart`.
const SEED_TILES: usize = 2;

/// The board engine: owns the live grid, the initial snapshot used by
/// `restart`, the score and the spawn source.
///
/// Callers mutate only through `start`, `apply` and `restart`, then poll
/// `state`, `score` and `status`. Everything handed out is a copy.
///
/// ```
/// use twenty48_core::engine::{BoardEngine, Direction, SequenceSource, Status};
///
/// let rows = [[2i64, 2, 0, 0], [0; 4], [0; 4], [0; 4]];
/// let mut game = BoardEngine::from_rows(&rows)
///     .unwrap()
///     .with_spawn_source(SequenceSource::new([0]));
/// let outcome = game.apply(Direction::Left);
/// assert!(outcome.changed);
/// assert_eq!(game.score(), 4);
/// // the new tile lands in the first empty cell
/// assert_eq!(game.state()[0], [4, 2, 0, 0]);
/// assert_eq!(game.status(), Status::Playing);
/// ```
#[derive(Debug, Clone)]
pub struct BoardEngine<S = RngSource<StdRng>> {
    initial: Grid,
    grid: Grid,
    score: ScoreTracker,
    source: S,
}

impl BoardEngine<RngSource<StdRng>> {
    /// Engine over `initial` with an entropy-seeded spawn source.
    pub fn new(initial: Grid) -> Self {
        Self::with_source(initial, RngSource::from_entropy())
    }

    /// Engine whose spawns are reproducible for a given `seed`.
    pub fn with_seed(initial: Grid, seed: u64) -> Self {
        Self::with_source(initial, RngSource::seeded(seed))
    }

    /// Validate caller-supplied rows and build an engine over them.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, EngineError> {
        Ok(Self::new(Grid::from_rows(rows)?))
    }
}

impl<S: SpawnSource> BoardEngine<S> {
    /// Engine over `initial` drawing spawn locations from `source`.
    pub fn with_source(initial: Grid, source: S) -> Self {
        BoardEngine {
            initial,
            grid: initial,
            score: ScoreTracker::new(),
            source,
        }
    }

    /// Swap the spawn source, keeping grid and score.
    pub fn with_spawn_source<T: SpawnSource>(self, source: T) -> BoardEngine<T> {
        BoardEngine {
            initial: self.initial,
            grid: self.grid,
            score: self.score,
            source,
        }
    }

    /// Seed the board with two tiles.
    pub fn start(&mut self) {
        self.seed_tiles();
        info!("game started, status={}", self.status());
    }

    /// Slide/merge toward `direction`. When anything changed, one tile is
    /// spawned and the merge total goes to the score; otherwise nothing
    /// about the engine changes.
    pub fn apply(&mut self, direction: Direction) -> MoveOutcome {
        let mut next = self.grid;
        let outcome = ops::shift(&mut next, direction);
        if !outcome.changed {
            trace!("move {direction} had no effect");
            return outcome;
        }
        self.grid = next;
        spawn_tile(&mut self.grid, &mut self.source);
        self.score.record(outcome.merged);
        debug!(
            "move {direction}: merged={} score={} status={}",
            outcome.merged,
            self.score.total(),
            self.status()
        );
        outcome
    }

    /// Parse a direction name ("up", "Left", ...) and apply it. An unknown
    /// name is reported without touching the engine.
    pub fn move_named(&mut self, name: &str) -> Result<MoveOutcome, EngineError> {
        let direction: Direction = name.parse()?;
        Ok(self.apply(direction))
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.apply(Direction::Left)
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.apply(Direction::Right)
    }

    pub fn move_up(&mut self) -> MoveOutcome {
        self.apply(Direction::Up)
    }

    pub fn move_down(&mut self) -> MoveOutcome {
        self.apply(Direction::Down)
    }

    /// Back to a copy of the initial grid with score 0, then reseed.
    pub fn restart(&mut self) {
        self.grid = self.initial;
        self.score.reset();
        self.seed_tiles();
        info!("game restarted, status={}", self.status());
    }

    fn seed_tiles(&mut self) {
        for _ in 0..SEED_TILES {
            spawn_tile(&mut self.grid, &mut self.source);
        }
    }

    /// Snapshot of the live grid as rows.
    pub fn state(&self) -> [[u32; SIZE]; SIZE] {
        self.grid.to_rows()
    }

    /// Copy of the live grid.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Copy of the grid captured at construction.
    pub fn initial_state(&self) -> Grid {
        self.initial
    }

    pub fn score(&self) -> u64 {
        self.score.total()
    }

    /// Status derived from the current grid.
    pub fn status(&self) -> Status {
        Status::of(&self.grid)
    }
}
