//! Tile spawning behind a replaceable random source.

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::state::{Grid, SIZE};

/// Value of every spawned tile.
pub const SPAWN_VALUE: u32 = 2;

/// Source of spawn choices: returns an index in `0..bound` (`bound > 0`).
pub trait SpawnSource {
    fn pick(&mut self, bound: usize) -> usize;
}

/// Uniform picks backed by any `rand` RNG.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// Seeded source for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }
}

impl<R: Rng> SpawnSource for RngSource<R> {
    #[inline]
    fn pick(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of picks, cycling when exhausted.
///
/// Each entry is reduced modulo the number of empty cells at the time of the
/// spawn, so `0` always means "first empty cell in row-major order".
///
/// ```
/// use twenty48_core::engine::{spawn_tile, Grid, SequenceSource};
/// let mut g = Grid::EMPTY;
/// let mut src = SequenceSource::new([0, 15]);
/// assert_eq!(spawn_tile(&mut g, &mut src), Some((0, 0)));
/// // 15 empty cells remain; index 15 wraps to 0 -> cell (0, 1)
/// assert_eq!(spawn_tile(&mut g, &mut src), Some((0, 1)));
/// ```
#[derive(Debug, Clone)]
pub struct SequenceSource {
    picks: Vec<usize>,
    pos: usize,
}

impl SequenceSource {
    pub fn new<I: IntoIterator<Item = usize>>(picks: I) -> Self {
        SequenceSource {
            picks: picks.into_iter().collect(),
            pos: 0,
        }
    }
}

impl SpawnSource for SequenceSource {
    fn pick(&mut self, bound: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let raw = self.picks[self.pos % self.picks.len()];
        self.pos += 1;
        raw % bound
    }
}

/// Place a 2 in a uniformly chosen empty cell. Returns the cell as
/// `(row, col)`, or `None` without touching the grid when it is full.
pub fn spawn_tile<S: SpawnSource + ?Sized>(
    grid: &mut Grid,
    source: &mut S,
) -> Option<(usize, usize)> {
    let empty: Vec<usize> = grid
        .cells
        .iter()
        .enumerate()
        .filter_map(|(idx, &v)| (v == 0).then_some(idx))
        .collect();
    if empty.is_empty() {
        trace!("grid full, no tile spawned");
        return None;
    }
    let idx = empty[source.pick(empty.len()) % empty.len()];
    grid.cells[idx] = SPAWN_VALUE;
    let cell = (idx / SIZE, idx % SIZE);
    trace!("spawned {SPAWN_VALUE} at {cell:?}");
    Some(cell)
}
