use super::state::{Direction, Grid, MAX_TILE, SIZE};

/// Result of compacting a single line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineOutcome {
    /// At least one tile in the line changed position or value.
    pub moved: bool,
    /// Sum of the tiles produced by merges in this line.
    pub merged: u64,
}

/// Result of a whole-board move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The grid differs from what it was before the move.
    pub changed: bool,
    /// Merge value produced by this move, to be added to the score.
    pub merged: u64,
}

/// Slide and merge every line of `grid` toward `direction`. No randomness.
///
/// ```
/// use twenty48_core::engine::{shift, Direction, Grid};
/// let mut g = Grid::from_array([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
/// let outcome = shift(&mut g, Direction::Left);
/// assert_eq!(g.to_rows()[0], [4, 4, 0, 0]);
/// assert_eq!(outcome.merged, 8);
/// ```
pub fn shift(grid: &mut Grid, direction: Direction) -> MoveOutcome {
    direction
        .lines()
        .into_iter()
        .fold(MoveOutcome::default(), |acc, line| {
            let line_outcome = compact_line(grid, line);
            MoveOutcome {
                changed: acc.changed || line_outcome.moved,
                merged: acc.merged + line_outcome.merged,
            }
        })
}

/// Compact one line in place. `line[0]` is the edge tiles travel toward.
///
/// Tiles are visited starting next to the destination edge, so everything
/// ahead of the current tile is already settled. Each tile slides across
/// empty cells, then merges into an equal neighbour unless that neighbour
/// was itself produced by a merge during this call.
pub fn compact_line(grid: &mut Grid, line: [usize; SIZE]) -> LineOutcome {
    let cells = &mut grid.cells;
    let mut consumed = [false; SIZE];
    let mut outcome = LineOutcome::default();

    for start in 1..SIZE {
        let value = cells[line[start]];
        if value == 0 {
            continue;
        }

        let mut pos = start;
        while pos > 0 && cells[line[pos - 1]] == 0 {
            cells[line[pos - 1]] = value;
            cells[line[pos]] = 0;
            pos -= 1;
        }

        if pos > 0 && cells[line[pos - 1]] == value && !consumed[pos - 1] && can_merge(value) {
            let doubled = value * 2;
            cells[line[pos - 1]] = doubled;
            cells[line[pos]] = 0;
            consumed[pos - 1] = true;
            outcome.merged += u64::from(doubled);
            pos -= 1;
        }

        if pos != start {
            outcome.moved = true;
        }
    }
    outcome
}

/// Two tiles of `value` may merge only if the result still fits a cell.
#[inline]
fn can_merge(value: u32) -> bool {
    value < MAX_TILE
}

/// True if some move could still change the grid: an empty cell exists or
/// two edge-adjacent cells hold the same value.
pub fn has_legal_move(grid: &Grid) -> bool {
    let cells = &grid.cells;
    (0..SIZE * SIZE).any(|idx| {
        let value = cells[idx];
        if value == 0 {
            return true;
        }
        let (row, col) = (idx / SIZE, idx % SIZE);
        let right = col + 1 < SIZE && cells[idx + 1] == value;
        let below = row + 1 < SIZE && cells[idx + SIZE] == value;
        (right || below) && can_merge(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: [u32; 4]) -> Grid {
        Grid::from_array([values, [0; 4], [0; 4], [0; 4]]).unwrap()
    }

    fn shifted_row(values: [u32; 4], direction: Direction) -> ([u32; 4], MoveOutcome) {
        let mut g = row(values);
        let outcome = shift(&mut g, direction);
        (g.to_rows()[0], outcome)
    }

    #[test]
    fn it_shift_left() {
        assert_eq!(shifted_row([0, 0, 0, 0], Direction::Left).0, [0, 0, 0, 0]);
        assert_eq!(shifted_row([2, 4, 2, 4], Direction::Left).0, [2, 4, 2, 4]);
        assert_eq!(shifted_row([2, 2, 4, 4], Direction::Left).0, [4, 8, 0, 0]);
        assert_eq!(shifted_row([2, 0, 0, 2], Direction::Left).0, [4, 0, 0, 0]);
        assert_eq!(shifted_row([0, 0, 0, 4], Direction::Left).0, [4, 0, 0, 0]);
        assert_eq!(shifted_row([2, 8, 8, 4], Direction::Left).0, [2, 16, 4, 0]);
        assert_eq!(shifted_row([2, 0, 0, 4], Direction::Left).0, [2, 4, 0, 0]);
    }

    #[test]
    fn it_shift_right() {
        assert_eq!(shifted_row([0, 0, 0, 0], Direction::Right).0, [0, 0, 0, 0]);
        assert_eq!(shifted_row([2, 4, 2, 4], Direction::Right).0, [2, 4, 2, 4]);
        assert_eq!(shifted_row([2, 2, 4, 4], Direction::Right).0, [0, 0, 4, 8]);
        assert_eq!(shifted_row([32, 0, 0, 32], Direction::Right).0, [0, 0, 0, 64]);
        assert_eq!(shifted_row([0, 4, 4, 4], Direction::Right).0, [0, 0, 4, 8]);
    }

    #[test]
    fn pair_merges_and_scores() {
        let (line, outcome) = shifted_row([2, 2, 0, 0], Direction::Left);
        assert_eq!(line, [4, 0, 0, 0]);
        assert_eq!(outcome, MoveOutcome { changed: true, merged: 4 });
    }

    #[test]
    fn merged_tile_is_consumed() {
        let (line, outcome) = shifted_row([2, 2, 2, 2], Direction::Left);
        assert_eq!(line, [4, 4, 0, 0]);
        assert_eq!(outcome.merged, 8);

        // the 4 produced from the pair must not absorb the sliding 4
        let (line, outcome) = shifted_row([2, 2, 4, 0], Direction::Left);
        assert_eq!(line, [4, 4, 0, 0]);
        assert_eq!(outcome.merged, 4);

        let (line, _) = shifted_row([4, 4, 8, 0], Direction::Right);
        assert_eq!(line, [0, 0, 8, 8]);
    }

    #[test]
    fn test_move_left() {
        let mut g = Grid::from_array([
            [2, 4, 8, 16],
            [2, 8, 8, 4],
            [4, 0, 0, 4],
            [2, 0, 0, 4],
        ])
        .unwrap();
        let outcome = shift(&mut g, Direction::Left);
        assert_eq!(
            g.to_rows(),
            [[2, 4, 8, 16], [2, 16, 4, 0], [8, 0, 0, 0], [2, 4, 0, 0]]
        );
        assert_eq!(outcome, MoveOutcome { changed: true, merged: 24 });
    }

    #[test]
    fn test_move_up() {
        let mut g = Grid::from_array([
            [2, 2, 4, 2],
            [4, 8, 0, 0],
            [8, 8, 0, 0],
            [16, 4, 4, 4],
        ])
        .unwrap();
        let outcome = shift(&mut g, Direction::Up);
        assert_eq!(
            g.to_rows(),
            [[2, 2, 8, 2], [4, 16, 0, 4], [8, 4, 0, 0], [16, 0, 0, 0]]
        );
        assert_eq!(outcome.merged, 24);
    }

    #[test]
    fn test_move_down() {
        let mut g = Grid::from_array([
            [2, 2, 4, 2],
            [4, 8, 0, 0],
            [8, 8, 0, 0],
            [16, 4, 4, 4],
        ])
        .unwrap();
        shift(&mut g, Direction::Down);
        assert_eq!(
            g.to_rows(),
            [[2, 0, 0, 0], [4, 2, 0, 0], [8, 16, 0, 2], [16, 4, 8, 4]]
        );
    }

    #[test]
    fn packed_left_column_is_a_no_op() {
        let before = Grid::from_array([
            [2, 4, 0, 0],
            [4, 2, 0, 0],
            [8, 0, 0, 0],
            [16, 0, 0, 0],
        ])
        .unwrap();
        let mut g = before;
        let outcome = shift(&mut g, Direction::Left);
        assert_eq!(outcome, MoveOutcome { changed: false, merged: 0 });
        assert_eq!(g, before);
    }

    #[test]
    fn merging_preserves_tile_sum() {
        let mut g = Grid::from_array([
            [2, 2, 2, 2],
            [4, 4, 8, 8],
            [2, 0, 2, 4],
            [0, 16, 16, 0],
        ])
        .unwrap();
        let before = g.sum();
        for direction in Direction::ALL {
            shift(&mut g, direction);
            assert_eq!(g.sum(), before);
        }
    }

    #[test]
    fn max_tiles_never_merge() {
        let (line, outcome) = shifted_row([MAX_TILE, MAX_TILE, 0, 0], Direction::Left);
        assert_eq!(line, [MAX_TILE, MAX_TILE, 0, 0]);
        assert_eq!(outcome, MoveOutcome { changed: false, merged: 0 });

        let (line, outcome) = shifted_row([0, MAX_TILE, 0, MAX_TILE], Direction::Left);
        assert_eq!(line, [MAX_TILE, MAX_TILE, 0, 0]);
        assert_eq!(outcome, MoveOutcome { changed: true, merged: 0 });

        // the largest legal merge still works
        let half = MAX_TILE / 2;
        let (line, outcome) = shifted_row([half, half, 0, 0], Direction::Left);
        assert_eq!(line, [MAX_TILE, 0, 0, 0]);
        assert_eq!(outcome.merged, u64::from(MAX_TILE));

        let stuck = Grid::from_array([
            [MAX_TILE, MAX_TILE, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ])
        .unwrap();
        assert!(!has_legal_move(&stuck));
    }

    #[test]
    fn legal_move_detection() {
        assert!(has_legal_move(&Grid::EMPTY));
        let checker = Grid::from_array([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ])
        .unwrap();
        assert!(!has_legal_move(&checker));

        let vertical_pair = Grid::from_array([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 8, 4],
            [4, 2, 8, 2],
        ])
        .unwrap();
        assert!(has_legal_move(&vertical_pair));

        for direction in Direction::ALL {
            let mut g = checker;
            assert!(!shift(&mut g, direction).changed);
        }
    }
}
