use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Side length of the board.
pub const SIZE: usize = 4;

/// Tile value that wins the game.
pub const WIN_TILE: u32 = 2048;

/// Largest tile a cell can hold. Two of these never merge.
pub const MAX_TILE: u32 = 1 << 31;

const CELLS: usize = SIZE * SIZE;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions; `TryFrom<u8>` uses this order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The four lines of cell indices affected by a move in this direction.
    ///
    /// Each line lists row-major indices starting at the edge tiles move
    /// toward, so index 0 of a line is always the destination edge.
    ///
    /// ```
    /// use twenty48_core::engine::Direction;
    /// assert_eq!(Direction::Left.lines()[1], [4, 5, 6, 7]);
    /// assert_eq!(Direction::Down.lines()[0], [12, 8, 4, 0]);
    /// ```
    pub fn lines(self) -> [[usize; SIZE]; SIZE] {
        let mut lines = [[0usize; SIZE]; SIZE];
        for (line_idx, line) in lines.iter_mut().enumerate() {
            for (step, cell) in line.iter_mut().enumerate() {
                let back = SIZE - 1 - step;
                *cell = match self {
                    Direction::Left => line_idx * SIZE + step,
                    Direction::Right => line_idx * SIZE + back,
                    Direction::Up => step * SIZE + line_idx,
                    Direction::Down => back * SIZE + line_idx,
                };
            }
        }
        lines
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| EngineError::InvalidDirection(value.to_string()))
    }
}

/// Fixed 4x4 board stored as 16 cells in row-major order.
///
/// A cell holds 0 when empty, otherwise a power of two in `2..=MAX_TILE`.
/// The array type makes the shape structural; every write goes through a
/// checked path so the value invariant holds as well.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    pub(crate) cells: [u32; CELLS],
}

/// True for values a cell may hold: 0 or a power of two in `2..=MAX_TILE`.
#[inline]
fn is_cell_value(value: u32) -> bool {
    value == 0 || ((2..=MAX_TILE).contains(&value) && value.is_power_of_two())
}

impl Grid {
    /// A constant empty grid (all zeros).
    pub const EMPTY: Grid = Grid { cells: [0; CELLS] };

    /// Build a grid from caller-supplied rows, validating shape and values.
    ///
    /// ```
    /// use twenty48_core::engine::{EngineError, Grid};
    /// let g = Grid::from_rows(&[[2i64, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]).unwrap();
    /// assert_eq!(g.get(3, 3), Ok(4));
    ///
    /// let err = Grid::from_rows(&[[3i64, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap_err();
    /// assert!(matches!(err, EngineError::InvalidInitialState(_)));
    /// ```
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, EngineError> {
        if rows.len() != SIZE {
            return Err(EngineError::InvalidInitialState(format!(
                "expected {SIZE} rows, got {}",
                rows.len()
            )));
        }
        let mut grid = Grid::EMPTY;
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != SIZE {
                return Err(EngineError::InvalidInitialState(format!(
                    "row {row_idx} has {} cells, expected {SIZE}",
                    row.len()
                )));
            }
            for (col_idx, &raw) in row.iter().enumerate() {
                let value = u32::try_from(raw)
                    .ok()
                    .filter(|&v| is_cell_value(v))
                    .ok_or_else(|| {
                        EngineError::InvalidInitialState(format!(
                            "cell ({row_idx}, {col_idx}) holds {raw}, \
                             expected 0 or a power of two in 2..={MAX_TILE}"
                        ))
                    })?;
                grid.cells[row_idx * SIZE + col_idx] = value;
            }
        }
        Ok(grid)
    }

    /// Build a grid from a fixed-size array; only the values need checking.
    pub fn from_array(rows: [[u32; SIZE]; SIZE]) -> Result<Self, EngineError> {
        let rows = rows.map(|row| row.map(i64::from));
        Self::from_rows(&rows)
    }

    /// Read the cell at (`row`, `col`).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<u32, EngineError> {
        index_of(row, col).map(|idx| self.cells[idx])
    }

    /// Write the cell at (`row`, `col`). Rejects values that are not tiles.
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> Result<(), EngineError> {
        let idx = index_of(row, col)?;
        if !is_cell_value(value) {
            return Err(EngineError::InvalidTile(value));
        }
        self.cells[idx] = value;
        Ok(())
    }

    /// True when no cell is empty.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// True when every cell is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }

    /// Count the number of empty cells.
    #[inline]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Return the highest tile value on the grid (0 for an empty grid).
    #[inline]
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    #[inline]
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Iterate over cell values in row-major order.
    #[inline]
    pub fn tiles(&self) -> TilesIter<'_> {
        TilesIter {
            cells: &self.cells,
            idx: 0,
        }
    }

    /// Copy the grid out as rows. Mutating the result never touches `self`.
    pub fn to_rows(&self) -> [[u32; SIZE]; SIZE] {
        let mut rows = [[0u32; SIZE]; SIZE];
        for (idx, &value) in self.cells.iter().enumerate() {
            rows[idx / SIZE][idx % SIZE] = value;
        }
        rows
    }
}

#[inline]
fn index_of(row: usize, col: usize) -> Result<usize, EngineError> {
    if row < SIZE && col < SIZE {
        Ok(row * SIZE + col)
    } else {
        Err(EngineError::OutOfBounds { row, col })
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.to_rows())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.to_rows().iter().enumerate() {
            if row_idx > 0 {
                writeln!(f, "{}", "-".repeat(SIZE * 8 - 1))?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl From<Grid> for [[u32; SIZE]; SIZE] {
    fn from(g: Grid) -> Self {
        g.to_rows()
    }
}

impl TryFrom<[[u32; SIZE]; SIZE]> for Grid {
    type Error = EngineError;

    fn try_from(rows: [[u32; SIZE]; SIZE]) -> Result<Self, Self::Error> {
        Grid::from_array(rows)
    }
}

/// Iterator over grid cell values in row-major order.
pub struct TilesIter<'a> {
    cells: &'a [u32; CELLS],
    idx: usize,
}

impl Iterator for TilesIter<'_> {
    type Item = u32;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = *self.cells.get(self.idx)?;
        self.idx += 1;
        Some(value)
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = u32;
    type IntoIter = TilesIter<'a>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

/// Center a value in a 7-character cell; empty cells render blank.
fn format_val(val: u32) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{:^7}", x),
    }
}
