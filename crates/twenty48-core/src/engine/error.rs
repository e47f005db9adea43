/// Errors surfaced by the engine. None of them leave the engine half-mutated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid initial state: {0}")]
    InvalidInitialState(String),
    #[error("invalid direction: {0:?} (expected up, down, left or right)")]
    InvalidDirection(String),
    #[error("cell ({row}, {col}) is outside the 4x4 grid")]
    OutOfBounds { row: usize, col: usize },
    #[error("{0} is not a valid tile value")]
    InvalidTile(u32),
    #[error("unknown status {0:?}")]
    InvalidStatus(String),
}
