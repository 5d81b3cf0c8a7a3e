use crate::grid::Position;
use thiserror::Error;

/// Errors raised by the maze model and the planners.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    InvalidCell {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("cell {0:?} has no grid neighbor to the {1}")]
    OffGrid(Position, &'static str),

    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid traversal cost {0}")]
    InvalidCost(u32),

    /// A numeric option outside the range it is meaningful in.
    #[error("{name} must be {expected}, got {value}")]
    InvalidParameter {
        name: &'static str,
        expected: &'static str,
        value: f64,
    },

    /// The goal is unreachable under the current walls and hazards.
    #[error("no path found from {start:?} to {goal:?}")]
    NoPathFound { start: Position, goal: Position },

    #[error("gave up after {0} attempts")]
    AttemptsExhausted(usize),
}

pub type Result<T> = std::result::Result<T, PlanError>;
