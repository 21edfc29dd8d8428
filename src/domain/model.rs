use serde::{Deserialize, Serialize};

pub type Row = Vec<f64>;
pub type Matrix = Vec<Row>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowResult {
    pub index: usize,
    pub sum: f64,
}

/// Total of a matrix together with the per-row sums, in input row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixTotal {
    pub total: f64,
    pub rows: Vec<RowResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SumPhase {
    Created,
    Validating,
    FanningOut,
    Deferring,
    Joining,
    Reducing,
    Completed,
    Failed,
}

impl SumPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SumPhase::Completed | SumPhase::Failed)
    }
}

/// Diagnostic side channel. Not part of the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SumEvent {
    SumCalled { rows: usize },
    Rejected,
    RowsSpawned { count: usize },
    RowValueAdded { row: usize, value: f64 },
    RowCompleted { row: usize, sum: f64 },
    Deferred,
    Joining,
    TotalComputed { total: f64 },
}

impl SumEvent {
    /// Row the event belongs to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            SumEvent::RowValueAdded { row, .. } | SumEvent::RowCompleted { row, .. } => Some(*row),
            _ => None,
        }
    }
}
