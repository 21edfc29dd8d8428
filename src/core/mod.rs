pub mod join;
pub mod matrix;
pub mod row;

pub use crate::domain::model::{Matrix, MatrixTotal, Row, RowResult, SumEvent, SumPhase};
pub use crate::domain::ports::{Deferred, EventSink, Scheduler};
pub use crate::utils::error::Result;
