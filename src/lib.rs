pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{RecordingSink, TokioScheduler, TracingSink};
pub use config::SummerConfig;
pub use core::{join::join_fail_fast, matrix::MatrixSummer, row::RowSummer};
pub use domain::model::{Matrix, MatrixTotal, Row, RowResult, SumEvent};
pub use utils::error::{Result, SumError};
