// Adapters layer: concrete schedulers and event sinks behind crate::domain::ports.

pub mod events;
pub mod scheduler;

pub use events::{RecordingSink, TracingSink};
pub use scheduler::TokioScheduler;
