use crate::domain::ports::Scheduler;
use crate::utils::error::{Result, SumError};
use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Scheduler backed by a Tokio runtime. On a `current_thread` runtime spawned
/// tasks run FIFO on later turns, and `yield_now` puts the caller behind them.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Binds to the runtime the caller is running on.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| SumError::NoRuntime {
                message: e.to_string(),
            })
    }
}

impl Scheduler for TokioScheduler {
    fn defer<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(task)
    }

    async fn next_turn(&self) {
        tokio::task::yield_now().await;
    }
}
