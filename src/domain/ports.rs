use crate::domain::model::SumEvent;
use crate::utils::error::Result;
use std::future::Future;
use tokio::task::JoinHandle;

/// Cooperative scheduler seam. `defer` queues a task for a later turn and
/// must never run it inside the calling turn; `next_turn` suspends the caller
/// for exactly one turn.
pub trait Scheduler: Send + Sync + 'static {
    fn defer<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static;

    fn next_turn(&self) -> impl Future<Output = ()> + Send;
}

pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: SumEvent);
}

/// Deferred computation handed back to callers.
pub type Deferred<T> = futures::future::BoxFuture<'static, Result<T>>;
