use crate::core::join::task_result;
use crate::domain::model::{Row, RowResult, SumEvent};
use crate::domain::ports::{Deferred, EventSink, Scheduler};
use crate::utils::error::{Result, SumError};
use futures::{FutureExt, TryFutureExt};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Sums a single row on a later scheduler turn.
pub struct RowSummer<S, E> {
    scheduler: Arc<S>,
    sink: Arc<E>,
}

impl<S, E> Clone for RowSummer<S, E> {
    fn clone(&self) -> Self {
        Self {
            scheduler: Arc::clone(&self.scheduler),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S: Scheduler, E: EventSink> RowSummer<S, E> {
    pub fn new(scheduler: Arc<S>, sink: Arc<E>) -> Self {
        Self { scheduler, sink }
    }

    /// Queues the summation and hands back the raw task handle, so callers
    /// can join several rows together. `index` only tags the result and the
    /// emitted events.
    pub fn spawn_row(&self, row: Row, index: usize) -> JoinHandle<Result<RowResult>> {
        let sink = Arc::clone(&self.sink);
        let task = async move {
            let mut sum = 0.0;
            for value in row {
                sink.emit(SumEvent::RowValueAdded { row: index, value });
                sum += value;
            }
            sink.emit(SumEvent::RowCompleted { row: index, sum });
            Ok::<RowResult, SumError>(RowResult { index, sum })
        };

        self.scheduler
            .defer(task.instrument(tracing::debug_span!("row", index)))
    }

    pub fn sum_row(&self, row: Row, index: usize) -> Deferred<RowResult> {
        let handle = self.spawn_row(row, index);
        async move { task_result(index, handle.await) }.boxed()
    }

    pub fn sum_row_value(&self, row: Row, index: usize) -> Deferred<f64> {
        self.sum_row(row, index).map_ok(|result| result.sum).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{RecordingSink, TokioScheduler};
    use tokio_test::{assert_ok, assert_pending};

    fn summer(sink: &RecordingSink) -> RowSummer<TokioScheduler, RecordingSink> {
        RowSummer::new(
            Arc::new(TokioScheduler::current().unwrap()),
            Arc::new(sink.clone()),
        )
    }

    #[tokio::test]
    async fn test_sum_row() {
        let sink = RecordingSink::new();
        let result = assert_ok!(summer(&sink).sum_row(vec![1.0, 2.0, 3.0], 4).await);
        assert_eq!(result, RowResult { index: 4, sum: 6.0 });
    }

    #[tokio::test]
    async fn test_empty_row_sums_to_zero() {
        let sink = RecordingSink::new();
        let sum = assert_ok!(summer(&sink).sum_row_value(vec![], 0).await);
        assert_eq!(sum, 0.0);
        assert_eq!(sink.events(), vec![SumEvent::RowCompleted { row: 0, sum: 0.0 }]);
    }

    #[tokio::test]
    async fn test_row_never_completes_in_calling_turn() {
        let sink = RecordingSink::new();
        let mut deferred = summer(&sink).sum_row(vec![5.0], 0);

        assert_pending!(futures::poll!(&mut deferred));
        assert!(sink.events().is_empty());

        let result = assert_ok!(deferred.await);
        assert_eq!(result.sum, 5.0);
    }

    #[tokio::test]
    async fn test_events_per_element_then_completion() {
        let sink = RecordingSink::new();
        assert_ok!(summer(&sink).sum_row(vec![1.0, 2.0], 3).await);

        assert_eq!(
            sink.events(),
            vec![
                SumEvent::RowValueAdded { row: 3, value: 1.0 },
                SumEvent::RowValueAdded { row: 3, value: 2.0 },
                SumEvent::RowCompleted { row: 3, sum: 3.0 },
            ]
        );
    }
}
