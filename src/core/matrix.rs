use crate::adapters::TracingSink;
use crate::core::join::join_fail_fast;
use crate::core::row::RowSummer;
use crate::domain::model::{Matrix, MatrixTotal, SumEvent, SumPhase};
use crate::domain::ports::{Deferred, EventSink, Scheduler};
use crate::utils::error::SumError;
use futures::{future, FutureExt, TryFutureExt};
use std::sync::Arc;
use tracing::Instrument;

struct PhaseTracker {
    phase: SumPhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            phase: SumPhase::Created,
        }
    }

    fn advance(&mut self, next: SumPhase) {
        debug_assert!(!self.phase.is_terminal(), "{:?} is terminal", self.phase);
        tracing::debug!("{:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

/// Sums a matrix by fanning out one [`RowSummer`] task per row and joining
/// them one scheduler turn later.
pub struct MatrixSummer<S, E = TracingSink> {
    rows: RowSummer<S, E>,
    scheduler: Arc<S>,
    sink: Arc<E>,
}

impl<S: Scheduler> MatrixSummer<S, TracingSink> {
    pub fn new(scheduler: S) -> Self {
        Self::with_sink(scheduler, TracingSink)
    }
}

impl<S: Scheduler, E: EventSink> MatrixSummer<S, E> {
    pub fn with_sink(scheduler: S, sink: E) -> Self {
        let scheduler = Arc::new(scheduler);
        let sink = Arc::new(sink);
        Self {
            rows: RowSummer::new(Arc::clone(&scheduler), Arc::clone(&sink)),
            scheduler,
            sink,
        }
    }

    pub fn row_summer(&self) -> &RowSummer<S, E> {
        &self.rows
    }

    /// Fails with [`SumError::EmptyMatrix`] when `matrix` has no rows.
    pub fn sum_matrix(&self, matrix: Matrix) -> Deferred<f64> {
        self.sum_matrix_detailed(matrix)
            .map_ok(|total| total.total)
            .boxed()
    }

    /// Row tasks are spawned before this returns. An empty matrix yields an
    /// already failed deferred and spawns nothing.
    pub fn sum_matrix_detailed(&self, matrix: Matrix) -> Deferred<MatrixTotal> {
        let mut phase = PhaseTracker::new();
        let row_count = matrix.len();
        self.sink.emit(SumEvent::SumCalled { rows: row_count });

        phase.advance(SumPhase::Validating);
        if matrix.is_empty() {
            phase.advance(SumPhase::Failed);
            self.sink.emit(SumEvent::Rejected);
            return future::ready(Err(SumError::EmptyMatrix)).boxed();
        }

        phase.advance(SumPhase::FanningOut);
        let handles: Vec<_> = matrix
            .into_iter()
            .enumerate()
            .map(|(index, row)| self.rows.spawn_row(row, index))
            .collect();
        self.sink.emit(SumEvent::RowsSpawned {
            count: handles.len(),
        });

        let scheduler = Arc::clone(&self.scheduler);
        let sink = Arc::clone(&self.sink);
        async move {
            phase.advance(SumPhase::Deferring);
            scheduler.next_turn().await;
            sink.emit(SumEvent::Deferred);

            phase.advance(SumPhase::Joining);
            sink.emit(SumEvent::Joining);
            let rows = match join_fail_fast(handles).await {
                Ok(rows) => rows,
                Err(e) => {
                    phase.advance(SumPhase::Failed);
                    return Err(e);
                }
            };

            phase.advance(SumPhase::Reducing);
            let total = rows.iter().fold(0.0, |acc, row| acc + row.sum);
            sink.emit(SumEvent::TotalComputed { total });
            phase.advance(SumPhase::Completed);

            Ok(MatrixTotal { total, rows })
        }
        .instrument(tracing::debug_span!("sum_matrix", rows = row_count))
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{RecordingSink, TokioScheduler};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::future::Future;
    use tokio::task::JoinHandle;
    use tokio_test::{assert_ok, assert_pending, assert_ready_err};

    /// Counts turns and spawned tasks on top of the Tokio scheduler.
    #[derive(Clone)]
    struct CountingScheduler {
        inner: TokioScheduler,
        turns: Arc<AtomicUsize>,
        spawned: Arc<AtomicUsize>,
    }

    impl CountingScheduler {
        fn new() -> Self {
            Self {
                inner: TokioScheduler::current().unwrap(),
                turns: Arc::new(AtomicUsize::new(0)),
                spawned: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl Scheduler for CountingScheduler {
        fn defer<F>(&self, task: F) -> JoinHandle<F::Output>
        where
            F: Future + Send + 'static,
            F::Output: Send + 'static,
        {
            self.spawned.fetch_add(1, Ordering::SeqCst);
            self.inner.defer(task)
        }

        async fn next_turn(&self) {
            self.turns.fetch_add(1, Ordering::SeqCst);
            self.inner.next_turn().await;
        }
    }

    #[tokio::test]
    async fn test_sum_matrix() {
        let summer = MatrixSummer::new(TokioScheduler::current().unwrap());
        let total = assert_ok!(
            summer
                .sum_matrix(vec![
                    vec![1.0, 2.0, 3.0],
                    vec![4.0, 5.0, 6.0],
                    vec![7.0, 8.0, 9.0],
                ])
                .await
        );
        assert_eq!(total, 45.0);
    }

    #[tokio::test]
    async fn test_empty_matrix_fails_on_first_poll_without_spawning() {
        let scheduler = CountingScheduler::new();
        let summer = MatrixSummer::new(scheduler.clone());

        let mut deferred = summer.sum_matrix(vec![]);
        let err = assert_ready_err!(futures::poll!(&mut deferred));

        assert!(matches!(err, SumError::EmptyMatrix));
        assert_eq!(scheduler.spawned.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.turns.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_defers_exactly_one_turn() {
        let scheduler = CountingScheduler::new();
        let summer = MatrixSummer::new(scheduler.clone());

        let mut deferred = summer.sum_matrix(vec![vec![1.0], vec![2.0]]);
        assert_eq!(scheduler.spawned.load(Ordering::SeqCst), 2);
        assert_pending!(futures::poll!(&mut deferred));

        assert_eq!(assert_ok!(deferred.await), 3.0);
        assert_eq!(scheduler.turns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_detailed_rows_keep_input_order() {
        let summer = MatrixSummer::with_sink(TokioScheduler::current().unwrap(), RecordingSink::new());
        let total = assert_ok!(
            summer
                .sum_matrix_detailed(vec![vec![], vec![1.0, 2.0], vec![10.0]])
                .await
        );

        assert_eq!(total.total, 13.0);
        let indices: Vec<usize> = total.rows.iter().map(|row| row.index).collect();
        let sums: Vec<f64> = total.rows.iter().map(|row| row.sum).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(sums, vec![0.0, 3.0, 10.0]);
    }

    #[tokio::test]
    async fn test_rejection_is_reported_to_sink() {
        let sink = RecordingSink::new();
        let summer = MatrixSummer::with_sink(TokioScheduler::current().unwrap(), sink.clone());

        assert!(summer.sum_matrix(vec![]).await.is_err());
        assert_eq!(
            sink.events(),
            vec![SumEvent::SumCalled { rows: 0 }, SumEvent::Rejected]
        );
    }
}
