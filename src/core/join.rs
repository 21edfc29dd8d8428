use crate::utils::error::{Result, SumError};
use futures::future::try_join_all;
use tokio::task::{JoinError, JoinHandle};

pub(crate) fn task_result<T>(index: usize, joined: std::result::Result<Result<T>, JoinError>) -> Result<T> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(SumError::RowTask {
            index,
            message: e.to_string(),
        }),
    }
}

/// Waits for every handle and returns the outputs in handle order, not
/// completion order. The first failure wins: the remaining tasks are aborted
/// and never awaited.
pub async fn join_fail_fast<T>(mut handles: Vec<JoinHandle<Result<T>>>) -> Result<Vec<T>> {
    let joined = try_join_all(
        handles
            .iter_mut()
            .enumerate()
            .map(|(index, handle)| async move { task_result(index, handle.await) }),
    )
    .await;

    if let Err(e) = &joined {
        tracing::warn!("Join failed, abandoning {} tasks: {}", handles.len(), e);
        for handle in &handles {
            handle.abort();
        }
    }

    joined
}
