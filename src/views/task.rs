use futures::future::{AbortHandle, Aborted, abortable};
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::warn;

/// The single in-flight request of a view.
///
/// Dropping the task aborts it, so whoever owns it decides its lifetime.
pub struct ViewTask<T> {
    handle: JoinHandle<Result<T, Aborted>>,
    abort: AbortHandle,
}

impl<T: Send + 'static> ViewTask<T> {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (future, abort) = abortable(future);
        Self {
            handle: tokio::spawn(future),
            abort,
        }
    }

    /// Waits for the result. `None` if the task was aborted or panicked.
    pub async fn finish(mut self) -> Option<T> {
        match (&mut self.handle).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(Aborted)) => None,
            Err(e) => {
                warn!("View task failed: {}", e);
                None
            }
        }
    }
}

impl<T> Drop for ViewTask<T> {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
