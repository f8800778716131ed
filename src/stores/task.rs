use crate::core::error::ApiError;
use std::future::Future;
use tokio::task::JoinHandle;

/// A backend fetch running on its own task, tied to the lifetime of
/// whoever holds it: dropping the handle aborts the request.
pub struct FetchTask<T> {
    handle: Option<JoinHandle<Result<T, ApiError>>>,
}

impl<T: Send + 'static> FetchTask<T> {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(future)),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the result. An aborted task yields `ApiError::Cancelled`.
    pub async fn join(mut self) -> Result<T, ApiError> {
        let Some(handle) = self.handle.take() else {
            return Err(ApiError::Cancelled);
        };

        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ApiError::Cancelled),
            Err(e) => Err(ApiError::Network(format!("fetch task panicked: {}", e))),
        }
    }
}

impl<T> FetchTask<T> {
    /// Abort the request; `join` then yields `ApiError::Cancelled`
    pub fn cancel(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

impl<T> Drop for FetchTask<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_join_returns_result() {
        let task = FetchTask::spawn(async { Ok::<_, ApiError>(41 + 1) });
        assert_eq!(task.join().await, Ok(42));
    }

    #[tokio::test]
    async fn test_cancel_yields_cancelled() {
        let mut task = FetchTask::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, ApiError>(())
        });
        task.cancel();
        assert_eq!(task.join().await, Err(ApiError::Cancelled));
    }

    #[tokio::test]
    async fn test_drop_aborts_request() {
        let completed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&completed);

        let task = FetchTask::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
            Ok::<_, ApiError>(())
        });
        drop(task);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!completed.load(Ordering::SeqCst));
    }
}
