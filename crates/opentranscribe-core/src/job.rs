//! Single-use background transcription jobs.
//!
//! A job runs its blocking work on a worker thread and delivers exactly one
//! tagged completion over a oneshot channel: `Ok(transcript)` or
//! `Err(message)`. Error text can never be mistaken for transcript text.
//!
//! There is no cancellation. Dropping the `Job` detaches the worker; it runs
//! to completion and its late result is discarded.

use tokio::sync::oneshot;

use crate::error::CoreError;

/// A spawned transcription job. Consumed by [`Job::wait`]; not reusable.
pub struct Job {
    rx: oneshot::Receiver<Result<String, String>>,
}

impl Job {
    /// Run blocking work on a background worker.
    pub fn spawn<F>(work: F) -> Job
    where
        F: FnOnce() -> Result<String, CoreError> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::task::spawn_blocking(move || {
            let result = work().map_err(|e| e.to_string());
            // Receiver may be gone if the app closed mid-job; discard then
            let _ = tx.send(result);
        });
        Job { rx }
    }

    /// Wait for the job's single completion.
    pub async fn wait(self) -> Result<String, String> {
        self.rx
            .await
            .unwrap_or_else(|_| Err("Transcription task dropped unexpectedly".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_delivers_text_unchanged() {
        let job = Job::spawn(|| Ok("hello world".to_string()));
        assert_eq!(job.wait().await.unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_failure_delivers_error_message() {
        let job = Job::spawn(|| Err(CoreError::Decode("corrupt file".into())));
        let err = job.wait().await.unwrap_err();
        assert!(err.contains("corrupt file"));
    }

    #[tokio::test]
    async fn test_panicking_worker_still_completes_the_wait() {
        let job = Job::spawn(|| panic!("boom"));
        let err = job.wait().await.unwrap_err();
        assert!(err.contains("dropped unexpectedly"));
    }

    #[tokio::test]
    async fn test_dropped_job_detaches_worker() {
        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let job = Job::spawn(move || {
            done_tx.send(()).unwrap();
            Ok(String::new())
        });
        drop(job);
        // Worker still runs to completion after the receiver is gone
        done_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
    }
}
