use async_trait::async_trait;
use thiserror::Error;
use tokio_retry::strategy::{jitter, FixedInterval};
use tokio_retry::RetryIf;

use crate::pipeline::payload::{Payload, PayloadPatch};

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("transient: {0:#}")]
    Transient(anyhow::Error),
    #[error("fatal: {0:#}")]
    Fatal(anyhow::Error),
}

impl TaskError {
    pub fn is_transient(&self) -> bool {
        matches!(self, TaskError::Transient(_))
    }
}

pub trait AsTransientError<T> {
    fn into_transient_error(self) -> Result<T, TaskError>;
}

impl<T> AsTransientError<T> for anyhow::Result<T> {
    #[inline]
    fn into_transient_error(self) -> Result<T, TaskError> {
        self.map_err(TaskError::Transient)
    }
}

pub trait AsFatalError<T> {
    fn into_fatal_error(self) -> Result<T, TaskError>;
}

impl<T> AsFatalError<T> for anyhow::Result<T> {
    #[inline]
    fn into_fatal_error(self) -> Result<T, TaskError> {
        self.map_err(TaskError::Fatal)
    }
}

/// A named unit of pipeline work. Tasks never mutate the payload directly;
/// each returns its contribution as a patch and the runner merges it.
#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, payload: &Payload)
        -> Result<PayloadPatch, TaskError>;
}

pub type TransientPredicate = fn(&TaskError) -> bool;

/// The default predicate treats every error as retryable, matching the
/// upstream taxonomy where network and db glitches dominate.
pub fn all_errors_transient(_: &TaskError) -> bool {
    true
}

/// Decorator re-running the inner task on transient failures.
pub struct RetryingTask {
    inner: Box<dyn Task>,
    max_attempts: usize,
    interval_ms: u64,
    is_transient: TransientPredicate,
}

impl RetryingTask {
    pub fn new(inner: impl Task + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            max_attempts: 3,
            interval_ms: 500,
            is_transient: all_errors_transient,
        }
    }

    pub fn with_predicate(mut self, is_transient: TransientPredicate) -> Self {
        self.is_transient = is_transient;
        self
    }

    #[cfg(test)]
    fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }
}

#[async_trait]
impl Task for RetryingTask {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let retry_strategy = FixedInterval::from_millis(self.interval_ms)
            .map(jitter)
            .take(self.max_attempts - 1);

        RetryIf::spawn(
            retry_strategy,
            || self.inner.run(payload),
            |e: &TaskError| (self.is_transient)(e),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct FlakyTask {
        attempts: AtomicUsize,
        failures_before_success: usize,
        fatal: bool,
    }

    #[async_trait]
    impl Task for FlakyTask {
        fn name(&self) -> &'static str {
            "FlakyTask"
        }

        async fn run(
            &self,
            _payload: &Payload,
        ) -> Result<PayloadPatch, TaskError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures_before_success {
                let err = anyhow::anyhow!("boom");
                return if self.fatal {
                    Err(TaskError::Fatal(err))
                } else {
                    Err(TaskError::Transient(err))
                };
            }
            Ok(PayloadPatch::default())
        }
    }

    #[tokio::test]
    async fn retries_transient_errors_up_to_three_attempts() {
        let task = RetryingTask::new(FlakyTask {
            attempts: AtomicUsize::new(0),
            failures_before_success: 2,
            fatal: false,
        })
        .with_interval_ms(1);
        let payload = Payload::new(1, 1, None);

        assert!(task.run(&payload).await.is_ok());
    }

    #[tokio::test]
    async fn gives_up_after_retry_exhaustion() {
        let task = RetryingTask::new(FlakyTask {
            attempts: AtomicUsize::new(0),
            failures_before_success: 3,
            fatal: false,
        })
        .with_interval_ms(1);
        let payload = Payload::new(1, 1, None);

        assert!(task.run(&payload).await.is_err());
    }

    #[tokio::test]
    async fn non_transient_errors_abort_immediately() {
        let inner = FlakyTask {
            attempts: AtomicUsize::new(0),
            failures_before_success: 1,
            fatal: true,
        };
        let task = RetryingTask::new(inner)
            .with_interval_ms(1)
            .with_predicate(|e| e.is_transient());
        let payload = Payload::new(1, 1, None);

        let result = task.run(&payload).await;
        assert!(matches!(result, Err(TaskError::Fatal(_))));
    }
}
