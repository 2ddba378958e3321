//! Optional backends and the outcome of running them.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

/// A backend that may or may not be available in this deployment.
///
/// `NotConfigured` is a normal operating mode: stages backed by it are skipped without any
/// call being attempted.
pub enum Capability<T: ?Sized> {
    Configured(Arc<T>),
    NotConfigured,
}

impl<T: ?Sized> Capability<T> {
    pub fn from_option(backend: Option<Arc<T>>) -> Self {
        match backend {
            Some(backend) => Capability::Configured(backend),
            None => Capability::NotConfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Capability::Configured(_))
    }

    /// Run `op` against the backend, absorbing failures.
    ///
    /// Failures are logged at `warn` with the stage name and never returned to the caller.
    pub async fn run<R, E, F, Fut>(&self, stage: &'static str, op: F) -> StageOutcome<R>
    where
        F: FnOnce(Arc<T>) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Display,
    {
        let backend = match self {
            Capability::Configured(backend) => Arc::clone(backend),
            Capability::NotConfigured => {
                tracing::debug!(stage, "Stage skipped: backend not configured");
                return StageOutcome::NotConfigured;
            }
        };

        let start = std::time::Instant::now();
        match op(backend).await {
            Ok(value) => {
                tracing::debug!(
                    stage,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Stage completed"
                );
                StageOutcome::Completed(value)
            }
            Err(e) => {
                tracing::warn!(
                    stage,
                    error = %e,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Stage failed, continuing without its result"
                );
                StageOutcome::Failed
            }
        }
    }
}

impl<T: ?Sized> Clone for Capability<T> {
    fn clone(&self) -> Self {
        match self {
            Capability::Configured(backend) => Capability::Configured(Arc::clone(backend)),
            Capability::NotConfigured => Capability::NotConfigured,
        }
    }
}

impl<T: ?Sized> Default for Capability<T> {
    fn default() -> Self {
        Capability::NotConfigured
    }
}

impl<T: ?Sized> std::fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Configured(_) => f.write_str("Configured"),
            Capability::NotConfigured => f.write_str("NotConfigured"),
        }
    }
}

/// Result of one optional stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<R> {
    Completed(R),
    NotConfigured,
    /// The backend was called and failed; the failure has already been logged.
    Failed,
}

impl<R> StageOutcome<R> {
    pub fn into_option(self) -> Option<R> {
        match self {
            StageOutcome::Completed(value) => Some(value),
            StageOutcome::NotConfigured | StageOutcome::Failed => None,
        }
    }
}
