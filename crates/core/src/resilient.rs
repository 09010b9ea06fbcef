//! Resilient remote calls.
//!
//! [`Resilient`] runs one fallible future and always completes with a
//! value: the call's own result on success, or the configured fallback on
//! failure. Either way exactly one entry is appended to the
//! [`MessageSink`]. Failures are also emitted as `tracing` warnings for
//! whoever is watching the process logs, and are never re-raised.
//!
//! ```
//! # use heroes_core::{MessageLog, Resilient};
//! # tokio_test_block(async {
//! let log = MessageLog::new();
//! let heroes: Option<Vec<String>> = Resilient::new("getHeroes")
//!     .with_fallback(Vec::new())
//!     .run(&log, async { Err::<Vec<String>, _>("Service Unavailable") })
//!     .await;
//!
//! assert_eq!(heroes, Some(Vec::new()));
//! assert_eq!(log.texts(), vec!["getHeroes failed: Service Unavailable"]);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::fmt::Display;
use std::future::Future;

use crate::messages::MessageSink;

/// Detail recorded on success when no describer is given.
const DEFAULT_SUCCESS_DETAIL: &str = "succeeded";

/// How a single resilient call finished.
///
/// Both variants hand the caller a value of the same shape; only the
/// diagnostic trail differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Succeeded,
    Recovered,
}

type Describe<T> = Box<dyn FnOnce(&T) -> String + Send>;

/// One configured resilient call.
///
/// Built with [`new`](Self::new), optionally given a fallback and a success
/// describer, then consumed by [`run`](Self::run).
pub struct Resilient<T> {
    operation: String,
    fallback: Option<T>,
    describe: Option<Describe<T>>,
}

impl<T> Resilient<T> {
    /// Start configuring a call named `operation`.
    ///
    /// The name prefixes every diagnostic entry, e.g. `"getHero id=42"`.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            fallback: None,
            describe: None,
        }
    }

    /// Value surfaced when the call fails. Without one, failure yields `None`.
    pub fn with_fallback(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Produce the success detail from the returned value.
    pub fn describe<F>(mut self, describe: F) -> Self
    where
        F: FnOnce(&T) -> String + Send + 'static,
    {
        self.describe = Some(Box::new(describe));
        self
    }

    /// Await `call` once and absorb any failure.
    pub async fn run<E, Fut>(self, sink: &dyn MessageSink, call: Fut) -> Option<T>
    where
        E: Display,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run_with_outcome(sink, call).await.0
    }

    /// Like [`run`](Self::run), also reporting whether the value came from
    /// the call or from the fallback.
    pub async fn run_with_outcome<E, Fut>(
        self,
        sink: &dyn MessageSink,
        call: Fut,
    ) -> (Option<T>, CallOutcome)
    where
        E: Display,
        Fut: Future<Output = Result<T, E>>,
    {
        let Self {
            operation,
            fallback,
            describe,
        } = self;

        match call.await {
            Ok(value) => {
                let detail = match describe {
                    Some(describe) => describe(&value),
                    None => DEFAULT_SUCCESS_DETAIL.to_string(),
                };
                tracing::debug!(operation = %operation, "Remote call succeeded");
                sink.record(format!("{operation}: {detail}"));
                (Some(value), CallOutcome::Succeeded)
            }
            Err(e) => {
                tracing::warn!(
                    operation = %operation,
                    error = %e,
                    has_fallback = fallback.is_some(),
                    "Remote call failed, using fallback",
                );
                sink.record(format!("{operation} failed: {e}"));
                (fallback, CallOutcome::Recovered)
            }
        }
    }
}
