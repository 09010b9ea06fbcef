//! The search driver task.
//!
//! [`spawn`] starts one tokio task per pipeline. The task owns every piece
//! of pipeline state (pending value, quiet-period timer, change filter,
//! generation counter), so nothing is shared or locked. Lookups run on
//! their own tasks and report back tagged with their generation; a stale
//! result is dropped when it arrives, the lookup itself is never aborted.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::DebounceConfig;
use crate::error::SearchError;
use crate::stage::{ChangeFilter, Generation, LatestWins};

/// Start a search pipeline on the current tokio runtime.
///
/// `lookup` receives trimmed, non-empty terms and returns their result
/// set. Failures are the lookup's business: wrap fallible calls so they
/// resolve to a (possibly empty) result set.
pub fn spawn<L, Fut, T>(lookup: L, config: DebounceConfig) -> (SearchHandle, SearchResults<T>)
where
    L: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Vec<T>> + Send + 'static,
    T: Send + 'static,
{
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (output_tx, output_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();

    let driver = Driver {
        lookup: Arc::new(lookup),
        output: output_tx,
        filter: ChangeFilter::default(),
        latest: LatestWins::default(),
    };
    tokio::spawn(driver.run(config, input_rx, cancel.clone()));

    (
        SearchHandle {
            input: input_tx,
            cancel,
        },
        SearchResults { rx: output_rx },
    )
}

/// Input side of a pipeline.
///
/// Clones feed the same pipeline. The pipeline finishes once every handle
/// is dropped and outstanding work has surfaced.
#[derive(Clone)]
pub struct SearchHandle {
    input: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
}

impl SearchHandle {
    /// Feed one raw input value (typically the whole search box text).
    pub fn push(&self, term: impl Into<String>) -> Result<(), SearchError> {
        self.input
            .send(term.into())
            .map_err(|_| SearchError::Closed)
    }

    /// Stop the pipeline now, dropping any pending or in-flight term.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.input.is_closed()
    }
}

/// Output side of a pipeline: one result set per surfaced term, in
/// dispatch order.
pub struct SearchResults<T> {
    rx: mpsc::UnboundedReceiver<Vec<T>>,
}

impl<T> Stream for SearchResults<T> {
    type Item = Vec<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

struct Driver<L, T> {
    lookup: Arc<L>,
    output: mpsc::UnboundedSender<Vec<T>>,
    filter: ChangeFilter,
    latest: LatestWins,
}

impl<L, Fut, T> Driver<L, T>
where
    L: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Vec<T>> + Send + 'static,
    T: Send + 'static,
{
    async fn run(
        mut self,
        config: DebounceConfig,
        mut input: mpsc::UnboundedReceiver<String>,
        cancel: CancellationToken,
    ) {
        let quiet = config.quiet_period;
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(Generation, Vec<T>)>();

        let timer = tokio::time::sleep(quiet);
        tokio::pin!(timer);
        let mut pending: Option<String> = None;
        let mut input_open = true;

        tracing::debug!(quiet_ms = quiet.as_millis() as u64, "Search pipeline started");

        loop {
            if !input_open && pending.is_none() && self.latest.is_idle() {
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Search pipeline cancelled");
                    break;
                }
                _ = self.output.closed() => {
                    tracing::debug!("Search results dropped, stopping pipeline");
                    break;
                }
                received = input.recv(), if input_open => match received {
                    Some(term) => {
                        pending = Some(term);
                        timer.as_mut().reset(Instant::now() + quiet);
                    }
                    None => {
                        input_open = false;
                        // Input finished: the pending value is as settled as it gets.
                        if let Some(term) = pending.take() {
                            if !self.settle(term, &done_tx) {
                                break;
                            }
                        }
                    }
                },
                _ = &mut timer, if pending.is_some() => {
                    if let Some(term) = pending.take() {
                        if !self.settle(term, &done_tx) {
                            break;
                        }
                    }
                }
                Some((generation, items)) = done_rx.recv() => {
                    if !self.latest.accept(generation) {
                        tracing::debug!(generation, "Discarding superseded lookup result");
                        continue;
                    }
                    if self.output.send(items).is_err() {
                        break;
                    }
                }
            }
        }

        tracing::debug!(generation = self.latest.current(), "Search pipeline finished");
    }

    /// Pass a settled value through the change filter and dispatch it.
    ///
    /// Returns `false` once nobody is listening for results.
    fn settle(&mut self, term: String, done_tx: &mpsc::UnboundedSender<(Generation, Vec<T>)>) -> bool {
        if !self.filter.admit(&term) {
            tracing::debug!(term = %term, "Term unchanged, no lookup");
            return true;
        }

        let trimmed = term.trim();
        if trimmed.is_empty() {
            self.latest.supersede();
            return self.output.send(Vec::new()).is_ok();
        }

        let generation = self.latest.dispatch();
        let lookup = Arc::clone(&self.lookup);
        let done_tx = done_tx.clone();
        let trimmed = trimmed.to_string();

        tracing::debug!(term = %trimmed, generation, "Dispatching lookup");
        tokio::spawn(async move {
            let items = lookup(trimmed).await;
            // The driver may have finished; then the result has no reader.
            let _ = done_tx.send((generation, items));
        });
        true
    }
}
