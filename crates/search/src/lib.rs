//! Debounced type-ahead search.
//!
//! Raw keystroke strings are pushed into a [`SearchHandle`]; settled search
//! terms are looked up and their result sets come out of a
//! [`SearchResults`] stream. Three stages sit in between:
//!
//! 1. a quiet-period gate that lets a value through only after the input
//!    has been silent for [`DebounceConfig::quiet_period`];
//! 2. a [`ChangeFilter`] that drops a settled value equal to the previous
//!    one;
//! 3. [`LatestWins`] dispatch: every lookup runs to completion, but only the
//!    result of the most recently dispatched one is surfaced.
//!
//! This crate knows nothing about heroes. The lookup is any async closure
//! from a trimmed term to a result set.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod stage;

pub use config::{DebounceConfig, DEFAULT_QUIET_PERIOD_MS};
pub use error::SearchError;
pub use pipeline::{spawn, SearchHandle, SearchResults};
pub use stage::{ChangeFilter, Generation, LatestWins};
