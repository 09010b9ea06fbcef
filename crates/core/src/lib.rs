//! Core hero model and services for the Tour of Heroes.
//!
//! - [`hero`]: the [`Hero`] record and validated [`NewHero`] payload.
//! - [`messages`]: the append-only diagnostic [`MessageLog`].
//! - [`resilient`]: a wrapper that turns a failing remote call into a
//!   fallback value plus one diagnostic entry.
//! - [`backend`]: the [`HeroBackend`] trait implemented by stores.
//! - [`service`]: [`HeroService`], every backend call wrapped resiliently.
//! - [`roster`]: the front-end's local copy of the hero list.
//! - [`memory`]: an offline in-process backend.

pub mod backend;
pub mod error;
pub mod hero;
pub mod memory;
pub mod messages;
pub mod resilient;
pub mod roster;
pub mod service;
pub mod types;

pub use backend::HeroBackend;
pub use error::{BackendError, CoreError};
pub use hero::{Hero, NewHero};
pub use memory::InMemoryHeroBackend;
pub use messages::{Message, MessageLog, MessageSink};
pub use resilient::{CallOutcome, Resilient};
pub use roster::HeroRoster;
pub use service::HeroService;
pub use types::HeroId;
