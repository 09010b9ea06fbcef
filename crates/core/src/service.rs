//! Hero service.
//!
//! [`HeroService`] is the only thing front-ends talk to. Each method makes
//! exactly one backend call through [`Resilient`], so callers never see a
//! [`BackendError`](crate::error::BackendError): a failed read yields an
//! empty list or `None`, and the diagnostic log explains what happened.

use std::sync::Arc;

use crate::backend::HeroBackend;
use crate::hero::{Hero, NewHero};
use crate::messages::MessageSink;
use crate::resilient::{CallOutcome, Resilient};
use crate::types::HeroId;

/// Backend access with failures absorbed into the message log.
///
/// Cheap to clone; clones share the backend and the sink.
#[derive(Clone)]
pub struct HeroService {
    backend: Arc<dyn HeroBackend>,
    messages: Arc<dyn MessageSink>,
}

impl HeroService {
    pub fn new(backend: Arc<dyn HeroBackend>, messages: Arc<dyn MessageSink>) -> Self {
        Self { backend, messages }
    }

    /// All heroes, or an empty list if the backend fails.
    pub async fn get_heroes(&self) -> Vec<Hero> {
        Resilient::new("getHeroes")
            .with_fallback(Vec::new())
            .describe(|_| "fetched heroes".into())
            .run(self.messages.as_ref(), self.backend.list_heroes())
            .await
            .unwrap_or_default()
    }

    /// One hero by id, or `None` if the backend fails (including 404).
    pub async fn get_hero(&self, id: HeroId) -> Option<Hero> {
        Resilient::new(format!("getHero id={id}"))
            .describe(move |_| format!("fetched hero id={id}"))
            .run(self.messages.as_ref(), self.backend.get_hero(id))
            .await
    }

    /// One hero by id, where an unknown id is a normal outcome rather than
    /// a failure.
    pub async fn get_hero_no_404(&self, id: HeroId) -> Option<Hero> {
        let backend = &self.backend;
        let call = async move {
            backend
                .find_by_id(id)
                .await
                .map(|heroes| heroes.into_iter().next())
        };

        Resilient::new(format!("getHero id={id}"))
            .describe(move |found: &Option<Hero>| match found {
                Some(_) => format!("fetched hero id={id}"),
                None => format!("did not find hero id={id}"),
            })
            .run(self.messages.as_ref(), call)
            .await
            .flatten()
    }

    /// Heroes whose name contains `term`.
    ///
    /// A blank term returns an empty list without touching the backend or
    /// the message log.
    pub async fn search_heroes(&self, term: &str) -> Vec<Hero> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }

        let quoted = term.to_string();
        Resilient::new("searchHeroes")
            .with_fallback(Vec::new())
            .describe(move |_| format!("found heroes matching \"{quoted}\""))
            .run(self.messages.as_ref(), self.backend.search_heroes(term))
            .await
            .unwrap_or_default()
    }

    /// Create a hero from raw user input.
    ///
    /// Blank names are dropped locally; nothing is sent or recorded.
    pub async fn add_hero(&self, name: &str) -> Option<Hero> {
        let hero = match NewHero::new(name) {
            Ok(hero) => hero,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid hero name");
                return None;
            }
        };

        Resilient::new("addHero")
            .describe(|h: &Hero| format!("added hero w/ id={}", h.id))
            .run(self.messages.as_ref(), self.backend.add_hero(hero))
            .await
    }

    /// Persist `hero`'s name.
    ///
    /// There is no value to surface, so the caller gets the call's outcome
    /// to reconcile its local copy with.
    pub async fn update_hero(&self, hero: &Hero) -> CallOutcome {
        let id = hero.id;
        Resilient::new("updateHero")
            .describe(move |_| format!("updated hero id={id}"))
            .run_with_outcome(self.messages.as_ref(), self.backend.update_hero(hero))
            .await
            .1
    }

    /// Remove a hero. [`CallOutcome::Succeeded`] once the backend confirmed it.
    pub async fn delete_hero(&self, id: HeroId) -> CallOutcome {
        Resilient::new("deleteHero")
            .describe(move |_| format!("deleted hero id={id}"))
            .run_with_outcome(self.messages.as_ref(), self.backend.delete_hero(id))
            .await
            .1
    }
}
