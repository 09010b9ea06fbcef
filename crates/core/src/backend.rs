//! The contract every hero store implements.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::hero::{Hero, NewHero};
use crate::types::HeroId;

/// Remote (or remote-like) hero store.
///
/// Every method may fail asynchronously with a [`BackendError`]. Callers
/// normally go through [`HeroService`](crate::service::HeroService), which
/// absorbs these failures.
#[async_trait]
pub trait HeroBackend: Send + Sync {
    /// Every stored hero.
    async fn list_heroes(&self) -> Result<Vec<Hero>, BackendError>;

    /// One hero by id; [`BackendError::NotFound`] when absent.
    async fn get_hero(&self, id: HeroId) -> Result<Hero, BackendError>;

    /// Heroes with the given id, as a list. An unknown id yields an empty
    /// list instead of an error.
    async fn find_by_id(&self, id: HeroId) -> Result<Vec<Hero>, BackendError>;

    /// Heroes whose name contains `term`, ignoring case. `term` is already
    /// trimmed and non-empty.
    async fn search_heroes(&self, term: &str) -> Result<Vec<Hero>, BackendError>;

    /// Store a new hero and return it with its assigned id.
    async fn add_hero(&self, hero: NewHero) -> Result<Hero, BackendError>;

    /// Replace the stored name of `hero.id`.
    async fn update_hero(&self, hero: &Hero) -> Result<(), BackendError>;

    /// Remove a hero.
    async fn delete_hero(&self, id: HeroId) -> Result<(), BackendError>;
}
