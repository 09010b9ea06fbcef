//! Local hero list held by a front-end.
//!
//! The backend stays the source of truth; [`HeroRoster`] keeps a copy that
//! may go stale between [`load`](HeroRoster::load) calls. Mutations go to
//! the backend first through [`HeroService`] and are mirrored locally only
//! when the backend accepted them. Deletion is the one optimistic path: the
//! hero disappears locally at once and comes back at its old position if
//! the backend delete fails.

use crate::hero::Hero;
use crate::resilient::CallOutcome;
use crate::service::HeroService;
use crate::types::HeroId;

/// Dashboard slice: positions `1..5` of the list.
const TOP_HEROES_START: usize = 1;
const TOP_HEROES_END: usize = 5;

pub struct HeroRoster {
    service: HeroService,
    heroes: Vec<Hero>,
}

impl HeroRoster {
    /// An empty roster; call [`load`](Self::load) to fill it.
    pub fn new(service: HeroService) -> Self {
        Self {
            service,
            heroes: Vec::new(),
        }
    }

    pub fn service(&self) -> &HeroService {
        &self.service
    }

    /// Replace the local copy with the backend's current list.
    pub async fn load(&mut self) -> &[Hero] {
        self.heroes = self.service.get_heroes().await;
        &self.heroes
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn get(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.id == id)
    }

    /// The dashboard's featured heroes.
    pub fn top_heroes(&self) -> &[Hero] {
        let end = TOP_HEROES_END.min(self.heroes.len());
        let start = TOP_HEROES_START.min(end);
        &self.heroes[start..end]
    }

    /// Add a hero and append it locally once the backend assigned an id.
    pub async fn add(&mut self, name: &str) -> Option<&Hero> {
        let hero = self.service.add_hero(name).await?;
        self.heroes.push(hero);
        self.heroes.last()
    }

    /// Rename a hero held in the roster.
    ///
    /// Returns `None` if the hero is unknown locally, the name is invalid,
    /// or the backend did not accept the update.
    pub async fn rename(&mut self, id: HeroId, name: &str) -> Option<&Hero> {
        let index = self.position(id)?;
        let renamed = match self.heroes[index].renamed(name) {
            Ok(hero) => hero,
            Err(e) => {
                tracing::debug!(id, error = %e, "Rejected rename");
                return None;
            }
        };

        if self.service.update_hero(&renamed).await == CallOutcome::Recovered {
            return None;
        }
        self.heroes[index] = renamed;
        Some(&self.heroes[index])
    }

    /// Delete a hero, restoring it locally if the backend delete fails.
    ///
    /// Returns `true` when the backend confirmed the deletion.
    pub async fn delete(&mut self, id: HeroId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let hero = self.heroes.remove(index);

        match self.service.delete_hero(id).await {
            CallOutcome::Succeeded => return true,
            CallOutcome::Recovered => {}
        }

        tracing::warn!(id, index, "Backend delete failed, restoring hero locally");
        let index = index.min(self.heroes.len());
        self.heroes.insert(index, hero);
        false
    }

    fn position(&self, id: HeroId) -> Option<usize> {
        self.heroes.iter().position(|h| h.id == id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::HeroBackend;
    use crate::memory::{InMemoryHeroBackend, Operation};
    use crate::messages::MessageLog;

    async fn loaded() -> (HeroRoster, Arc<InMemoryHeroBackend>, Arc<MessageLog>) {
        let backend = Arc::new(InMemoryHeroBackend::seeded());
        let log = Arc::new(MessageLog::new());
        let mut roster = HeroRoster::new(HeroService::new(backend.clone(), log.clone()));
        roster.load().await;
        (roster, backend, log)
    }

    #[tokio::test]
    async fn top_heroes_skips_the_first() {
        let (roster, _, _) = loaded().await;
        let names: Vec<_> = roster.top_heroes().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Narco", "Bombasto", "Celeritas", "Magneta"]);
    }

    #[tokio::test]
    async fn top_heroes_on_short_lists() {
        let backend = Arc::new(InMemoryHeroBackend::with_heroes([Hero::new(1, "Solo")]));
        let mut roster =
            HeroRoster::new(HeroService::new(backend, Arc::new(MessageLog::new())));
        roster.load().await;
        assert!(roster.top_heroes().is_empty());

        let empty = HeroRoster::new(roster.service().clone());
        assert!(empty.top_heroes().is_empty());
    }

    #[tokio::test]
    async fn add_appends_backend_hero() {
        let (mut roster, _, _) = loaded().await;
        let added = roster.add("Robin").await.cloned();
        assert_eq!(added, Some(Hero::new(21, "Robin")));
        assert_eq!(roster.heroes().len(), 11);
    }

    #[tokio::test]
    async fn failed_add_leaves_roster_untouched() {
        let (mut roster, backend, _) = loaded().await;
        backend.fail(Operation::Add);
        assert!(roster.add("Robin").await.is_none());
        assert_eq!(roster.heroes().len(), 10);
    }

    #[tokio::test]
    async fn rename_updates_local_copy_after_backend() {
        let (mut roster, backend, _) = loaded().await;
        roster.rename(12, "Narcotic").await;
        assert_eq!(roster.get(12).unwrap().name, "Narcotic");

        backend.fail(Operation::Update);
        assert!(roster.rename(12, "Nope").await.is_none());
        assert_eq!(roster.get(12).unwrap().name, "Narcotic");
    }

    #[tokio::test]
    async fn rename_accepts_long_names() {
        let (mut roster, backend, _) = loaded().await;
        let name = "Z".repeat(80);

        assert_eq!(roster.rename(14, &name).await.map(|h| h.name.clone()), Some(name.clone()));
        assert_eq!(backend.get_hero(14).await.unwrap().name, name);
    }

    #[tokio::test]
    async fn delete_removes_locally_and_remotely() {
        let (mut roster, backend, _) = loaded().await;
        assert!(roster.delete(13).await);
        assert!(roster.get(13).is_none());
        assert_eq!(backend.len(), 9);
    }

    #[tokio::test]
    async fn failed_delete_restores_original_position() {
        let (mut roster, backend, log) = loaded().await;
        backend.fail(Operation::Delete);

        assert!(!roster.delete(13).await);

        assert_eq!(roster.heroes()[2], Hero::new(13, "Bombasto"));
        assert_eq!(roster.heroes().len(), 10);
        assert_eq!(
            log.texts().last().map(String::as_str),
            Some("deleteHero failed: simulated Delete failure")
        );
    }

    #[tokio::test]
    async fn delete_unknown_hero_sends_nothing() {
        let (mut roster, _, log) = loaded().await;
        let before = log.len();
        assert!(!roster.delete(99).await);
        assert_eq!(log.len(), before);
    }
}
