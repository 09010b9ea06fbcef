//! Offline hero store.
//!
//! [`InMemoryHeroBackend`] keeps heroes in a process-local map. It backs the
//! console when no remote API is configured and doubles as a test fixture.
//! Individual operations can be made to fail to exercise error paths.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use regex::RegexBuilder;

use crate::backend::HeroBackend;
use crate::error::{BackendError, CoreError};
use crate::hero::{Hero, NewHero};
use crate::types::HeroId;

/// Id handed out when the store is empty.
pub const FIRST_HERO_ID: HeroId = 11;

/// The classic starting roster.
pub const SEED_HEROES: &[(HeroId, &str)] = &[
    (11, "Mr. Nice"),
    (12, "Narco"),
    (13, "Bombasto"),
    (14, "Celeritas"),
    (15, "Magneta"),
    (16, "RubberMan"),
    (17, "Dynama"),
    (18, "Dr IQ"),
    (19, "Magma"),
    (20, "Tornado"),
];

/// Operations that can be forced to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Search,
    Add,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct State {
    heroes: BTreeMap<HeroId, Hero>,
    failing: HashSet<Operation>,
}

/// Process-local [`HeroBackend`].
#[derive(Debug, Default)]
pub struct InMemoryHeroBackend {
    state: Mutex<State>,
}

impl InMemoryHeroBackend {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding [`SEED_HEROES`].
    pub fn seeded() -> Self {
        Self::with_heroes(SEED_HEROES.iter().map(|&(id, name)| Hero::new(id, name)))
    }

    pub fn with_heroes(heroes: impl IntoIterator<Item = Hero>) -> Self {
        let heroes = heroes.into_iter().map(|h| (h.id, h)).collect();
        Self {
            state: Mutex::new(State {
                heroes,
                failing: HashSet::new(),
            }),
        }
    }

    /// Make `op` fail with a transport error until [`heal`](Self::heal).
    pub fn fail(&self, op: Operation) {
        self.state.lock().failing.insert(op);
    }

    /// Undo every [`fail`](Self::fail).
    pub fn heal(&self) {
        self.state.lock().failing.clear();
    }

    /// Number of stored heroes.
    pub fn len(&self) -> usize {
        self.state.lock().heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().heroes.is_empty()
    }

    fn check(state: &State, op: Operation) -> Result<(), BackendError> {
        if state.failing.contains(&op) {
            return Err(BackendError::Transport(format!(
                "simulated {op:?} failure"
            )));
        }
        Ok(())
    }

    fn next_id(state: &State) -> HeroId {
        state
            .heroes
            .keys()
            .next_back()
            .map_or(FIRST_HERO_ID, |max| max + 1)
    }
}

#[async_trait]
impl HeroBackend for InMemoryHeroBackend {
    async fn list_heroes(&self) -> Result<Vec<Hero>, BackendError> {
        let state = self.state.lock();
        Self::check(&state, Operation::List)?;
        Ok(state.heroes.values().cloned().collect())
    }

    async fn get_hero(&self, id: HeroId) -> Result<Hero, BackendError> {
        let state = self.state.lock();
        Self::check(&state, Operation::Get)?;
        state
            .heroes
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound { entity: "hero", id }.into())
    }

    async fn find_by_id(&self, id: HeroId) -> Result<Vec<Hero>, BackendError> {
        let state = self.state.lock();
        Self::check(&state, Operation::Get)?;
        Ok(state.heroes.get(&id).cloned().into_iter().collect())
    }

    async fn search_heroes(&self, term: &str) -> Result<Vec<Hero>, BackendError> {
        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .map_err(|e| BackendError::Rejected(e.to_string()))?;

        let state = self.state.lock();
        Self::check(&state, Operation::Search)?;
        Ok(state
            .heroes
            .values()
            .filter(|h| pattern.is_match(&h.name))
            .cloned()
            .collect())
    }

    async fn add_hero(&self, hero: NewHero) -> Result<Hero, BackendError> {
        let mut state = self.state.lock();
        Self::check(&state, Operation::Add)?;
        let id = Self::next_id(&state);
        let hero = Hero::new(id, hero.name);
        state.heroes.insert(id, hero.clone());
        Ok(hero)
    }

    async fn update_hero(&self, hero: &Hero) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        Self::check(&state, Operation::Update)?;
        match state.heroes.get_mut(&hero.id) {
            Some(stored) => {
                stored.name = hero.name.clone();
                Ok(())
            }
            None => Err(BackendError::NotFound),
        }
    }

    async fn delete_hero(&self, id: HeroId) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        Self::check(&state, Operation::Delete)?;
        state
            .heroes
            .remove(&id)
            .map(|_| ())
            .ok_or(BackendError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn seeded_store_lists_ten_heroes_in_id_order() {
        let store = InMemoryHeroBackend::seeded();
        let heroes = store.list_heroes().await.unwrap();
        assert_eq!(heroes.len(), 10);
        assert_eq!(heroes[0], Hero::new(11, "Mr. Nice"));
        assert_eq!(heroes[9], Hero::new(20, "Tornado"));
    }

    #[tokio::test]
    async fn add_assigns_next_id() {
        let store = InMemoryHeroBackend::seeded();
        let hero = store.add_hero(NewHero::new("Robin").unwrap()).await.unwrap();
        assert_eq!(hero, Hero::new(21, "Robin"));
    }

    #[tokio::test]
    async fn add_to_empty_store_starts_at_first_id() {
        let store = InMemoryHeroBackend::new();
        let hero = store.add_hero(NewHero::new("Robin").unwrap()).await.unwrap();
        assert_eq!(hero.id, FIRST_HERO_ID);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let store = InMemoryHeroBackend::seeded();
        let found = store.search_heroes("MA").await.unwrap();
        let names: Vec<_> = found.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Magneta", "RubberMan", "Dynama", "Magma"]);
    }

    #[tokio::test]
    async fn search_treats_term_literally() {
        let store = InMemoryHeroBackend::seeded();
        let found = store.search_heroes("Mr.").await.unwrap();
        assert_eq!(found, vec![Hero::new(11, "Mr. Nice")]);
        assert!(store.search_heroes(".*").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_unknown_hero_is_not_found() {
        let store = InMemoryHeroBackend::seeded();
        assert_matches!(store.get_hero(42).await, Err(BackendError::NotFound));
        assert!(store.find_by_id(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete() {
        let store = InMemoryHeroBackend::seeded();
        store.update_hero(&Hero::new(12, "Narcotic")).await.unwrap();
        assert_eq!(store.get_hero(12).await.unwrap().name, "Narcotic");

        store.delete_hero(12).await.unwrap();
        assert_matches!(store.delete_hero(12).await, Err(BackendError::NotFound));
        assert_eq!(store.len(), 9);
    }

    #[tokio::test]
    async fn forced_failures_until_healed() {
        let store = InMemoryHeroBackend::seeded();
        store.fail(Operation::List);
        assert_matches!(store.list_heroes().await, Err(BackendError::Transport(_)));

        store.heal();
        assert!(store.list_heroes().await.is_ok());
    }
}
