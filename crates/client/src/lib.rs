//! HTTP hero backend.
//!
//! [`HttpHeroBackend`] implements [`HeroBackend`] against a REST collection
//! at `{base_url}/api/heroes` using [`reqwest`]. It does no retrying and no
//! backoff; a failed request is reported once as a [`BackendError`] and the
//! caller decides what to do with it.

use std::time::Duration;

use async_trait::async_trait;
use heroes_core::{BackendError, Hero, HeroBackend, HeroId, NewHero};
use serde::de::DeserializeOwned;

/// Path of the hero collection relative to the base URL.
const HEROES_PATH: &str = "api/heroes";

/// Errors building a client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// [`HeroBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpHeroBackend {
    client: reqwest::Client,
    heroes_url: String,
}

impl HttpHeroBackend {
    /// Create a backend for the API rooted at `base_url`, e.g.
    /// `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a backend whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a backend reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            heroes_url: format!("{}/{HEROES_PATH}", base_url.trim_end_matches('/')),
        }
    }

    /// Full URL of the hero collection.
    pub fn heroes_url(&self) -> &str {
        &self.heroes_url
    }

    fn hero_url(&self, id: HeroId) -> String {
        format!("{}/{id}", self.heroes_url)
    }

    // ---- private helpers ----

    /// Turn a non-success status into a [`BackendError`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        response.json::<T>().await.map_err(transport)
    }

    /// Check the status and discard the body.
    async fn check_status(response: reqwest::Response) -> Result<(), BackendError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Failures before any status was received, or while decoding the body.
fn transport(err: reqwest::Error) -> BackendError {
    tracing::debug!(error = %err, "Hero API request failed");
    BackendError::Transport(err.to_string())
}

#[async_trait]
impl HeroBackend for HttpHeroBackend {
    async fn list_heroes(&self) -> Result<Vec<Hero>, BackendError> {
        let response = self
            .client
            .get(&self.heroes_url)
            .send()
            .await
            .map_err(transport)?;
        Self::parse_response(response).await
    }

    async fn get_hero(&self, id: HeroId) -> Result<Hero, BackendError> {
        let response = self
            .client
            .get(self.hero_url(id))
            .send()
            .await
            .map_err(transport)?;
        Self::parse_response(response).await
    }

    async fn find_by_id(&self, id: HeroId) -> Result<Vec<Hero>, BackendError> {
        let response = self
            .client
            .get(&self.heroes_url)
            .query(&[("id", id)])
            .send()
            .await
            .map_err(transport)?;
        Self::parse_response(response).await
    }

    async fn search_heroes(&self, term: &str) -> Result<Vec<Hero>, BackendError> {
        let response = self
            .client
            .get(&self.heroes_url)
            .query(&[("name", term)])
            .send()
            .await
            .map_err(transport)?;
        Self::parse_response(response).await
    }

    async fn add_hero(&self, hero: NewHero) -> Result<Hero, BackendError> {
        let response = self
            .client
            .post(&self.heroes_url)
            .json(&hero)
            .send()
            .await
            .map_err(transport)?;
        Self::parse_response(response).await
    }

    async fn update_hero(&self, hero: &Hero) -> Result<(), BackendError> {
        let response = self
            .client
            .put(&self.heroes_url)
            .json(hero)
            .send()
            .await
            .map_err(transport)?;
        Self::check_status(response).await
    }

    async fn delete_hero(&self, id: HeroId) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.hero_url(id))
            .send()
            .await
            .map_err(transport)?;
        Self::check_status(response).await
    }
}
