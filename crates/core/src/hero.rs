//! Hero records.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::HeroId;

/// A hero as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
}

impl Hero {
    pub fn new(id: HeroId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Return a copy of this hero carrying a new, validated name.
    pub fn renamed(&self, name: &str) -> Result<Self, CoreError> {
        Ok(Self {
            id: self.id,
            name: validate_name(name)?,
        })
    }
}

/// Payload for creating a hero. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
    pub name: String,
}

impl NewHero {
    /// Build a payload from raw user input, trimming the name.
    pub fn new(name: &str) -> Result<Self, CoreError> {
        Ok(Self {
            name: validate_name(name)?,
        })
    }
}

/// Trim `name` and check something is left.
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Hero name must not be blank".into()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn new_hero_trims_name() {
        let hero = NewHero::new("  Robin ").unwrap();
        assert_eq!(hero.name, "Robin");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_matches!(NewHero::new("   "), Err(CoreError::Validation(_)));
        assert_matches!(NewHero::new(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn long_name_is_kept_whole() {
        let name = "x".repeat(200);
        assert_eq!(NewHero::new(&name).unwrap().name, name);
    }

    #[test]
    fn renamed_keeps_id() {
        let hero = Hero::new(12, "Narco");
        let renamed = hero.renamed(" Narcotic ").unwrap();
        assert_eq!(renamed, Hero::new(12, "Narcotic"));
    }

    #[test]
    fn hero_wire_shape() {
        let json = serde_json::to_value(Hero::new(7, "Robin")).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "name": "Robin"}));
    }
}
