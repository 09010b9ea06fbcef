//! Console session state and command execution.
//!
//! [`Console`] ties a [`HeroRoster`], the shared [`MessageLog`] and the
//! input side of the search pipeline together. Executing a command returns
//! the lines to print; search results arrive separately on the pipeline's
//! result stream and are rendered with [`render_search`].

use std::sync::Arc;

use heroes_core::{Hero, HeroRoster, HeroService, Message, MessageLog};
use heroes_search::SearchHandle;

use crate::command::{Command, HELP};

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print these lines and keep reading.
    Lines(Vec<String>),
    /// Stop the session.
    Quit,
}

pub struct Console {
    roster: HeroRoster,
    log: Arc<MessageLog>,
    search: SearchHandle,
}

impl Console {
    pub fn new(service: HeroService, log: Arc<MessageLog>, search: SearchHandle) -> Self {
        Self {
            roster: HeroRoster::new(service),
            log,
            search,
        }
    }

    /// Fill the roster from the backend.
    pub async fn load(&mut self) -> usize {
        self.roster.load().await.len()
    }

    pub fn roster(&self) -> &HeroRoster {
        &self.roster
    }

    pub async fn execute(&mut self, command: Command) -> Reply {
        let lines = match command {
            Command::List => render_heroes(self.roster.heroes()),
            Command::Top => render_heroes(self.roster.top_heroes()),
            Command::Show(id) => match self.roster.service().get_hero(id).await {
                Some(hero) => vec![render_hero(&hero)],
                None => vec![format!("No hero with id {id}")],
            },
            Command::Add(name) => match self.roster.add(&name).await {
                Some(hero) => vec![format!("Added {}", render_hero(hero))],
                None => vec!["Hero was not added".to_string()],
            },
            Command::Rename(id, name) => match self.roster.rename(id, &name).await {
                Some(hero) => vec![format!("Renamed {}", render_hero(hero))],
                None => vec![format!("Hero {id} was not renamed")],
            },
            Command::Delete(id) => {
                if self.roster.delete(id).await {
                    vec![format!("Deleted hero {id}")]
                } else {
                    vec![format!("Hero {id} was not deleted")]
                }
            }
            Command::Search(text) => {
                if let Err(e) = self.search.push(text) {
                    tracing::warn!(error = %e, "Search input dropped");
                    vec![e.to_string()]
                } else {
                    Vec::new()
                }
            }
            Command::Messages => {
                let messages = self.log.messages();
                if messages.is_empty() {
                    vec!["No messages".to_string()]
                } else {
                    messages.iter().map(render_message).collect()
                }
            }
            Command::Clear => {
                self.log.clear();
                vec!["Messages cleared".to_string()]
            }
            Command::Help => vec![HELP.to_string()],
            Command::Quit => return Reply::Quit,
        };

        Reply::Lines(lines)
    }
}

pub fn render_hero(hero: &Hero) -> String {
    format!("{:>4}  {}", hero.id, hero.name)
}

pub fn render_heroes(heroes: &[Hero]) -> Vec<String> {
    if heroes.is_empty() {
        return vec!["No heroes".to_string()];
    }
    heroes.iter().map(render_hero).collect()
}

pub fn render_message(message: &Message) -> String {
    format!("{}  {}", message.recorded_at.format("%H:%M:%S"), message.text)
}

/// One line summarising a search result set.
pub fn render_search(heroes: &[Hero]) -> String {
    if heroes.is_empty() {
        return "search: no matches".to_string();
    }
    let names: Vec<&str> = heroes.iter().map(|h| h.name.as_str()).collect();
    format!("search: {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn renders_search_results() {
        assert_eq!(render_search(&[]), "search: no matches");
        assert_eq!(
            render_search(&[Hero::new(15, "Magneta"), Hero::new(19, "Magma")]),
            "search: Magneta, Magma"
        );
    }

    #[test]
    fn renders_message_with_time() {
        let message = Message {
            text: "getHeroes: fetched heroes".into(),
            recorded_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 3, 7).unwrap(),
        };
        assert_eq!(render_message(&message), "09:03:07  getHeroes: fetched heroes");
    }

    #[test]
    fn renders_hero_rows() {
        assert_eq!(render_hero(&Hero::new(11, "Mr. Nice")), "  11  Mr. Nice");
        assert_eq!(render_heroes(&[]), vec!["No heroes"]);
    }
}
