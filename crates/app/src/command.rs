//! Console command parsing.

use heroes_core::HeroId;

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every hero in the roster.
    List,
    /// Show the dashboard's featured heroes.
    Top,
    /// Fetch one hero from the backend.
    Show(HeroId),
    Add(String),
    Rename(HeroId, String),
    Delete(HeroId),
    /// Feed the search box; the text is passed through untouched.
    Search(String),
    /// Print the diagnostic log.
    Messages,
    /// Clear the diagnostic log.
    Clear,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type 'help' for a list of commands")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid hero id: {0}")]
    InvalidId(String),
}

pub const HELP: &str = "\
Commands:
  list                 list all heroes
  top                  show top heroes
  show <id>            fetch one hero
  add <name>           add a hero
  rename <id> <name>   rename a hero
  delete <id>          delete a hero
  search <text>        type into the search box
  messages             show the message log
  clear                clear the message log
  help                 show this help
  quit                 exit";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = match trimmed.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (trimmed, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "top" | "dashboard" => Command::Top,
            "show" | "get" => Command::Show(parse_id(rest, "show <id>")?),
            "add" => {
                if rest.trim().is_empty() {
                    return Err(CommandError::Usage("add <name>"));
                }
                Command::Add(rest.trim().to_string())
            }
            "rename" => {
                let (id, name) = rest
                    .trim()
                    .split_once(' ')
                    .ok_or(CommandError::Usage("rename <id> <name>"))?;
                Command::Rename(parse_id(id, "rename <id> <name>")?, name.trim().to_string())
            }
            "delete" | "rm" => Command::Delete(parse_id(rest, "delete <id>")?),
            "search" | "/" => Command::Search(rest.to_string()),
            "messages" | "log" => Command::Messages,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_id(raw: &str, usage: &'static str) -> Result<HeroId, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse("list"), Command::List);
        assert_eq!(parse("  TOP "), Command::Top);
        assert_eq!(parse("messages"), Command::Messages);
        assert_eq!(parse("quit\n"), Command::Quit);
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);
    }

    #[test]
    fn parses_ids_and_names() {
        assert_eq!(parse("show 42"), Command::Show(42));
        assert_eq!(parse("add  Robin "), Command::Add("Robin".into()));
        assert_eq!(parse("rename 12 Dr Narco"), Command::Rename(12, "Dr Narco".into()));
        assert_eq!(parse("delete 13"), Command::Delete(13));
    }

    #[test]
    fn search_keeps_raw_text() {
        assert_eq!(parse("search  bat "), Command::Search(" bat ".into()));
        assert_eq!(parse("search"), Command::Search(String::new()));
    }

    #[test]
    fn reports_bad_input() {
        assert_matches!(Command::parse("show"), Err(CommandError::Usage(_)));
        assert_matches!(Command::parse("show abc"), Err(CommandError::InvalidId(_)));
        assert_matches!(Command::parse("add   "), Err(CommandError::Usage(_)));
        assert_matches!(Command::parse("rename 12"), Err(CommandError::Usage(_)));
        assert_matches!(Command::parse("fly"), Err(CommandError::Unknown(_)));
    }
}
