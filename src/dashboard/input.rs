//! Line-oriented user commands for the live dashboard.

use crate::api::ExportFormat;
use crate::render::RowRef;

/// Help text listing the dashboard commands.
pub const HELP: &str = "\
Commands:
  /<term> | search <term>   filter by url or status (empty term clears)
  add <url>                 start monitoring a website
  rm <row|url>              stop monitoring (asks for confirmation)
  y | n                     answer a pending confirmation
  history <row|url>         show status changes for a website
  close                     close the history panel
  export json|csv           show the export download link
  help                      show this help
  quit                      leave the dashboard";

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Search(String),
    Add(String),
    Remove(RowRef),
    Confirm(bool),
    History(RowRef),
    CloseHistory,
    Export(ExportFormat),
    Help,
    Quit,
    Unknown(String),
}

impl UserCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(term) = line.strip_prefix('/') {
            return Some(UserCommand::Search(term.to_string()));
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_lowercase().as_str(), rest) {
            ("search" | "s", term) => UserCommand::Search(term.to_string()),
            ("add" | "a", url) => UserCommand::Add(url.to_string()),
            ("rm" | "remove" | "del", row) if !row.is_empty() => UserCommand::Remove(parse_row(row)),
            ("history" | "h", row) if !row.is_empty() => UserCommand::History(parse_row(row)),
            ("y" | "yes", "") => UserCommand::Confirm(true),
            ("n" | "no", "") => UserCommand::Confirm(false),
            ("close" | "back", "") => UserCommand::CloseHistory,
            ("export", format) => match format.parse() {
                Ok(format) => UserCommand::Export(format),
                Err(_) => UserCommand::Unknown(line.to_string()),
            },
            ("help" | "?", _) => UserCommand::Help,
            ("quit" | "q" | "exit", "") => UserCommand::Quit,
            _ => UserCommand::Unknown(line.to_string()),
        };

        Some(command)
    }
}

fn parse_row(raw: &str) -> RowRef {
    match raw.parse() {
        Ok(row) => row,
        Err(never) => match never {},
    }
}
