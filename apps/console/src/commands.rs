//! Line commands accepted by the interactive console.

use client_core::Tab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    SelectTab(Tab),
    Refresh,
    Show,
    Help,
    Quit,
    /// Any other text: becomes the event draft and is submitted.
    Submit(String),
    Empty,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  :simulate | :history | :leaders   switch tab
  :refresh                          reload history and leaders
  :show                             redraw the active tab
  :help                             this text
  :quit                             exit
any other line is submitted as an event description";

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        let Some(name) = trimmed.strip_prefix(':') else {
            return Self::Submit(line.trim_end_matches(['\r', '\n']).to_string());
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Self::Quit,
            "refresh" => Self::Refresh,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            other => other
                .parse::<Tab>()
                .map(Self::SelectTab)
                .unwrap_or_else(|_| Self::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_switches() {
        assert_eq!(
            ConsoleCommand::parse(":history"),
            ConsoleCommand::SelectTab(Tab::History)
        );
        assert_eq!(
            ConsoleCommand::parse("  :Leaders "),
            ConsoleCommand::SelectTab(Tab::Leaders)
        );
    }

    #[test]
    fn plain_text_is_submitted() {
        assert_eq!(
            ConsoleCommand::parse("China announces naval exercises near Taiwan\n"),
            ConsoleCommand::Submit("China announces naval exercises near Taiwan".to_string())
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(ConsoleCommand::parse("   "), ConsoleCommand::Empty);
        assert_eq!(
            ConsoleCommand::parse(":settings"),
            ConsoleCommand::Unknown("settings".to_string())
        );
        assert_eq!(ConsoleCommand::parse(":q"), ConsoleCommand::Quit);
    }
}
