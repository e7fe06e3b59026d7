//! Operator command set and line parsing.

use thiserror::Error;

use crate::services::report_service::REPORT_USAGE;

/// Kinds of commands, in the order they are listed in the help table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Refresh from the remote bracket.
    Update,
    /// Toggle a match's in-progress marker.
    Start,
    /// Report a finished match.
    Report,
    /// Print the help table.
    Help,
    /// Leave the console.
    Quit,
}

impl CommandKind {
    /// Usage line printed when the arguments do not fit.
    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Update => "u",
            CommandKind::Start => "* [match identifier]",
            CommandKind::Report => REPORT_USAGE,
            CommandKind::Help => "h",
            CommandKind::Quit => "q",
        }
    }
}

/// One spelling of a command.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    /// Single-character form.
    pub short: &'static str,
    /// Word form.
    pub long: &'static str,
    /// Help table description.
    pub help: &'static str,
    /// Command the token selects.
    pub kind: CommandKind,
}

/// Every accepted token. `?` is a second short form of `help`.
pub const BINDINGS: &[Binding] = &[
    Binding {
        short: "u",
        long: "update",
        help: "update match info",
        kind: CommandKind::Update,
    },
    Binding {
        short: "*",
        long: "start",
        help: "toggle match's in progress status e.g. `start A`",
        kind: CommandKind::Start,
    },
    Binding {
        short: "r",
        long: "report",
        help: "report the result of a match e.g. `report A 2-0`",
        kind: CommandKind::Report,
    },
    Binding {
        short: "h",
        long: "help",
        help: "print help",
        kind: CommandKind::Help,
    },
    Binding {
        short: "?",
        long: "help",
        help: "print help",
        kind: CommandKind::Help,
    },
    Binding {
        short: "q",
        long: "quit",
        help: "quit",
        kind: CommandKind::Quit,
    },
];

/// A parsed operator command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `update` / `u`.
    Update,
    /// `start A` / `* A`.
    Start {
        /// Upper-cased match code.
        identifier: String,
    },
    /// `report A 2-1` / `r A 2-1`.
    Report {
        /// Upper-cased match code.
        identifier: String,
        /// Score as typed; validated when the report runs.
        score: String,
    },
    /// `help` / `h` / `?`.
    Help,
    /// `quit` / `q`.
    Quit,
}

/// Why a line did not produce a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Blank line.
    #[error("empty input")]
    Empty,
    /// First token is not a known command.
    #[error("invalid command: {0}")]
    Unknown(String),
    /// Known command with the wrong number of arguments.
    #[error("{}", .0.usage())]
    Usage(CommandKind),
}

fn lookup(token: &str) -> Option<CommandKind> {
    BINDINGS
        .iter()
        .find(|binding| binding.short == token || binding.long == token)
        .map(|binding| binding.kind)
}

impl Command {
    /// Parse one input line. Tokens are case-insensitive.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.to_lowercase();
        let mut tokens = line.split_whitespace();
        let token = tokens.next().ok_or(ParseError::Empty)?;
        let kind = lookup(token).ok_or_else(|| ParseError::Unknown(token.to_string()))?;
        let args: Vec<&str> = tokens.collect();

        match (kind, args.as_slice()) {
            (CommandKind::Update, []) => Ok(Command::Update),
            (CommandKind::Start, [identifier]) => Ok(Command::Start {
                identifier: identifier.to_uppercase(),
            }),
            (CommandKind::Report, [identifier, score]) => Ok(Command::Report {
                identifier: identifier.to_uppercase(),
                score: (*score).to_string(),
            }),
            (CommandKind::Help, []) => Ok(Command::Help),
            (CommandKind::Quit, []) => Ok(Command::Quit),
            (kind, _) => Err(ParseError::Usage(kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms_are_equivalent() {
        assert_eq!(Command::parse("u"), Ok(Command::Update));
        assert_eq!(Command::parse("UPDATE"), Ok(Command::Update));
        assert_eq!(Command::parse("?"), Ok(Command::Help));
        assert_eq!(Command::parse("h"), Ok(Command::Help));
        assert_eq!(Command::parse("Quit"), Ok(Command::Quit));
    }

    #[test]
    fn identifiers_are_upper_cased() {
        assert_eq!(
            Command::parse("* b1"),
            Ok(Command::Start {
                identifier: "B1".into()
            })
        );
        assert_eq!(
            Command::parse("report a 2-0"),
            Ok(Command::Report {
                identifier: "A".into(),
                score: "2-0".into()
            })
        );
    }

    #[test]
    fn wrong_arity_reports_usage() {
        assert_eq!(
            Command::parse("start"),
            Err(ParseError::Usage(CommandKind::Start))
        );
        assert_eq!(
            Command::parse("r A"),
            Err(ParseError::Usage(CommandKind::Report))
        );
        assert_eq!(
            Command::parse("u now"),
            Err(ParseError::Usage(CommandKind::Update))
        );
    }

    #[test]
    fn empty_and_unknown_lines() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            Command::parse("launch A"),
            Err(ParseError::Unknown("launch".into()))
        );
    }
}
