//! Editor command vocabulary.
//!
//! Commands travel across the FFI and CLI boundaries by name, so every
//! variant has a stable string form that round-trips through `FromStr`.

use crate::model::document::{MarkKind, MAX_HEADING_LEVEL};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Toggleable formatting that the capability interface can report as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Heading(u8),
    BulletList,
    OrderedList,
    Blockquote,
}

impl Format {
    /// Stable command name, e.g. `bold` or `heading2`.
    pub fn name(self) -> String {
        match self {
            Self::Bold => "bold".to_string(),
            Self::Italic => "italic".to_string(),
            Self::Underline => "underline".to_string(),
            Self::Heading(level) => format!("heading{level}"),
            Self::BulletList => "bulletList".to_string(),
            Self::OrderedList => "orderedList".to_string(),
            Self::Blockquote => "blockquote".to_string(),
        }
    }

    /// The inline mark behind this format, if it is a mark toggle.
    pub fn mark(self) -> Option<MarkKind> {
        match self {
            Self::Bold => Some(MarkKind::Bold),
            Self::Italic => Some(MarkKind::Italic),
            Self::Underline => Some(MarkKind::Underline),
            _ => None,
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Format {
    type Err = CommandParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let format = match normalized.as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "bulletlist" => Self::BulletList,
            "orderedlist" => Self::OrderedList,
            "blockquote" => Self::Blockquote,
            other => {
                let level = other
                    .strip_prefix("heading")
                    .ok_or_else(|| CommandParseError::Unknown(value.trim().to_string()))?
                    .parse::<u8>()
                    .map_err(|_| CommandParseError::Unknown(value.trim().to_string()))?;
                if !(1..=MAX_HEADING_LEVEL).contains(&level) {
                    return Err(CommandParseError::InvalidHeadingLevel(level));
                }
                Self::Heading(level)
            }
        };
        Ok(format)
    }
}

/// Entry points of the editor command chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Toggle(Format),
    HorizontalRule,
    Undo,
    Redo,
}

impl Command {
    pub fn name(self) -> String {
        match self {
            Self::Toggle(format) => format.name(),
            Self::HorizontalRule => "horizontalRule".to_string(),
            Self::Undo => "undo".to_string(),
            Self::Redo => "redo".to_string(),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<Format> for Command {
    fn from(value: Format) -> Self {
        Self::Toggle(value)
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" => Err(CommandParseError::Empty),
            "horizontalrule" | "hr" => Ok(Self::HorizontalRule),
            "undo" => Ok(Self::Undo),
            "redo" => Ok(Self::Redo),
            _ => value.parse().map(Self::Toggle),
        }
    }
}

/// Command name parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    Empty,
    Unknown(String),
    InvalidHeadingLevel(u8),
}

impl Display for CommandParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "command name cannot be empty"),
            Self::Unknown(name) => write!(f, "unknown editor command `{name}`"),
            Self::InvalidHeadingLevel(level) => {
                write!(f, "heading level {level} is outside 1..={MAX_HEADING_LEVEL}")
            }
        }
    }
}

impl Error for CommandParseError {}

#[cfg(test)]
mod tests {
    use super::{Command, CommandParseError, Format};

    #[test]
    fn names_parse_back_case_insensitively() {
        let commands = [
            Command::Toggle(Format::Bold),
            Command::Toggle(Format::Heading(2)),
            Command::Toggle(Format::OrderedList),
            Command::HorizontalRule,
            Command::Redo,
        ];
        for command in commands {
            assert_eq!(command.name().parse::<Command>().unwrap(), command);
            assert_eq!(
                command.name().to_uppercase().parse::<Command>().unwrap(),
                command
            );
        }
    }

    #[test]
    fn rejects_unknown_and_out_of_range_names() {
        assert_eq!(
            "heading7".parse::<Command>().unwrap_err(),
            CommandParseError::InvalidHeadingLevel(7)
        );
        assert_eq!(
            "sparkle".parse::<Command>().unwrap_err(),
            CommandParseError::Unknown("sparkle".to_string())
        );
        assert_eq!("  ".parse::<Command>().unwrap_err(), CommandParseError::Empty);
    }
}
