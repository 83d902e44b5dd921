//! Formatting commands and their identifiers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command '{0}'")]
pub struct ParseCommandError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
  Bold,
  CodeInline,
  CodeBlock,
  /// Heading level, always `1..=6`.
  Heading(u8),
  OrderedList,
  UnorderedList,
  Indent,
  Unindent,
  Link,
  Image,
  /// Line break continuing the list item under the caret.
  NewLine,
}

impl Command {
  pub const ALL: [Command; 16] = [
    Command::Bold,
    Command::CodeInline,
    Command::CodeBlock,
    Command::Heading(1),
    Command::Heading(2),
    Command::Heading(3),
    Command::Heading(4),
    Command::Heading(5),
    Command::Heading(6),
    Command::OrderedList,
    Command::UnorderedList,
    Command::Indent,
    Command::Unindent,
    Command::Link,
    Command::Image,
    Command::NewLine,
  ];

  /// Heading command for `level`, if it is a valid heading level.
  pub fn heading(level: u8) -> Option<Self> {
    (1..=6).contains(&level).then_some(Self::Heading(level))
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Bold => "bold",
      Self::CodeInline => "code-inline",
      Self::CodeBlock => "code-block",
      Self::Heading(1) => "h1",
      Self::Heading(2) => "h2",
      Self::Heading(3) => "h3",
      Self::Heading(4) => "h4",
      Self::Heading(5) => "h5",
      Self::Heading(_) => "h6",
      Self::OrderedList => "ordered-list",
      Self::UnorderedList => "unordered-list",
      Self::Indent => "indent",
      Self::Unindent => "unindent",
      Self::Link => "link",
      Self::Image => "image",
      Self::NewLine => "newline",
    }
  }
}

impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Command {
  type Err = ParseCommandError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Command::ALL
      .into_iter()
      .find(|command| command.name() == s)
      .ok_or_else(|| ParseCommandError(s.to_string()))
  }
}

impl Serialize for Command {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}

impl<'de> Deserialize<'de> for Command {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
  }
}
