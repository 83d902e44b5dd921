//! Key chords and the chord → command table.
//!
//! Chords are written `C-b`, `S-tab`, `A-ret` (or `ctrl-b`, `shift-tab`).
//! The same syntax is used for the `[keys]` table of the config file.

use std::{collections::HashMap, fmt, str::FromStr};

use thiserror::Error;

use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
  Char(char),
  Enter,
  Tab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
  pub code:  Key,
  pub shift: bool,
  pub ctrl:  bool,
  pub alt:   bool,
}

impl KeyBinding {
  pub const fn new(code: Key) -> Self {
    Self {
      code,
      shift: false,
      ctrl: false,
      alt: false,
    }
  }

  pub const fn ctrl(code: Key) -> Self {
    Self {
      code,
      shift: false,
      ctrl: true,
      alt: false,
    }
  }

  pub const fn with_modifiers(mut self, shift: bool, ctrl: bool, alt: bool) -> Self {
    self.shift = shift;
    self.ctrl = ctrl;
    self.alt = alt;
    self
  }
}

impl fmt::Display for KeyBinding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.ctrl {
      f.write_str("C-")?;
    }
    if self.alt {
      f.write_str("A-")?;
    }
    if self.shift {
      f.write_str("S-")?;
    }

    match self.code {
      Key::Char(' ') => f.write_str("space"),
      Key::Char('-') => f.write_str("minus"),
      Key::Char(c) => write!(f, "{c}"),
      Key::Enter => f.write_str("ret"),
      Key::Tab => f.write_str("tab"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseKeyBindingError(pub String);

impl FromStr for KeyBinding {
  type Err = ParseKeyBindingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
      return Err(ParseKeyBindingError("empty key literal".into()));
    }

    if trimmed == "-" {
      return Ok(KeyBinding::new(Key::Char('-')));
    }

    let mut tokens: Vec<_> = trimmed.split('-').collect();
    let key_token = tokens
      .pop()
      .filter(|token| !token.is_empty())
      .ok_or_else(|| ParseKeyBindingError(format!("missing key in '{trimmed}'")))?;

    let mut binding = KeyBinding::new(parse_key_token(key_token)?);
    for token in tokens {
      let modifier = token.trim();
      let flag = match modifier.to_ascii_uppercase().as_str() {
        "S" | "SHIFT" => &mut binding.shift,
        "C" | "CTRL" | "CONTROL" => &mut binding.ctrl,
        "A" | "ALT" => &mut binding.alt,
        _ => {
          return Err(ParseKeyBindingError(format!(
            "invalid key modifier '{modifier}-'"
          )));
        },
      };
      if *flag {
        return Err(ParseKeyBindingError(format!(
          "repeated key modifier '{modifier}-'"
        )));
      }
      *flag = true;
    }

    Ok(binding)
  }
}

fn parse_key_token(token: &str) -> Result<Key, ParseKeyBindingError> {
  let mut chars = token.chars();
  if let (Some(c), None) = (chars.next(), chars.next()) {
    return Ok(Key::Char(c));
  }

  match token.to_ascii_lowercase().as_str() {
    "space" => Ok(Key::Char(' ')),
    "minus" => Ok(Key::Char('-')),
    "enter" | "ret" | "return" => Ok(Key::Enter),
    "tab" => Ok(Key::Tab),
    invalid => Err(ParseKeyBindingError(format!("unknown key '{invalid}'"))),
  }
}

/// Maps chords to commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
  bindings: HashMap<KeyBinding, Command>,
}

impl Default for Keymap {
  fn default() -> Self {
    let mut bindings = HashMap::from([
      (KeyBinding::ctrl(Key::Char('b')), Command::Bold),
      (KeyBinding::ctrl(Key::Char('e')), Command::CodeInline),
      (
        KeyBinding::ctrl(Key::Char('e')).with_modifiers(true, true, false),
        Command::CodeBlock,
      ),
      (KeyBinding::ctrl(Key::Char('o')), Command::OrderedList),
      (KeyBinding::ctrl(Key::Char('u')), Command::UnorderedList),
      (KeyBinding::ctrl(Key::Char('k')), Command::Link),
      (
        KeyBinding::ctrl(Key::Char('k')).with_modifiers(true, true, false),
        Command::Image,
      ),
      (KeyBinding::new(Key::Tab), Command::Indent),
      (
        KeyBinding::new(Key::Tab).with_modifiers(true, false, false),
        Command::Unindent,
      ),
      (KeyBinding::new(Key::Enter), Command::NewLine),
    ]);
    for level in 1..=6u8 {
      let digit = char::from(b'0' + level);
      bindings.insert(KeyBinding::ctrl(Key::Char(digit)), Command::Heading(level));
    }
    Self { bindings }
  }
}

impl Keymap {
  /// Default bindings with `overrides` (chord text → command) layered on top.
  pub fn with_overrides(overrides: &HashMap<String, Command>) -> Result<Self, ParseKeyBindingError> {
    let mut keymap = Self::default();
    for (chord, command) in overrides {
      keymap.bind(chord.parse()?, *command);
    }
    Ok(keymap)
  }

  pub fn bind(&mut self, key: KeyBinding, command: Command) -> Option<Command> {
    self.bindings.insert(key, command)
  }

  pub fn get(&self, key: &KeyBinding) -> Option<Command> {
    self.bindings.get(key).copied()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn parse_chords() {
    assert_eq!("C-b".parse(), Ok(KeyBinding::ctrl(Key::Char('b'))));
    assert_eq!("ctrl-b".parse(), Ok(KeyBinding::ctrl(Key::Char('b'))));
    assert_eq!(
      "S-tab".parse(),
      Ok(KeyBinding::new(Key::Tab).with_modifiers(true, false, false))
    );
    assert_eq!(
      "C-A-ret".parse(),
      Ok(KeyBinding::new(Key::Enter).with_modifiers(false, true, true))
    );
    assert_eq!("-".parse(), Ok(KeyBinding::new(Key::Char('-'))));
    assert_eq!("C-minus".parse(), Ok(KeyBinding::ctrl(Key::Char('-'))));
  }

  #[test]
  fn reject_bad_chords() {
    for chord in ["", "C-", "Q-b", "C-C-b", "C-bogus"] {
      assert!(chord.parse::<KeyBinding>().is_err(), "{chord:?}");
    }
  }

  #[test]
  fn display_round_trips() {
    for chord in ["C-b", "C-S-e", "S-tab", "ret", "C-minus", "A-space"] {
      let binding: KeyBinding = chord.parse().unwrap();
      assert_eq!(binding.to_string().parse::<KeyBinding>(), Ok(binding));
    }
    assert_eq!(
      KeyBinding::new(Key::Tab).with_modifiers(true, true, false).to_string(),
      "C-S-tab"
    );
  }

  #[test]
  fn default_bindings_and_overrides() {
    let keymap = Keymap::default();
    assert_eq!(keymap.get(&"C-b".parse().unwrap()), Some(Command::Bold));
    assert_eq!(keymap.get(&"C-3".parse().unwrap()), Some(Command::Heading(3)));
    assert_eq!(keymap.get(&"S-tab".parse().unwrap()), Some(Command::Unindent));
    assert_eq!(keymap.get(&"C-z".parse().unwrap()), None);

    let overrides = HashMap::from([
      ("C-b".to_string(), Command::CodeInline),
      ("A-l".to_string(), Command::Link),
    ]);
    let keymap = Keymap::with_overrides(&overrides).unwrap();
    assert_eq!(keymap.get(&"C-b".parse().unwrap()), Some(Command::CodeInline));
    assert_eq!(keymap.get(&"A-l".parse().unwrap()), Some(Command::Link));

    let bad = HashMap::from([("X-l".to_string(), Command::Link)]);
    assert!(Keymap::with_overrides(&bad).is_err());
  }
}
