//! A headless markdown text area: a value, a selection and the commands that
//! edit them.

use ropey::Rope;

use crate::{
  command::Command,
  engine::{Engine, EngineError, Result},
  keymap::{Key, KeyBinding, Keymap},
  selection::Range,
  transaction::Transaction,
};

#[derive(Debug, Clone)]
pub struct MarkdownArea {
  engine:    Engine,
  keymap:    Keymap,
  doc:       Rope,
  selection: Range,
}

impl Default for MarkdownArea {
  fn default() -> Self {
    Self::new("")
  }
}

impl MarkdownArea {
  /// An area holding `text` with the caret at its start.
  pub fn new(text: &str) -> Self {
    Self {
      engine:    Engine::default(),
      keymap:    Keymap::default(),
      doc:       Rope::from(text),
      selection: Range::point(0),
    }
  }

  /// Uses `engine` for commands and its configured key overrides.
  pub fn with_engine(mut self, engine: Engine) -> Self {
    self.keymap = Keymap::with_overrides(&engine.config().keys).unwrap_or_else(|err| {
      tracing::warn!(%err, "ignoring key overrides");
      Keymap::default()
    });
    self.engine = engine;
    self
  }

  pub fn value(&self) -> String {
    self.doc.to_string()
  }

  pub fn rope(&self) -> &Rope {
    &self.doc
  }

  /// Replaces the text. The selection is kept where it still fits.
  pub fn set_value(&mut self, text: &str) {
    self.doc = Rope::from(text);
    self.selection = self.selection.clamp(self.doc.len_chars());
  }

  pub fn selection(&self) -> Range {
    self.selection
  }

  pub fn set_selection_range(&mut self, start: usize, end: usize) {
    self.selection = Range::new(start, end).clamp(self.doc.len_chars());
  }

  pub fn trigger(&mut self, command: Command) -> Result<()> {
    let (doc, selection) = self.engine.apply_rope(command, &self.doc, self.selection)?;
    self.doc = doc;
    self.selection = selection;
    Ok(())
  }

  /// Triggers a command by identifier; see [`Engine::apply_str`].
  pub fn trigger_str(&mut self, id: &str) -> Result<()> {
    match id.parse::<Command>() {
      Ok(command) => self.trigger(command),
      Err(_) if self.engine.config().strict => Err(EngineError::UnsupportedCommand(id.to_string())),
      Err(_) => Ok(()),
    }
  }

  /// Replaces the selection with `text`, leaving the caret after it.
  pub fn insert(&mut self, text: &str) -> Result<()> {
    let (from, to) = (self.selection.from(), self.selection.to());
    let tx = Transaction::change(&self.doc, [(from, to, Some(text.into()))])?;
    tx.apply(&mut self.doc)?;
    self.selection = Range::point(from + text.chars().count());
    Ok(())
  }

  /// Runs the command bound to `key`. Unbound plain characters are typed
  /// into the area. Returns whether the key was consumed.
  pub fn handle_key(&mut self, key: KeyBinding) -> Result<bool> {
    if let Some(command) = self.keymap.get(&key) {
      self.trigger(command)?;
      return Ok(true);
    }
    match key {
      KeyBinding {
        code: Key::Char(ch),
        ctrl: false,
        alt: false,
        ..
      } => {
        self.insert(ch.encode_utf8(&mut [0; 4]))?;
        Ok(true)
      },
      _ => Ok(false),
    }
  }
}
