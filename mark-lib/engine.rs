//! Command dispatch.
//!
//! [`Engine::apply`] turns `(command, text, selection)` into a new text and a
//! new selection. Each handler describes its edit as a [`Transaction`] against
//! the original text; list-structure edits additionally name the lines whose
//! block must be renumbered, which runs as a second transaction on the
//! edited text.

use std::ops::RangeInclusive;

use ropey::Rope;
use serde::Serialize;
use thiserror::Error;

use crate::{
  block,
  command::Command,
  config::Config,
  heading,
  indent,
  inline::{self, BOLD, CODE},
  list,
  pattern::ListKind,
  selection::Range,
  template,
  transaction::{Transaction, TransactionError},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
  #[error("unsupported command '{0}'")]
  UnsupportedCommand(String),
  #[error(transparent)]
  Transaction(#[from] TransactionError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// A handler's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
  pub transaction: Transaction,
  /// Lines, numbered after the transaction, whose list block needs
  /// renumbering.
  pub renumber:    Option<RangeInclusive<usize>>,
}

impl Edit {
  pub fn renumbering(mut self, lines: RangeInclusive<usize>) -> Self {
    self.renumber = Some(lines);
    self
  }
}

impl From<Transaction> for Edit {
  fn from(transaction: Transaction) -> Self {
    Self {
      transaction,
      renumber: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandResult {
  pub text:            String,
  pub selection_start: usize,
  pub selection_end:   usize,
}

impl CommandResult {
  pub fn selection(&self) -> Range {
    Range::new(self.selection_start, self.selection_end)
  }
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
  config: Config,
}

impl Engine {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn apply(&self, command: Command, text: &str, start: usize, end: usize) -> Result<CommandResult> {
    let doc = Rope::from(text);
    let (doc, range) = self.apply_rope(command, &doc, Range::new(start, end))?;
    Ok(CommandResult {
      text:            doc.to_string(),
      selection_start: range.from(),
      selection_end:   range.to(),
    })
  }

  /// Like [`Engine::apply`], with the command given by identifier. Unknown
  /// identifiers leave text and selection unchanged unless `strict` is set.
  pub fn apply_str(&self, id: &str, text: &str, start: usize, end: usize) -> Result<CommandResult> {
    match id.parse::<Command>() {
      Ok(command) => self.apply(command, text, start, end),
      Err(_) if self.config.strict => Err(EngineError::UnsupportedCommand(id.to_string())),
      Err(_) => {
        tracing::debug!(id, "ignoring unknown command");
        let range = Range::new(start, end).clamp(text.chars().count());
        Ok(CommandResult {
          text:            text.to_string(),
          selection_start: range.from(),
          selection_end:   range.to(),
        })
      },
    }
  }

  /// Runs `command` over `doc`, returning the edited document and selection.
  pub fn apply_rope(&self, command: Command, doc: &Rope, range: Range) -> Result<(Rope, Range)> {
    let range = range.clamp(doc.len_chars());
    tracing::debug!(%command, anchor = range.anchor, head = range.head, "applying command");

    let edit = self.dispatch(command, doc, range)?;
    let mut doc = edit.transaction.apply_to(doc)?;
    let mut range = edit.transaction.selection_after(range)?;

    if let Some(lines) = edit.renumber {
      let tx = list::renumber(&doc, lines, self.config.indent.width)?;
      if !tx.changes().is_empty() {
        tracing::trace!("renumbering list");
        range = range.map(tx.changes())?;
        tx.apply(&mut doc)?;
      }
    }

    Ok((doc, range))
  }

  fn dispatch(&self, command: Command, doc: &Rope, range: Range) -> Result<Edit> {
    let config = &self.config;
    let placeholders = &config.placeholders;
    let edit = match command {
      Command::Bold => inline::toggle_inline(doc, range, BOLD, &placeholders.bold)?,
      Command::CodeInline => inline::toggle_inline(doc, range, CODE, &placeholders.code)?,
      Command::CodeBlock => block::toggle_code_block(doc, range)?,
      Command::Heading(level) => heading::toggle_heading(doc, range, level.clamp(1, 6))?,
      Command::OrderedList => list::toggle_list(doc, range, ListKind::Ordered, config)?,
      Command::UnorderedList => list::toggle_list(doc, range, ListKind::Unordered, config)?,
      Command::Indent => indent::indent(doc, range, &config.indent)?,
      Command::Unindent => indent::unindent(doc, range, &config.indent)?,
      Command::Link => template::link(doc, range, placeholders)?,
      Command::Image => template::image(doc, range, placeholders)?,
      Command::NewLine => list::newline(doc, range, config.indent.width)?,
    };
    Ok(edit)
  }
}

/// Applies `command` with the default configuration.
pub fn apply(command: Command, text: &str, start: usize, end: usize) -> Result<CommandResult> {
  Engine::default().apply(command, text, start, end)
}
