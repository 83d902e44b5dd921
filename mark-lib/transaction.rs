//! Change sets and transactions over a [`Rope`].
//!
//! Every handler describes its edit as a [`Transaction`]: a list of
//! `(from, to, replacement)` changes against the *original* document, plus an
//! optional explicit selection. Changes are compiled into a sequence of
//! [`Operation`]s:
//!
//! - **Retain(n)** - Keep `n` characters unchanged
//! - **Delete(n)** - Remove `n` characters
//! - **Insert(s)** - Insert string `s`
//!
//! Positions in the old document are carried into the new one with
//! [`ChangeSet::map_pos`], which walks the operations and accumulates the
//! length delta of every edit before the position. That is how selections
//! survive multi-line edits without re-indexing lines after each one.
//!
//! ```
//! use mark_lib::transaction::Transaction;
//! use ropey::Rope;
//!
//! let doc = Rope::from("hello world");
//! let tx = Transaction::change(&doc, [(6, 11, Some("rust".into()))]).unwrap();
//! assert_eq!(tx.apply_to(&doc).unwrap(), "hello rust");
//! ```

use ropey::{Rope, RopeBuilder};
use thiserror::Error;

use crate::{Tendril, selection::Range};

pub type Result<T> = std::result::Result<T, TransactionError>;

/// (from, to) replacement.
pub type Change = (usize, usize, Option<Tendril>);

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionError {
  #[error("changeset length mismatch: expected {expected}, got {actual}")]
  LengthMismatch { expected: usize, actual: usize },
  #[error("invalid change range: start {from} is after end {to}")]
  InvalidRange { from: usize, to: usize },
  #[error("change range {from}..{to} is out of bounds for document length {len}")]
  RangeOutOfBounds {
    from: usize,
    to:   usize,
    len:  usize,
  },
  #[error("change range {from}..{to} overlaps previous end {prev_end}")]
  OverlappingRange {
    prev_end: usize,
    from:     usize,
    to:       usize,
  },
  #[error("position {pos} is out of bounds for changeset length {len}")]
  PositionOutOfBounds { pos: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
  /// Move cursor by n characters.
  Retain(usize),

  /// Delete n characters.
  Delete(usize),

  /// Insert text at position.
  Insert(Tendril),
}

impl Operation {
  pub fn len_chars(&self) -> usize {
    match self {
      Operation::Retain(n) | Operation::Delete(n) => *n,
      Operation::Insert(s) => s.chars().count(),
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
  /// Stay in front of text inserted at the position.
  Before,
  /// Move past text inserted at the position.
  After,
}

impl Assoc {
  fn insert_offset(self, inserted: usize) -> usize {
    match self {
      Assoc::Before => 0,
      Assoc::After => inserted,
    }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
  changes: Vec<Operation>,
  /// The required document length. Will refuse to apply changes unless it
  /// matches.
  len:     usize,
}

impl ChangeSet {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      changes: Vec::with_capacity(capacity),
      len:     0,
    }
  }

  /// Returns the expected document length for this changeset
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn delete(&mut self, n: usize) {
    use Operation::*;

    if n == 0 {
      return;
    }

    self.len += n;

    if let Some(Delete(count)) = self.changes.last_mut() {
      *count += n;
    } else {
      self.changes.push(Delete(n))
    }
  }

  pub fn insert(&mut self, fragment: Tendril) {
    use Operation::*;

    if fragment.is_empty() {
      return;
    }

    // Keep inserts in front of deletes so a replacement reads Insert, Delete.
    let new_last = match self.changes.as_mut_slice() {
      [.., Insert(prev)] | [.., Insert(prev), Delete(_)] => {
        prev.push_str(&fragment);
        return;
      },
      [.., last @ Delete(_)] => std::mem::replace(last, Insert(fragment)),
      _ => Insert(fragment),
    };

    self.changes.push(new_last);
  }

  pub fn retain(&mut self, n: usize) {
    use Operation::*;

    if n == 0 {
      return;
    }

    self.len += n;

    if let Some(Retain(count)) = self.changes.last_mut() {
      *count += n;
    } else {
      self.changes.push(Retain(n))
    }
  }

  fn ensure_len(&self, text_len: usize) -> Result<()> {
    if text_len != self.len {
      return Err(TransactionError::LengthMismatch {
        expected: self.len,
        actual:   text_len,
      });
    }
    Ok(())
  }

  /// Apply this changeset in-place.
  pub fn apply(&self, text: &mut Rope) -> Result<()> {
    self.ensure_len(text.len_chars())?;
    let mut pos = 0;

    for change in &self.changes {
      use Operation::*;
      match change {
        Retain(n) => pos += n,
        Delete(n) => text.remove(pos..pos + *n),
        Insert(s) => {
          text.insert(pos, s);
          pos += s.chars().count();
        },
      }
    }

    Ok(())
  }

  /// Apply this changeset to a rope and return the updated rope.
  pub fn apply_to(&self, text: &Rope) -> Result<Rope> {
    self.ensure_len(text.len_chars())?;
    if self.is_empty() {
      return Ok(text.clone());
    }

    let mut builder = RopeBuilder::new();
    let mut pos = 0;

    let append_slice = |from: usize, to: usize, builder: &mut RopeBuilder| {
      if from >= to {
        return;
      }
      for chunk in text.slice(from..to).chunks() {
        builder.append(chunk);
      }
    };

    for change in &self.changes {
      use Operation::*;
      match change {
        Retain(n) => {
          append_slice(pos, pos + *n, &mut builder);
          pos += n;
        },
        Delete(n) => pos += n,
        Insert(s) => builder.append(s.as_str()),
      }
    }

    append_slice(pos, self.len, &mut builder);

    Ok(builder.finish())
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.changes.is_empty() || self.changes == [Operation::Retain(self.len)]
  }

  /// Map a position through the changes.
  ///
  /// `assoc` decides which side of text inserted exactly at `pos` the
  /// position ends up on. Positions inside deleted text collapse onto the
  /// start of the deletion; positions inside replaced text move to the end of
  /// the replacement with [`Assoc::After`] and to its start with
  /// [`Assoc::Before`].
  pub fn map_pos(&self, pos: usize, assoc: Assoc) -> Result<usize> {
    use Operation::*;

    if pos > self.len {
      return Err(TransactionError::PositionOutOfBounds { pos, len: self.len });
    }

    let mut old_pos = 0;
    let mut new_pos = 0;
    let mut iter = self.changes.iter().peekable();

    while let Some(change) = iter.next() {
      match change {
        Retain(n) => {
          if pos < old_pos + n {
            return Ok(new_pos + (pos - old_pos));
          }
          old_pos += n;
          new_pos += n;
        },
        Delete(n) => {
          if pos < old_pos + n {
            return Ok(new_pos);
          }
          old_pos += n;
        },
        Insert(s) => {
          let inserted = s.chars().count();
          // a subsequent delete means a replace, consume it
          if let Some(Delete(deleted)) = iter.peek() {
            let deleted = *deleted;
            iter.next();
            if pos == old_pos {
              return Ok(new_pos);
            }
            if pos < old_pos + deleted {
              return Ok(new_pos + assoc.insert_offset(inserted));
            }
            old_pos += deleted;
          } else if pos == old_pos {
            return Ok(new_pos + assoc.insert_offset(inserted));
          }
          new_pos += inserted;
        },
      }
    }

    Ok(new_pos)
  }
}

fn validate_change_bounds(from: usize, to: usize, len: usize) -> Result<()> {
  if from > to {
    return Err(TransactionError::InvalidRange { from, to });
  }
  if to > len {
    return Err(TransactionError::RangeOutOfBounds { from, to, len });
  }
  Ok(())
}

impl From<ChangeSet> for Transaction {
  fn from(changes: ChangeSet) -> Self {
    Self {
      changes,
      selection: None,
    }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transaction {
  changes:   ChangeSet,
  selection: Option<Range>,
}

impl Transaction {
  /// Changes made to the buffer.
  pub fn changes(&self) -> &ChangeSet {
    &self.changes
  }

  /// When set, explicitly replaces the mapped selection.
  pub fn selection(&self) -> Option<Range> {
    self.selection
  }

  /// Apply this transaction in-place.
  pub fn apply(&self, doc: &mut Rope) -> Result<()> {
    self.changes.apply(doc)
  }

  /// Apply this transaction to a rope and return the updated rope.
  pub fn apply_to(&self, doc: &Rope) -> Result<Rope> {
    self.changes.apply_to(doc)
  }

  pub fn with_selection(mut self, selection: Range) -> Self {
    self.selection = Some(selection);
    self
  }

  /// Selection after this transaction: the explicit one when present,
  /// otherwise `range` mapped through the changes.
  pub fn selection_after(&self, range: Range) -> Result<Range> {
    match self.selection {
      Some(selection) => Ok(selection),
      None => range.map(&self.changes),
    }
  }

  /// Generate a transaction from a set of changes. Changes must be sorted and
  /// must not overlap.
  pub fn change<I>(doc: &Rope, changes: I) -> Result<Self>
  where
    I: IntoIterator<Item = Change>,
  {
    let len = doc.len_chars();
    let changes = changes.into_iter();
    let (lower, upper) = changes.size_hint();
    let size = upper.unwrap_or(lower);
    let mut changeset = ChangeSet::with_capacity(2 * size + 1); // rough estimate

    let mut last = 0;
    for (from, to, tendril) in changes {
      validate_change_bounds(from, to, len)?;
      if from < last {
        return Err(TransactionError::OverlappingRange {
          prev_end: last,
          from,
          to,
        });
      }

      // Retain from last "to" to current "from"
      changeset.retain(from - last);
      let span = to - from;
      match tendril {
        Some(text) => {
          changeset.insert(text);
          changeset.delete(span);
        },
        None => changeset.delete(span),
      }
      last = to;
    }

    changeset.retain(len - last);

    Ok(Self::from(changeset))
  }

  /// Insert `text` at `pos`.
  pub fn insert(doc: &Rope, pos: usize, text: Tendril) -> Result<Self> {
    Self::change(doc, [(pos, pos, Some(text))])
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn map_pos() {
    use Operation::*;

    // maps inserts
    let cs = ChangeSet {
      changes: vec![Retain(4), Insert("!!".into()), Retain(4)],
      len:     8,
    };

    assert_eq!(cs.map_pos(0, Assoc::Before), Ok(0)); // before insert region
    assert_eq!(cs.map_pos(4, Assoc::Before), Ok(4)); // at insert, track before
    assert_eq!(cs.map_pos(4, Assoc::After), Ok(6)); // at insert, track after
    assert_eq!(cs.map_pos(5, Assoc::Before), Ok(7)); // after insert region
    assert_eq!(cs.map_pos(8, Assoc::Before), Ok(10)); // end of document

    // maps deletes
    let cs = ChangeSet {
      changes: vec![Retain(4), Delete(4), Retain(4)],
      len:     12,
    };
    assert_eq!(cs.map_pos(0, Assoc::Before), Ok(0)); // at start
    assert_eq!(cs.map_pos(4, Assoc::Before), Ok(4)); // before a delete
    assert_eq!(cs.map_pos(5, Assoc::Before), Ok(4)); // inside a delete
    assert_eq!(cs.map_pos(5, Assoc::After), Ok(4)); // inside a delete
    assert_eq!(cs.map_pos(9, Assoc::Before), Ok(5)); // after the delete

    // stays inbetween replacements
    let cs = ChangeSet {
      changes: vec![
        Insert("ab".into()),
        Delete(2),
        Insert("cd".into()),
        Delete(2),
      ],
      len:     4,
    };
    assert_eq!(cs.map_pos(2, Assoc::Before), Ok(2));
    assert_eq!(cs.map_pos(2, Assoc::After), Ok(2));
    assert_eq!(cs.map_pos(1, Assoc::After), Ok(2));
    assert_eq!(cs.map_pos(1, Assoc::Before), Ok(0));
  }

  #[test]
  fn map_pos_out_of_bounds() {
    let doc = Rope::from("abc");
    let tx = Transaction::insert(&doc, 1, "x".into()).unwrap();
    assert_eq!(
      tx.changes().map_pos(4, Assoc::Before),
      Err(TransactionError::PositionOutOfBounds { pos: 4, len: 3 })
    );
  }

  #[test]
  fn transaction_change() {
    let mut doc = Rope::from("hello world!\ntest 123");
    let transaction = Transaction::change(
      &doc,
      // (1, 1, None) is a useless 0-width delete that gets factored out
      vec![(1, 1, None), (6, 11, Some("void".into())), (12, 17, None)],
    )
    .unwrap();
    transaction.apply(&mut doc).unwrap();
    assert_eq!(doc, Rope::from_str("hello void! 123"));
  }

  #[test]
  fn apply_to_matches_apply() {
    let doc = Rope::from("# title\nbody");
    let tx = Transaction::change(&doc, [(0, 2, None), (8, 8, Some("> ".into()))]).unwrap();
    let mut in_place = doc.clone();
    tx.apply(&mut in_place).unwrap();
    assert_eq!(tx.apply_to(&doc).unwrap(), in_place);
    assert_eq!(in_place, "title\n> body");
  }

  #[test]
  fn rejects_bad_changes() {
    let doc = Rope::from("abc");
    assert_eq!(
      Transaction::change(&doc, [(2, 1, None)]),
      Err(TransactionError::InvalidRange { from: 2, to: 1 })
    );
    assert_eq!(
      Transaction::change(&doc, [(1, 5, None)]),
      Err(TransactionError::RangeOutOfBounds {
        from: 1,
        to:   5,
        len:  3,
      })
    );
    assert_eq!(
      Transaction::change(&doc, [(1, 3, None), (2, 3, None)]),
      Err(TransactionError::OverlappingRange {
        prev_end: 3,
        from:     2,
        to:       3,
      })
    );
    let tx = Transaction::insert(&doc, 0, "x".into()).unwrap();
    assert!(matches!(
      tx.apply_to(&Rope::from("abcd")),
      Err(TransactionError::LengthMismatch {
        expected: 3,
        actual:   4,
      })
    ));
  }

  #[test]
  fn empty_changeset() {
    let doc = Rope::from("abc");
    let tx = Transaction::change(&doc, std::iter::empty()).unwrap();
    assert!(tx.changes().is_empty());
    assert_eq!(tx.apply_to(&doc).unwrap(), "abc");
  }
}
