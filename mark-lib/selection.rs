//! Caret and selection ranges.
//!
//! A [`Range`] has two positions: `anchor` and `head`. The `head` is where the
//! caret visually appears, while the `anchor` is the other end of the
//! selection. When `anchor == head`, the range is a caret (no selection).
//!
//! ```text
//! anchor=2, head=7: "he[llo w]orld"  (forward selection)
//! anchor=7, head=2: "he]llo w[orld"  (backward selection)
//! anchor=5, head=5: "hello|world"    (caret)
//! ```
//!
//! Offsets count chars, the unit [`ropey`] indexes by.

use ropey::RopeSlice;

use crate::transaction::{Assoc, ChangeSet, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  Forward,
  Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
  pub anchor: usize,
  pub head:   usize,
}

impl Range {
  pub fn new(anchor: usize, head: usize) -> Self {
    Self { anchor, head }
  }

  pub fn point(head: usize) -> Self {
    Self::new(head, head)
  }

  /// Start of the range.
  #[inline]
  #[must_use]
  pub fn from(&self) -> usize {
    std::cmp::min(self.anchor, self.head)
  }

  /// End of the range.
  #[inline]
  #[must_use]
  pub fn to(&self) -> usize {
    std::cmp::max(self.anchor, self.head)
  }

  /// Total length of the range.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.to() - self.from()
  }

  /// The range is a caret.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.anchor == self.head
  }

  #[inline]
  #[must_use]
  pub fn direction(&self) -> Direction {
    if self.head < self.anchor {
      Direction::Backward
    } else {
      Direction::Forward
    }
  }

  #[inline]
  #[must_use]
  pub fn with_direction(self, direction: Direction) -> Self {
    if self.direction() == direction {
      self
    } else {
      Self::new(self.head, self.anchor)
    }
  }

  /// Pull both ends into `0..=len`. Selections coming from a live surface
  /// can be transiently stale, so this never fails.
  #[must_use]
  pub fn clamp(self, len: usize) -> Self {
    Self::new(self.anchor.min(len), self.head.min(len))
  }

  /// First and last line touched by the range. A non-empty range that ends
  /// exactly at the start of a line does not touch that line.
  #[inline]
  #[must_use]
  pub fn line_range(&self, slice: RopeSlice) -> (usize, usize) {
    let from = self.from();
    let to = if self.is_empty() {
      from
    } else {
      (self.to() - 1).max(from)
    };

    (slice.char_to_line(from), slice.char_to_line(to))
  }

  /// The text covered by the range.
  pub fn slice<'a>(&self, text: RopeSlice<'a>) -> RopeSlice<'a> {
    text.slice(self.from()..self.to())
  }

  /// Map the range through a set of changes. The start sticks after text
  /// inserted at it and the end sticks before, so insertions at the edges of
  /// a selection stay outside it.
  pub fn map(self, changes: &ChangeSet) -> Result<Self> {
    if changes.is_empty() {
      return Ok(self);
    }

    let (from, to) = if self.is_empty() {
      let pos = changes.map_pos(self.head, Assoc::After)?;
      (pos, pos)
    } else {
      (
        changes.map_pos(self.from(), Assoc::After)?,
        changes.map_pos(self.to(), Assoc::Before)?,
      )
    };

    Ok(Self::new(from, to.max(from)).with_direction(self.direction()))
  }
}
