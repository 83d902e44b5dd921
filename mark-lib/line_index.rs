//! Line lookup over a document.
//!
//! A [`Line`] carries absolute char offsets; `end` stops before the line
//! terminator. The empty document has a single empty line, and a document
//! ending in a line break has a final empty line after it.

use std::ops::RangeInclusive;

use mark_core::{
  line_ending::line_end_char_index,
  rope::RopeSliceExt,
};
use ropey::RopeSlice;

use crate::selection::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
  pub index: usize,
  pub start: usize,
  pub end:   usize,
}

impl Line {
  #[inline]
  pub fn len(&self) -> usize {
    self.end - self.start
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  /// Line content without its terminator.
  pub fn slice<'a>(&self, text: RopeSlice<'a>) -> RopeSlice<'a> {
    text.slice(self.start..self.end)
  }
}

#[derive(Debug, Clone, Copy)]
pub struct LineIndex<'a> {
  text: RopeSlice<'a>,
}

impl<'a> LineIndex<'a> {
  pub fn new(text: RopeSlice<'a>) -> Self {
    Self { text }
  }

  pub fn text(&self) -> RopeSlice<'a> {
    self.text
  }

  pub fn len_lines(&self) -> usize {
    self.text.len_lines()
  }

  pub fn line(&self, index: usize) -> Line {
    Line {
      index,
      start: self.text.line_to_char(index),
      end: line_end_char_index(&self.text, index),
    }
  }

  /// The line containing char offset `pos`.
  pub fn line_at(&self, pos: usize) -> Line {
    self.line(self.text.char_to_line(pos.min(self.text.len_chars())))
  }

  pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
    (0..self.len_lines()).map(|index| self.line(index))
  }

  /// Line numbers touched by `range`; a caret touches exactly its own line.
  pub fn touching(&self, range: Range) -> RangeInclusive<usize> {
    let (first, last) = range.clamp(self.text.len_chars()).line_range(self.text);
    first..=last
  }

  pub fn content(&self, line: Line) -> RopeSlice<'a> {
    line.slice(self.text)
  }

  pub fn is_blank(&self, line: Line) -> bool {
    self.content(line).is_blank()
  }

  /// Lines an edit should visit: every touched line, minus blank lines when
  /// the selection spans several lines.
  pub fn edit_lines(&self, range: Range) -> Vec<Line> {
    let touching = self.touching(range);
    let multi = touching.start() != touching.end();
    touching
      .map(|index| self.line(index))
      .filter(|line| !multi || !self.is_blank(*line))
      .collect()
  }
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  fn lines_of(text: &Rope) -> Vec<Line> {
    LineIndex::new(text.slice(..)).lines().collect()
  }

  fn lines_touching(text: &Rope, range: Range) -> Vec<Line> {
    let index = LineIndex::new(text.slice(..));
    index.touching(range).map(|i| index.line(i)).collect()
  }

  fn line(index: usize, start: usize, end: usize) -> Line {
    Line { index, start, end }
  }

  #[test]
  fn empty_buffer_has_one_line() {
    let doc = Rope::from("");
    assert_eq!(lines_of(&doc), vec![line(0, 0, 0)]);
    assert_eq!(lines_touching(&doc, Range::point(0)), vec![line(0, 0, 0)]);
  }

  #[test]
  fn offsets_exclude_terminators() {
    let doc = Rope::from("ab\r\ncd\n");
    assert_eq!(
      lines_of(&doc),
      vec![line(0, 0, 2), line(1, 4, 6), line(2, 7, 7)]
    );
  }

  #[test]
  fn caret_at_end_of_buffer() {
    let doc = Rope::from("one\ntwo");
    assert_eq!(lines_touching(&doc, Range::point(7)), vec![line(1, 4, 7)]);
    assert_eq!(lines_touching(&doc, Range::point(99)), vec![line(1, 4, 7)]);
  }

  #[test]
  fn selection_spanning_lines() {
    let doc = Rope::from("one\ntwo\nthree");
    let touched: Vec<_> = lines_touching(&doc, Range::new(2, 9))
      .into_iter()
      .map(|line| line.index)
      .collect();
    assert_eq!(touched, vec![0, 1, 2]);
    // ends right at the start of "three"
    let touched: Vec<_> = lines_touching(&doc, Range::new(2, 8))
      .into_iter()
      .map(|line| line.index)
      .collect();
    assert_eq!(touched, vec![0, 1]);
  }

  #[test]
  fn edit_lines_skip_blank_lines_in_spans() {
    let doc = Rope::from("a\n\nb");
    let index = LineIndex::new(doc.slice(..));
    let lines: Vec<_> = index.edit_lines(Range::new(0, 4)).iter().map(|l| l.index).collect();
    assert_eq!(lines, vec![0, 2]);
    let lines: Vec<_> = index.edit_lines(Range::point(2)).iter().map(|l| l.index).collect();
    assert_eq!(lines, vec![1]);
  }
}
