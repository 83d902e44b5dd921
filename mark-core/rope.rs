//! Extension helpers for [`RopeSlice`].

use ropey::RopeSlice;

use crate::chars::{char_is_indent, char_is_line_ending, char_is_whitespace};

pub trait RopeSliceExt<'a>: Sized {
  /// Whether the slice begins with `text`.
  fn starts_with(self, text: &str) -> bool;
  /// Whether the slice ends with `text`.
  fn ends_with(self, text: &str) -> bool;
  fn first_non_whitespace_char(self) -> Option<usize>;
  /// Number of leading space/tab characters.
  fn indent_len(self) -> usize;
  /// Whether the slice only holds whitespace (or nothing).
  fn is_blank(self) -> bool {
    self.first_non_whitespace_char().is_none()
  }
}

impl<'a> RopeSliceExt<'a> for RopeSlice<'a> {
  fn starts_with(self, text: &str) -> bool {
    let len = text.chars().count();
    len <= self.len_chars() && self.slice(..len) == text
  }

  fn ends_with(self, text: &str) -> bool {
    let len = text.chars().count();
    let total = self.len_chars();
    len <= total && self.slice(total - len..) == text
  }

  fn first_non_whitespace_char(self) -> Option<usize> {
    self
      .chars()
      .position(|ch| !char_is_whitespace(ch) && !char_is_line_ending(ch))
  }

  fn indent_len(self) -> usize {
    self.chars().take_while(|&ch| char_is_indent(ch)).count()
  }
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  #[test]
  fn prefix_and_suffix() {
    let text = Rope::from("**bold**");
    let slice = text.slice(..);
    assert!(slice.starts_with("**"));
    assert!(slice.ends_with("**"));
    assert!(!slice.starts_with("***"));
    assert!(!text.slice(..1).starts_with("**"));
  }

  #[test]
  fn whitespace_positions() {
    let text = Rope::from("  hello  \n");
    let slice = text.slice(..);
    assert_eq!(slice.first_non_whitespace_char(), Some(2));
    assert_eq!(slice.indent_len(), 2);
    assert!(Rope::from(" \t ").slice(..).is_blank());
    assert!(Rope::from("").slice(..).is_blank());
  }
}
