//! Structural classifiers for markdown lines and regions.
//!
//! Each matcher is a pure function returning the exact spans it matched so
//! handlers can unwrap precisely. Nothing here edits text.

use std::fmt::Write as _;

use mark_core::{chars::indent_width, rope::RopeSliceExt};
use ropey::RopeSlice;
use smallvec::SmallVec;

use crate::line_index::{Line, LineIndex};

/// Fence token opening and closing a code block.
pub const FENCE: &str = "```";

/// Maximum number of digits in one ordered list number component.
const MAX_NUMBER_DIGITS: usize = 9;

/// Absolute `[start, end)` char span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
  pub start: usize,
  pub end:   usize,
}

impl Span {
  pub fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }

  pub fn len(&self) -> usize {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapMatch {
  /// Markers included.
  pub outer: Span,
  /// Text between the markers.
  pub inner: Span,
}

/// Detects a selection already wrapped in `marker`: either the markers sit
/// directly outside `from..to`, or the selected text itself starts and ends
/// with them.
pub fn match_wrap(text: RopeSlice, from: usize, to: usize, marker: &str) -> Option<WrapMatch> {
  let m = marker.chars().count();
  if m == 0 || from > to || to > text.len_chars() {
    return None;
  }

  if from >= m
    && to + m <= text.len_chars()
    && text.slice(from - m..from) == marker
    && text.slice(to..to + m) == marker
  {
    return Some(WrapMatch {
      outer: Span::new(from - m, to + m),
      inner: Span::new(from, to),
    });
  }

  let selected = text.slice(from..to);
  if to - from >= 2 * m && selected.starts_with(marker) && selected.ends_with(marker) {
    return Some(WrapMatch {
      outer: Span::new(from, to),
      inner: Span::new(from + m, to - m),
    });
  }

  None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingMatch {
  pub level: u8,
  /// The run of `#` characters.
  pub marks: Span,
}

impl HeadingMatch {
  /// End of the prefix, separating space included.
  pub fn prefix_end(&self) -> usize {
    self.marks.end + 1
  }
}

/// `#`×1..=6 followed by one space at the very start of the line.
pub fn match_heading(text: RopeSlice, line: Line) -> Option<HeadingMatch> {
  let content = line.slice(text);
  let hashes = content.chars().take_while(|&ch| ch == '#').count();
  if !(1..=6).contains(&hashes) || content.get_char(hashes) != Some(' ') {
    return None;
  }

  Some(HeadingMatch {
    level: hashes as u8,
    marks: Span::new(line.start, line.start + hashes),
  })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
  Ordered,
  Unordered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
  pub kind:          ListKind,
  /// Nesting level, one indent unit per level.
  pub depth:         usize,
  /// Leading whitespace.
  pub indent:        Span,
  /// `-`, `*`, `+` or the dotted number path including its final dot.
  pub marker:        Span,
  /// First char after the marker's separating space.
  pub content_start: usize,
  /// Number path components as written, e.g. `[2, 1]` for `2.1.`. Empty for
  /// unordered items.
  pub path:          SmallVec<[usize; 4]>,
}

impl ListItem {
  #[inline]
  pub fn ordered(&self) -> bool {
    self.kind == ListKind::Ordered
  }

  /// Position among siblings as written: last path component, `1` for
  /// bullets.
  pub fn index(&self) -> usize {
    self.path.last().copied().unwrap_or(1)
  }

  /// Whether nothing but whitespace follows the marker.
  pub fn is_empty(&self, text: RopeSlice, line: Line) -> bool {
    self.content_start >= line.end || text.slice(self.content_start..line.end).is_blank()
  }
}

/// Renders a dotted number path: `[2, 1]` → `2.1.`.
pub fn number_path(path: &[usize]) -> String {
  let mut out = String::with_capacity(path.len() * 2);
  for component in path {
    let _ = write!(out, "{component}.");
  }
  out
}

/// `<indentation><marker> ` where the marker is `-`, `*`, `+` or a dotted
/// number path such as `3.` or `2.1.`.
pub fn match_list_item(text: RopeSlice, line: Line, tab_width: usize) -> Option<ListItem> {
  let content = line.slice(text);
  let indent_len = content.indent_len();
  let depth = indent_width(content.chars(), tab_width) / tab_width.max(1);
  let marker_start = line.start + indent_len;

  let mut chars = content.chars_at(indent_len);
  let first = chars.next()?;

  if matches!(first, '-' | '*' | '+') {
    return (chars.next() == Some(' ')).then(|| ListItem {
      kind: ListKind::Unordered,
      depth,
      indent: Span::new(line.start, marker_start),
      marker: Span::new(marker_start, marker_start + 1),
      content_start: marker_start + 2,
      path: SmallVec::new(),
    });
  }

  let mut path: SmallVec<[usize; 4]> = SmallVec::new();
  let mut marker_len = 0;
  let mut digits = String::new();
  let mut ch = Some(first);
  loop {
    digits.clear();
    while let Some(c) = ch.filter(char::is_ascii_digit) {
      digits.push(c);
      ch = chars.next();
    }
    if digits.is_empty() || digits.len() > MAX_NUMBER_DIGITS || ch != Some('.') {
      return None;
    }
    path.push(digits.parse().ok()?);
    marker_len += digits.len() + 1;
    ch = chars.next();
    match ch {
      Some(' ') => break,
      Some(c) if c.is_ascii_digit() => continue,
      _ => return None,
    }
  }

  Some(ListItem {
    kind: ListKind::Ordered,
    depth,
    indent: Span::new(line.start, marker_start),
    marker: Span::new(marker_start, marker_start + marker_len),
    content_start: marker_start + marker_len + 1,
    path,
  })
}

fn is_fence_open(content: RopeSlice) -> bool {
  let line = content.to_string();
  let line = line.trim();
  line
    .strip_prefix(FENCE)
    .is_some_and(|info| !info.contains('`'))
}

fn is_fence_close(content: RopeSlice) -> bool {
  content.to_string().trim() == FENCE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceMatch {
  pub open:  Line,
  pub close: Line,
}

/// Fence pairs of the document, in order. A fence line inside an open block
/// can only close it, so an unclosed fence pairs with nothing.
pub fn fence_pairs(index: &LineIndex) -> Vec<FenceMatch> {
  let text = index.text();
  let mut pairs = Vec::new();
  let mut open: Option<Line> = None;

  for line in index.lines() {
    let content = line.slice(text);
    match open {
      Some(start) if is_fence_close(content) => {
        pairs.push(FenceMatch {
          open:  start,
          close: line,
        });
        open = None;
      },
      None if is_fence_open(content) => open = Some(line),
      _ => {},
    }
  }
  pairs
}

/// Finds the fence pair wrapping lines `first..=last`: either the lines just
/// outside the block, or the block's own first and last lines. The closing
/// fence of one block and the opening fence of the next never form a pair.
pub fn match_fence(index: &LineIndex, first: usize, last: usize) -> Option<FenceMatch> {
  fence_pairs(index).into_iter().find(|fence| {
    let (open, close) = (fence.open.index, fence.close.index);
    (open + 1 == first && close == last + 1) || (open == first && close == last && last > first)
  })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
  Heading(HeadingMatch),
  List(ListItem),
  Plain,
}

pub fn classify(text: RopeSlice, line: Line, tab_width: usize) -> LineKind {
  if let Some(heading) = match_heading(text, line) {
    LineKind::Heading(heading)
  } else if let Some(item) = match_list_item(text, line, tab_width) {
    LineKind::List(item)
  } else {
    LineKind::Plain
  }
}
