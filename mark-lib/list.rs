//! List markers: toggling, renumbering and continuation on a line break.
//!
//! A list block is a maximal run of non-blank lines. Lines inside it that are
//! not list items are continuation lines and do not affect numbering.
//! Ordered items are numbered per depth from 1, and an item whose parents are
//! ordered items as well shows the whole path (`2.1.`).

use std::ops::RangeInclusive;

use mark_core::{line_ending::line_ending_or_default, rope::RopeSliceExt};
use ropey::Rope;
use smallvec::SmallVec;

use crate::{
  Tendril,
  config::Config,
  engine::Edit,
  line_index::{Line, LineIndex},
  pattern::{LineKind, ListItem, ListKind, classify, match_list_item, number_path},
  selection::Range,
  transaction::{Change, Result, Transaction},
};

/// Marker given to new ordered items; renumbering assigns the real number.
const ORDERED_PLACEHOLDER: &str = "1.";

/// Turns the touched lines into items of `kind`, or strips their markers when
/// all of them already are. Heading lines are left as they are.
pub fn toggle_list(doc: &Rope, range: Range, kind: ListKind, config: &Config) -> Result<Edit> {
  let text = doc.slice(..);
  let index = LineIndex::new(text);
  let tab_width = config.indent.width;

  let items: Vec<(Line, Option<ListItem>)> = index
    .edit_lines(range)
    .into_iter()
    .filter_map(|line| match classify(text, line, tab_width) {
      LineKind::Heading(_) => None,
      LineKind::List(item) => Some((line, Some(item))),
      LineKind::Plain => Some((line, None)),
    })
    .collect();
  let strip = !items.is_empty()
    && items
      .iter()
      .all(|(_, item)| item.as_ref().is_some_and(|item| item.kind == kind));

  let marker: Tendril = match kind {
    ListKind::Ordered => ORDERED_PLACEHOLDER.into(),
    ListKind::Unordered => config.list.bullet.to_string().into(),
  };

  let changes: Vec<Change> = items
    .iter()
    .filter_map(|(line, item)| match item {
      Some(item) if strip => Some((item.marker.start, item.content_start, None)),
      Some(item) if item.kind == kind => None,
      Some(item) => Some((item.marker.start, item.marker.end, Some(marker.clone()))),
      None => {
        let at = line.start + index.content(*line).indent_len();
        let mut prefix = marker.clone();
        prefix.push(' ');
        Some((at, at, Some(prefix)))
      },
    })
    .collect();

  tracing::trace!(?kind, strip, "toggling list");
  let tx = Transaction::change(doc, changes)?;
  Ok(Edit::from(tx).renumbering(index.touching(range)))
}

#[derive(Debug, Clone, Copy)]
struct Level {
  ordered: bool,
  count:   usize,
}

impl Level {
  const BULLET: Level = Level {
    ordered: false,
    count:   0,
  };
}

/// Rewrites the ordered markers of the list blocks around `lines` so every
/// depth counts `1..N`. Only markers that change are touched.
pub fn renumber(doc: &Rope, lines: RangeInclusive<usize>, tab_width: usize) -> Result<Transaction> {
  let text = doc.slice(..);
  let index = LineIndex::new(text);
  let last_line = index.len_lines() - 1;

  let mut first = (*lines.start()).min(last_line);
  let mut last = (*lines.end()).min(last_line);
  while first > 0 && !index.is_blank(index.line(first - 1)) {
    first -= 1;
  }
  while last < last_line && !index.is_blank(index.line(last + 1)) {
    last += 1;
  }

  let mut levels: SmallVec<[Level; 8]> = SmallVec::new();
  let mut changes: Vec<Change> = Vec::new();

  for line in (first..=last).map(|i| index.line(i)) {
    if index.is_blank(line) {
      levels.clear();
      continue;
    }
    let Some(item) = match_list_item(text, line, tab_width) else {
      continue;
    };

    levels.truncate(item.depth + 1);
    levels.resize(item.depth + 1, Level::BULLET);
    let level = &mut levels[item.depth];
    if !item.ordered() {
      *level = Level::BULLET;
      continue;
    }
    if !level.ordered {
      *level = Level {
        ordered: true,
        count:   0,
      };
    }
    level.count += 1;

    let mut path: SmallVec<[usize; 4]> = levels
      .iter()
      .rev()
      .take_while(|level| level.ordered)
      .map(|level| level.count)
      .collect();
    path.reverse();

    if path != item.path {
      changes.push((item.marker.start, item.marker.end, Some(number_path(&path).into())));
    }
  }

  tracing::trace!(first, last, rewritten = changes.len(), "renumbered list block");
  Transaction::change(doc, changes)
}

/// Whether an item at the same depth comes before `item` in its block, with
/// no shallower item in between.
pub fn has_preceding_sibling(index: &LineIndex, line: Line, item: &ListItem, tab_width: usize) -> bool {
  for prev in (0..line.index).rev().map(|i| index.line(i)) {
    if index.is_blank(prev) {
      return false;
    }
    match match_list_item(index.text(), prev, tab_width) {
      Some(prev) if prev.depth == item.depth => return true,
      Some(prev) if prev.depth < item.depth => return false,
      _ => {},
    }
  }
  false
}

/// Line break that continues the list item under the caret. On an item with
/// no content the marker is removed instead, which ends the list; the items
/// below then start a list of their own and are renumbered.
pub fn newline(doc: &Rope, range: Range, tab_width: usize) -> Result<Edit> {
  let text = doc.slice(..);
  let index = LineIndex::new(text);
  let eol = line_ending_or_default(doc).as_str();
  let from = range.from();
  let line = index.line_at(from);
  let item = match_list_item(text, line, tab_width).filter(|item| from >= item.content_start);

  let Some(item) = item else {
    let tx = Transaction::change(doc, [(from, range.to(), Some(eol.into()))])?;
    let caret = from + eol.chars().count();
    return Ok(tx.with_selection(Range::point(caret)).into());
  };

  if range.is_empty() && item.is_empty(text, line) {
    tracing::trace!(line = line.index, "ending list");
    let tx = Transaction::change(doc, [(line.start, line.end, None)])?;
    let edit = Edit::from(tx.with_selection(Range::point(line.start)));
    return Ok(edit.renumbering(line.index..=line.index + 1));
  }

  let mut continuation = Tendril::from(eol);
  continuation.push_str(&String::from(text.slice(item.indent.start..item.marker.end)));
  continuation.push(' ');
  let caret = from + continuation.chars().count();
  let tx = Transaction::change(doc, [(from, range.to(), Some(continuation))])?;
  Ok(Edit::from(tx.with_selection(Range::point(caret))).renumbering(line.index..=line.index + 1))
}
