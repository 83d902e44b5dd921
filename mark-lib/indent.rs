//! Indentation, aware of list nesting.

use ropey::{Rope, RopeSlice};

use crate::{
  Tendril,
  config::IndentConfig,
  engine::Edit,
  line_index::LineIndex,
  list::has_preceding_sibling,
  pattern::{ListItem, match_list_item},
  selection::Range,
  transaction::{Change, Result, Transaction},
};

/// Adds one indentation unit.
///
/// A lone list item with a sibling above it moves one level deeper and
/// becomes that sibling's last child. Otherwise a caret gets the unit
/// inserted in place, and a selection indents every line it touches.
pub fn indent(doc: &Rope, range: Range, config: &IndentConfig) -> Result<Edit> {
  let text = doc.slice(..);
  let index = LineIndex::new(text);
  let unit: Tendril = config.unit().into();

  let lines = index.edit_lines(range);
  let items: Vec<Option<ListItem>> = lines
    .iter()
    .map(|&line| match_list_item(text, line, config.width))
    .collect();

  if let ([line], [Some(item)]) = (lines.as_slice(), items.as_slice()) {
    if has_preceding_sibling(&index, *line, item, config.width) {
      tracing::trace!(line = line.index, depth = item.depth + 1, "nesting list item");
      let tx = Transaction::insert(doc, line.start, unit)?;
      return Ok(Edit::from(tx).renumbering(line.index..=line.index));
    }
  }

  if range.is_empty() {
    return Ok(Transaction::insert(doc, range.head, unit)?.into());
  }

  let changes = lines
    .iter()
    .map(|line| (line.start, line.start, Some(unit.clone())));
  let edit = Edit::from(Transaction::change(doc, changes)?);
  if items.iter().any(Option::is_some) {
    Ok(edit.renumbering(index.touching(range)))
  } else {
    Ok(edit)
  }
}

/// Removes up to one unit of leading whitespace from every touched line.
///
/// A caret on a plain line without leading whitespace removes up to one unit
/// of the whitespace right before it instead, undoing an in-place indent.
/// List items that lose a level are renumbered as siblings of their former
/// parent.
pub fn unindent(doc: &Rope, range: Range, config: &IndentConfig) -> Result<Edit> {
  let text = doc.slice(..);
  let index = LineIndex::new(text);
  let width = config.width;
  let lines = index.edit_lines(range);
  let any_item = lines
    .iter()
    .any(|&line| match_list_item(text, line, width).is_some());

  if let ([line], true) = (lines.as_slice(), range.is_empty() && !any_item) {
    let caret = range.head;
    let before = trailing_unit(text.slice(line.start..caret), width);
    if before > 0 && leading_unit(index.content(*line), width) == 0 {
      let tx = Transaction::change(doc, [(caret - before, caret, None)])?;
      return Ok(tx.into());
    }
  }

  let changes: Vec<Change> = lines
    .iter()
    .filter_map(|&line| {
      let n = leading_unit(index.content(line), width);
      (n > 0).then_some((line.start, line.start + n, None))
    })
    .collect();
  let edit = Edit::from(Transaction::change(doc, changes)?);
  if any_item {
    Ok(edit.renumbering(index.touching(range)))
  } else {
    Ok(edit)
  }
}

/// Chars forming one unit at the start of `content`: a tab, or up to `width`
/// spaces.
fn leading_unit(content: RopeSlice, width: usize) -> usize {
  match content.get_char(0) {
    Some('\t') => 1,
    _ => content.chars().take(width).take_while(|&ch| ch == ' ').count(),
  }
}

/// Same as [`leading_unit`], counted backwards from the end of `before`.
fn trailing_unit(before: RopeSlice, width: usize) -> usize {
  let mut chars = before.chars_at(before.len_chars()).reversed();
  match chars.next() {
    Some('\t') => 1,
    Some(' ') => {
      1 + chars
        .take(width.saturating_sub(1))
        .take_while(|&ch| ch == ' ')
        .count()
    },
    _ => 0,
  }
}
