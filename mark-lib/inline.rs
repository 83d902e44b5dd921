//! Symmetric inline markers: `**bold**` and `` `code` ``.
//!
//! A selection that crosses a line break is cut at the end of its first line;
//! only that part is wrapped and the rest of the buffer is left alone. One
//! that starts right at a line end is cut down to a caret there.

use ropey::Rope;

use crate::{
  engine::Edit,
  line_index::LineIndex,
  pattern::match_wrap,
  selection::Range,
  transaction::{Result, Transaction},
};

pub const BOLD: &str = "**";
pub const CODE: &str = "`";

/// Wraps the selection in `marker`, or unwraps it when it is already wrapped.
/// A caret inserts `placeholder` between the markers and selects it.
pub fn toggle_inline(doc: &Rope, range: Range, marker: &str, placeholder: &str) -> Result<Edit> {
  let text = doc.slice(..);
  let index = LineIndex::new(text);
  let m = marker.chars().count();
  let from = range.from();
  let to = range.to().min(index.line_at(from).end.max(from));

  if from == to {
    let inserted = format!("{marker}{placeholder}{marker}");
    tracing::trace!(pos = from, "inserting placeholder");
    let tx = Transaction::insert(doc, from, inserted.into())?;
    let start = from + m;
    return Ok(tx.with_selection(Range::new(start, start + placeholder.chars().count())).into());
  }

  if let Some(found) = match_wrap(text, from, to, marker) {
    tracing::trace!(?found, "unwrapping");
    let tx = Transaction::change(
      doc,
      [
        (found.outer.start, found.inner.start, None),
        (found.inner.end, found.outer.end, None),
      ],
    )?;
    let start = found.outer.start;
    return Ok(tx.with_selection(Range::new(start, start + found.inner.len())).into());
  }

  let tx = Transaction::change(
    doc,
    [
      (from, from, Some(marker.into())),
      (to, to, Some(marker.into())),
    ],
  )?;
  Ok(tx.with_selection(Range::new(from + m, to + m)).into())
}
