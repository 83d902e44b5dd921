//! Fenced code blocks over whole lines.

use mark_core::line_ending::line_ending_or_default;
use ropey::Rope;

use crate::{
  engine::Edit,
  line_index::LineIndex,
  pattern::{FENCE, match_fence},
  selection::Range,
  transaction::{Result, Transaction},
};

/// Fences the touched lines, or removes the fences when the block is already
/// fenced (fence lines just outside the block, or the block's own first and
/// last lines).
pub fn toggle_code_block(doc: &Rope, range: Range) -> Result<Edit> {
  let index = LineIndex::new(doc.slice(..));
  let lines = index.touching(range);
  let (first, last) = (index.line(*lines.start()), index.line(*lines.end()));

  if let Some(fence) = match_fence(&index, first.index, last.index) {
    tracing::trace!(open = fence.open.index, close = fence.close.index, "removing fences");
    let changes = if fence.open.index + 1 == fence.close.index {
      vec![(fence.open.start, fence.close.end, None)]
    } else {
      let after_open = index.line(fence.open.index + 1).start;
      let before_close = index.line(fence.close.index - 1).end;
      vec![
        (fence.open.start, after_open, None),
        (before_close, fence.close.end, None),
      ]
    };
    return Ok(Transaction::change(doc, changes)?.into());
  }

  let eol = line_ending_or_default(doc).as_str();
  let open = format!("{FENCE}{eol}");
  let close = format!("{eol}{FENCE}");
  let shift = open.chars().count();
  let tx = Transaction::change(
    doc,
    [
      (first.start, first.start, Some(open.into())),
      (last.end, last.end, Some(close.into())),
    ],
  )?;

  // Mapping would carry a caret at the block's end past the closing fence. A
  // selection running into the next line ends where the closing fence starts.
  let inside = |pos: usize| {
    if pos > last.end {
      last.end + shift + eol.chars().count()
    } else {
      pos + shift
    }
  };
  let selection = Range::new(inside(range.anchor), inside(range.head));
  Ok(tx.with_selection(selection).into())
}
