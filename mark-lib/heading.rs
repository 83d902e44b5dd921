//! ATX heading prefixes, toggled per line.

use ropey::Rope;

use crate::{
  Tendril,
  engine::Edit,
  line_index::LineIndex,
  pattern::match_heading,
  selection::Range,
  transaction::{Change, Result, Transaction},
};

/// For each touched line: strip a heading of the same `level`, resize a
/// heading of another level, or add one.
pub fn toggle_heading(doc: &Rope, range: Range, level: u8) -> Result<Edit> {
  let text = doc.slice(..);
  let index = LineIndex::new(text);
  let marks: Tendril = "#".repeat(usize::from(level)).into();

  let changes: Vec<Change> = index
    .edit_lines(range)
    .into_iter()
    .map(|line| match match_heading(text, line) {
      Some(found) if found.level == level => (line.start, found.prefix_end(), None),
      Some(found) => (found.marks.start, found.marks.end, Some(marks.clone())),
      None => {
        let mut prefix = marks.clone();
        prefix.push(' ');
        (line.start, line.start, Some(prefix))
      },
    })
    .collect();

  tracing::trace!(level, lines = changes.len(), "toggling heading");
  Ok(Transaction::change(doc, changes)?.into())
}

#[cfg(test)]
mod test {
  use super::*;

  fn run(text: &str, range: Range, level: u8) -> (String, Range) {
    let doc = Rope::from(text);
    let edit = toggle_heading(&doc, range, level).unwrap();
    let out = edit.transaction.apply_to(&doc).unwrap();
    (out.to_string(), edit.transaction.selection_after(range).unwrap())
  }

  #[test]
  fn insert_replace_and_strip() {
    assert_eq!(run("title", Range::point(5), 1), ("# title".into(), Range::point(7)));
    assert_eq!(
      run("# headline", Range::point(10), 6),
      ("###### headline".into(), Range::point(15))
    );
    assert_eq!(
      run("###### some title", Range::point(17), 1),
      ("# some title".into(), Range::point(12))
    );
    assert_eq!(run("# some title", Range::point(12), 1), ("some title".into(), Range::point(10)));
  }

  #[test]
  fn only_the_caret_line_changes() {
    let (out, sel) = run("before\nheadline\nafter", Range::point(15), 2);
    assert_eq!(out, "before\n## headline\nafter");
    assert_eq!(sel, Range::point(18));
  }

  #[test]
  fn each_line_decides_on_its_own() {
    let (out, sel) = run("# a\n\n## b\nc", Range::new(0, 11), 2);
    assert_eq!(out, "## a\n\nb\n## c");
    assert_eq!(sel, Range::new(0, 12));
  }

  #[test]
  fn seven_hashes_are_plain_text() {
    let (out, _) = run("####### x", Range::point(0), 1);
    assert_eq!(out, "# ####### x");
  }
}
