//! Link and image insertion.

use ropey::Rope;

use crate::{
  config::Placeholders,
  engine::Edit,
  selection::Range,
  transaction::{Result, Transaction},
};

/// `[text](url)` with the selection as text. A caret gets placeholder text,
/// which is then selected; otherwise the url is selected.
pub fn link(doc: &Rope, range: Range, placeholders: &Placeholders) -> Result<Edit> {
  let selected = String::from(range.slice(doc.slice(..)));
  let label = if range.is_empty() {
    placeholders.link_text.as_str()
  } else {
    selected.as_str()
  };
  let url = placeholders.link_url.as_str();

  let from = range.from();
  let label_start = from + 1;
  let label_end = label_start + label.chars().count();
  let selection = if range.is_empty() {
    Range::new(label_start, label_end)
  } else {
    let url_start = label_end + 2;
    Range::new(url_start, url_start + url.chars().count())
  };

  let tx = Transaction::change(doc, [(from, range.to(), Some(format!("[{label}]({url})").into()))])?;
  Ok(tx.with_selection(selection).into())
}

/// `![alt](path)` with the selection as path; the path ends up selected.
pub fn image(doc: &Rope, range: Range, placeholders: &Placeholders) -> Result<Edit> {
  let selected = String::from(range.slice(doc.slice(..)));
  let path = if range.is_empty() {
    placeholders.image_path.as_str()
  } else {
    selected.as_str()
  };
  let alt = placeholders.image_alt.as_str();

  let from = range.from();
  let path_start = from + 2 + alt.chars().count() + 2;
  let selection = Range::new(path_start, path_start + path.chars().count());

  let tx = Transaction::change(doc, [(from, range.to(), Some(format!("![{alt}]({path})").into()))])?;
  Ok(tx.with_selection(selection).into())
}
