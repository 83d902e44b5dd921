//! `<`/`>` selection markers embedded in text.
//!
//! The first `<` starts the selection and the first `>` after it ends it. A
//! lone `<` is a caret. Other angle brackets are left as text.

const START: char = '<';
const END: char = '>';

/// Strips the markers, returning the text and the selection in char offsets.
/// Without markers the caret sits at the end of the text.
pub fn parse(marked: &str) -> (String, usize, usize) {
  let mut text = String::with_capacity(marked.len());
  let mut start = None;
  let mut end = None;
  let mut pos = 0;

  for ch in marked.chars() {
    match ch {
      START if start.is_none() => start = Some(pos),
      END if start.is_some() && end.is_none() => end = Some(pos),
      _ => {
        text.push(ch);
        pos += 1;
      },
    }
  }

  match (start, end) {
    (Some(start), Some(end)) => (text, start, end),
    (Some(caret), None) => (text, caret, caret),
    _ => (text, pos, pos),
  }
}

/// Inserts the markers at char offsets `start` and `end`.
pub fn format(text: &str, start: usize, end: usize) -> String {
  let (start, end) = (start.min(end), start.max(end));
  let mut out = String::with_capacity(text.len() + 2);
  let mut pos = 0;

  for ch in text.chars() {
    if pos == start {
      out.push(START);
    }
    if pos == end {
      out.push(END);
    }
    out.push(ch);
    pos += 1;
  }
  if pos <= start {
    out.push(START);
  }
  if pos <= end {
    out.push(END);
  }
  out
}
