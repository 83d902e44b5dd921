use ropey::{Rope, RopeSlice};

/// Line ending used for lines inserted into a document that has none yet.
pub const DEFAULT_LINE_ENDING: LineEnding = LineEnding::LF;

/// The line breaks ropey recognises with its `cr_lines` feature.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum LineEnding {
  Crlf,
  #[default]
  LF,
  CR,
}

impl LineEnding {
  #[inline]
  pub const fn len_chars(&self) -> usize {
    match self {
      Self::Crlf => 2,
      _ => 1,
    }
  }

  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Crlf => "\r\n",
      Self::LF => "\n",
      Self::CR => "\r",
    }
  }

  #[inline]
  pub const fn from_char(ch: char) -> Option<LineEnding> {
    match ch {
      '\n' => Some(LineEnding::LF),
      '\r' => Some(LineEnding::CR),
      _ => None,
    }
  }
}

/// Line ending of the first broken line among the first hundred.
pub fn auto_detect_line_ending(doc: &Rope) -> Option<LineEnding> {
  doc
    .lines()
    .take(100)
    .find_map(|line| get_line_ending(&line))
}

/// Line ending of `doc`, falling back to [`DEFAULT_LINE_ENDING`].
pub fn line_ending_or_default(doc: &Rope) -> LineEnding {
  auto_detect_line_ending(doc).unwrap_or(DEFAULT_LINE_ENDING)
}

pub fn get_line_ending(line: &RopeSlice) -> Option<LineEnding> {
  let len = line.len_chars();
  let last = line.get_char(len.checked_sub(1)?)?;
  match last {
    '\n' if len >= 2 && line.char(len - 2) == '\r' => Some(LineEnding::Crlf),
    ch => LineEnding::from_char(ch),
  }
}

/// Char index where `line` ends, before its line break.
pub fn line_end_char_index(slice: &RopeSlice, line: usize) -> usize {
  let break_len = get_line_ending(&slice.line(line)).map_or(0, |le| le.len_chars());
  slice.line_to_char(line + 1) - break_len
}
