use crate::line_ending::LineEnding;

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  LineEnding::from_char(ch).is_some()
}

/// Characters that make up markdown indentation.
#[inline]
pub fn char_is_indent(ch: char) -> bool {
  matches!(ch, ' ' | '\t')
}

#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  match ch {
      '\u{0009}' | // Character Tabulation
      '\u{0020}' | // Space
      '\u{00A0}' | // No-break Space
      '\u{180E}' | // Mongolian Vowel Separator
      '\u{202F}' | // Narrow No-break Space
      '\u{205F}' | // Medium Mathematical Space
      '\u{3000}' | // Ideographic Space
      '\u{FEFF}'   // Zero Width No-break Space
      => true,

      // En Quad through Zero Width Space.
      ch if ('\u{2000}' ..= '\u{200B}').contains(&ch) => true,

      _ => false,
    }
}

/// Visual width of a run of indentation, counting a tab as `tab_width`
/// columns.
pub fn indent_width(indent: impl IntoIterator<Item = char>, tab_width: usize) -> usize {
  indent
    .into_iter()
    .take_while(|&ch| char_is_indent(ch))
    .map(|ch| if ch == '\t' { tab_width } else { 1 })
    .sum()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn indentation_chars() {
    assert!(char_is_indent(' '));
    assert!(char_is_indent('\t'));
    assert!(!char_is_indent('\u{00A0}'));
    assert!(char_is_whitespace('\u{00A0}'));
    assert!(!char_is_whitespace('\n'));
    assert!(char_is_line_ending('\n'));
  }

  #[test]
  fn width_counts_tabs_as_units() {
    assert_eq!(indent_width("    - item".chars(), 4), 4);
    assert_eq!(indent_width("\t- item".chars(), 4), 4);
    assert_eq!(indent_width("\t  x".chars(), 2), 4);
    assert_eq!(indent_width("item".chars(), 4), 0);
  }
}
