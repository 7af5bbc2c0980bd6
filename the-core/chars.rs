//! Character classification used by the text engine.
//!
//! The formatting commands classify text the way classic regular expression
//! classes do: `\s` for whitespace, ASCII `\w` for word characters and the
//! multiline `^` anchor for line starts. This is narrower than Unicode
//! word/sentence segmentation.

#[derive(Debug, Eq, PartialEq)]
pub enum CharCategory {
  Whitespace,
  Eol,
  Word,
  Unknown,
}

pub fn categorize_char(ch: char) -> CharCategory {
  match ch {
    c if char_is_line_ending(c) => CharCategory::Eol,
    c if char_is_whitespace(c) => CharCategory::Whitespace,
    c if char_is_word(c) => CharCategory::Word,
    _ => CharCategory::Unknown,
  }
}

/// Line terminators recognised by the multiline `^` anchor.
#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  matches!(ch, '\u{000A}' | '\u{000D}' | '\u{2028}' | '\u{2029}')
}

#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  match ch {
      '\u{0009}' | // Character Tabulation
      '\u{000A}' | // Line Feed
      '\u{000B}' | // Line Tabulation
      '\u{000C}' | // Form Feed
      '\u{000D}' | // Carriage Return
      '\u{0020}' | // Space
      '\u{00A0}' | // No-break Space
      '\u{1680}' | // Ogham Space Mark
      '\u{2028}' | // Line Separator
      '\u{2029}' | // Paragraph Separator
      '\u{202F}' | // Narrow No-break Space
      '\u{205F}' | // Medium Mathematical Space
      '\u{3000}' | // Ideographic Space
      '\u{FEFF}'   // Zero Width No-break Space
      => true,

      // En Quad through Hair Space.
      ch if ('\u{2000}' ..= '\u{200A}').contains(&ch) => true,

      _ => false,
    }
}

/// ASCII-only word characters: `[A-Za-z0-9_]`.
#[inline]
pub fn char_is_word(ch: char) -> bool {
  ch.is_ascii_alphanumeric() || ch == '_'
}

/// Convert a byte offset in `s` to a char offset.
///
/// An offset inside a multi-byte char counts that char as preceding it.
pub fn byte_to_char_idx(s: &str, byte_idx: usize) -> usize {
  s.char_indices()
    .take_while(|&(idx, _)| idx < byte_idx)
    .count()
}

/// Convert a char offset in `s` to a byte offset, clamping to `s.len()`.
pub fn char_to_byte_idx(s: &str, char_idx: usize) -> usize {
  s.char_indices()
    .nth(char_idx)
    .map_or(s.len(), |(byte_idx, _)| byte_idx)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_categorize() {
    const EOL_TEST_CASE: &str = "\n\r\u{2028}\u{2029}";
    const WORD_TEST_CASE: &str = "_hello_world_0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    const WHITESPACE_TEST_CASE: &str = "\t\u{000B}\u{000C} \u{00A0}\u{1680}\u{2000}\u{2005}\u{200A}\u{202F}\u{205F}\u{3000}\u{FEFF}";

    for ch in EOL_TEST_CASE.chars() {
      assert_eq!(CharCategory::Eol, categorize_char(ch));
    }

    for ch in WHITESPACE_TEST_CASE.chars() {
      assert_eq!(
        CharCategory::Whitespace,
        categorize_char(ch),
        "Testing '{}', but got `{:?}` instead of `Category::Whitespace`",
        ch,
        categorize_char(ch)
      );
    }

    for ch in WORD_TEST_CASE.chars() {
      assert_eq!(CharCategory::Word, categorize_char(ch));
    }

    for ch in ".!?-é\u{200B}".chars() {
      assert_eq!(CharCategory::Unknown, categorize_char(ch));
    }
  }

  #[test]
  fn line_endings_are_whitespace() {
    for ch in "\n\r\u{2028}\u{2029}".chars() {
      assert!(char_is_whitespace(ch));
    }
  }

  #[test]
  fn word_chars_are_ascii_only() {
    assert!(char_is_word('a'));
    assert!(char_is_word('Z'));
    assert!(char_is_word('7'));
    assert!(char_is_word('_'));
    assert!(!char_is_word('é'));
    assert!(!char_is_word('ß'));
    assert!(!char_is_word('-'));
  }

  #[test]
  fn byte_char_conversion() {
    let s = "aé😀b";
    assert_eq!(byte_to_char_idx(s, 0), 0);
    assert_eq!(byte_to_char_idx(s, 1), 1);
    assert_eq!(byte_to_char_idx(s, 3), 2);
    assert_eq!(byte_to_char_idx(s, 7), 3);
    assert_eq!(byte_to_char_idx(s, 2), 2);
    assert_eq!(byte_to_char_idx(s, 100), 4);

    assert_eq!(char_to_byte_idx(s, 0), 0);
    assert_eq!(char_to_byte_idx(s, 2), 3);
    assert_eq!(char_to_byte_idx(s, 3), 7);
    assert_eq!(char_to_byte_idx(s, 4), 8);
    assert_eq!(char_to_byte_idx(s, 9), 8);
  }

  quickcheck::quickcheck! {
    fn char_byte_roundtrip(s: String, idx: usize) -> bool {
      let char_len = s.chars().count();
      let idx = if char_len == 0 { 0 } else { idx % (char_len + 1) };
      byte_to_char_idx(&s, char_to_byte_idx(&s, idx)) == idx
    }
  }
}
