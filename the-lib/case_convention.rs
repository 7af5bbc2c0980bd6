//! Case conversion commands applied to a text fragment.
//!
//! Every conversion takes the fragment by reference and produces a new
//! [`Tendril`]; the `*_with` variants append into a caller supplied buffer
//! instead.
//!
//! Title and sentence case follow the editor's historical rules rather than
//! Unicode segmentation:
//!
//! - title case splits on the ASCII space only, so tabs and newlines never
//!   start a new word and runs of spaces are kept as they are;
//! - sentence case lowercases everything and then capitalises an ASCII word
//!   character at the start of a line or after a `.` followed by whitespace.
//!   `!` and `?` do not end a sentence.

use std::{
  fmt,
  str::FromStr,
};

use serde::{
  Deserialize,
  Serialize,
};
use the_writer_core::chars::{
  char_is_line_ending,
  char_is_whitespace,
  char_is_word,
};
use thiserror::Error;

use crate::Tendril;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseCommand {
  Uppercase,
  Lowercase,
  TitleCase,
  SentenceCase,
}

impl CaseCommand {
  pub const ALL: [CaseCommand; 4] = [
    CaseCommand::Uppercase,
    CaseCommand::Lowercase,
    CaseCommand::TitleCase,
    CaseCommand::SentenceCase,
  ];

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Uppercase => "uppercase",
      Self::Lowercase => "lowercase",
      Self::TitleCase => "title-case",
      Self::SentenceCase => "sentence-case",
    }
  }
}

impl fmt::Display for CaseCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown case command '{0}'")]
pub struct ParseCaseCommandError(pub String);

impl FromStr for CaseCommand {
  type Err = ParseCaseCommandError;

  /// Accepts the kebab-case names as well as the camelCase command names
  /// used by the toolbar (`titleCase`, `sentenceCase`), ignoring case.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized: String = s
      .chars()
      .filter(|c| !matches!(c, '-' | '_'))
      .flat_map(char::to_lowercase)
      .collect();

    match normalized.as_str() {
      "uppercase" | "upper" => Ok(Self::Uppercase),
      "lowercase" | "lower" => Ok(Self::Lowercase),
      "titlecase" | "title" => Ok(Self::TitleCase),
      "sentencecase" | "sentence" => Ok(Self::SentenceCase),
      _ => Err(ParseCaseCommandError(s.to_string())),
    }
  }
}

pub fn apply_case(text: &str, command: CaseCommand) -> Tendril {
  let mut res = Tendril::new();
  apply_case_with(text, command, &mut res);
  res
}

pub fn apply_case_with(text: &str, command: CaseCommand, buf: &mut Tendril) {
  match command {
    CaseCommand::Uppercase => to_upper_case_with(text, buf),
    CaseCommand::Lowercase => to_lower_case_with(text, buf),
    CaseCommand::TitleCase => to_title_case_with(text, buf),
    CaseCommand::SentenceCase => to_sentence_case_with(text, buf),
  }
}

pub fn to_upper_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_upper_case_with(text, &mut res);
  res
}

pub fn to_upper_case_with(text: &str, buf: &mut Tendril) {
  buf.push_str(&text.to_uppercase());
}

pub fn to_lower_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_lower_case_with(text, &mut res);
  res
}

// `str::to_lowercase` rather than a per-char map so a word-final sigma maps
// to 'ς'.
pub fn to_lower_case_with(text: &str, buf: &mut Tendril) {
  buf.push_str(&text.to_lowercase());
}

pub fn to_title_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_title_case_with(text, &mut res);
  res
}

pub fn to_title_case_with(text: &str, buf: &mut Tendril) {
  for (idx, word) in text.split(' ').enumerate() {
    if idx > 0 {
      buf.push(' ');
    }
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
      buf.extend(first.to_uppercase());
      buf.push_str(&chars.as_str().to_lowercase());
    }
  }
}

pub fn to_sentence_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_sentence_case_with(text, &mut res);
  res
}

pub fn to_sentence_case_with(text: &str, buf: &mut Tendril) {
  let lowered = text.to_lowercase();

  // State: (at_line_start, prev_was_period, in_gap_after_period)
  lowered.chars().fold(
    (true, false, false),
    |(at_line_start, prev_was_period, in_gap), c| {
      if char_is_word(c) && (at_line_start || in_gap) {
        buf.push(c.to_ascii_uppercase());
      } else {
        buf.push(c);
      }

      let gap = char_is_whitespace(c) && (prev_was_period || in_gap);
      (char_is_line_ending(c), c == '.', gap)
    },
  );
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_to_upper_case() {
    assert_eq!(to_upper_case("hello").as_str(), "HELLO");
    assert_eq!(to_upper_case("Hello World").as_str(), "HELLO WORLD");
    assert_eq!(to_upper_case("ALREADY").as_str(), "ALREADY");
    assert_eq!(to_upper_case("").as_str(), "");
    assert_eq!(to_upper_case("café").as_str(), "CAFÉ");
    assert_eq!(to_upper_case("straße").as_str(), "STRASSE");
  }

  #[test]
  fn test_to_lower_case() {
    assert_eq!(to_lower_case("HELLO").as_str(), "hello");
    assert_eq!(to_lower_case("Hello World").as_str(), "hello world");
    assert_eq!(to_lower_case("already").as_str(), "already");
    assert_eq!(to_lower_case("").as_str(), "");
    assert_eq!(to_lower_case("CAFÉ").as_str(), "café");
    assert_eq!(to_lower_case("ὈΔΥΣΣΕΎΣ").as_str(), "ὀδυσσεύς");
  }

  #[test]
  fn test_to_title_case() {
    assert_eq!(to_title_case("hello world").as_str(), "Hello World");
    assert_eq!(to_title_case("hELLO wORLD").as_str(), "Hello World");
    assert_eq!(to_title_case("éCOLE normale").as_str(), "École Normale");
    assert_eq!(to_title_case("").as_str(), "");
    assert_eq!(to_title_case("a").as_str(), "A");

    // Consecutive spaces keep their empty words.
    assert_eq!(to_title_case("one  two").as_str(), "One  Two");
    assert_eq!(to_title_case(" leading").as_str(), " Leading");
    assert_eq!(to_title_case("trailing ").as_str(), "Trailing ");

    // Only the ASCII space separates words.
    assert_eq!(to_title_case("one\ttwo").as_str(), "One\ttwo");
    assert_eq!(to_title_case("one\nTWO three").as_str(), "One\ntwo Three");
  }

  #[test]
  fn test_to_sentence_case() {
    assert_eq!(
      to_sentence_case("THE QUICK fox. it RAN.").as_str(),
      "The quick fox. It ran."
    );
    assert_eq!(to_sentence_case("").as_str(), "");
    assert_eq!(to_sentence_case("a").as_str(), "A");

    // `!` and `?` are not sentence boundaries.
    assert_eq!(
      to_sentence_case("WHAT? NO! yes.  MAYBE").as_str(),
      "What? no! yes.  Maybe"
    );

    // A period needs whitespace after it.
    assert_eq!(to_sentence_case("v1.FINAL").as_str(), "V1.final");
    assert_eq!(to_sentence_case("end.\tnext").as_str(), "End.\tNext");

    // Only ASCII word characters are capitalised.
    assert_eq!(to_sentence_case("ÉCOLE. ÉTÉ").as_str(), "école. été");
    assert_eq!(to_sentence_case("\"QUOTED\" TEXT").as_str(), "\"quoted\" text");

    // Each line start counts as a sentence start.
    assert_eq!(
      to_sentence_case("FIRST LINE\nSECOND LINE").as_str(),
      "First line\nSecond line"
    );
    assert_eq!(to_sentence_case("ONE\r\n two").as_str(), "One\r\n two");
  }

  #[test]
  fn test_apply_case_empty() {
    for command in CaseCommand::ALL {
      assert_eq!(apply_case("", command).as_str(), "");
    }
  }

  #[test]
  fn test_apply_case_with_appends() {
    let mut buf = Tendril::from("> ");
    apply_case_with("hello world", CaseCommand::TitleCase, &mut buf);
    assert_eq!(buf.as_str(), "> Hello World");
  }

  #[test]
  fn test_parse_command() {
    assert_eq!("uppercase".parse(), Ok(CaseCommand::Uppercase));
    assert_eq!("LOWERCASE".parse(), Ok(CaseCommand::Lowercase));
    assert_eq!("titleCase".parse(), Ok(CaseCommand::TitleCase));
    assert_eq!("title-case".parse(), Ok(CaseCommand::TitleCase));
    assert_eq!("sentenceCase".parse(), Ok(CaseCommand::SentenceCase));
    assert_eq!("sentence_case".parse(), Ok(CaseCommand::SentenceCase));
    assert_eq!(
      "bold".parse::<CaseCommand>(),
      Err(ParseCaseCommandError("bold".to_string()))
    );

    for command in CaseCommand::ALL {
      assert_eq!(command.to_string().parse(), Ok(command));
    }
  }

  // Case folding is only reversible for characters whose upper and lower
  // forms map onto each other, so the property is checked over ASCII input.
  quickcheck::quickcheck! {
    fn upper_then_lower_is_lower(s: String) -> bool {
      let s: String = s.chars().filter(char::is_ascii).collect();
      let upper = apply_case(&s, CaseCommand::Uppercase);
      apply_case(&upper, CaseCommand::Lowercase) == apply_case(&s, CaseCommand::Lowercase)
    }

    fn title_case_keeps_space_layout(s: String) -> bool {
      let title = to_title_case(&s);
      title.split(' ').count() == s.split(' ').count()
    }

    fn sentence_case_is_idempotent(s: String) -> bool {
      let s: String = s.chars().filter(char::is_ascii).collect();
      let once = to_sentence_case(&s);
      to_sentence_case(&once) == once
    }
  }
}
