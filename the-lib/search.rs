//! Case-insensitive find and replace over a text fragment.
//!
//! A [`FindReplaceRequest`] carries the pattern, its replacement and a
//! [`SearchMode`]. In [`SearchMode::Literal`] (the default) the pattern is
//! plain text and the replacement is inserted verbatim. [`SearchMode::Regex`]
//! compiles the pattern as a regular expression and expands `$`-references in
//! the replacement.
//!
//! Both modes match case-insensitively and replace every non-overlapping match
//! from left to right. The request is validated before anything is computed,
//! so a failed request never yields a partially replaced fragment.
//!
//! # Replacement syntax
//!
//! Regex mode accepts the replacement tokens common to find and replace fields
//! and rewrites them for the [`regex`] crate:
//!
//! - `$&` inserts the whole match;
//! - `$1`..`$99` insert a numbered group;
//! - `$<name>` inserts a named group;
//! - `$$` inserts a literal `$`.
//!
//! Any other `$` is kept literally.
//!
//! A pattern that can match the empty string never yields an empty match
//! directly after a previous match: `a*` over `baaac` replaces three matches,
//! not four.

use std::{
  borrow::Cow,
  time::Instant,
};

use regex::{
  NoExpand,
  Regex,
  RegexBuilder,
};
use serde::{
  Deserialize,
  Serialize,
};
use the_writer_core::chars::byte_to_char_idx;
use thiserror::Error;

use crate::Tendril;

/// Upper bound on the compiled size of a user pattern.
pub const REGEX_SIZE_LIMIT: usize = 1 << 20;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
  #[default]
  Literal,
  Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindReplaceRequest {
  pub pattern:     String,
  pub replacement: String,
  pub mode:        SearchMode,
}

impl FindReplaceRequest {
  pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
    Self {
      pattern:     pattern.into(),
      replacement: replacement.into(),
      mode:        SearchMode::default(),
    }
  }

  pub fn regex(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
    Self::new(pattern, replacement).with_mode(SearchMode::Regex)
  }

  pub fn with_mode(mut self, mode: SearchMode) -> Self {
    self.mode = mode;
    self
  }
}

#[derive(Debug, Error)]
pub enum SearchError {
  #[error("Please enter text to find")]
  EmptyPattern,
  #[error("invalid search pattern: {0}")]
  InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// A match as a half-open range of char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
  pub start: usize,
  pub end:   usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
  pub text:  Tendril,
  pub count: usize,
}

/// Compile `pattern` for `mode` as a case-insensitive regex.
pub fn build_regex(pattern: &str, mode: SearchMode) -> Result<Regex> {
  if pattern.is_empty() {
    return Err(SearchError::EmptyPattern);
  }

  let source = match mode {
    SearchMode::Literal => Cow::Owned(regex::escape(pattern)),
    SearchMode::Regex => Cow::Borrowed(pattern),
  };

  let regex = RegexBuilder::new(&source)
    .case_insensitive(true)
    .size_limit(REGEX_SIZE_LIMIT)
    .build()?;
  Ok(regex)
}

pub fn find_and_replace(document: &str, request: &FindReplaceRequest) -> Result<Tendril> {
  replace_all(document, request).map(|replaced| replaced.text)
}

/// Like [`find_and_replace`], also reporting how many matches were replaced.
pub fn replace_all(document: &str, request: &FindReplaceRequest) -> Result<Replaced> {
  let start = tracing::enabled!(tracing::Level::DEBUG).then(Instant::now);
  let regex = build_regex(&request.pattern, request.mode)?;

  let count = regex.find_iter(document).count();
  let text = if count == 0 {
    Cow::Borrowed(document)
  } else {
    match request.mode {
      SearchMode::Literal => regex.replace_all(document, NoExpand(&request.replacement)),
      SearchMode::Regex => {
        let replacement = translate_replacement(&request.replacement);
        regex.replace_all(document, replacement.as_str())
      },
    }
  };

  if let Some(start) = start {
    tracing::debug!(
      "replaced {} match(es) of {:?} in {}s",
      count,
      request.pattern,
      Instant::now().duration_since(start).as_secs_f64()
    );
  }

  Ok(Replaced {
    text: Tendril::from(text.as_ref()),
    count,
  })
}

/// All non-overlapping matches of the request's pattern in `document`.
pub fn find_matches(document: &str, request: &FindReplaceRequest) -> Result<Vec<SearchMatch>> {
  let regex = build_regex(&request.pattern, request.mode)?;

  // Matches arrive in order, so char offsets are counted incrementally.
  let mut byte_pos = 0;
  let mut char_pos = 0;
  let matches = regex
    .find_iter(document)
    .map(|mat| {
      char_pos += byte_to_char_idx(&document[byte_pos..], mat.start() - byte_pos);
      let start = char_pos;
      char_pos += byte_to_char_idx(mat.as_str(), mat.len());
      byte_pos = mat.end();
      SearchMatch {
        start,
        end: char_pos,
      }
    })
    .collect();

  Ok(matches)
}

pub fn count_matches(document: &str, request: &FindReplaceRequest) -> Result<usize> {
  let regex = build_regex(&request.pattern, request.mode)?;
  Ok(regex.find_iter(document).count())
}

/// Rewrite `$&`-style replacement tokens into [`regex`] crate syntax.
fn translate_replacement(replacement: &str) -> String {
  let mut out = String::with_capacity(replacement.len());
  let mut rest = replacement;

  while let Some(idx) = rest.find('$') {
    out.push_str(&rest[..idx]);
    rest = &rest[idx + 1..];

    let mut chars = rest.chars();
    match chars.next() {
      Some('$') => {
        out.push_str("$$");
        rest = chars.as_str();
      },
      Some('&') => {
        out.push_str("${0}");
        rest = chars.as_str();
      },
      Some(c) if c.is_ascii_digit() => {
        let digits = rest
          .bytes()
          .take(2)
          .take_while(u8::is_ascii_digit)
          .count();
        out.push_str("${");
        out.push_str(&rest[..digits]);
        out.push('}');
        rest = &rest[digits..];
      },
      Some('<') => match rest.find('>') {
        Some(close) if close > 1 => {
          out.push_str("${");
          out.push_str(&rest[1..close]);
          out.push('}');
          rest = &rest[close + 1..];
        },
        _ => out.push_str("$$"),
      },
      _ => out.push_str("$$"),
    }
  }

  out.push_str(rest);
  out
}
