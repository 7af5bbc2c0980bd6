//! Word and character statistics for the status area.
//!
//! Stats are always recomputed from the full text; nothing is cached between
//! calls.

use serde::{
  Deserialize,
  Serialize,
};
use the_writer_core::chars::char_is_whitespace;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentStats {
  pub words: usize,
  pub chars: usize,
}

pub fn compute_stats(document: &str) -> DocumentStats {
  DocumentStats {
    words: count_words(document),
    chars: count_chars(document),
  }
}

/// Number of maximal runs of non-whitespace characters.
pub fn count_words(text: &str) -> usize {
  text
    .split(char_is_whitespace)
    .filter(|word| !word.is_empty())
    .count()
}

/// Number of Unicode scalar values, whitespace included.
pub fn count_chars(text: &str) -> usize {
  text.chars().count()
}
