//! A single selection range over a document.
//!
//! Offsets are char indices. The anchor stays put while the head moves, so a
//! backwards selection has `head < anchor`.

use ropey::RopeSlice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
  pub anchor: usize,
  pub head:   usize,
}

impl Range {
  pub fn new(anchor: usize, head: usize) -> Self {
    Self { anchor, head }
  }

  #[inline]
  pub fn point(head: usize) -> Self {
    Self::new(head, head)
  }

  /// Start of the range
  #[inline]
  #[must_use]
  pub fn from(&self) -> usize {
    std::cmp::min(self.anchor, self.head)
  }

  /// End of the range
  #[inline]
  #[must_use]
  pub fn to(&self) -> usize {
    std::cmp::max(self.anchor, self.head)
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.to() - self.from()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.anchor == self.head
  }

  /// Whether the head sits before the anchor.
  #[inline]
  pub fn is_backward(&self) -> bool {
    self.head < self.anchor
  }

  /// Clamp both ends to `len_chars`.
  #[must_use]
  pub fn clamp(self, len_chars: usize) -> Self {
    Self::new(self.anchor.min(len_chars), self.head.min(len_chars))
  }

  /// A range covering `from..to` that keeps this range's direction.
  #[must_use]
  pub fn with_extent(self, from: usize, to: usize) -> Self {
    if self.is_backward() {
      Self::new(to, from)
    } else {
      Self::new(from, to)
    }
  }

  pub fn slice<'a>(&self, text: RopeSlice<'a>) -> RopeSlice<'a> {
    text.slice(self.from()..self.to())
  }
}
