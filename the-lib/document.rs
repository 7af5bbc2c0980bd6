//! Document state driven by a front end.
//!
//! A [`Document`] owns the text and the current selection. Formatting
//! commands, find/replace, paste and copy all go through it, and statistics
//! are derived from the full text on request.
//!
//! # Design
//!
//! - No IO of its own, no rendering, no history.
//! - Pure state evolution: inputs in, state out.
//! - A failed command leaves text, selection and version untouched.
//!
//! # Example
//!
//! ```no_run
//! use the_writer_lib::{
//!   case_convention::CaseCommand,
//!   document::Document,
//!   selection::Range,
//! };
//!
//! let mut doc = Document::from("hello world");
//! doc.select(Range::new(0, 5));
//! doc.apply_case(CaseCommand::Uppercase);
//! assert_eq!(doc.text().to_string(), "HELLO world");
//! ```

use std::borrow::Cow;

use ropey::Rope;

use crate::{
  Tendril,
  case_convention::{
    CaseCommand,
    apply_case,
  },
  clipboard::{
    self,
    ClipboardProvider,
    copy_text,
  },
  search::{
    self,
    FindReplaceRequest,
    replace_all,
  },
  selection::Range,
  stats::{
    DocumentStats,
    compute_stats,
  },
};

#[derive(Debug, Clone, Default)]
pub struct Document {
  display_name: Tendril,
  text:         Rope,
  selection:    Range,
  version:      u64,
  modified:     bool,
}

impl Document {
  pub fn new(text: Rope) -> Self {
    Self {
      display_name: Tendril::new(),
      text,
      selection: Range::point(0),
      version: 0,
      modified: false,
    }
  }

  /// Name used in diagnostics, `<untitled>` until one is set.
  pub fn display_name(&self) -> Cow<'_, str> {
    if self.display_name.is_empty() {
      Cow::Borrowed("<untitled>")
    } else {
      Cow::Borrowed(self.display_name.as_str())
    }
  }

  pub fn set_display_name(&mut self, name: impl Into<Tendril>) {
    self.display_name = name.into();
  }

  pub fn text(&self) -> &Rope {
    &self.text
  }

  pub fn selection(&self) -> Range {
    self.selection
  }

  /// Set the selection, clamped to the document.
  pub fn select(&mut self, range: Range) {
    self.selection = range.clamp(self.text.len_chars());
  }

  pub fn select_all(&mut self) {
    self.selection = Range::new(0, self.text.len_chars());
  }

  pub fn selected_text(&self) -> Cow<'_, str> {
    self.selection.slice(self.text.slice(..)).into()
  }

  pub fn version(&self) -> u64 {
    self.version
  }

  /// Whether any edit changed the text since the document was created.
  pub fn is_modified(&self) -> bool {
    self.modified
  }

  pub fn stats(&self) -> DocumentStats {
    compute_stats(&Cow::<str>::from(self.text.slice(..)))
  }

  /// Apply a case command to the selected fragment.
  ///
  /// Returns `false` without touching the document when nothing is selected.
  /// Afterwards the selection covers the transformed text.
  pub fn apply_case(&mut self, command: CaseCommand) -> bool {
    if self.selection.is_empty() {
      return false;
    }

    let transformed = apply_case(&self.selected_text(), command);
    let from = self.selection.from();
    let len = transformed.chars().count();
    self.replace_range(self.selection, &transformed);
    self.selection = self.selection.with_extent(from, from + len);
    true
  }

  /// Replace every match of `request` in the whole document.
  ///
  /// Returns the number of replacements. The selection is clamped to the new
  /// text.
  pub fn find_and_replace(&mut self, request: &FindReplaceRequest) -> search::Result<usize> {
    let replaced = replace_all(&Cow::<str>::from(self.text.slice(..)), request)?;
    if replaced.count == 0 {
      return Ok(0);
    }

    self.text = Rope::from_str(&replaced.text);
    self.selection = self.selection.clamp(self.text.len_chars());
    self.touch();
    tracing::debug!(
      "{}: replaced {} match(es)",
      self.display_name(),
      replaced.count
    );
    Ok(replaced.count)
  }

  /// Insert plain text over the selection, leaving the cursor after it.
  pub fn insert_text(&mut self, text: &str) {
    if text.is_empty() && self.selection.is_empty() {
      return;
    }

    let from = self.selection.from();
    self.replace_range(self.selection, text);
    self.selection = Range::point(from + text.chars().count());
  }

  /// Remove all text. Returns `false` when the document was already empty.
  pub fn clear(&mut self) -> bool {
    if self.text.len_chars() == 0 {
      return false;
    }

    self.text = Rope::new();
    self.selection = Range::point(0);
    self.touch();
    true
  }

  /// Copy the full text, not just the selection, to `clipboard`.
  pub fn copy_to(&self, clipboard: &dyn ClipboardProvider) -> clipboard::Result<usize> {
    copy_text(clipboard, &Cow::<str>::from(self.text.slice(..)))
  }

  fn replace_range(&mut self, range: Range, text: &str) {
    let range = range.clamp(self.text.len_chars());
    self.text.remove(range.from()..range.to());
    self.text.insert(range.from(), text);
    self.touch();
  }

  fn touch(&mut self) {
    self.modified = true;
    self.version = self.version.saturating_add(1);
  }
}

impl From<&str> for Document {
  fn from(text: &str) -> Self {
    Self::new(Rope::from_str(text))
  }
}

impl From<String> for Document {
  fn from(text: String) -> Self {
    Self::new(Rope::from(text))
  }
}
