//! Clipboard interface used by the copy command.
//!
//! Only the trait and its errors live here. Front ends supply a provider that
//! talks to the system clipboard.

use std::borrow::Cow;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error("clipboard provider '{0}' failed")]
  CommandFailed(String),
  #[error("failed to write to clipboard provider's stdin")]
  StdinWriteFailed,
  #[error("no clipboard provider available")]
  Unavailable,
}

pub type Result<T> = std::result::Result<T, ClipboardError>;

pub trait ClipboardProvider {
  fn name(&self) -> Cow<'_, str>;
  /// Replace the clipboard contents with `content`.
  fn set_contents(&self, content: &str) -> Result<()>;
}

/// Provider used when nothing on the system can take clipboard contents.
/// Every copy fails with [`ClipboardError::Unavailable`].
#[derive(Debug, Default)]
pub struct NoClipboard;

impl ClipboardProvider for NoClipboard {
  fn name(&self) -> Cow<'_, str> {
    "none".into()
  }

  fn set_contents(&self, _content: &str) -> Result<()> {
    Err(ClipboardError::Unavailable)
  }
}

/// Copy `text` through `provider`, returning the number of chars copied.
pub fn copy_text(provider: &dyn ClipboardProvider, text: &str) -> Result<usize> {
  provider.set_contents(text)?;
  let chars = text.chars().count();
  tracing::debug!("copied {} chars via {}", chars, provider.name());
  Ok(chars)
}

#[cfg(test)]
mod test {
  use std::cell::RefCell;

  use super::*;

  #[derive(Default)]
  struct Recording(RefCell<Option<String>>);

  impl ClipboardProvider for Recording {
    fn name(&self) -> Cow<'_, str> {
      "recording".into()
    }

    fn set_contents(&self, content: &str) -> Result<()> {
      *self.0.borrow_mut() = Some(content.to_string());
      Ok(())
    }
  }

  #[test]
  fn copy_text_hands_over_contents() {
    let clipboard = Recording::default();
    assert_eq!(copy_text(&clipboard, "héllo").unwrap(), 5);
    assert_eq!(clipboard.0.borrow().as_deref(), Some("héllo"));
  }

  #[test]
  fn missing_provider_is_an_error() {
    assert!(matches!(
      copy_text(&NoClipboard, "text"),
      Err(ClipboardError::Unavailable)
    ));
  }
}
