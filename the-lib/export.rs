//! Plain-text export.
//!
//! Both formats write the document's plain text as UTF-8. `Docx` only differs
//! in its file extension and MIME type; it is not an Office Open XML package.

use std::{
  fmt,
  io::{
    self,
    Write,
  },
  str::FromStr,
};

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

pub const DEFAULT_FILE_STEM: &str = "formatted-text";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
  #[default]
  Txt,
  Docx,
}

impl ExportFormat {
  pub const fn extension(self) -> &'static str {
    match self {
      Self::Txt => "txt",
      Self::Docx => "docx",
    }
  }

  pub const fn mime_type(self) -> &'static str {
    match self {
      Self::Txt => "text/plain",
      Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    }
  }

  pub fn file_name(self, stem: &str) -> String {
    format!("{stem}.{}", self.extension())
  }
}

impl fmt::Display for ExportFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.extension())
  }
}

#[derive(Debug, Error)]
pub enum ExportError {
  #[error("unknown export format '{0}', expected txt or docx")]
  UnknownFormat(String),
  #[error(transparent)]
  Io(#[from] io::Error),
}

impl FromStr for ExportFormat {
  type Err = ExportError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
      "txt" | "text" => Ok(Self::Txt),
      "docx" => Ok(Self::Docx),
      _ => Err(ExportError::UnknownFormat(s.to_string())),
    }
  }
}

/// Write `text` in `format` to `writer`, returning the number of bytes
/// written.
pub fn export<W: Write>(text: &str, format: ExportFormat, mut writer: W) -> Result<usize, ExportError> {
  writer.write_all(text.as_bytes())?;
  writer.flush()?;
  tracing::debug!("exported {} bytes as {}", text.len(), format.mime_type());
  Ok(text.len())
}
