//! User configuration loaded from `config.toml`.
//!
//! The global file in the config dir and the workspace file under
//! `.the-writer/` are merged, the workspace taking precedence. Either file may
//! be missing; a file that fails to parse is always an error.

use std::{
  fs,
  io::{
    self,
    ErrorKind,
  },
  path::Path,
};

use serde::{
  Deserialize,
  Serialize,
};
use the_writer_lib::{
  export::{
    DEFAULT_FILE_STEM,
    ExportFormat,
  },
  search::SearchMode,
  theme::ThemePreference,
};
use thiserror::Error;
use toml::{
  Value,
  de::Error as TomlError,
};

use crate::merge_toml_values;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
  pub theme:  ThemePreference,
  pub search: SearchConfig,
  pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SearchConfig {
  /// How find/replace interprets its pattern unless told otherwise.
  pub mode: SearchMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ExportConfig {
  pub file_stem:      String,
  pub default_format: ExportFormat,
}

impl Default for ExportConfig {
  fn default() -> Self {
    Self {
      file_stem:      DEFAULT_FILE_STEM.to_string(),
      default_format: ExportFormat::default(),
    }
  }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
  #[error("bad config: {0}")]
  BadConfig(#[from] TomlError),
  #[error("failed to serialize: {0}")]
  Serialize(#[from] toml::ser::Error),
  #[error(transparent)]
  Error(#[from] io::Error),
}

impl ConfigLoadError {
  fn is_missing_file(&self) -> bool {
    matches!(self, Self::Error(err) if err.kind() == ErrorKind::NotFound)
  }
}

impl Config {
  pub fn load(
    global: Result<String, ConfigLoadError>,
    local: Result<String, ConfigLoadError>,
  ) -> Result<Config, ConfigLoadError> {
    let global_config = parse_raw(global)?;
    let local_config = parse_raw(local)?;

    let merged = match (global_config, local_config) {
      (None, None) => return Ok(Config::default()),
      (Some(config), None) | (None, Some(config)) => config,
      (Some(global), Some(local)) => merge_toml_values(global, local, 3),
    };

    Ok(merged.try_into()?)
  }

  /// Load the global config file and the current workspace's config file.
  pub fn load_user() -> Result<Config, ConfigLoadError> {
    Self::load_files(&crate::config_file(), &crate::workspace_config_file())
  }

  pub fn load_files(global: &Path, local: &Path) -> Result<Config, ConfigLoadError> {
    let global_config = fs::read_to_string(global).map_err(ConfigLoadError::Error);
    let local_config = fs::read_to_string(local).map_err(ConfigLoadError::Error);
    tracing::debug!(
      "loading config from {} and {}",
      global.display(),
      local.display()
    );
    Self::load(global_config, local_config)
  }
}

/// A missing file counts as no config, any other IO error is reported.
fn parse_raw(source: Result<String, ConfigLoadError>) -> Result<Option<Value>, ConfigLoadError> {
  match source {
    Ok(text) => Ok(Some(toml::from_str(&text)?)),
    Err(err) if err.is_missing_file() => Ok(None),
    Err(err) => Err(err),
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn missing() -> Result<String, ConfigLoadError> {
    Err(ConfigLoadError::Error(io::Error::from(ErrorKind::NotFound)))
  }

  #[test]
  fn missing_files_give_defaults() {
    let config = Config::load(missing(), missing()).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.theme, ThemePreference::System);
    assert_eq!(config.search.mode, SearchMode::Literal);
    assert_eq!(config.export.file_stem, "formatted-text");
    assert_eq!(config.export.default_format, ExportFormat::Txt);
  }

  #[test]
  fn global_only() {
    let global = r#"
      theme = "dark"
      [search]
      mode = "regex"
    "#;
    let config = Config::load(Ok(global.to_string()), missing()).unwrap();
    assert_eq!(config.theme, ThemePreference::Dark);
    assert_eq!(config.search.mode, SearchMode::Regex);
    assert_eq!(config.export, ExportConfig::default());
  }

  #[test]
  fn local_overrides_global() {
    let global = r#"
      theme = "dark"
      [export]
      file-stem = "notes"
    "#;
    let local = r#"
      theme = "light"
      [export]
      default-format = "docx"
    "#;
    let config = Config::load(Ok(global.to_string()), Ok(local.to_string())).unwrap();
    assert_eq!(config.theme, ThemePreference::Light);
    assert_eq!(config.export.file_stem, "notes");
    assert_eq!(config.export.default_format, ExportFormat::Docx);
  }

  #[test]
  fn bad_config_is_reported() {
    let bad = Config::load(Ok("theme = \"sepia\"".to_string()), missing());
    assert!(matches!(bad, Err(ConfigLoadError::BadConfig(_))));

    let unknown = Config::load(missing(), Ok("font-size = 3".to_string()));
    assert!(matches!(unknown, Err(ConfigLoadError::BadConfig(_))));

    let syntax = Config::load(Ok("theme = ".to_string()), missing());
    assert!(matches!(syntax, Err(ConfigLoadError::BadConfig(_))));
  }

  #[test]
  fn other_io_errors_are_reported() {
    let denied = Err(ConfigLoadError::Error(io::Error::from(
      ErrorKind::PermissionDenied,
    )));
    assert!(matches!(
      Config::load(denied, missing()),
      Err(ConfigLoadError::Error(_))
    ));
  }

  #[test]
  fn load_files_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config.toml");
    fs::write(&global, "[search]\nmode = \"regex\"\n").unwrap();

    let config = Config::load_files(&global, &dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.search.mode, SearchMode::Regex);
  }
}
