//! State persisted between runs.

use std::{
  fs,
  path::Path,
};

use serde::{
  Deserialize,
  Serialize,
};
use the_writer_lib::theme::ThemePreference;

use crate::config::ConfigLoadError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct State {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub selected_theme: Option<ThemePreference>,
}

impl State {
  pub fn load() -> Result<State, ConfigLoadError> {
    Self::load_from(&crate::state_file())
  }

  /// Read state from `path`; a missing file yields the default state.
  pub fn load_from(path: &Path) -> Result<State, ConfigLoadError> {
    if !path.exists() {
      return Ok(State::default());
    }
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
  }

  pub fn save(&self) -> Result<(), ConfigLoadError> {
    self.save_to(&crate::state_file())
  }

  pub fn save_to(&self, path: &Path) -> Result<(), ConfigLoadError> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    let text = toml::to_string(self)?;
    fs::write(path, text)?;
    tracing::debug!("saved state to {}", path.display());
    Ok(())
  }

  /// The stored theme, or `fallback` when none was ever selected.
  pub fn theme_or(&self, fallback: ThemePreference) -> ThemePreference {
    self.selected_theme.unwrap_or(fallback)
  }
}
