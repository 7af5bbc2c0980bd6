//! Light/dark theme preference.
//!
//! The user picks a [`ThemePreference`]; the front end resolves it to a
//! concrete [`Theme`] with whatever it knows about the system color scheme.

use std::{
  fmt,
  str::FromStr,
};

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
  Light,
  Dark,
}

impl Theme {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Light => "light",
      Self::Dark => "dark",
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemePreference {
  Light,
  Dark,
  #[default]
  System,
}

impl ThemePreference {
  /// Resolve to a concrete theme. `system` is the detected system scheme, if
  /// any; an unknown scheme falls back to light.
  pub fn resolve(self, system: Option<Theme>) -> Theme {
    match self {
      Self::Light => Theme::Light,
      Self::Dark => Theme::Dark,
      Self::System => system.unwrap_or(Theme::Light),
    }
  }

  /// Whether a change of the system scheme affects the resolved theme.
  pub fn follows_system(self) -> bool {
    self == Self::System
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Light => "light",
      Self::Dark => "dark",
      Self::System => "system",
    }
  }
}

impl fmt::Display for ThemePreference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}', expected one of: light, dark, system")]
pub struct ParseThemeError(pub String);

impl FromStr for ThemePreference {
  type Err = ParseThemeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "light" => Ok(Self::Light),
      "dark" => Ok(Self::Dark),
      "system" => Ok(Self::System),
      _ => Err(ParseThemeError(s.to_string())),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn fixed_preferences_ignore_system() {
    for system in [None, Some(Theme::Light), Some(Theme::Dark)] {
      assert_eq!(ThemePreference::Light.resolve(system), Theme::Light);
      assert_eq!(ThemePreference::Dark.resolve(system), Theme::Dark);
    }
  }

  #[test]
  fn system_preference_follows_system() {
    assert_eq!(
      ThemePreference::System.resolve(Some(Theme::Dark)),
      Theme::Dark
    );
    assert_eq!(
      ThemePreference::System.resolve(Some(Theme::Light)),
      Theme::Light
    );
    assert_eq!(ThemePreference::System.resolve(None), Theme::Light);
    assert!(ThemePreference::System.follows_system());
    assert!(!ThemePreference::Dark.follows_system());
  }

  #[test]
  fn parse_preference() {
    assert_eq!("dark".parse(), Ok(ThemePreference::Dark));
    assert_eq!(" Light ".parse(), Ok(ThemePreference::Light));
    assert_eq!("SYSTEM".parse(), Ok(ThemePreference::System));
    assert!("sepia".parse::<ThemePreference>().is_err());
    assert_eq!(ThemePreference::default(), ThemePreference::System);
  }
}
