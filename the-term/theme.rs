//! System color scheme detection.

use the_writer_lib::theme::Theme;

/// The system's color scheme, or `None` when the platform does not report one.
pub fn detect() -> Option<Theme> {
  let theme = from_mode(dark_light::detect());
  log::debug!("detected system theme: {theme:?}");
  theme
}

fn from_mode(mode: dark_light::Mode) -> Option<Theme> {
  match mode {
    dark_light::Mode::Dark => Some(Theme::Dark),
    dark_light::Mode::Light => Some(Theme::Light),
    dark_light::Mode::Default => None,
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn unknown_mode_has_no_theme() {
    assert_eq!(from_mode(dark_light::Mode::Dark), Some(Theme::Dark));
    assert_eq!(from_mode(dark_light::Mode::Light), Some(Theme::Light));
    assert_eq!(from_mode(dark_light::Mode::Default), None);
  }
}
