//! Application context: loaded config and persisted state.

use std::{
  borrow::Cow,
  fs::File,
  io::{
    BufWriter,
    Write,
  },
  path::PathBuf,
};

use eyre::{
  Result,
  WrapErr,
};
use the_writer_lib::{
  case_convention::CaseCommand,
  clipboard::ClipboardProvider,
  document::Document,
  export::{
    ExportFormat,
    export,
  },
  search::{
    FindReplaceRequest,
    SearchMode,
  },
  theme::{
    Theme,
    ThemePreference,
  },
};
use the_writer_loader::{
  config::Config,
  state::State,
};

/// Text read from a file or stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
  pub text: String,
  /// Source path, `None` for stdin.
  pub name: Option<String>,
}

impl Input {
  pub fn document(&self) -> Document {
    let mut doc = Document::from(self.text.as_str());
    if let Some(name) = &self.name {
      doc.set_display_name(name.as_str());
    }
    doc
  }
}

impl From<&str> for Input {
  fn from(text: &str) -> Self {
    Self {
      text: text.to_string(),
      name: None,
    }
  }
}

pub struct Ctx {
  pub config: Config,
  pub state:  State,
  state_path: PathBuf,
}

impl Ctx {
  pub fn new(config: Config, state: State, state_path: PathBuf) -> Self {
    Self {
      config,
      state,
      state_path,
    }
  }

  /// The user's preference: the stored selection, else the configured one.
  pub fn theme_preference(&self) -> ThemePreference {
    self.state.theme_or(self.config.theme)
  }

  pub fn case(&self, input: &Input, command: CaseCommand, out: &mut impl Write) -> Result<()> {
    let mut doc = input.document();
    doc.select_all();
    if !doc.apply_case(command) {
      log::debug!("{}: nothing to convert", doc.display_name());
    }
    write_text(&doc, out)
  }

  /// Replace every match in the input and write the result. `mode` overrides
  /// the configured search mode.
  pub fn replace(
    &self,
    input: &Input,
    find: &str,
    replace: &str,
    mode: Option<SearchMode>,
    out: &mut impl Write,
  ) -> Result<usize> {
    let mode = mode.unwrap_or(self.config.search.mode);
    let request = FindReplaceRequest::new(find, replace).with_mode(mode);

    let mut doc = input.document();
    let count = doc.find_and_replace(&request)?;
    log::info!(
      "{}: replaced {count} occurrence(s) of {find:?} ({mode:?})",
      doc.display_name()
    );

    write_text(&doc, out)?;
    Ok(count)
  }

  pub fn stats(&self, input: &Input, out: &mut impl Write) -> Result<()> {
    let stats = input.document().stats();
    writeln!(out, "Words: {}", stats.words)?;
    writeln!(out, "Characters: {}", stats.chars)?;
    Ok(())
  }

  /// Copy the whole input to `clipboard`. Returns the number of chars copied.
  pub fn copy(&self, input: &Input, clipboard: &dyn ClipboardProvider) -> Result<usize> {
    let doc = input.document();
    let copied = doc
      .copy_to(clipboard)
      .wrap_err("Failed to copy text")?;
    log::info!(
      "{}: copied {copied} chars via {}",
      doc.display_name(),
      clipboard.name()
    );
    Ok(copied)
  }

  /// Print the preference and the theme it resolves to. A preference that
  /// follows the system notes when the system scheme is unknown.
  pub fn show_theme(&self, system: Option<Theme>, out: &mut impl Write) -> Result<()> {
    let preference = self.theme_preference();
    let theme = preference.resolve(system);
    if preference.follows_system() && system.is_none() {
      writeln!(out, "{preference} ({theme}, system scheme unknown)")?;
    } else {
      writeln!(out, "{preference} ({theme})")?;
    }
    Ok(())
  }

  /// Persist `preference` and print the theme it resolves to.
  pub fn set_theme(
    &mut self,
    preference: ThemePreference,
    system: Option<Theme>,
    out: &mut impl Write,
  ) -> Result<()> {
    self.state.selected_theme = Some(preference);
    self
      .state
      .save_to(&self.state_path)
      .wrap_err("failed to save theme preference")?;
    log::info!("theme preference set to {preference}");
    self.show_theme(system, out)
  }

  /// Write `text` to `output`, or to `<file-stem>.<ext>` in the current
  /// directory. Returns the path written.
  pub fn export(
    &self,
    input: &Input,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
  ) -> Result<PathBuf> {
    let format = format.unwrap_or(self.config.export.default_format);
    let path =
      output.unwrap_or_else(|| PathBuf::from(format.file_name(&self.config.export.file_stem)));

    let file =
      File::create(&path).wrap_err_with(|| format!("failed to create {}", path.display()))?;
    let written = export(&input.text, format, BufWriter::new(file))
      .wrap_err_with(|| format!("failed to export to {}", path.display()))?;
    log::info!("exported {written} bytes to {}", path.display());
    Ok(path)
  }
}

fn write_text(doc: &Document, out: &mut impl Write) -> Result<()> {
  out.write_all(Cow::<str>::from(doc.text().slice(..)).as_bytes())?;
  out.flush()?;
  Ok(())
}
