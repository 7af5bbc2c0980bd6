//! Command line front end for the-writer.
//!
//! Each subcommand reads a document from a file or stdin, runs one engine
//! operation over it and writes the result to stdout.

mod clipboard;
mod ctx;
mod theme;

use std::{
  fs,
  io::{
    self,
    Read,
  },
  path::{
    Path,
    PathBuf,
  },
};

use clap::{
  ArgAction,
  Parser,
  Subcommand,
};
use eyre::{
  Result,
  WrapErr,
};
use the_writer_lib::{
  case_convention::CaseCommand,
  export::ExportFormat,
  search::SearchMode,
  theme::ThemePreference,
};
use the_writer_loader::{
  config::Config,
  state::State,
};

use crate::{
  clipboard::SystemClipboard,
  ctx::{
    Ctx,
    Input,
  },
};

#[derive(Debug, Parser)]
#[command(name = "the-writer", version, about = "Case conversion, find/replace and text statistics")]
struct Cli {
  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count, global = true)]
  verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE", global = true)]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
  config_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Convert the case of the whole document
  Case {
    /// uppercase, lowercase, title-case or sentence-case
    case: CaseCommand,
    file: Option<PathBuf>,
  },
  /// Replace every match of a pattern
  Replace {
    #[arg(long)]
    find:    String,
    #[arg(long, default_value = "")]
    replace: String,
    /// Interpret the pattern as a regular expression
    #[arg(long, conflicts_with = "literal")]
    regex:   bool,
    /// Match the pattern literally
    #[arg(long)]
    literal: bool,
    file:    Option<PathBuf>,
  },
  /// Print word and character counts
  Stats { file: Option<PathBuf> },
  /// Copy the whole document to the system clipboard
  Copy { file: Option<PathBuf> },
  /// Show the theme, or store a new preference
  Theme { preference: Option<ThemePreference> },
  /// Write the document to `<file-stem>.<format>`
  Export {
    #[arg(long)]
    format: Option<ExportFormat>,
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    file:   Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  the_writer_loader::initialize_config_file(cli.config_file.clone());
  the_writer_loader::initialize_log_file(cli.log_file.clone());
  setup_logging(cli.verbosity).wrap_err("failed to initialize logging")?;

  let config = Config::load_user().wrap_err("failed to load config")?;
  let state = State::load().wrap_err("failed to load state")?;
  let mut ctx = Ctx::new(config, state, the_writer_loader::state_file());

  let mut stdout = io::stdout().lock();
  match cli.command {
    Command::Case { case, file } => {
      let input = read_input(file.as_deref())?;
      ctx.case(&input, case, &mut stdout)?;
    },
    Command::Replace {
      find,
      replace,
      regex,
      literal,
      file,
    } => {
      let mode = match (regex, literal) {
        (true, _) => Some(SearchMode::Regex),
        (_, true) => Some(SearchMode::Literal),
        _ => None,
      };
      let input = read_input(file.as_deref())?;
      let count = ctx.replace(&input, &find, &replace, mode, &mut stdout)?;
      eprintln!("{count} replacement(s)");
    },
    Command::Stats { file } => {
      let input = read_input(file.as_deref())?;
      ctx.stats(&input, &mut stdout)?;
    },
    Command::Copy { file } => {
      let input = read_input(file.as_deref())?;
      ctx.copy(&input, &SystemClipboard::detect())?;
      eprintln!("Text copied to clipboard!");
    },
    Command::Theme { preference } => {
      let system = theme::detect();
      match preference {
        Some(preference) => ctx.set_theme(preference, system, &mut stdout)?,
        None => ctx.show_theme(system, &mut stdout)?,
      }
    },
    Command::Export {
      format,
      output,
      file,
    } => {
      let input = read_input(file.as_deref())?;
      let path = ctx.export(&input, format, output)?;
      eprintln!("wrote {}", path.display());
    },
  }

  Ok(())
}

fn read_input(file: Option<&Path>) -> Result<Input> {
  match file {
    Some(path) => {
      let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
      Ok(Input {
        text,
        name: Some(path.display().to_string()),
      })
    },
    None => {
      let mut text = String::new();
      io::stdin()
        .read_to_string(&mut text)
        .wrap_err("failed to read stdin")?;
      Ok(Input { text, name: None })
    },
  }
}

fn setup_logging(verbosity: u8) -> Result<()> {
  let level = match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level)
    .chain(fern::log_file(the_writer_loader::log_file())?)
    .apply()?;

  Ok(())
}
