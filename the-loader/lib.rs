pub mod config;
pub mod state;

use std::{
  path::{
    Path,
    PathBuf,
  },
  sync::OnceLock,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

pub const APP_NAME: &str = "the-writer";

/// Directory marking a workspace with its own `config.toml`.
pub const WORKSPACE_DIR: &str = ".the-writer";

static CONFIG_FILE: OnceLock<PathBuf> = OnceLock::new();

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

pub fn initialize_config_file(specified_file: Option<PathBuf>) {
  let config_file = specified_file.unwrap_or_else(default_config_file);
  ensure_parent_dir(&config_file);
  CONFIG_FILE.set(config_file).ok();
}

pub fn initialize_log_file(specified_file: Option<PathBuf>) {
  let log_file = specified_file.unwrap_or_else(default_log_file);
  ensure_parent_dir(&log_file);
  LOG_FILE.set(log_file).ok();
}

pub fn config_dir() -> PathBuf {
  if let Some(dir) = std::env::var_os("THE_WRITER_CONFIG_DIR") {
    return expand_tilde(PathBuf::from(dir));
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.config_dir().join(APP_NAME),
    Err(err) => fallback_dir(&err),
  }
}

pub fn cache_dir() -> PathBuf {
  if let Some(dir) = std::env::var_os("THE_WRITER_CACHE_DIR") {
    return expand_tilde(PathBuf::from(dir));
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.cache_dir().join(APP_NAME),
    Err(err) => fallback_dir(&err),
  }
}

pub fn config_file() -> PathBuf {
  CONFIG_FILE
    .get_or_init(|| {
      let path = default_config_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn log_file() -> PathBuf {
  LOG_FILE
    .get_or_init(|| {
      let path = default_log_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn workspace_config_file() -> PathBuf {
  find_workspace().0.join(WORKSPACE_DIR).join("config.toml")
}

/// File holding state persisted between runs, such as the selected theme.
pub fn state_file() -> PathBuf {
  config_dir().join("state.toml")
}

pub fn default_log_file() -> PathBuf {
  cache_dir().join("the-writer.log")
}

/// Merge two TOML documents, merging values from `right` onto `left`
///
/// `merge_depth` sets the nesting depth up to which tables are merged instead
/// of overridden. Arrays are always replaced by the right value.
///
/// `crate::merge_toml_values(global, workspace, 3)` keeps every key of the
/// global config that the workspace config does not mention:
///
/// global:
/// ```toml
/// theme = "dark"
/// [export]
/// file-stem = "notes"
/// ```
/// workspace:
/// ```toml
/// [export]
/// default-format = "docx"
/// ```
///
/// merged:
/// ```toml
/// theme = "dark"
/// [export]
/// file-stem = "notes"
/// default-format = "docx"
/// ```
pub fn merge_toml_values(left: toml::Value, right: toml::Value, merge_depth: usize) -> toml::Value {
  use toml::Value;

  match (left, right) {
    (Value::Table(mut left_map), Value::Table(right_map)) if merge_depth > 0 => {
      for (rname, rvalue) in right_map {
        let merged = match left_map.remove(&rname) {
          Some(lvalue) => merge_toml_values(lvalue, rvalue, merge_depth - 1),
          None => rvalue,
        };
        left_map.insert(rname, merged);
      }
      Value::Table(left_map)
    },
    // Everything else, including tables past the merge depth, takes the right
    // value
    (_, value) => value,
  }
}

/// Finds the current workspace folder.
///
/// Searches upward from the CWD and returns the first directory that contains
/// either `.git`, `.jj` or `.the-writer`. If no workspace was found returns
/// (CWD, true). Otherwise (workspace, false) is returned
pub fn find_workspace() -> (PathBuf, bool) {
  match std::env::current_dir() {
    Ok(current_dir) => find_workspace_in(current_dir),
    Err(_) => (PathBuf::new(), true),
  }
}

pub fn find_workspace_in(dir: impl AsRef<Path>) -> (PathBuf, bool) {
  let dir = dir.as_ref();
  for ancestor in dir.ancestors() {
    if ancestor.join(".git").exists()
      || ancestor.join(".jj").exists()
      || ancestor.join(WORKSPACE_DIR).exists()
    {
      return (ancestor.to_owned(), false);
    }
  }

  (dir.to_owned(), true)
}

fn fallback_dir(err: &dyn std::error::Error) -> PathBuf {
  tracing::warn!("unable to determine the base directories: {err}");
  PathBuf::from(".").join(APP_NAME)
}

fn expand_tilde(path: PathBuf) -> PathBuf {
  let Ok(rest) = path.strip_prefix("~") else {
    return path;
  };
  match etcetera::home_dir() {
    Ok(home) => home.join(rest),
    Err(_) => path,
  }
}

fn default_config_file() -> PathBuf {
  config_dir().join("config.toml")
}

fn ensure_parent_dir(path: &Path) {
  if let Some(parent) = path.parent()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent).ok();
  }
}
