//! System clipboard backed by the platform's copy command.

use std::{
  borrow::Cow,
  io::Write,
  process::{
    Command,
    Stdio,
  },
};

use the_writer_lib::clipboard::{
  ClipboardError,
  ClipboardProvider,
  Result,
};

/// A copy command and its arguments; contents are written to its stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CopyCommand {
  program: &'static str,
  args:    &'static [&'static str],
}

const PBCOPY: CopyCommand = CopyCommand {
  program: "pbcopy",
  args:    &[],
};
const WL_COPY: CopyCommand = CopyCommand {
  program: "wl-copy",
  args:    &["--type", "text/plain"],
};
const XCLIP: CopyCommand = CopyCommand {
  program: "xclip",
  args:    &["-i", "-selection", "clipboard"],
};
const XSEL: CopyCommand = CopyCommand {
  program: "xsel",
  args:    &["-i", "-b"],
};
const WIN32YANK: CopyCommand = CopyCommand {
  program: "win32yank.exe",
  args:    &["-i", "--crlf"],
};
const TMUX: CopyCommand = CopyCommand {
  program: "tmux",
  args:    &["load-buffer", "-w", "-"],
};
const TERMUX: CopyCommand = CopyCommand {
  program: "termux-clipboard-set",
  args:    &[],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemClipboard {
  Pasteboard,
  Wayland,
  XClip,
  XSel,
  Win32Yank,
  Tmux,
  Termux,
  None,
}

impl SystemClipboard {
  /// Pick the first copy command available in this session.
  pub fn detect() -> Self {
    let clipboard = Self::detect_with(env_var_is_set, binary_exists);
    log::debug!("using clipboard provider {}", clipboard.name());
    clipboard
  }

  fn detect_with(env_set: impl Fn(&str) -> bool, exists: impl Fn(&str) -> bool) -> Self {
    if cfg!(target_os = "macos") {
      if env_set("TMUX") && exists("tmux") {
        return Self::Tmux;
      }
      return if exists("pbcopy") {
        Self::Pasteboard
      } else {
        Self::None
      };
    }

    if env_set("WAYLAND_DISPLAY") && exists("wl-copy") {
      Self::Wayland
    } else if env_set("DISPLAY") && exists("xclip") {
      Self::XClip
    } else if env_set("DISPLAY") && exists("xsel") {
      Self::XSel
    } else if exists("termux-clipboard-set") {
      Self::Termux
    } else if env_set("TMUX") && exists("tmux") {
      Self::Tmux
    } else if exists("win32yank.exe") {
      Self::Win32Yank
    } else {
      Self::None
    }
  }

  fn command(self) -> Option<CopyCommand> {
    match self {
      Self::Pasteboard => Some(PBCOPY),
      Self::Wayland => Some(WL_COPY),
      Self::XClip => Some(XCLIP),
      Self::XSel => Some(XSEL),
      Self::Win32Yank => Some(WIN32YANK),
      Self::Tmux => Some(TMUX),
      Self::Termux => Some(TERMUX),
      Self::None => None,
    }
  }
}

impl ClipboardProvider for SystemClipboard {
  fn name(&self) -> Cow<'_, str> {
    match self.command() {
      Some(cmd) => cmd.program.into(),
      None => "none".into(),
    }
  }

  fn set_contents(&self, content: &str) -> Result<()> {
    let cmd = self.command().ok_or(ClipboardError::Unavailable)?;
    execute_command(cmd, content)
  }
}

fn execute_command(cmd: CopyCommand, input: &str) -> Result<()> {
  let mut child = Command::new(cmd.program)
    .args(cmd.args)
    .stdin(Stdio::piped())
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .spawn()?;

  {
    let mut stdin = child.stdin.take().ok_or(ClipboardError::StdinWriteFailed)?;
    stdin
      .write_all(input.as_bytes())
      .map_err(|_| ClipboardError::StdinWriteFailed)?;
  }

  let status = child.wait()?;
  if !status.success() {
    return Err(ClipboardError::CommandFailed(cmd.program.to_string()));
  }
  Ok(())
}

fn env_var_is_set(name: &str) -> bool {
  std::env::var_os(name).is_some()
}

fn binary_exists(name: &str) -> bool {
  which::which(name).is_ok()
}
