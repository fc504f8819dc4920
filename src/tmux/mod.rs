//! tmux access for the session handlers.
//!
//! [`Multiplexer`] is the seam the dispatcher talks to; [`TmuxCli`] drives
//! the real `tmux` binary. Tests substitute an in-memory fake.

mod cli;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use cli::TmuxCli;

/// Session option marking sessions created by claude-squad.
pub const TEAM_TAG: &str = "@claude-squad";

/// Errors from talking to tmux.
#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("tmux not found in PATH")]
    NotInstalled,

    #[error("Failed to run tmux {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("tmux {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}

/// A running tmux session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub name: String,
    /// Tagged with [`TEAM_TAG`], i.e. created by claude-squad.
    pub team: bool,
}

/// Operations the handlers need from the terminal multiplexer.
pub trait Multiplexer {
    fn list_sessions(&self) -> Result<Vec<SessionInfo>, TmuxError>;
    fn has_session(&self, name: &str) -> Result<bool, TmuxError>;
    fn kill_session(&self, name: &str) -> Result<(), TmuxError>;
    /// Create a detached session whose first pane starts in `cwd`.
    fn new_session(&self, name: &str, cwd: &Path) -> Result<(), TmuxError>;
    /// Split the active pane of `target`; the new pane becomes active.
    fn split_window(&self, target: &str, cwd: &Path) -> Result<(), TmuxError>;
    /// Type `keys` followed by Enter into the active pane of `target`.
    fn send_keys(&self, target: &str, keys: &str) -> Result<(), TmuxError>;
    fn select_layout(&self, target: &str, layout: &str) -> Result<(), TmuxError>;
    /// Mark `name` with [`TEAM_TAG`].
    fn tag_session(&self, name: &str) -> Result<(), TmuxError>;
    /// Attach the terminal to `name` (or switch client inside tmux).
    fn attach(&self, name: &str) -> Result<(), TmuxError>;
}

/// Find an executable named `name` in a PATH-style list of directories.
///
/// Names containing a path separator are checked directly.
pub fn find_executable(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    if name.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(name);
        return is_executable(&path).then_some(path);
    }
    std::env::split_paths(path_var?)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    let Ok(meta) = path.metadata() else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}
