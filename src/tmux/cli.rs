//! [`Multiplexer`] backed by the `tmux` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use super::{Multiplexer, SessionInfo, TmuxError, TEAM_TAG};

/// Runs tmux subcommands as child processes.
#[derive(Debug, Clone)]
pub struct TmuxCli {
    binary: PathBuf,
    /// `$TMUX` is set: attach by switching the current client.
    inside_tmux: bool,
}

impl TmuxCli {
    pub fn new(binary: impl Into<PathBuf>, inside_tmux: bool) -> Self {
        Self {
            binary: binary.into(),
            inside_tmux,
        }
    }

    fn output(&self, args: &[&str]) -> Result<Output, TmuxError> {
        tracing::debug!(args = ?args, "tmux");
        Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| spawn_error(args, source))
    }

    /// Run a subcommand that must succeed.
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(TmuxError::CommandFailed {
                command: command_name(args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn command_name(args: &[&str]) -> String {
    args.first().copied().unwrap_or_default().to_string()
}

fn spawn_error(args: &[&str], source: std::io::Error) -> TmuxError {
    if source.kind() == std::io::ErrorKind::NotFound {
        TmuxError::NotInstalled
    } else {
        TmuxError::Spawn {
            command: command_name(args),
            source,
        }
    }
}

/// Exact-match target; a bare name would also match prefixes.
fn exact(name: &str) -> String {
    format!("={name}")
}

/// tmux reports "no server running" (or a missing socket) when nothing is up.
fn is_no_server(stderr: &str) -> bool {
    stderr.contains("no server running") || stderr.contains("error connecting to")
}

/// Parse `list-sessions -F "#{session_name}\t#{@claude-squad}"` output.
fn parse_sessions(stdout: &str) -> Vec<SessionInfo> {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (name, tag) = line.split_once('\t').unwrap_or((line, ""));
            SessionInfo {
                name: name.to_string(),
                team: tag == "1",
            }
        })
        .collect()
}

impl Multiplexer for TmuxCli {
    fn list_sessions(&self) -> Result<Vec<SessionInfo>, TmuxError> {
        let format = format!("#{{session_name}}\t#{{{TEAM_TAG}}}");
        let args = ["list-sessions", "-F", format.as_str()];
        let output = self.output(&args)?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            if is_no_server(&stderr) {
                return Ok(Vec::new());
            }
            return Err(TmuxError::CommandFailed {
                command: command_name(&args),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(parse_sessions(&String::from_utf8_lossy(&output.stdout)))
    }

    fn has_session(&self, name: &str) -> Result<bool, TmuxError> {
        let target = exact(name);
        let output = self.output(&["has-session", "-t", &target])?;
        Ok(output.status.success())
    }

    fn kill_session(&self, name: &str) -> Result<(), TmuxError> {
        self.run(&["kill-session", "-t", &exact(name)]).map(drop)
    }

    fn new_session(&self, name: &str, cwd: &Path) -> Result<(), TmuxError> {
        let cwd = cwd.to_string_lossy();
        self.run(&["new-session", "-d", "-s", name, "-c", &cwd]).map(drop)
    }

    fn split_window(&self, target: &str, cwd: &Path) -> Result<(), TmuxError> {
        let cwd = cwd.to_string_lossy();
        self.run(&["split-window", "-t", target, "-c", &cwd]).map(drop)
    }

    fn send_keys(&self, target: &str, keys: &str) -> Result<(), TmuxError> {
        self.run(&["send-keys", "-t", target, keys, "Enter"]).map(drop)
    }

    fn select_layout(&self, target: &str, layout: &str) -> Result<(), TmuxError> {
        self.run(&["select-layout", "-t", target, layout]).map(drop)
    }

    fn tag_session(&self, name: &str) -> Result<(), TmuxError> {
        self.run(&["set-option", "-t", &exact(name), TEAM_TAG, "1"]).map(drop)
    }

    fn attach(&self, name: &str) -> Result<(), TmuxError> {
        let target = exact(name);
        let subcommand = if self.inside_tmux { "switch-client" } else { "attach-session" };
        let args = [subcommand, "-t", target.as_str()];
        tracing::debug!(args = ?args, "tmux (interactive)");

        // Interactive: inherit the terminal instead of capturing output.
        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .map_err(|source| spawn_error(&args, source))?;
        if !status.success() {
            return Err(TmuxError::CommandFailed {
                command: subcommand.to_string(),
                stderr: format!("exited with {status}"),
            });
        }
        Ok(())
    }
}
