//! Session handlers: list, delete, delete-all, launch.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::Dispatcher;
use crate::args::LaunchFlags;
use crate::config::{is_valid_session_name, Config, SessionConfig};
use crate::logging::apply_env_defaults;
use crate::tmux::Multiplexer;

impl<M: Multiplexer, W: Write> Dispatcher<'_, M, W> {
    fn team_sessions(&self) -> Result<Vec<String>> {
        let sessions = self.mux.list_sessions().context("failed to list tmux sessions")?;
        Ok(sessions
            .into_iter()
            .filter(|s| s.team)
            .map(|s| s.name)
            .collect())
    }

    pub(super) fn list(&mut self) -> Result<()> {
        let names = self.team_sessions()?;
        if names.is_empty() {
            writeln!(self.out, "No running AI team sessions.")?;
            return Ok(());
        }

        writeln!(self.out, "Running AI team sessions:")?;
        for name in names {
            writeln!(self.out, "  • {name}")?;
        }
        Ok(())
    }

    pub(super) fn delete(&mut self, name: &str) -> Result<()> {
        if !self.mux.has_session(name)? {
            bail!("Session '{name}' not found");
        }
        self.mux
            .kill_session(name)
            .with_context(|| format!("failed to delete session '{name}'"))?;
        tracing::info!(session = name, "session deleted");
        writeln!(self.out, "🗑️  Deleted session '{name}'")?;
        Ok(())
    }

    pub(super) fn delete_all(&mut self) -> Result<()> {
        let names = self.team_sessions()?;
        if names.is_empty() {
            writeln!(self.out, "No running AI team sessions.")?;
            return Ok(());
        }

        for name in &names {
            self.mux
                .kill_session(name)
                .with_context(|| format!("failed to delete session '{name}'"))?;
            tracing::info!(session = %name, "session deleted");
            writeln!(self.out, "🗑️  Deleted session '{name}'")?;
        }
        writeln!(self.out, "Deleted {} AI team session(s).", names.len())?;
        Ok(())
    }

    pub(super) fn launch(&mut self, name: &str, flags: LaunchFlags) -> Result<()> {
        if !is_valid_session_name(name) {
            bail!("Invalid session name '{name}': only [A-Za-z0-9_-] are allowed");
        }
        let flags = apply_env_defaults(flags, &self.vars);
        let config = Config::load_or_default(&self.paths.config_file())?;
        let session = config.session_or_default(name);

        let mut exists = self.mux.has_session(name)?;
        if exists && flags.reset {
            self.mux
                .kill_session(name)
                .with_context(|| format!("failed to reset session '{name}'"))?;
            tracing::info!(session = name, "session reset");
            self.progress(&flags, format_args!("♻️  Removed existing session '{name}'"))?;
            exists = false;
        }

        if exists {
            self.progress(&flags, format_args!("🔗 Attaching to existing session '{name}'"))?;
        } else {
            self.create_team(&config, &session)?;
            let agents = config.effective_agents(&session).len();
            self.progress(
                &flags,
                format_args!("🚀 Started session '{name}' with {agents} agent(s)"),
            )?;
        }

        self.out.flush()?;
        self.mux
            .attach(name)
            .with_context(|| format!("failed to attach to session '{name}'"))
    }

    fn create_team(&self, config: &Config, session: &SessionConfig) -> Result<()> {
        let name = session.name.as_str();
        let cwd = self.working_dir(session)?;
        let agents = config.effective_agents(session);
        let layout = config.effective_layout(session);
        tracing::info!(
            session = name,
            agents = agents.len(),
            layout,
            cwd = %cwd.display(),
            "creating team session"
        );

        self.mux.new_session(name, &cwd)?;
        if let Err(err) = self.populate_team(config, session, &cwd) {
            // Leave nothing half-built behind.
            if let Err(cleanup) = self.mux.kill_session(name) {
                tracing::warn!(
                    session = name,
                    error = %cleanup,
                    "failed to remove half-built session"
                );
            }
            return Err(err);
        }
        Ok(())
    }

    fn populate_team(&self, config: &Config, session: &SessionConfig, cwd: &Path) -> Result<()> {
        let name = session.name.as_str();
        let layout = config.effective_layout(session);

        self.mux.tag_session(name)?;
        for (index, agent) in config.effective_agents(session).iter().enumerate() {
            if index > 0 {
                self.mux.split_window(name, cwd)?;
                // Re-tile after every split so tmux keeps room for the next pane.
                self.mux.select_layout(name, layout)?;
            }
            let command = pane_command(&config.common.claude_command, &session.claude_args, agent);
            tracing::debug!(session = name, agent = %agent, %command, "starting agent");
            self.mux.send_keys(name, &command)?;
        }
        self.mux.select_layout(name, layout)?;
        Ok(())
    }

    fn working_dir(&self, session: &SessionConfig) -> Result<PathBuf> {
        let dir = match &session.working_dir {
            Some(dir) => expand_home(dir, self.vars.get("HOME").map(PathBuf::from)),
            None => std::env::current_dir().context("failed to read current directory")?,
        };
        if !dir.is_dir() {
            bail!(
                "Working directory '{}' for session '{}' does not exist",
                dir.display(),
                session.name
            );
        }
        Ok(dir)
    }

    fn progress(&mut self, flags: &LaunchFlags, message: std::fmt::Arguments<'_>) -> Result<()> {
        if !flags.silent {
            writeln!(self.out, "{message}")?;
        }
        Ok(())
    }
}

/// `AGENT_ROLE=<agent> <claude_command> <args…>`, arguments shell-escaped.
///
/// `claude_command` is inserted as written so it may carry its own words
/// (e.g. `npx claude`).
pub fn pane_command(claude_command: &str, claude_args: &[String], agent: &str) -> String {
    let mut command = format!(
        "AGENT_ROLE={} {}",
        shell_escape::unix::escape(Cow::Borrowed(agent)),
        claude_command
    );
    for arg in claude_args {
        command.push(' ');
        command.push_str(&shell_escape::unix::escape(Cow::Borrowed(arg.as_str())));
    }
    command
}

/// Expand a leading `~` using `home` (falling back to `dirs::home_dir()`).
fn expand_home(dir: &str, home: Option<PathBuf>) -> PathBuf {
    let rest = match dir.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(dir),
    };
    match home.or_else(dirs::home_dir) {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(dir),
    }
}
