//! Command dispatch — runs the handler for a resolved [`Command`].
//!
//! Handlers write user-facing output to the dispatcher's sink and talk to
//! tmux only through [`Multiplexer`].

mod config;
mod session;

use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::Write;

use anyhow::Result;

use crate::args::{Command, OptionRegistry};
use crate::config::ConfigPaths;
use crate::doctor;
use crate::tmux::Multiplexer;
use crate::usage::print_usage;

pub struct Dispatcher<'r, M, W> {
    registry: &'r OptionRegistry,
    mux: M,
    paths: ConfigPaths,
    out: W,
    vars: HashMap<String, String>,
}

impl<'r, M: Multiplexer, W: Write> Dispatcher<'r, M, W> {
    pub fn new(
        registry: &'r OptionRegistry,
        mux: M,
        paths: ConfigPaths,
        out: W,
        vars: HashMap<String, String>,
    ) -> Self {
        Self {
            registry,
            mux,
            paths,
            out,
            vars,
        }
    }

    /// Execute one command to completion.
    pub fn run(&mut self, command: Command) -> Result<()> {
        tracing::debug!(?command, "dispatching");
        match command {
            Command::Help => print_usage(self.registry, &mut self.out)?,
            Command::List => self.list()?,
            Command::Delete { session_name } => self.delete(&session_name)?,
            Command::DeleteAll => self.delete_all()?,
            Command::ShowConfigSummary => self.show_config_summary()?,
            Command::ShowConfigDetail { session_name } => self.show_config_detail(&session_name)?,
            Command::GenerateConfig { force } => self.generate_config(force)?,
            Command::Init { language, force } => self.init(language, force)?,
            Command::Doctor => self.doctor()?,
            Command::Launch {
                session_name,
                flags,
            } => self.launch(&session_name, flags)?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Consume the dispatcher, returning its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    fn doctor(&mut self) -> Result<()> {
        let path_var = self.vars.get("PATH").map(OsStr::new);
        let checks = doctor::run_checks(&self.paths, path_var);

        writeln!(self.out, "🩺 System health check")?;
        for check in &checks {
            let mark = if check.ok { "✅" } else { "❌" };
            writeln!(self.out, "  {mark} {:<14} {}", check.name, check.detail)?;
        }

        let failed = checks.iter().filter(|c| !c.ok).count();
        if failed > 0 {
            anyhow::bail!("{failed} of {} checks failed", checks.len());
        }
        writeln!(self.out, "All checks passed.")?;
        Ok(())
    }
}
