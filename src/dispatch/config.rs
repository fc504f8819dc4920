//! Configuration handlers: show-config, config, generate-config, init.

use std::fs;
use std::io::Write;

use anyhow::{anyhow, Context, Result};

use super::Dispatcher;
use crate::args::InitLanguage;
use crate::config::{Config, ConfigError};
use crate::tmux::Multiplexer;

impl<M: Multiplexer, W: Write> Dispatcher<'_, M, W> {
    pub(super) fn show_config_summary(&mut self) -> Result<()> {
        let path = self.paths.config_file();
        let config = Config::load_from(&path)?;
        let common = &config.common;

        writeln!(self.out, "📋 Configuration summary")?;
        writeln!(self.out, "  File:            {}", path.display())?;
        writeln!(self.out, "  Claude command:  {}", common.claude_command)?;
        writeln!(self.out, "  Language:        {}", common.language)?;
        writeln!(self.out, "  Layout:          {}", common.layout)?;
        writeln!(self.out, "  Default agents:  {}", common.default_agents.join(", "))?;
        writeln!(self.out)?;
        writeln!(self.out, "Sessions:")?;
        if config.sessions.is_empty() {
            writeln!(self.out, "  (none configured)")?;
        }
        for session in &config.sessions {
            writeln!(
                self.out,
                "  {:<20} {} agent(s), layout {}",
                session.name,
                config.effective_agents(session).len(),
                config.effective_layout(session)
            )?;
        }
        Ok(())
    }

    pub(super) fn show_config_detail(&mut self, name: &str) -> Result<()> {
        let path = self.paths.config_file();
        let config = Config::load_from(&path)?;
        let session = config
            .session(name)
            .ok_or_else(|| anyhow!("Session '{name}' is not configured in {}", path.display()))?;

        let mut command = config.common.claude_command.clone();
        for arg in &session.claude_args {
            command.push(' ');
            command.push_str(arg);
        }

        writeln!(self.out, "📋 Session '{}'", session.name)?;
        writeln!(
            self.out,
            "  Working dir:     {}",
            session.working_dir.as_deref().unwrap_or("(current directory)")
        )?;
        writeln!(self.out, "  Layout:          {}", config.effective_layout(session))?;
        writeln!(self.out, "  Command:         {command}")?;
        writeln!(self.out, "  Agents:")?;
        for (index, agent) in config.effective_agents(session).iter().enumerate() {
            writeln!(self.out, "    {}. {agent}", index + 1)?;
        }
        Ok(())
    }

    pub(super) fn generate_config(&mut self, force: bool) -> Result<()> {
        let path = self.paths.config_file();
        Config::write_template(&path, InitLanguage::En, force)?;
        tracing::info!(path = %path.display(), force, "config template written");
        writeln!(self.out, "📝 Wrote configuration template to {}", path.display())?;
        Ok(())
    }

    pub(super) fn init(&mut self, language: InitLanguage, force: bool) -> Result<()> {
        for dir in [
            self.paths.root().to_path_buf(),
            self.paths.instructions_dir(),
            self.paths.logs_dir(),
        ] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
            writeln!(self.out, "  📁 {}", dir.display())?;
        }

        let path = self.paths.config_file();
        let applied = match Config::write_template(&path, language, force) {
            Ok(()) => {
                writeln!(self.out, "  📝 {}", path.display())?;
                language.to_string()
            }
            Err(ConfigError::AlreadyExists { .. }) => {
                writeln!(
                    self.out,
                    "  ⏭️  kept existing {} ('{language}' not applied, use --force)",
                    path.display()
                )?;
                Config::load_from(&path)?.common.language
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            root = %self.paths.root().display(),
            language = %applied,
            force,
            "initialized"
        );
        writeln!(
            self.out,
            "✅ Initialized claude-squad ({applied}) in {}",
            self.paths.root().display()
        )?;
        Ok(())
    }
}
