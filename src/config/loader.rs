use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::args::InitLanguage;
use crate::config::types::{Config, TMUX_LAYOUTS};

/// Errors that can occur when loading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config file at '{path}' (run `claude-squad --generate-config` or `--init`)")]
    NotFound { path: PathBuf },

    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file '{path}' already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

const TEMPLATE_HEADER: &str = "\
# claude-squad configuration
#
# [common] applies to every session; [[sessions]] entries override it.
# Sessions not listed here are launched with the [common] defaults.
";

impl Config {
    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns [`ConfigError::NotFound`].
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load_from`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_from(path) {
            Err(ConfigError::NotFound { .. }) => Ok(Config::default()),
            other => other,
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `claude_command` is not empty
    /// - `language` is `ja` or `en`
    /// - every layout is a tmux preset
    /// - session names are unique and use `[A-Za-z0-9_-]`
    /// - every session ends up with at least one agent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |message: String| Err(ConfigError::ValidationError { message });

        if self.common.claude_command.trim().is_empty() {
            return fail("common.claude_command must not be empty".to_string());
        }

        if InitLanguage::parse(&self.common.language).is_none() {
            return fail(format!(
                "common.language '{}' must be 'ja' or 'en'",
                self.common.language
            ));
        }

        if !TMUX_LAYOUTS.contains(&self.common.layout.as_str()) {
            return fail(format!("common.layout '{}' is not a tmux layout", self.common.layout));
        }

        let mut seen = HashSet::new();
        for session in &self.sessions {
            if !is_valid_session_name(&session.name) {
                return fail(format!(
                    "session name '{}' must be non-empty and only contain [A-Za-z0-9_-]",
                    session.name
                ));
            }
            if !seen.insert(session.name.as_str()) {
                return fail(format!("session '{}' is defined more than once", session.name));
            }
            if let Some(layout) = &session.layout {
                if !TMUX_LAYOUTS.contains(&layout.as_str()) {
                    return fail(format!(
                        "session '{}': layout '{}' is not a tmux layout",
                        session.name, layout
                    ));
                }
            }
            if self.effective_agents(session).is_empty() {
                return fail(format!("session '{}' has no agents", session.name));
            }
        }

        Ok(())
    }

    /// Default configuration with the given language.
    pub fn template(language: InitLanguage) -> Self {
        let mut config = Config::default();
        config.common.language = language.as_str().to_string();
        config
    }

    /// Render as commented TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let body = toml::to_string_pretty(self)?;
        Ok(format!("{TEMPLATE_HEADER}\n{body}"))
    }

    /// Write the template for `language` to `path`, creating parent dirs.
    ///
    /// Refuses to replace an existing file unless `force` is set.
    pub fn write_template(
        path: &Path,
        language: InitLanguage,
        force: bool,
    ) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        let content = Self::template(language).to_toml()?;
        let write_err = |e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)
    }
}

/// Session names double as tmux targets, so keep them plain.
pub fn is_valid_session_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
