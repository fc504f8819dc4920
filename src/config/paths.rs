use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration root.
pub const HOME_ENV: &str = "CLAUDE_SQUAD_HOME";

/// Locations of everything claude-squad keeps on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `$CLAUDE_SQUAD_HOME` when set, otherwise
    /// `~/.config/claude-squad` on Unix/macOS (via `dirs::config_dir()`).
    /// Falls back to `./.claude-squad` if no config dir is available.
    pub fn resolve(vars: &HashMap<String, String>) -> Self {
        if let Some(root) = vars.get(HOME_ENV).filter(|v| !v.is_empty()) {
            return Self::from_root(root);
        }
        let root = dirs::config_dir()
            .map(|dir| dir.join("claude-squad"))
            .unwrap_or_else(|| PathBuf::from(".claude-squad"));
        Self::from_root(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn instructions_dir(&self) -> PathBuf {
        self.root.join("instructions")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}
