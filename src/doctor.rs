//! Health checks behind `--doctor`.

use std::ffi::OsStr;

use crate::config::{Config, ConfigPaths};
use crate::tmux::find_executable;

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            ok: true,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            ok: false,
            detail: detail.into(),
        }
    }
}

/// Run every check. Never fails; problems are reported in the results.
pub fn run_checks(paths: &ConfigPaths, path_var: Option<&OsStr>) -> Vec<CheckResult> {
    let mut results = Vec::new();

    results.push(match find_executable("tmux", path_var) {
        Some(path) => CheckResult::pass("tmux", path.display().to_string()),
        None => CheckResult::fail("tmux", "not found in PATH"),
    });

    let config_path = paths.config_file();
    let config = match Config::load_from(&config_path) {
        Ok(config) => {
            results.push(CheckResult::pass("config", config_path.display().to_string()));
            Some(config)
        }
        Err(err) => {
            results.push(CheckResult::fail("config", err.to_string()));
            None
        }
    };

    // The program is the first word; the rest are arguments.
    let claude_command = config
        .as_ref()
        .map(|c| c.common.claude_command.clone())
        .unwrap_or_else(|| Config::default().common.claude_command);
    let program = claude_command.split_whitespace().next().unwrap_or_default();
    results.push(match find_executable(program, path_var) {
        Some(path) => CheckResult::pass("claude", path.display().to_string()),
        None => CheckResult::fail("claude", format!("'{program}' not found in PATH")),
    });

    let instructions = paths.instructions_dir();
    results.push(if instructions.is_dir() {
        CheckResult::pass("instructions", instructions.display().to_string())
    } else {
        CheckResult::fail(
            "instructions",
            format!("{} missing (run --init)", instructions.display()),
        )
    });

    tracing::debug!(?results, "doctor checks finished");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::InitLanguage;
    use std::path::Path;
    use tempfile::TempDir;

    fn install_fake(dir: &Path, name: &str) {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[test]
    fn all_checks_pass_on_initialized_system() {
        let home = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        install_fake(bin.path(), "tmux");
        install_fake(bin.path(), "claude");

        let paths = ConfigPaths::from_root(home.path());
        Config::write_template(&paths.config_file(), InitLanguage::En, false).unwrap();
        std::fs::create_dir_all(paths.instructions_dir()).unwrap();

        let results = run_checks(&paths, Some(bin.path().as_os_str()));
        assert!(results.iter().all(|r| r.ok), "{results:?}");
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn reports_every_missing_piece() {
        let home = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();

        let paths = ConfigPaths::from_root(home.path());
        let results = run_checks(&paths, Some(bin.path().as_os_str()));

        let failed: Vec<_> = results.iter().filter(|r| !r.ok).map(|r| r.name).collect();
        assert_eq!(failed, vec!["tmux", "config", "claude", "instructions"]);
    }
}
