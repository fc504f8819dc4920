//! Log verbosity and tracing setup.

use std::collections::HashMap;

use tracing_subscriber::EnvFilter;

use crate::args::{Command, LaunchFlags};

/// How chatty the process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent,
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Debug wins over verbose, verbose over silent.
    pub fn from_flags(flags: &LaunchFlags) -> Self {
        if flags.debug {
            Verbosity::Debug
        } else if flags.verbose {
            Verbosity::Verbose
        } else if flags.silent {
            Verbosity::Silent
        } else {
            Verbosity::Normal
        }
    }

    /// Verbosity from `VERBOSE` / `SILENT` alone.
    pub fn from_env(vars: &HashMap<String, String>) -> Self {
        Self::from_flags(&apply_env_defaults(LaunchFlags::default(), vars))
    }

    /// Verbosity for a resolved command. Only launches carry modifier flags;
    /// every command honours `VERBOSE` / `SILENT`.
    pub fn for_command(command: &Command, vars: &HashMap<String, String>) -> Self {
        match command {
            Command::Launch { flags, .. } => Self::from_flags(&apply_env_defaults(*flags, vars)),
            _ => Self::from_env(vars),
        }
    }

    /// Default `EnvFilter` directive.
    pub fn directive(self) -> &'static str {
        match self {
            Verbosity::Silent => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// `VERBOSE=true` / `SILENT=true` stand in for their flags when absent.
pub fn apply_env_defaults(mut flags: LaunchFlags, vars: &HashMap<String, String>) -> LaunchFlags {
    flags.verbose |= env_flag(vars, "VERBOSE");
    flags.silent |= env_flag(vars, "SILENT");
    flags
}

fn env_flag(vars: &HashMap<String, String>, key: &str) -> bool {
    vars.get(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

/// Install the global subscriber. `RUST_LOG` overrides `verbosity`.
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn flag_precedence() {
        let all = LaunchFlags {
            reset: false,
            verbose: true,
            debug: true,
            silent: true,
        };
        assert_eq!(Verbosity::from_flags(&all), Verbosity::Debug);

        let verbose_silent = LaunchFlags {
            verbose: true,
            silent: true,
            ..LaunchFlags::default()
        };
        assert_eq!(Verbosity::from_flags(&verbose_silent), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(&LaunchFlags::default()), Verbosity::Normal);
    }

    #[test]
    fn env_defaults_fill_absent_flags() {
        let flags = apply_env_defaults(LaunchFlags::default(), &vars(&[("VERBOSE", "true")]));
        assert!(flags.verbose);
        assert!(!flags.silent);

        let flags = apply_env_defaults(LaunchFlags::default(), &vars(&[("SILENT", "TRUE")]));
        assert!(flags.silent);

        let flags = apply_env_defaults(LaunchFlags::default(), &vars(&[("VERBOSE", "no")]));
        assert!(!flags.verbose);
    }

    #[test]
    fn non_launch_commands_use_env_only() {
        let env = vars(&[("SILENT", "1")]);
        assert_eq!(Verbosity::for_command(&Command::List, &env), Verbosity::Silent);
        assert_eq!(Verbosity::for_command(&Command::Doctor, &HashMap::new()), Verbosity::Normal);

        let launch = Command::Launch {
            session_name: "x".into(),
            flags: LaunchFlags {
                debug: true,
                ..LaunchFlags::default()
            },
        };
        assert_eq!(Verbosity::for_command(&launch, &env), Verbosity::Debug);
    }

    #[test]
    fn env_only_verbosity() {
        assert_eq!(Verbosity::from_env(&HashMap::new()), Verbosity::Normal);
        assert_eq!(Verbosity::from_env(&vars(&[("VERBOSE", "1")])), Verbosity::Verbose);
        assert_eq!(Verbosity::from_env(&vars(&[("SILENT", "true")])), Verbosity::Silent);
    }

    #[test]
    fn directives() {
        assert_eq!(Verbosity::Silent.directive(), "error");
        assert_eq!(Verbosity::Debug.directive(), "debug");
    }
}
