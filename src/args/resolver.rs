//! Intent resolver — validated args → one command.

use std::fmt;

use crate::args::classifier::ParsedArgs;
use crate::args::error::ArgError;

/// Language accepted by `--init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitLanguage {
    Ja,
    En,
}

impl InitLanguage {
    /// Parse a language code. Only `ja` and `en` are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ja" => Some(Self::Ja),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }
}

impl fmt::Display for InitLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session modifiers carried by a launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchFlags {
    pub reset: bool,
    pub verbose: bool,
    pub debug: bool,
    pub silent: bool,
}

/// The single action requested by one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Delete { session_name: String },
    DeleteAll,
    ShowConfigSummary,
    ShowConfigDetail { session_name: String },
    GenerateConfig { force: bool },
    Init { language: InitLanguage, force: bool },
    Doctor,
    Launch {
        session_name: String,
        flags: LaunchFlags,
    },
}

/// Map validated args to a command by fixed precedence.
///
/// Help > DeleteAll > Delete > List > ShowConfigDetail > ShowConfigSummary >
/// GenerateConfig > Init > Doctor > Launch.
///
/// Values the validator guarantees are re-derived here; unvalidated input
/// yields the same error the validator would have reported.
pub fn resolve(parsed: &ParsedArgs) -> Result<Command, ArgError> {
    let force = parsed.has("--force");

    let command = if parsed.is_empty() || parsed.has("--help") {
        Command::Help
    } else if parsed.has("--delete-all") {
        Command::DeleteAll
    } else if parsed.has("--delete") {
        let session_name = parsed.value("--delete").ok_or(ArgError::MissingDeleteTarget)?;
        Command::Delete {
            session_name: session_name.to_string(),
        }
    } else if parsed.has("--list") {
        Command::List
    } else if parsed.has("--config") {
        let session_name = parsed
            .value("--config")
            .ok_or_else(|| ArgError::MissingFlagValue {
                flag: "--config".into(),
            })?;
        Command::ShowConfigDetail {
            session_name: session_name.to_string(),
        }
    } else if parsed.has("--show-config") {
        Command::ShowConfigSummary
    } else if parsed.has("--generate-config") {
        Command::GenerateConfig { force }
    } else if parsed.has("--init") {
        let value = parsed.value("--init");
        let language = value
            .and_then(InitLanguage::parse)
            .ok_or_else(|| ArgError::InvalidInitLanguage {
                value: value.map(String::from),
            })?;
        Command::Init { language, force }
    } else if parsed.has("--doctor") {
        Command::Doctor
    } else {
        let session_name = parsed.positional.first().ok_or(ArgError::MissingSessionName)?;
        Command::Launch {
            session_name: session_name.clone(),
            flags: LaunchFlags {
                reset: parsed.has("--reset"),
                verbose: parsed.has("--verbose"),
                debug: parsed.has("--debug"),
                silent: parsed.has("--silent"),
            },
        }
    };

    Ok(command)
}
