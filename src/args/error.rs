//! Argument errors and their exit codes.

use thiserror::Error;

/// Errors produced while turning raw arguments into a [`Command`].
///
/// Every variant renders as a single line naming the offending token or flag.
///
/// [`Command`]: crate::args::Command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("unrecognized option '{token}'")]
    UnrecognizedFlag { token: String },

    #[error("option '{flag}' requires a value")]
    MissingFlagValue { flag: String },

    #[error("'{first}' and '{second}' cannot be used together")]
    ConflictingManagementCommands { first: String, second: String },

    #[error("missing required argument <session-name>")]
    MissingSessionName,

    #[error("unexpected argument '{extra}'")]
    TooManyPositionalArguments { extra: String },

    #[error("'--force' can only be used with '--generate-config' or '--init'")]
    UnexpectedForceFlag,

    #[error("{}", invalid_language_message(.value.as_deref()))]
    InvalidInitLanguage { value: Option<String> },

    #[error("'--delete' requires the name of the session to delete")]
    MissingDeleteTarget,
}

fn invalid_language_message(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("invalid language '{v}' for '--init' (expected 'ja' or 'en')"),
        None => "'--init' requires a language ('ja' or 'en')".to_string(),
    }
}

impl ArgError {
    /// Process exit code for this error. Stable; 0 is success and 1 is
    /// reserved for handler failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            ArgError::UnrecognizedFlag { .. } => 2,
            ArgError::MissingFlagValue { .. } => 3,
            ArgError::ConflictingManagementCommands { .. } => 4,
            ArgError::MissingSessionName => 5,
            ArgError::TooManyPositionalArguments { .. } => 6,
            ArgError::UnexpectedForceFlag => 7,
            ArgError::InvalidInitLanguage { .. } => 8,
            ArgError::MissingDeleteTarget => 9,
        }
    }

    /// Machine-readable error kind.
    pub fn error_type(&self) -> &'static str {
        match self {
            ArgError::UnrecognizedFlag { .. } => "unrecognized_flag",
            ArgError::MissingFlagValue { .. } => "missing_flag_value",
            ArgError::ConflictingManagementCommands { .. } => "conflicting_management_commands",
            ArgError::MissingSessionName => "missing_session_name",
            ArgError::TooManyPositionalArguments { .. } => "too_many_positional_arguments",
            ArgError::UnexpectedForceFlag => "unexpected_force_flag",
            ArgError::InvalidInitLanguage { .. } => "invalid_init_language",
            ArgError::MissingDeleteTarget => "missing_delete_target",
        }
    }
}
