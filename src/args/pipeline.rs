//! Pipeline — ties all argument processing stages together.

use std::ffi::OsString;

use crate::args::classifier::classify;
use crate::args::error::ArgError;
use crate::args::registry::OptionRegistry;
use crate::args::resolver::{resolve, Command};
use crate::args::validator::validate;

/// Decode OS arguments as UTF-8.
///
/// A token that is not valid UTF-8 matches no option and cannot be a session
/// name, so it is reported as unrecognized (shown lossily).
pub fn decode_args<I>(raw_args: I) -> Result<Vec<String>, ArgError>
where
    I: IntoIterator<Item = OsString>,
{
    raw_args
        .into_iter()
        .map(|arg| {
            arg.into_string().map_err(|arg| ArgError::UnrecognizedFlag {
                token: arg.to_string_lossy().into_owned(),
            })
        })
        .collect()
}

/// Turn raw user arguments (program name excluded) into one [`Command`].
///
/// This is the main entry point for the argument pipeline. Pure: the same
/// input always yields the same command or the same error.
pub fn parse_command(raw_args: &[String], registry: &OptionRegistry) -> Result<Command, ArgError> {
    // Stage 1: Classify tokens
    let parsed = classify(raw_args, registry)?;

    // Stage 2: Validate
    let parsed = validate(parsed, registry)?;

    // Stage 3: Resolve intent
    resolve(&parsed)
}
