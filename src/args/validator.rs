//! Validator — ordered, fail-fast rules over parsed args.

use crate::args::classifier::ParsedArgs;
use crate::args::error::ArgError;
use crate::args::registry::{ExclusiveGroup, FlagCategory, OptionRegistry};
use crate::args::resolver::InitLanguage;

/// Validate parsed args, returning them unchanged on success.
///
/// `--help` (or an empty command line) short-circuits every rule.
pub fn validate(parsed: ParsedArgs, registry: &OptionRegistry) -> Result<ParsedArgs, ArgError> {
    if parsed.is_empty() || parsed.has("--help") {
        return Ok(parsed);
    }

    check_management_exclusive(&parsed, registry)?;
    check_positionals(&parsed, registry)?;
    check_force(&parsed, registry)?;
    check_init_language(&parsed)?;
    check_delete_target(&parsed)?;

    Ok(parsed)
}

/// Rule 1: at most one management command.
fn check_management_exclusive(
    parsed: &ParsedArgs,
    registry: &OptionRegistry,
) -> Result<(), ArgError> {
    let mut present = registry
        .iter()
        .map(|def| def.long)
        .filter(|long| registry.group_of(long) == Some(ExclusiveGroup::ManagementCommand))
        .filter(|long| parsed.has(long));

    if let (Some(first), Some(second)) = (present.next(), present.next()) {
        return Err(ArgError::ConflictingManagementCommands {
            first: first.to_string(),
            second: second.to_string(),
        });
    }
    Ok(())
}

/// Rule 2: a launch needs exactly one session name; anything else takes none.
fn check_positionals(parsed: &ParsedArgs, registry: &OptionRegistry) -> Result<(), ArgError> {
    let has_action = parsed.flags.keys().any(|long| {
        matches!(
            registry.category_of(long),
            Some(FlagCategory::Informational | FlagCategory::Management)
        )
    });
    let allowed = if has_action { 0 } else { 1 };

    if let Some(extra) = parsed.positional.get(allowed) {
        return Err(ArgError::TooManyPositionalArguments {
            extra: extra.clone(),
        });
    }
    if parsed.positional.len() < allowed {
        return Err(ArgError::MissingSessionName);
    }
    Ok(())
}

/// Rule 3: `--force` needs one of its companion commands.
fn check_force(parsed: &ParsedArgs, registry: &OptionRegistry) -> Result<(), ArgError> {
    let Some(force) = registry.by_long("--force") else {
        return Ok(());
    };
    if parsed.has(force.long) && !force.requires_any.iter().any(|c| parsed.has(c)) {
        return Err(ArgError::UnexpectedForceFlag);
    }
    Ok(())
}

/// Rule 4: `--init` takes `ja` or `en`.
fn check_init_language(parsed: &ParsedArgs) -> Result<(), ArgError> {
    if !parsed.has("--init") {
        return Ok(());
    }
    let value = parsed.value("--init");
    match value.and_then(InitLanguage::parse) {
        Some(_) => Ok(()),
        None => Err(ArgError::InvalidInitLanguage {
            value: value.map(String::from),
        }),
    }
}

/// Rule 5: `--delete` names its target.
fn check_delete_target(parsed: &ParsedArgs) -> Result<(), ArgError> {
    if parsed.has("--delete") && parsed.value("--delete").is_none() {
        return Err(ArgError::MissingDeleteTarget);
    }
    Ok(())
}
