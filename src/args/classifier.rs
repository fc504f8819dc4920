//! Token classifier — raw args → parsed args.

use std::collections::BTreeMap;

use crate::args::error::ArgError;
use crate::args::registry::{FlagArity, OptionDef, OptionRegistry};

/// Result of classifying raw arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Positional arguments in order.
    pub positional: Vec<String>,
    /// Flags keyed by canonical long name. `None` means present without value.
    pub flags: BTreeMap<&'static str, Option<String>>,
}

impl ParsedArgs {
    /// True when the command line carried nothing at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.flags.is_empty()
    }

    pub fn has(&self, long: &str) -> bool {
        self.flags.contains_key(long)
    }

    /// Value given to a flag, if the flag is present and has one.
    pub fn value(&self, long: &str) -> Option<&str> {
        self.flags.get(long).and_then(|v| v.as_deref())
    }
}

/// Tokenizer state.
enum State<'r> {
    ExpectToken,
    ExpectValue(&'r OptionDef),
}

/// Classify raw args against the registry.
///
/// `--name`, `--name=value` and `-x` are looked up in the registry; anything
/// else is positional, as is every token after a bare `--`.
pub fn classify(raw_args: &[String], registry: &OptionRegistry) -> Result<ParsedArgs, ArgError> {
    let mut parsed = ParsedArgs::default();
    let mut state = State::ExpectToken;
    let mut options_ended = false;

    for arg in raw_args {
        if let State::ExpectValue(def) = state {
            if !is_flag_shaped(arg) {
                parsed.flags.insert(def.long, Some(arg.clone()));
                state = State::ExpectToken;
                continue;
            }
            // Next token is another flag: the pending one has no value.
            record_missing_value(&mut parsed, def)?;
            state = State::ExpectToken;
        }

        if options_ended || !is_flag_shaped(arg) {
            parsed.positional.push(arg.clone());
            continue;
        }

        if arg == "--" {
            options_ended = true;
            continue;
        }

        let (def, inline_value) = lookup(arg, registry)?;
        match (def.arity.takes_value(), inline_value) {
            (false, None) => {
                parsed.flags.insert(def.long, None);
            }
            (false, Some(_)) => {
                return Err(ArgError::UnrecognizedFlag { token: arg.clone() });
            }
            (true, Some(value)) if !value.is_empty() => {
                parsed.flags.insert(def.long, Some(value.to_string()));
            }
            (true, Some(_)) => record_missing_value(&mut parsed, def)?,
            (true, None) => state = State::ExpectValue(def),
        }
    }

    if let State::ExpectValue(def) = state {
        record_missing_value(&mut parsed, def)?;
    }

    Ok(parsed)
}

fn is_flag_shaped(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

/// Resolve a flag-shaped token to its definition and optional `=value`.
fn lookup<'r, 'a>(
    arg: &'a str,
    registry: &'r OptionRegistry,
) -> Result<(&'r OptionDef, Option<&'a str>), ArgError> {
    let unrecognized = || ArgError::UnrecognizedFlag {
        token: arg.to_string(),
    };

    if arg.starts_with("--") {
        let (name, value) = match arg.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (arg, None),
        };
        registry.by_long(name).map(|def| (def, value)).ok_or_else(unrecognized)
    } else {
        registry.by_short(arg).map(|def| (def, None)).ok_or_else(unrecognized)
    }
}

fn record_missing_value(parsed: &mut ParsedArgs, def: &OptionDef) -> Result<(), ArgError> {
    match def.arity {
        FlagArity::ValidatedValue => {
            parsed.flags.insert(def.long, None);
            Ok(())
        }
        FlagArity::RequiresValue | FlagArity::NoValue => Err(ArgError::MissingFlagValue {
            flag: def.long.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::registry::option_registry;

    fn raw(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn run(args: &[&str]) -> Result<ParsedArgs, ArgError> {
        classify(&raw(args), &option_registry())
    }

    #[test]
    fn empty_input() {
        let parsed = run(&[]).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn positional_and_boolean_flags() {
        let parsed = run(&["myproject", "--reset", "-s"]).unwrap();
        assert_eq!(parsed.positional, vec!["myproject"]);
        assert!(parsed.has("--reset"));
        assert!(parsed.has("--silent"));
        assert_eq!(parsed.value("--silent"), None);
    }

    #[test]
    fn value_from_next_token() {
        let parsed = run(&["--config", "ai-team"]).unwrap();
        assert_eq!(parsed.value("--config"), Some("ai-team"));
        assert!(parsed.positional.is_empty());
    }

    #[test]
    fn inline_value() {
        let parsed = run(&["--init=ja"]).unwrap();
        assert_eq!(parsed.value("--init"), Some("ja"));
    }

    #[test]
    fn inline_value_on_boolean_flag_is_rejected() {
        assert_eq!(
            run(&["--verbose=yes"]),
            Err(ArgError::UnrecognizedFlag {
                token: "--verbose=yes".into(),
            })
        );
    }

    #[test]
    fn unknown_long_and_short_flags() {
        assert_eq!(
            run(&["--typo"]),
            Err(ArgError::UnrecognizedFlag {
                token: "--typo".into(),
            })
        );
        assert_eq!(
            run(&["-vd"]),
            Err(ArgError::UnrecognizedFlag {
                token: "-vd".into(),
            })
        );
    }

    #[test]
    fn required_value_missing_at_end() {
        assert_eq!(
            run(&["--config"]),
            Err(ArgError::MissingFlagValue {
                flag: "--config".into(),
            })
        );
    }

    #[test]
    fn required_value_followed_by_flag() {
        assert_eq!(
            run(&["--config", "--verbose"]),
            Err(ArgError::MissingFlagValue {
                flag: "--config".into(),
            })
        );
    }

    #[test]
    fn validated_value_missing_is_recorded() {
        let parsed = run(&["--delete", "--verbose"]).unwrap();
        assert!(parsed.has("--delete"));
        assert_eq!(parsed.value("--delete"), None);
        assert!(parsed.has("--verbose"));

        let parsed = run(&["--init="]).unwrap();
        assert!(parsed.has("--init"));
        assert_eq!(parsed.value("--init"), None);
    }

    #[test]
    fn double_dash_ends_options() {
        let parsed = run(&["--", "--list", "-v"]).unwrap();
        assert_eq!(parsed.positional, vec!["--list", "-v"]);
        assert!(parsed.flags.is_empty());
    }

    #[test]
    fn single_dash_is_positional() {
        let parsed = run(&["-"]).unwrap();
        assert_eq!(parsed.positional, vec!["-"]);
    }

    #[test]
    fn repeated_flag_keeps_last_value() {
        let parsed = run(&["--delete", "a", "--delete", "b"]).unwrap();
        assert_eq!(parsed.value("--delete"), Some("b"));
    }
}
