use std::collections::HashMap;
use std::ffi::OsStr;
use std::io;
use std::process::ExitCode;

use claude_squad::args::{decode_args, option_registry, parse_command};
use claude_squad::config::ConfigPaths;
use claude_squad::dispatch::Dispatcher;
use claude_squad::logging::{init_tracing, Verbosity};
use claude_squad::tmux::{find_executable, TmuxCli};
use claude_squad::usage::PROGRAM;

fn main() -> ExitCode {
    // Non-UTF-8 variables are irrelevant to us; skip rather than panic.
    let vars: HashMap<String, String> = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();
    let registry = option_registry();

    let parsed = decode_args(std::env::args_os().skip(1))
        .and_then(|raw_args| parse_command(&raw_args, &registry));
    let command = match parsed {
        Ok(command) => command,
        Err(err) => {
            init_tracing(Verbosity::from_env(&vars));
            tracing::debug!(error_type = err.error_type(), error = %err, "argument parsing failed");
            eprintln!("Error: {err}");
            eprintln!("Run '{PROGRAM} --help' for usage.");
            return ExitCode::from(err.exit_code());
        }
    };

    init_tracing(Verbosity::for_command(&command, &vars));

    let tmux_binary = find_executable("tmux", vars.get("PATH").map(OsStr::new))
        .unwrap_or_else(|| "tmux".into());
    let tmux = TmuxCli::new(tmux_binary, vars.contains_key("TMUX"));
    let paths = ConfigPaths::resolve(&vars);

    let mut dispatcher = Dispatcher::new(&registry, tmux, paths, io::stdout(), vars);
    match dispatcher.run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
