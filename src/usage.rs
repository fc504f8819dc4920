//! Help text.
//!
//! Option rows are generated from the [`OptionRegistry`] so the help output
//! and the parser cannot drift apart.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::args::{FlagCategory, OptionDef, OptionRegistry};

/// Binary name used in usage lines and examples.
pub const PROGRAM: &str = "claude-squad";

const LABEL_WIDTH: usize = 22;

const EXAMPLES: &[(&str, &str)] = &[
    ("myproject", "Launch (or attach to) the 'myproject' team"),
    ("ai-team", "Launch the 'ai-team' team"),
    ("myproject --reset", "Recreate the 'myproject' session from scratch"),
    ("myproject --verbose", "Launch with verbose logging"),
    ("myproject --silent", "Launch without progress output"),
    ("--list", "Show running AI team sessions"),
    ("--delete myproject", "Delete the 'myproject' session"),
    ("--delete-all", "Delete every AI team session"),
    ("--show-config", "Show configuration summary"),
    ("--config ai-team", "Show configuration of 'ai-team'"),
    ("--generate-config", "Write a configuration template"),
    ("--generate-config --force", "Overwrite the configuration template"),
    ("--init ja", "Initialize with Japanese settings"),
    ("--init en", "Initialize with English settings"),
    ("--init ja --force", "Re-initialize, overwriting existing files"),
    ("--doctor", "Check tmux, claude and configuration"),
];

const ENVIRONMENT: &[(&str, &str)] = &[
    ("VERBOSE=true", "Same as --verbose when the flag is absent"),
    ("SILENT=true", "Same as --silent when the flag is absent"),
];

/// Render the full multi-section help text.
pub fn render_usage(registry: &OptionRegistry) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "🚀 AI Parallel Development Team - Integrated Launch System");
    let _ = writeln!(out);

    let _ = writeln!(out, "Usage:");
    let _ = writeln!(out, "  {PROGRAM} <session-name> [options]");
    let _ = writeln!(out, "  {PROGRAM} [management-commands]");
    let _ = writeln!(out);

    let _ = writeln!(out, "Arguments:");
    row(&mut out, 2, "session-name", "tmux session name (required)");
    let _ = writeln!(out);

    let _ = writeln!(out, "Options:");
    for def in registry.iter().filter(|d| is_option_row(d)) {
        row(&mut out, 2, def.usage, def.description);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Management Commands:");
    for def in registry.iter().filter(|d| d.category == FlagCategory::Management) {
        row(&mut out, 2, def.usage, def.description);
        for companion in registry.iter().filter(|c| c.requires_any.contains(&def.long)) {
            row(&mut out, 4, companion.usage, companion_note(def.long, companion));
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Examples:");
    for (args, note) in EXAMPLES {
        let _ = writeln!(out, "  {:<width$} # {note}", format!("{PROGRAM} {args}"), width = 40);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Environment Variables:");
    for (var, note) in ENVIRONMENT {
        row(&mut out, 2, var, note);
    }

    out
}

/// Write the help text to `out`.
pub fn print_usage(registry: &OptionRegistry, out: &mut impl Write) -> io::Result<()> {
    out.write_all(render_usage(registry).as_bytes())
}

/// Rows of the Options section: help plus session modifiers.
fn is_option_row(def: &OptionDef) -> bool {
    def.category != FlagCategory::Management && def.requires_any.is_empty()
}

fn companion_note(command: &str, companion: &OptionDef) -> &'static str {
    match command {
        "--init" => "Overwrite existing files during initialization",
        _ => companion.description,
    }
}

fn row(out: &mut String, indent: usize, label: &str, description: &str) {
    let width = LABEL_WIDTH.saturating_sub(indent - 2);
    let _ = writeln!(out, "{:indent$}{label:<width$}{description}", "");
}
