//! Option registry — single source of truth for all flags.

/// What kind of intent a flag expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagCategory {
    /// Prints something and exits (e.g., --help).
    Informational,
    /// Replaces the launch with a management action (e.g., --list).
    Management,
    /// Adjusts how another command runs (e.g., --verbose).
    Modifier,
}

/// Whether a flag takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagArity {
    /// Boolean flag, no value (e.g., --list, --verbose).
    NoValue,
    /// Requires exactly one value; the classifier rejects its absence.
    RequiresValue,
    /// Requires exactly one value; its absence is reported by the validator
    /// with a flag-specific error.
    ValidatedValue,
}

impl FlagArity {
    /// Does the flag consume a value token?
    pub fn takes_value(self) -> bool {
        !matches!(self, FlagArity::NoValue)
    }
}

/// Flags in the same group may not appear together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusiveGroup {
    /// At most one management command per invocation.
    ManagementCommand,
}

/// A single flag definition.
#[derive(Debug, Clone)]
pub struct OptionDef {
    /// Canonical long form (e.g., "--delete").
    pub long: &'static str,
    /// Optional short form (e.g., "-v").
    pub short: Option<&'static str>,
    /// Does it take a value?
    pub arity: FlagArity,
    pub category: FlagCategory,
    pub group: Option<ExclusiveGroup>,
    /// The flag is only accepted next to one of these long names.
    pub requires_any: &'static [&'static str],
    /// Label shown in the help text (e.g., "--delete [name]").
    pub usage: &'static str,
    /// Human-readable description (for help text).
    pub description: &'static str,
}

/// Immutable table of every recognized flag, in help-text order.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    defs: Vec<OptionDef>,
}

impl OptionRegistry {
    pub fn new(defs: Vec<OptionDef>) -> Self {
        Self { defs }
    }

    pub fn by_long(&self, long: &str) -> Option<&OptionDef> {
        self.defs.iter().find(|d| d.long == long)
    }

    pub fn by_short(&self, short: &str) -> Option<&OptionDef> {
        self.defs.iter().find(|d| d.short == Some(short))
    }

    pub fn category_of(&self, long: &str) -> Option<FlagCategory> {
        self.by_long(long).map(|d| d.category)
    }

    pub fn group_of(&self, long: &str) -> Option<ExclusiveGroup> {
        self.by_long(long).and_then(|d| d.group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDef> {
        self.defs.iter()
    }
}

/// Build the complete option registry.
pub fn option_registry() -> OptionRegistry {
    OptionRegistry::new(vec![
        // === Session modifiers ===
        OptionDef {
            long: "--reset",
            short: None,
            arity: FlagArity::NoValue,
            category: FlagCategory::Modifier,
            group: None,
            requires_any: &[],
            usage: "--reset",
            description: "Delete existing session and recreate it",
        },
        OptionDef {
            long: "--verbose",
            short: Some("-v"),
            arity: FlagArity::NoValue,
            category: FlagCategory::Modifier,
            group: None,
            requires_any: &[],
            usage: "-v, --verbose",
            description: "Enable verbose logging",
        },
        OptionDef {
            long: "--debug",
            short: Some("-d"),
            arity: FlagArity::NoValue,
            category: FlagCategory::Modifier,
            group: None,
            requires_any: &[],
            usage: "-d, --debug",
            description: "Enable debug logging",
        },
        OptionDef {
            long: "--silent",
            short: Some("-s"),
            arity: FlagArity::NoValue,
            category: FlagCategory::Modifier,
            group: None,
            requires_any: &[],
            usage: "-s, --silent",
            description: "Silent mode (suppress progress output)",
        },
        // === Informational ===
        OptionDef {
            long: "--help",
            short: Some("-h"),
            arity: FlagArity::NoValue,
            category: FlagCategory::Informational,
            group: None,
            requires_any: &[],
            usage: "-h, --help",
            description: "Show this help",
        },
        // === Management commands ===
        OptionDef {
            long: "--list",
            short: None,
            arity: FlagArity::NoValue,
            category: FlagCategory::Management,
            group: Some(ExclusiveGroup::ManagementCommand),
            requires_any: &[],
            usage: "--list",
            description: "Show running AI team sessions",
        },
        OptionDef {
            long: "--delete",
            short: None,
            arity: FlagArity::ValidatedValue,
            category: FlagCategory::Management,
            group: Some(ExclusiveGroup::ManagementCommand),
            requires_any: &[],
            usage: "--delete [name]",
            description: "Delete specified session",
        },
        OptionDef {
            long: "--delete-all",
            short: None,
            arity: FlagArity::NoValue,
            category: FlagCategory::Management,
            group: Some(ExclusiveGroup::ManagementCommand),
            requires_any: &[],
            usage: "--delete-all",
            description: "Delete all AI team sessions",
        },
        OptionDef {
            long: "--show-config",
            short: None,
            arity: FlagArity::NoValue,
            category: FlagCategory::Management,
            group: Some(ExclusiveGroup::ManagementCommand),
            requires_any: &[],
            usage: "--show-config",
            description: "Show configuration summary",
        },
        OptionDef {
            long: "--config",
            short: None,
            arity: FlagArity::RequiresValue,
            category: FlagCategory::Management,
            group: Some(ExclusiveGroup::ManagementCommand),
            requires_any: &[],
            usage: "--config [session]",
            description: "Show detailed configuration",
        },
        OptionDef {
            long: "--generate-config",
            short: None,
            arity: FlagArity::NoValue,
            category: FlagCategory::Management,
            group: Some(ExclusiveGroup::ManagementCommand),
            requires_any: &[],
            usage: "--generate-config",
            description: "Generate configuration file template",
        },
        OptionDef {
            long: "--init",
            short: None,
            arity: FlagArity::ValidatedValue,
            category: FlagCategory::Management,
            group: Some(ExclusiveGroup::ManagementCommand),
            requires_any: &[],
            usage: "--init [ja|en]",
            description: "Initialize system (create directories and config files)",
        },
        OptionDef {
            long: "--doctor",
            short: None,
            arity: FlagArity::NoValue,
            category: FlagCategory::Management,
            group: Some(ExclusiveGroup::ManagementCommand),
            requires_any: &[],
            usage: "--doctor",
            description: "Run system health check",
        },
        // === Management modifiers ===
        OptionDef {
            long: "--force",
            short: None,
            arity: FlagArity::NoValue,
            category: FlagCategory::Modifier,
            group: None,
            requires_any: &["--generate-config", "--init"],
            usage: "--force",
            description: "Overwrite existing files",
        },
    ])
}
