use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub sessions: Vec<SessionConfig>,
}

/// Settings shared by every team session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Command started in every agent pane (default: "claude").
    #[serde(default = "default_claude_command")]
    pub claude_command: String,
    /// Language chosen at `--init` time ("ja" or "en").
    #[serde(default = "default_language")]
    pub language: String,
    /// tmux layout applied after all panes exist (default: "tiled").
    #[serde(default = "default_layout")]
    pub layout: String,
    /// Agents used by sessions that do not list their own.
    #[serde(default = "default_agents")]
    pub default_agents: Vec<String>,
}

/// A named team session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// tmux session name.
    pub name: String,
    /// Directory every pane starts in; `~` is expanded. Defaults to the cwd.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    /// Overrides `common.layout`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// One pane per agent; falls back to `common.default_agents` when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<String>,
    /// Extra arguments appended to the claude command.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub claude_args: Vec<String>,
}

/// Layouts tmux knows by name.
pub const TMUX_LAYOUTS: &[&str] = &[
    "even-horizontal",
    "even-vertical",
    "main-horizontal",
    "main-vertical",
    "tiled",
];

fn default_claude_command() -> String {
    "claude".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_layout() -> String {
    "tiled".to_string()
}

fn default_agents() -> Vec<String> {
    ["boss", "worker1", "worker2", "worker3"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            claude_command: default_claude_command(),
            language: default_language(),
            layout: default_layout(),
            default_agents: default_agents(),
        }
    }
}

impl SessionConfig {
    /// A session with no overrides: everything comes from `[common]`.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            working_dir: None,
            layout: None,
            agents: Vec::new(),
            claude_args: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            common: CommonConfig::default(),
            sessions: vec![SessionConfig::named("ai-team")],
        }
    }
}

impl Config {
    /// Look up a configured session by name.
    pub fn session(&self, name: &str) -> Option<&SessionConfig> {
        self.sessions.iter().find(|s| s.name == name)
    }

    /// The configured session, or an unconfigured one using `[common]`.
    pub fn session_or_default(&self, name: &str) -> SessionConfig {
        self.session(name)
            .cloned()
            .unwrap_or_else(|| SessionConfig::named(name))
    }

    /// Agents a session will actually start.
    pub fn effective_agents<'a>(&'a self, session: &'a SessionConfig) -> &'a [String] {
        if session.agents.is_empty() {
            &self.common.default_agents
        } else {
            &session.agents
        }
    }

    /// Layout a session will actually use.
    pub fn effective_layout<'a>(&'a self, session: &'a SessionConfig) -> &'a str {
        session.layout.as_deref().unwrap_or(&self.common.layout)
    }
}
