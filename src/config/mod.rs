mod loader;
mod paths;
mod types;

pub use loader::{is_valid_session_name, ConfigError};
pub use paths::{ConfigPaths, HOME_ENV};
pub use types::{CommonConfig, Config, SessionConfig, TMUX_LAYOUTS};
