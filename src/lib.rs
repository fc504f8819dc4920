//! claude-squad: launcher for AI parallel development team sessions in tmux.
//!
//! The [`args`] pipeline turns the command line into one [`args::Command`];
//! the [`dispatch::Dispatcher`] runs it against tmux and the config files.

pub mod args;
pub mod config;
pub mod dispatch;
pub mod doctor;
pub mod logging;
pub mod tmux;
pub mod usage;
