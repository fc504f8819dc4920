//! Shared test utilities: an in-memory multiplexer and dispatcher helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use claude_squad::args::{option_registry, Command, OptionRegistry};
use claude_squad::config::ConfigPaths;
use claude_squad::dispatch::Dispatcher;
use claude_squad::tmux::{Multiplexer, SessionInfo, TmuxError};
use parking_lot::Mutex;
use tempfile::TempDir;

/// One recorded multiplexer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Kill(String),
    New(String, PathBuf),
    Split(String),
    SendKeys(String, String),
    Layout(String, String),
    Tag(String),
    Attach(String),
}

#[derive(Debug, Default)]
pub struct MuxState {
    pub sessions: Vec<SessionInfo>,
    pub calls: Vec<Call>,
    /// Fail the next `send_keys` call.
    pub fail_send_keys: bool,
    /// Fail every `kill_session` call.
    pub fail_kill_session: bool,
}

/// In-memory tmux. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct FakeMux {
    pub state: Arc<Mutex<MuxState>>,
}

impl FakeMux {
    pub fn with_sessions(sessions: &[(&str, bool)]) -> Self {
        let mux = Self::default();
        mux.state.lock().sessions = sessions
            .iter()
            .map(|(name, team)| SessionInfo {
                name: name.to_string(),
                team: *team,
            })
            .collect();
        mux
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn session_names(&self) -> Vec<String> {
        self.state.lock().sessions.iter().map(|s| s.name.clone()).collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push(call);
    }
}

impl Multiplexer for FakeMux {
    fn list_sessions(&self) -> Result<Vec<SessionInfo>, TmuxError> {
        Ok(self.state.lock().sessions.clone())
    }

    fn has_session(&self, name: &str) -> Result<bool, TmuxError> {
        Ok(self.state.lock().sessions.iter().any(|s| s.name == name))
    }

    fn kill_session(&self, name: &str) -> Result<(), TmuxError> {
        self.record(Call::Kill(name.to_string()));
        let mut state = self.state.lock();
        if state.fail_kill_session {
            return Err(TmuxError::CommandFailed {
                command: "kill-session".into(),
                stderr: "server exited unexpectedly".into(),
            });
        }
        let before = state.sessions.len();
        state.sessions.retain(|s| s.name != name);
        if state.sessions.len() == before {
            return Err(TmuxError::CommandFailed {
                command: "kill-session".into(),
                stderr: format!("can't find session: {name}"),
            });
        }
        Ok(())
    }

    fn new_session(&self, name: &str, cwd: &Path) -> Result<(), TmuxError> {
        self.record(Call::New(name.to_string(), cwd.to_path_buf()));
        self.state.lock().sessions.push(SessionInfo {
            name: name.to_string(),
            team: false,
        });
        Ok(())
    }

    fn split_window(&self, target: &str, _cwd: &Path) -> Result<(), TmuxError> {
        self.record(Call::Split(target.to_string()));
        Ok(())
    }

    fn send_keys(&self, target: &str, keys: &str) -> Result<(), TmuxError> {
        self.record(Call::SendKeys(target.to_string(), keys.to_string()));
        let mut state = self.state.lock();
        if state.fail_send_keys {
            state.fail_send_keys = false;
            return Err(TmuxError::CommandFailed {
                command: "send-keys".into(),
                stderr: "pane died".into(),
            });
        }
        Ok(())
    }

    fn select_layout(&self, target: &str, layout: &str) -> Result<(), TmuxError> {
        self.record(Call::Layout(target.to_string(), layout.to_string()));
        Ok(())
    }

    fn tag_session(&self, name: &str) -> Result<(), TmuxError> {
        self.record(Call::Tag(name.to_string()));
        let mut state = self.state.lock();
        if let Some(session) = state.sessions.iter_mut().find(|s| s.name == name) {
            session.team = true;
        }
        Ok(())
    }

    fn attach(&self, name: &str) -> Result<(), TmuxError> {
        self.record(Call::Attach(name.to_string()));
        Ok(())
    }
}

/// Temp config home plus a fake multiplexer.
pub struct Harness {
    pub home: TempDir,
    pub mux: FakeMux,
    pub registry: OptionRegistry,
    pub vars: HashMap<String, String>,
}

impl Harness {
    pub fn new(mux: FakeMux) -> Self {
        Self {
            home: TempDir::new().expect("Failed to create temp dir"),
            mux,
            registry: option_registry(),
            vars: HashMap::new(),
        }
    }

    pub fn paths(&self) -> ConfigPaths {
        ConfigPaths::from_root(self.home.path())
    }

    /// Run `command`, returning the handler result and captured stdout.
    pub fn run(&self, command: Command) -> (anyhow::Result<()>, String) {
        let mut dispatcher = Dispatcher::new(
            &self.registry,
            self.mux.clone(),
            self.paths(),
            Vec::new(),
            self.vars.clone(),
        );
        let result = dispatcher.run(command);
        let out = String::from_utf8(dispatcher.into_output()).expect("utf-8 output");
        (result, out)
    }
}

pub fn raw_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Shared byte sink for captured log output.
#[derive(Debug, Clone, Default)]
pub struct SpyBuffer(Arc<Mutex<Vec<u8>>>);

impl SpyBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for SpyBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a debug-level subscriber, returning its result and the logs.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = SpyBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
