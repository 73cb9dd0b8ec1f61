//! Persisted token storage.
//!
//! The browser build of the original application kept the session token in
//! localStorage; this is the same contract behind a trait so the session
//! manager can be tested with an in-memory store.

use std::fs;
use std::path::PathBuf;

/// Where the session token survives between application runs.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, token: &str);
    fn clear(&mut self);
}

/// Volatile store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: Option<String>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn save(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}

/// File-backed store. IO failures are logged and otherwise swallowed: a
/// token that fails to persist only costs the user a re-login.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|contents| contents.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    fn save(&mut self, token: &str) {
        if let Err(error) = fs::write(&self.path, token) {
            tracing::warn!("failed to persist session token: {}", error);
        }
    }

    fn clear(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => tracing::warn!("failed to clear session token: {}", error),
        }
    }
}
