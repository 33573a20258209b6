//! Token storage: where the access/refresh pair lives between requests

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Storage for the JWT pair. One canonical key pair; the client never
/// inspects token contents, it only carries them.
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Current access token, if any.
    fn access(&self) -> Option<String>;

    /// Current refresh token, if any.
    fn refresh(&self) -> Option<String>;

    /// Store a new access token, and a refresh token when one was issued
    /// (login issues both; a refresh only replaces the access token).
    fn store(&self, access: &str, refresh: Option<&str>);

    /// Drop both tokens.
    fn clear(&self);
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Session {
    access: Option<String>,
    refresh: Option<String>,
}

/// In-process token store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Session>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, convenient in tests.
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        Self {
            session: Mutex::new(Session {
                access: Some(access.to_string()),
                refresh: Some(refresh.to_string()),
            }),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn access(&self) -> Option<String> {
        self.session.lock().unwrap().access.clone()
    }

    fn refresh(&self) -> Option<String> {
        self.session.lock().unwrap().refresh.clone()
    }

    fn store(&self, access: &str, refresh: Option<&str>) {
        let mut session = self.session.lock().unwrap();
        session.access = Some(access.to_string());
        if let Some(refresh) = refresh {
            session.refresh = Some(refresh.to_string());
        }
    }

    fn clear(&self) {
        *self.session.lock().unwrap() = Session::default();
    }
}

/// Token store backed by a JSON session file under the user's config
/// directory. The file is read once at construction; writes are
/// best-effort - a failed write keeps the in-process session working and
/// logs a warning.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    session: Mutex<Session>,
}

impl FileTokenStore {
    /// Open the session file at the default location
    /// (`<config dir>/horizon/session.json`).
    pub fn open_default() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::open(base.join("horizon").join("session.json"))
    }

    /// Open a session file at an explicit path.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = Self::load(&path).unwrap_or_default();
        Self {
            path,
            session: Mutex::new(session),
        }
    }

    fn load(path: &Path) -> Option<Session> {
        let raw = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
                None
            }
        }
    }

    fn persist(&self, session: &Session) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "Could not create session directory");
                return;
            }
        }
        match serde_json::to_string_pretty(session) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(&self.path, raw) {
                    tracing::warn!(path = %self.path.display(), error = %e, "Could not write session file");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Could not serialize session"),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn access(&self) -> Option<String> {
        self.session.lock().unwrap().access.clone()
    }

    fn refresh(&self) -> Option<String> {
        self.session.lock().unwrap().refresh.clone()
    }

    fn store(&self, access: &str, refresh: Option<&str>) {
        let mut session = self.session.lock().unwrap();
        session.access = Some(access.to_string());
        if let Some(refresh) = refresh {
            session.refresh = Some(refresh.to_string());
        }
        self.persist(&session);
    }

    fn clear(&self) {
        let mut session = self.session.lock().unwrap();
        *session = Session::default();
        self.persist(&session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryTokenStore::new();
        assert!(store.access().is_none());

        store.store("acc-1", Some("ref-1"));
        assert_eq!(store.access().as_deref(), Some("acc-1"));
        assert_eq!(store.refresh().as_deref(), Some("ref-1"));

        // Refresh path: access replaced, refresh kept.
        store.store("acc-2", None);
        assert_eq!(store.access().as_deref(), Some("acc-2"));
        assert_eq!(store.refresh().as_deref(), Some("ref-1"));

        store.clear();
        assert!(store.access().is_none());
        assert!(store.refresh().is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::open(&path);
        store.store("acc", Some("ref"));
        drop(store);

        let reopened = FileTokenStore::open(&path);
        assert_eq!(reopened.access().as_deref(), Some("acc"));
        assert_eq!(reopened.refresh().as_deref(), Some("ref"));

        reopened.clear();
        let cleared = FileTokenStore::open(&path);
        assert!(cleared.access().is_none());
        assert!(cleared.refresh().is_none());
    }

    #[test]
    fn corrupt_session_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::open(&path);
        assert!(store.access().is_none());
    }
}
