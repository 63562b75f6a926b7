use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::Session;
use crate::utils::DomuError;

/// Where a session lives between process runs
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, DomuError>;
    fn save(&self, session: &Session) -> Result<(), DomuError>;
    fn clear(&self) -> Result<(), DomuError>;
}

/// Keeps the session for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Option<Session>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Session>, DomuError> {
        Ok(self.session.lock().clone())
    }

    fn save(&self, session: &Session) -> Result<(), DomuError> {
        *self.session.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), DomuError> {
        *self.session.lock() = None;
        Ok(())
    }
}

/// Persists the session as TOML, readable by the owner only
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Session>, DomuError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let session = toml::from_str(&content).map_err(|e| {
            DomuError::SessionError(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), DomuError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(session)
            .map_err(|e| DomuError::SessionError(e.to_string()))?;
        // Permissions are narrowed before the token is written
        let mut file = open_private(&self.path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    fn clear(&self) -> Result<(), DomuError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Truncate or create `path` readable by the owner only
#[cfg(unix)]
fn open_private(path: &Path) -> Result<File, DomuError> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; an older file may be wider
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> Result<File, DomuError> {
    Ok(OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(
            "abc",
            User {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                role: Role::Owner,
                email: "ana@domu.cl".to_string(),
            },
        )
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("nested").join("session.toml"));

        assert_eq!(store.load().unwrap(), None);

        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("session.toml"));
        store.save(&session()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_world_readable_file_is_narrowed() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        fs::write(&path, "stale").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(&path);
        store.save(&session()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap(), Some(session()));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        fs::write(&path, "token = ").unwrap();

        let store = FileTokenStore::new(path);
        assert!(matches!(store.load(), Err(DomuError::SessionError(_))));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
