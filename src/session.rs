use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{FolioError, Result};

/// Signed-in session persisted next to the config file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub email: String,
    /// Unix seconds after which the token is no longer accepted.
    pub expires_at: u64,
}

impl Session {
    pub fn new(access_token: String, email: String, expires_in: u64) -> Self {
        Self {
            access_token,
            email,
            expires_at: now_secs() + expires_in,
        }
    }

    pub fn is_expired(&self) -> bool {
        now_secs() >= self.expires_at
    }

    /// Load the stored session, ignoring missing, unreadable or expired files.
    pub fn load() -> Option<Self> {
        let path = Self::session_path().ok()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let session: Self = serde_json::from_str(&contents).ok()?;

        if session.is_expired() {
            return None;
        }

        Some(session)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::session_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FolioError::ConfigWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| FolioError::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Remove the stored session. Returns false if there was none.
    pub fn clear() -> Result<bool> {
        let path = Self::session_path()?;
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        Ok(true)
    }

    fn session_path() -> Result<PathBuf> {
        Config::config_path().map(|p| p.with_file_name("session.json"))
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}
