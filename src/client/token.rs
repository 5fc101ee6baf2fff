//! Where the client finds its auth-token.
//!
//! The token is read again before every request, so a login or logout from
//! another process takes effect on the next call.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Fixed storage key of the auth-token.
pub const TOKEN_KEY: &str = "token";

const APP_DIR: &str = "inotebook";

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no configuration directory available on this platform")]
    NoStorageDir,
}

pub trait TokenSource: Send + Sync {
    /// Returns `Ok(None)` when no token is stored.
    fn token(&self) -> Result<Option<String>, TokenError>;
}

/// A token held in memory.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Result<Option<String>, TokenError> {
        Ok(Some(self.0.clone()))
    }
}

/// Token persisted as a file named [`TOKEN_KEY`] in a directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform configuration directory.
    pub fn default_location() -> Result<Self, TokenError> {
        let dir = dirs::config_dir().ok_or(TokenError::NoStorageDir)?;
        Ok(Self::new(dir.join(APP_DIR)))
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, token: &str) -> Result<(), TokenError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(), token.trim())?;
        tracing::debug!("auth-token saved to {}", self.path().display());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), TokenError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl TokenSource for FileTokenStore {
    fn token(&self) -> Result<Option<String>, TokenError> {
        match fs::read_to_string(self.path()) {
            Ok(token) => {
                let token = token.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
