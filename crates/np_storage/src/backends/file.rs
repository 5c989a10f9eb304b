use crate::{SearchSession, SearchSessionStore};
use async_trait::async_trait;
use np_core::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Session store kept as a JSON file, so a terminal session can pick up the
/// last search after a restart.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SearchSessionStore for FileSessionStore {
    async fn save(&self, session: SearchSession) -> Result<()> {
        let body = serde_json::to_vec(&session)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }

    /// A missing file is an empty session; so is a corrupt one, which is
    /// logged and otherwise ignored.
    async fn load(&self) -> Result<Option<SearchSession>> {
        let body = match tokio::fs::read(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&body) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable search session {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
