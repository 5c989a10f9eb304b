use async_trait::async_trait;
use np_core::{Article, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

pub mod backends;

pub use backends::*;

/// The last search and its results, kept so that returning to the search
/// page does not fetch again.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchSession {
    pub query: String,
    pub results: Vec<Article>,
}

impl SearchSession {
    pub fn new(query: impl Into<String>, results: Vec<Article>) -> Self {
        Self {
            query: query.into(),
            results,
        }
    }
}

/// Holds a single search session; each `save` replaces the previous one.
#[async_trait]
pub trait SearchSessionStore: Send + Sync {
    async fn save(&self, session: SearchSession) -> Result<()>;

    /// `None` until something has been saved.
    async fn load(&self) -> Result<Option<SearchSession>>;

    async fn clear(&self) -> Result<()>;
}

pub fn create_store(kind: &str, path: Option<PathBuf>) -> Result<Arc<dyn SearchSessionStore>> {
    match (kind, path) {
        ("memory", _) => Ok(Arc::new(MemorySessionStore::new())),
        ("file", Some(path)) => Ok(Arc::new(FileSessionStore::new(path))),
        ("file", None) => Err(Error::Config("file session store needs a path".to_string())),
        (other, _) => Err(Error::Config(format!("unknown session store: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{SearchSession, SearchSessionStore};
}
