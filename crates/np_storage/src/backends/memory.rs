use crate::{SearchSession, SearchSessionStore};
use async_trait::async_trait;
use np_core::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Session store living as long as the process, like a browser tab's
/// session storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<RwLock<Option<SearchSession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchSessionStore for MemorySessionStore {
    async fn save(&self, session: SearchSession) -> Result<()> {
        tracing::debug!("Saving search session for {:?} ({} results)", session.query, session.results.len());
        *self.session.write().await = Some(session);
        Ok(())
    }

    async fn load(&self) -> Result<Option<SearchSession>> {
        Ok(self.session.read().await.clone())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use np_core::Article;

    #[tokio::test]
    async fn test_load_before_save_is_empty() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load_returns_exactly_what_was_saved() {
        let store = MemorySessionStore::new();
        let results = vec![
            Article::new("1", "Первая").with_date(Utc::now()),
            Article::new("2", "Вторая").with_summary("кратко"),
        ];
        store.save(SearchSession::new("новости", results.clone())).await.unwrap();

        let session = store.load().await.unwrap().unwrap();
        assert_eq!(session.query, "новости");
        assert_eq!(session.results, results);
    }

    #[tokio::test]
    async fn test_next_search_overwrites_and_clones_share_state() {
        let store = MemorySessionStore::new();
        let tab = store.clone();
        store.save(SearchSession::new("first", vec![Article::new("1", "a")])).await.unwrap();
        tab.save(SearchSession::new("second", Vec::new())).await.unwrap();

        let session = store.load().await.unwrap().unwrap();
        assert_eq!(session, SearchSession::new("second", Vec::new()));

        store.clear().await.unwrap();
        assert_eq!(tab.load().await.unwrap(), None);
    }
}
