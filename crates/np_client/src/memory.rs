use crate::wire;
use async_trait::async_trait;
use np_core::{validate_query, Article, ArticleFilter, ArticlePage, Error, NewsApi, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

const TOP_LIMIT: usize = 5;
const LATEST_LIMIT: usize = 10;
const LIST_LIMIT: usize = 10;
const SEARCH_LIMIT: usize = 20;

/// `NewsApi` served from a fixed set of articles, most recent first.
///
/// Mirrors what the backend answers for each endpoint, which makes it usable
/// both for offline portals (`np serve --fixtures`) and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryNewsApi {
    articles: Arc<Vec<Article>>,
}

impl MemoryNewsApi {
    pub fn new(mut articles: Vec<Article>) -> Self {
        articles.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));
        Self {
            articles: Arc::new(articles),
        }
    }

    /// Loads a JSON array in the backend's wire format.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(Self::new(wire::parse_articles(body)?))
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let body = tokio::fs::read_to_string(path).await?;
        Self::from_json(&body)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    fn take_where<F>(&self, limit: usize, predicate: F) -> Vec<Article>
    where
        F: Fn(&Article) -> bool,
    {
        self.articles.iter().filter(|a| predicate(a)).take(limit).cloned().collect()
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Article) -> Option<&String>,
    {
        self.articles
            .iter()
            .filter_map(|a| field(a).cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn matches_text(article: &Article, needle: &str) -> bool {
    [Some(&article.title), article.text.as_ref(), article.summary.as_ref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

#[async_trait]
impl NewsApi for MemoryNewsApi {
    async fn fetch_articles(&self, filter: &ArticleFilter) -> Result<ArticlePage> {
        let matching: Vec<&Article> = self
            .articles
            .iter()
            .filter(|a| filter.category.is_none() || a.category == filter.category)
            .filter(|a| filter.source.is_none() || a.source == filter.source)
            .collect();
        let total = matching.len();
        let articles = matching
            .into_iter()
            .skip(filter.offset.unwrap_or(0))
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(ArticlePage {
            articles,
            total: Some(total),
        })
    }

    async fn fetch_article_by_id(&self, id: &str) -> Result<Article> {
        self.articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("article {}", id)))
    }

    async fn search_articles(&self, query: &str) -> Result<Vec<Article>> {
        let needle = validate_query(query)?.to_lowercase();
        Ok(self.take_where(SEARCH_LIMIT, |a| matches_text(a, &needle)))
    }

    async fn fetch_category(&self, key: &str) -> Result<Vec<Article>> {
        Ok(self.take_where(LIST_LIMIT, |a| a.category.as_deref() == Some(key)))
    }

    async fn fetch_source(&self, key: &str) -> Result<Vec<Article>> {
        Ok(self.take_where(LIST_LIMIT, |a| a.source.as_deref() == Some(key)))
    }

    async fn fetch_top_articles(&self) -> Result<Vec<Article>> {
        Ok(self.take_where(TOP_LIMIT, |_| true))
    }

    async fn fetch_latest_news(&self) -> Result<Vec<Article>> {
        Ok(self.take_where(LATEST_LIMIT, |_| true))
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        Ok(self.distinct(|a| a.category.as_ref()))
    }

    async fn fetch_sources(&self) -> Result<Vec<String>> {
        Ok(self.distinct(|a| a.source.as_ref()))
    }
}
