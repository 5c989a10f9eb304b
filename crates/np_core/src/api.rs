use async_trait::async_trait;
use crate::navigation::NewsFilter;
use crate::types::Article;
use crate::{Error, Result};

/// Optional filters for `GET /api/articles`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub offset: Option<usize>,
}

impl ArticleFilter {
    pub fn page(limit: usize, offset: usize) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Applies the main-page filter on top of this one.
    pub fn with_filter(mut self, filter: &NewsFilter) -> Self {
        if let Some(category) = &filter.category {
            self = self.with_category(category.as_str());
        }
        if let Some(source) = &filter.source {
            self = self.with_source(source.as_str());
        }
        self
    }
}

/// One page of articles; `total` is known only when the backend reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub total: Option<usize>,
}

impl From<Vec<Article>> for ArticlePage {
    fn from(articles: Vec<Article>) -> Self {
        Self { articles, total: None }
    }
}

/// The read-only article API the portal consumes.
///
/// Implementations hand out articles that are already normalized: ids are
/// plain strings and dates are parsed.
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// Articles matching `filter`, most recent first
    async fn fetch_articles(&self, filter: &ArticleFilter) -> Result<ArticlePage>;

    /// A single article; `Error::NotFound` when the backend answers 404
    async fn fetch_article_by_id(&self, id: &str) -> Result<Article>;

    /// Full-text search; `Error::InvalidQuery` for a blank query, without a request
    async fn search_articles(&self, query: &str) -> Result<Vec<Article>>;

    async fn fetch_category(&self, key: &str) -> Result<Vec<Article>>;

    async fn fetch_source(&self, key: &str) -> Result<Vec<Article>>;

    /// Articles featured in the digest
    async fn fetch_top_articles(&self) -> Result<Vec<Article>>;

    async fn fetch_latest_news(&self) -> Result<Vec<Article>>;

    async fn fetch_categories(&self) -> Result<Vec<String>>;

    async fn fetch_sources(&self) -> Result<Vec<String>>;
}

/// Trims a search query, rejecting blank input.
pub fn validate_query(query: &str) -> Result<&str> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::InvalidQuery);
    }
    Ok(query)
}
