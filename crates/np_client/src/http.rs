use crate::config::ClientConfig;
use crate::wire;
use async_trait::async_trait;
use np_core::{validate_query, Article, ArticleFilter, ArticlePage, Error, NewsApi, Result};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// `NewsApi` over the backend's REST endpoints.
#[derive(Clone)]
pub struct HttpNewsApi {
    client: Arc<Client>,
    config: ClientConfig,
}

impl fmt::Debug for HttpNewsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpNewsApi")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.config.base_url.as_str())
            .finish()
    }
}

impl HttpNewsApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: Arc::new(builder.build()?),
            config,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Base URL extended with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base URL", self.config.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GETs `url` and returns the body. `missing` names the resource to
    /// report as `NotFound` on a 404; without it a 404 is a network error
    /// like any other non-2xx answer.
    async fn get_body(&self, url: Url, missing: Option<&str>) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(resource) = missing {
                return Err(Error::NotFound(resource.to_string()));
            }
        }
        if !status.is_success() {
            return Err(Error::Network(format!("HTTP {} from {}", status.as_u16(), url)));
        }
        Ok(response.text().await?)
    }

    async fn get_articles(&self, segments: &[&str]) -> Result<Vec<Article>> {
        let body = self.get_body(self.endpoint(segments)?, None).await?;
        wire::parse_articles(&body)
    }

    async fn get_names(&self, segments: &[&str]) -> Result<Vec<String>> {
        let body = self.get_body(self.endpoint(segments)?, None).await?;
        wire::parse(&body)
    }
}

#[async_trait]
impl NewsApi for HttpNewsApi {
    async fn fetch_articles(&self, filter: &ArticleFilter) -> Result<ArticlePage> {
        let mut url = self.endpoint(&["api", "articles"])?;
        let mut pairs = Vec::new();
        if let Some(limit) = filter.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(category) = &filter.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(source) = &filter.source {
            pairs.push(("source", source.clone()));
        }
        if let Some(offset) = filter.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let body = self.get_body(url, None).await?;
        wire::parse_article_page(&body)
    }

    async fn fetch_article_by_id(&self, id: &str) -> Result<Article> {
        let url = self.endpoint(&["api", "article", id])?;
        let body = self.get_body(url, Some(&format!("article {}", id))).await?;
        wire::parse_article(&body)
    }

    async fn search_articles(&self, query: &str) -> Result<Vec<Article>> {
        let query = validate_query(query)?;
        let mut url = self.endpoint(&["api", "search"])?;
        url.query_pairs_mut().append_pair("query", query);

        let body = self.get_body(url, None).await?;
        wire::parse_articles(&body)
    }

    async fn fetch_category(&self, key: &str) -> Result<Vec<Article>> {
        self.get_articles(&["api", "category", key]).await
    }

    async fn fetch_source(&self, key: &str) -> Result<Vec<Article>> {
        self.get_articles(&["api", "source", key]).await
    }

    async fn fetch_top_articles(&self) -> Result<Vec<Article>> {
        self.get_articles(&["api", "top-articles"]).await
    }

    async fn fetch_latest_news(&self) -> Result<Vec<Article>> {
        self.get_articles(&["api", "latest-news"]).await
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        self.get_names(&["api", "categories"]).await
    }

    async fn fetch_sources(&self) -> Result<Vec<String>> {
        self.get_names(&["api", "sources"]).await
    }
}
