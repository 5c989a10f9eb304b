use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Main,
    Category,
    Source,
    Article,
    Search,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Main => "main",
            PageKind::Category => "category",
            PageKind::Source => "source",
            PageKind::Article => "article",
            PageKind::Search => "search",
        }
    }

    /// Pages whose body is a paginated article list.
    pub fn is_listing(&self) -> bool {
        matches!(self, PageKind::Main | PageKind::Category | PageKind::Source)
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "main" => Ok(PageKind::Main),
            "category" => Ok(PageKind::Category),
            "source" => Ok(PageKind::Source),
            "article" => Ok(PageKind::Article),
            "search" => Ok(PageKind::Search),
            other => Err(format!("Unknown page: {}", other)),
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category and source narrowing of the main news list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NewsFilter {
    pub category: Option<String>,
    pub source: Option<String>,
}

impl NewsFilter {
    pub fn new(category: Option<&str>, source: Option<&str>) -> Self {
        let present = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        Self {
            category: present(category),
            source: present(source),
        }
    }

    pub fn category(key: &str) -> Self {
        Self::new(Some(key), None)
    }

    pub fn source(key: &str) -> Self {
        Self::new(None, Some(key))
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.source.is_none()
    }
}

/// What the portal is showing: `{page, type, query, filter, offset}`.
///
/// Fields are private so the only way to build a state is through the
/// per-page constructors, which keep `type` present for category, source
/// and article pages and `query` present for search. Constructors start at
/// offset 0, so moving to another page or key always resets the offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NavigationState {
    page: PageKind,
    #[serde(rename = "type")]
    key: Option<String>,
    query: Option<String>,
    /// Only ever set on the main page.
    #[serde(default)]
    filter: NewsFilter,
    offset: usize,
}

impl NavigationState {
    pub fn main() -> Self {
        Self::default()
    }

    pub fn category(key: impl Into<String>) -> Self {
        Self::keyed(PageKind::Category, key.into())
    }

    pub fn source(key: impl Into<String>) -> Self {
        Self::keyed(PageKind::Source, key.into())
    }

    pub fn article(id: impl Into<String>) -> Self {
        Self::keyed(PageKind::Article, id.into())
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            page: PageKind::Search,
            key: None,
            query: Some(query.into()),
            filter: NewsFilter::default(),
            offset: 0,
        }
    }

    fn keyed(page: PageKind, key: String) -> Self {
        Self {
            page,
            key: Some(key),
            query: None,
            filter: NewsFilter::default(),
            offset: 0,
        }
    }

    /// Builds the state for `page`, returning `None` when the page needs a
    /// key or query that is missing or blank.
    pub fn for_page(page: PageKind, key: Option<&str>, query: Option<&str>) -> Option<Self> {
        let present = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        match page {
            PageKind::Main => Some(Self::main()),
            PageKind::Category | PageKind::Source | PageKind::Article => {
                present(key).map(|key| Self::keyed(page, key))
            }
            PageKind::Search => present(query).map(Self::search),
        }
    }

    /// Decodes a location query string such as `?page=category&type=tech`.
    /// Anything that does not describe a valid page decodes to `main`.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut page = None;
        let mut key = None;
        let mut id = None;
        let mut text = None;
        let mut category = None;
        let mut source = None;
        let mut offset = 0;

        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                "page" => page = Some(value.into_owned()),
                "type" => key = Some(value.into_owned()),
                "id" => id = Some(value.into_owned()),
                "query" => text = Some(value.into_owned()),
                "category" => category = Some(value.into_owned()),
                "source" => source = Some(value.into_owned()),
                "offset" => offset = value.parse().unwrap_or(0),
                _ => {}
            }
        }

        let page = match page.as_deref().map(str::parse::<PageKind>) {
            None => PageKind::Main,
            Some(Ok(page)) => page,
            Some(Err(e)) => {
                tracing::warn!("{}, showing main page", e);
                PageKind::Main
            }
        };
        let key = key.or(id);

        match Self::for_page(page, key.as_deref(), text.as_deref()) {
            Some(state) if page.is_listing() => state
                .with_filter(NewsFilter::new(category.as_deref(), source.as_deref()))
                .with_offset(offset),
            Some(state) => state,
            None => {
                tracing::warn!("Page {} is missing its parameters, showing main page", page);
                Self::main()
            }
        }
    }

    /// Encodes the state as a location query string, e.g. `?page=main`.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("page", self.page.as_str());
        if let Some(key) = &self.key {
            serializer.append_pair("type", key);
        }
        if let Some(query) = &self.query {
            serializer.append_pair("query", query);
        }
        if let Some(category) = &self.filter.category {
            serializer.append_pair("category", category);
        }
        if let Some(source) = &self.filter.source {
            serializer.append_pair("source", source);
        }
        if self.offset > 0 {
            serializer.append_pair("offset", &self.offset.to_string());
        }
        format!("?{}", serializer.finish())
    }

    /// Same page and target, different position in the list.
    pub fn with_offset(mut self, offset: usize) -> Self {
        if self.page.is_listing() {
            self.offset = offset;
        }
        self
    }

    /// Narrows the main page to `filter`, starting again from the first
    /// page. Other pages ignore filters.
    pub fn with_filter(mut self, filter: NewsFilter) -> Self {
        if self.page == PageKind::Main {
            self.filter = filter;
            self.offset = 0;
        }
        self
    }

    pub fn filter(&self) -> &NewsFilter {
        &self.filter
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    /// The `type` parameter: category key, source key or article id.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based page number of the offset for the given page size.
    pub fn page_number(&self, page_size: usize) -> usize {
        self.offset / page_size.max(1) + 1
    }

    /// True when both states show the same page and target, ignoring offset.
    pub fn same_target(&self, other: &NavigationState) -> bool {
        self.page == other.page && self.key == other.key && self.query == other.query && self.filter == other.filter
    }
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}
