pub mod api;
pub mod error;
pub mod navigation;
pub mod types;

pub use api::{validate_query, ArticleFilter, ArticlePage, NewsApi};
pub use error::{Error, ErrorKind, Result};
pub use navigation::{NavigationState, NewsFilter, PageKind};
pub use types::{Article, Category, SourceKind};

pub mod prelude {
    pub use crate::api::{ArticleFilter, ArticlePage, NewsApi};
    pub use crate::navigation::{NavigationState, NewsFilter, PageKind};
    pub use crate::types::Article;
    pub use crate::{Error, Result};
}
