pub mod config;
pub mod http;
pub mod memory;
pub mod wire;

pub use config::{ClientConfig, SiteConfig};
pub use http::HttpNewsApi;
pub use memory::MemoryNewsApi;

pub mod prelude {
    pub use super::config::{ClientConfig, SiteConfig};
    pub use super::http::HttpNewsApi;
    pub use super::memory::MemoryNewsApi;
    pub use np_core::{Article, Error, NewsApi, Result};
}
