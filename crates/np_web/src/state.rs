use np_core::NewsApi;
use np_nav::{load_menu, DEFAULT_PAGE_SIZE};
use np_render::Menu;
use std::sync::Arc;

pub struct AppState {
    pub api: Arc<dyn NewsApi>,
    pub page_size: usize,
    /// Backend location handed to browsers through `/api/config`.
    pub site_host: String,
}

impl AppState {
    pub fn new(api: Arc<dyn NewsApi>, site_host: impl Into<String>) -> Self {
        Self {
            api,
            page_size: DEFAULT_PAGE_SIZE,
            site_host: site_host.into(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub async fn menu(&self) -> Menu {
        load_menu(self.api.as_ref()).await
    }
}
