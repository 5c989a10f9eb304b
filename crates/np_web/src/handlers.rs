use crate::{AppState, PortalError};
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use np_client::SiteConfig;
use np_core::NavigationState;
use np_nav::load_page;
use np_render::{render, render_document, render_loading, Masthead};
use std::sync::Arc;
use tracing::{debug, warn};

fn decode(query: Option<String>) -> NavigationState {
    NavigationState::from_query(query.as_deref().unwrap_or_default())
}

/// Full page for `?page=...`, with a failed load rendered in place.
pub async fn document(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let nav = decode(query);
    debug!("GET / {}", nav);
    let (loaded, menu) = tokio::join!(load_page(state.api.as_ref(), &nav, state.page_size), state.menu());
    let (status, content) = match loaded {
        Ok(view) => (StatusCode::OK, render(&view)),
        Err(e) => {
            warn!("Failed to load {}: {}", nav, e);
            let err = PortalError::new(nav.clone(), e);
            (err.status(), err.fragment())
        }
    };
    let html = render_document(&nav, &menu, &Masthead::today(), &content);
    (status, Html(html)).into_response()
}

/// Only the content fragment, for clients that swap it in themselves.
pub async fn fragment(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PortalError> {
    let nav = decode(query);
    match load_page(state.api.as_ref(), &nav, state.page_size).await {
        Ok(view) => Ok(Html(render(&view).into_string())),
        Err(e) => {
            warn!("Failed to load fragment {}: {}", nav, e);
            Err(PortalError::new(nav, e))
        }
    }
}

pub async fn loading(RawQuery(query): RawQuery) -> Html<String> {
    Html(render_loading(&decode(query)).into_string())
}

pub async fn site_config(State(state): State<Arc<AppState>>) -> Json<SiteConfig> {
    Json(SiteConfig {
        site_host: state.site_host.clone(),
    })
}

pub async fn health() -> &'static str {
    "ok"
}
