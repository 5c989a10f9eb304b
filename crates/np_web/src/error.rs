use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use np_core::{Error, ErrorKind, NavigationState};
use np_render::{render_error, Fragment};
use thiserror::Error;

/// A page that failed to load, answered with the in-place error fragment.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct PortalError {
    pub state: NavigationState,
    pub source: Error,
}

impl PortalError {
    pub fn new(state: NavigationState, source: Error) -> Self {
        Self { state, source }
    }

    pub fn status(&self) -> StatusCode {
        match self.source.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidQuery => StatusCode::BAD_REQUEST,
            ErrorKind::Network | ErrorKind::Parse => StatusCode::BAD_GATEWAY,
            ErrorKind::Other => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn fragment(&self) -> Fragment {
        render_error(&self.state, &self.source)
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        (self.status(), Html(self.fragment().into_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_error_kind() {
        let state = NavigationState::article("1");
        let status = |err| PortalError::new(state.clone(), err).status();
        assert_eq!(status(Error::NotFound("article 1".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(Error::InvalidQuery), StatusCode::BAD_REQUEST);
        assert_eq!(status(Error::Network("timeout".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(status(Error::Config("bad".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
