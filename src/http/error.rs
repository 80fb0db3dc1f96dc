use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::app::SiteFeedError;

/// Errors as reported to HTTP clients, as plain text.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid client input; never reaches the cache or browser
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Preview Error: {0}")]
    Preview(SiteFeedError),

    /// Any failure on the scrape path
    #[error("Feed generation failed: {0}")]
    GenerationFailure(SiteFeedError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Preview(SiteFeedError::Validation(_))
            | ApiError::GenerationFailure(SiteFeedError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Preview(_) | ApiError::GenerationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_message_is_verbatim() {
        let err = ApiError::BadRequest("Missing parameters");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing parameters");
    }

    #[test]
    fn test_generation_failure_wraps_cause() {
        let err = ApiError::GenerationFailure(SiteFeedError::Navigation("timed out".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Feed generation failed: Navigation failed: timed out");
    }

    #[test]
    fn test_preview_failure_wraps_cause() {
        let err = ApiError::Preview(SiteFeedError::Fetch("dns error".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Preview Error: Fetch failed: dns error");
    }

    #[test]
    fn test_validation_inside_wrappers_is_client_fault() {
        let err = ApiError::GenerationFailure(SiteFeedError::Validation("blocked host".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
