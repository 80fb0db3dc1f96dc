//! HTTP request handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::{info, warn};

use super::error::ApiError;
use crate::app::AppContext;
use crate::domain::FeedRequest;
use crate::validate;

const INDEX_HTML: &str = include_str!("index.html");
const FEED_CONTENT_TYPE: &str = "application/xml";

/// Shared application state
pub type AppState = Arc<AppContext>;

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub url: Option<String>,
    pub item: Option<String>,
    pub title: Option<String>,
}

/// Landing page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness check
pub async fn health() -> &'static str {
    "ok"
}

/// Raw page preview with absolute asset URLs and the selector picker
pub async fn preview(
    State(state): State<AppState>,
    Query(params): Query<PreviewParams>,
) -> Result<Html<String>, ApiError> {
    let url = non_empty(params.url).ok_or(ApiError::BadRequest("Missing URL"))?;
    if !validate::validate(&url) {
        return Err(ApiError::BadRequest("Invalid URL"));
    }

    match state.preview(&url).await {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            warn!("Preview of {} failed: {}", url, e);
            Err(ApiError::Preview(e))
        }
    }
}

/// Generate (or serve from cache) the RSS feed for a page
pub async fn feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Response, ApiError> {
    let (Some(url), Some(item), Some(title)) = (
        non_empty(params.url),
        non_empty(params.item),
        non_empty(params.title),
    ) else {
        return Err(ApiError::BadRequest("Missing parameters"));
    };

    if !validate::validate(&url) {
        return Err(ApiError::BadRequest("Invalid URL"));
    }

    let request = FeedRequest::new(url, item, title);
    match state.feed(&request).await {
        Ok(body) => {
            info!("Served feed for {} ({} bytes)", request.url, body.len());
            Ok(([(CONTENT_TYPE, FEED_CONTENT_TYPE)], body).into_response())
        }
        Err(e) => {
            warn!("Feed generation for {} failed: {}", request.url, e);
            Err(ApiError::GenerationFailure(e))
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
