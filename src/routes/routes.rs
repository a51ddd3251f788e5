//! Defines the HTTP surface of the upload URL issuer.
//!
//! ## Structure
//! - `OPTIONS *`               — CORS preflight, answered by the CORS middleware
//! - `POST    /get-upload-url` — validate credentials and issue a pre-signed PUT URL
//! - anything else            — `404 Not found`
//!
//! Both middlewares wrap the fallback too, so every response carries
//! `Access-Control-Allow-Origin`.

use crate::{
    handlers::upload_handlers::{issue_upload_url, not_found},
    middleware::{cors::cors_middleware, logging::logging_middleware},
    state::AppState,
};
use axum::{Router, middleware, routing::post};

/// Build and return the router carrying `AppState` to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/get-upload-url",
            post(issue_upload_url).fallback(not_found),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(cors_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
