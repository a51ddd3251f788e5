//! HTTP handlers for upload URL issuance.
//! Validation and authorization happen here; URL signing is delegated to the
//! configured `PresignPut` implementation.

use crate::{
    errors::AppError,
    models::upload::{UPLOAD_URL_TTL_SECS, UploadGrant, UploadRequest},
    state::AppState,
};
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use std::time::Duration;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

/// `POST /get-upload-url`
///
/// The body is read raw so that an absent or wrong `Content-Type` still
/// reaches JSON parsing and yields the same `Bad JSON` error.
pub async fn issue_upload_url(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::payload_too_large("Payload too large")
        } else {
            AppError::bad_request("Bad JSON")
        }
    })?;

    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| AppError::bad_request("Bad JSON"))?;

    let request = UploadRequest::from_json(&value)
        .ok_or_else(|| AppError::bad_request("username, password, filename required"))?;

    let authorized = request
        .password
        .as_deref()
        .is_some_and(|p| password_matches(p, &state.upload_password));
    if !authorized {
        warn!("rejected upload request for user `{}`", request.username);
        return Err(AppError::forbidden("Invalid password"));
    }

    let key = request.object_key(Utc::now().timestamp_millis());
    let url = state
        .presigner
        .presign_put(
            &state.bucket_name,
            &key,
            Duration::from_secs(UPLOAD_URL_TTL_SECS),
        )
        .await?;

    info!("issued upload URL for key `{}`", key);
    Ok((StatusCode::OK, Json(UploadGrant { url, key })))
}

/// Fallback for every unmatched path or method.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Same outcome as `provided == expected`, without an early exit on the
/// first differing byte.
fn password_matches(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    provided.len() == expected.len() && provided.ct_eq(expected).into()
}
