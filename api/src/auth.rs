use crate::{errors::ApiError, states::AppState};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use subtle::ConstantTimeEq;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

/// Pull the caller's key from the `x-api-key` header, falling back to the
/// `api_key` query parameter.
pub fn extract_api_key(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| {
            Query::<ApiKeyQuery>::try_from_uri(uri)
                .ok()
                .and_then(|Query(q)| q.api_key)
        })
}

pub fn validate_api_key(headers: &HeaderMap, uri: &Uri, secret: &str) -> Result<(), ApiError> {
    let provided = extract_api_key(headers, uri).ok_or(ApiError::Unauthorized)?;

    if bool::from(provided.as_bytes().ct_eq(secret.as_bytes())) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Middleware guarding the JSON post routes.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if let Err(err) = validate_api_key(request.headers(), request.uri(), &state.api_key) {
        return err.into_response();
    }

    next.run(request).await
}
