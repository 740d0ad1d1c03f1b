//! Credential extraction from inbound requests

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::hosting::AuthOptions;
use crate::hosting::types::TOKEN_HEADER;

/// Picks the token to forward to GitLab
///
/// npm sends `Authorization: Bearer <token>` for a configured `_authToken`.
/// A raw `PRIVATE-TOKEN` header is accepted as well. Without either, the
/// configured default token (if any) is used.
pub fn auth_from_headers(headers: &HeaderMap, default_token: Option<&str>) -> AuthOptions {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            v.strip_prefix("Bearer ")
                .or_else(|| v.strip_prefix("bearer "))
        })
        .map(str::trim);

    let private = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim);

    let token = bearer
        .or(private)
        .filter(|t| !t.is_empty())
        .or(default_token)
        .map(str::to_string);

    AuthOptions::new(token)
}
