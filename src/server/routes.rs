//! Registry routes
//!
//! - `GET /{package}`: package document
//! - `GET /{package}/{version}`: single version
//! - `GET /{package}/{tag}/tarball`: tarball passthrough

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use tracing::{debug, info};

use crate::registry::{ModuleSpec, PackageDocument, TarballUrls, VersionMetadata};
use crate::server::AppState;
use crate::server::auth::auth_from_headers;
use crate::server::error::ApiError;

const DEFAULT_TARBALL_TYPE: &str = "application/octet-stream";

/// Base for tarball links: the configured public URL, else the Host header
fn tarball_urls(state: &AppState, headers: &HeaderMap) -> TarballUrls {
    if let Some(public) = state.public_url.as_deref() {
        return TarballUrls::new(public);
    }

    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    TarballUrls::new(&format!("http://{}", host))
}

pub async fn package_document(
    State(state): State<AppState>,
    Path(package): Path<String>,
    headers: HeaderMap,
) -> Result<Json<PackageDocument>, ApiError> {
    let spec = ModuleSpec::parse(&package)?;
    debug!("details for {}/{}", spec.user, spec.repo);

    let auth = auth_from_headers(&headers, state.default_token.as_deref());
    let urls = tarball_urls(&state, &headers);
    let document = state.resolver.resolve_all(&spec, &urls, &auth).await?;

    info!(
        "Served {} ({} versions)",
        spec.name,
        document.versions.len()
    );
    Ok(Json(document))
}

pub async fn version_metadata(
    State(state): State<AppState>,
    Path((package, version)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<VersionMetadata>, ApiError> {
    let spec = ModuleSpec::parse(&package)?;
    debug!("details for {}/{}@{}", spec.user, spec.repo, version);

    let auth = auth_from_headers(&headers, state.default_token.as_deref());
    let urls = tarball_urls(&state, &headers);
    let metadata = state
        .resolver
        .resolve_one(&spec, &version, &urls, &auth)
        .await?;

    Ok(Json(metadata))
}

/// Streams the archive body as it arrives from GitLab
///
/// An upstream error mid-body aborts the response, so the client sees a
/// broken transfer rather than a short tarball.
pub async fn tarball(
    State(state): State<AppState>,
    Path((package, tag)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let spec = ModuleSpec::parse(&package)?;
    debug!("tarball for {}/{}@{}", spec.user, spec.repo, tag);

    let auth = auth_from_headers(&headers, state.default_token.as_deref());
    let archive = state.gateway.stream_tarball(&spec, &tag, &auth).await?;

    let content_type = archive
        .content_type
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_TARBALL_TYPE));

    let mut response = Body::from_stream(archive.body).into_response();
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    if let Some(length) = archive.content_length {
        response
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from(length));
    }

    Ok(response)
}
