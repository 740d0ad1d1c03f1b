//! Values exchanged with the hosting API

use std::fmt;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::hosting::error::HostingError;

/// Header GitLab reads the access token from
pub const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Credentials forwarded to the hosting API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthOptions {
    pub token: Option<String>,
}

impl AuthOptions {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Attaches the token header when a token is present
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }
}

/// Opaque project identifier assigned by the hosting API
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId(String);

impl RepositoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// GitLab returns numeric ids; string ids are accepted as-is.
    pub(crate) fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            serde_json::Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tag together with the archive URL of the commit it points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub tarball_url: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, tarball_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tarball_url: tarball_url.into(),
        }
    }
}

/// Identifier of a file object in the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobId(String);

impl BlobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of an archive download that has not been read yet
pub struct ArchiveStream {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: BoxStream<'static, Result<Bytes, HostingError>>,
}

impl fmt::Debug for ArchiveStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveStream")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
