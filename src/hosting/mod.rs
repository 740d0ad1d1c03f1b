//! Source-control hosting layer
//!
//! Everything the proxy needs from GitLab goes through the [`HostingApi`]
//! trait: resolving a project to its id, listing tags, reading
//! `package.json` at a tag, and opening an archive download.
//!
//! Reading the manifest is a two-stage protocol. The repository tree at the
//! tag is scanned for `package.json` to obtain its blob id, then the raw blob
//! is fetched. Each stage has its own error variant so a failure can be
//! attributed to the right call.
//!
//! # Modules
//!
//! - [`error`]: Error type shared by all hosting calls
//! - [`gitlab`]: GitLab REST implementation
//! - [`types`]: Tags, ids, credentials and archive streams

#[cfg(test)]
use mockall::automock;

pub mod error;
pub mod gitlab;
pub mod types;

use bytes::Bytes;

pub use error::HostingError;
pub use gitlab::GitLabClient;
pub use types::{ArchiveStream, AuthOptions, BlobId, RepositoryId, Tag};

/// Trait for reading repositories from the hosting API
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait HostingApi: Send + Sync {
    /// Resolves `user/repo` to the id used by every other call
    ///
    /// Any non-success status is reported as [`HostingError::NotFound`].
    async fn resolve_repository_id(
        &self,
        user: &str,
        repo: &str,
        auth: &AuthOptions,
    ) -> Result<RepositoryId, HostingError>;

    /// Lists tags in the order the hosting API returns them
    async fn list_tags(
        &self,
        id: &RepositoryId,
        auth: &AuthOptions,
    ) -> Result<Vec<Tag>, HostingError>;

    /// Finds the blob id of `package.json` in the tree at `tag`
    async fn find_manifest_blob(
        &self,
        id: &RepositoryId,
        tag: &str,
        auth: &AuthOptions,
    ) -> Result<BlobId, HostingError>;

    /// Fetches the raw content of a blob
    async fn fetch_raw_blob(
        &self,
        id: &RepositoryId,
        blob: &BlobId,
        auth: &AuthOptions,
    ) -> Result<Bytes, HostingError>;

    /// Fetches the bytes of `package.json` at `tag`
    async fn fetch_manifest_bytes(
        &self,
        id: &RepositoryId,
        tag: &str,
        auth: &AuthOptions,
    ) -> Result<Bytes, HostingError> {
        let blob = self.find_manifest_blob(id, tag, auth).await?;
        self.fetch_raw_blob(id, &blob, auth).await
    }

    /// Opens an archive URL without reading its body
    async fn open_archive(
        &self,
        url: &str,
        auth: &AuthOptions,
    ) -> Result<ArchiveStream, HostingError>;
}
