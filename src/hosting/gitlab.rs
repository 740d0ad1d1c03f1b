//! GitLab REST API implementation

use std::time::Duration;

use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{Timeouts, USER_AGENT};
use crate::encoding::encode_component;
use crate::hosting::HostingApi;
use crate::hosting::error::HostingError;
use crate::hosting::types::{ArchiveStream, AuthOptions, BlobId, RepositoryId, Tag};

/// Name of the manifest file looked up in the repository tree
const MANIFEST_FILE: &str = "package.json";

/// Response from `GET /projects/:id`
#[derive(Debug, Deserialize)]
struct Project {
    id: serde_json::Value,
}

/// Entry of `GET /projects/:id/repository/tags`
#[derive(Debug, Deserialize)]
struct GitLabTag {
    name: String,
    commit: GitLabCommit,
}

#[derive(Debug, Deserialize)]
struct GitLabCommit {
    id: String,
}

/// Entry of `GET /projects/:id/repository/tree`
#[derive(Debug, Deserialize)]
struct TreeEntry {
    id: String,
    name: String,
}

/// Hosting client for the GitLab API
#[derive(Debug, Clone)]
pub struct GitLabClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl GitLabClient {
    /// Creates a client for the API rooted at `base_url`
    ///
    /// `timeouts.request` bounds each JSON API call as a whole. Archive
    /// downloads may run longer, so they are bounded by `timeouts.read`
    /// between body chunks instead.
    pub fn new(base_url: &str, timeouts: Timeouts) -> Result<Self, HostingError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeouts.connect)
            .read_timeout(timeouts.read)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: timeouts.request,
        })
    }

    /// Archive download URL for a commit of the repository
    pub fn archive_url(&self, id: &RepositoryId, commit: &str) -> String {
        format!(
            "{}/projects/{}/repository/archive?sha={}",
            self.base_url,
            id,
            encode_component(commit)
        )
    }

    async fn get(&self, url: &str, auth: &AuthOptions) -> Result<reqwest::Response, HostingError> {
        debug!("GET: {}", url);

        let response = auth
            .apply(self.client.get(url))
            .timeout(self.request_timeout)
            .send()
            .await?;

        Ok(response)
    }

    /// Performs a GET and decodes a JSON body, failing on non-success statuses
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        auth: &AuthOptions,
    ) -> Result<T, HostingError> {
        let response = self.get(url, auth).await?;
        let status = response.status();

        if !status.is_success() {
            warn!("GitLab API returned status {}: {}", status, url);
            return Err(HostingError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitLab response from {}: {}", url, e);
            HostingError::InvalidResponse {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })
    }

    async fn list_tree(
        &self,
        id: &RepositoryId,
        tag: &str,
        auth: &AuthOptions,
    ) -> Result<Vec<TreeEntry>, HostingError> {
        let raw = format!("{}/projects/{}/repository/tree", self.base_url, id);
        let mut url = reqwest::Url::parse(&raw).map_err(|e| HostingError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut().append_pair("ref_name", tag);

        self.get_json(url.as_str(), auth).await
    }
}

#[async_trait::async_trait]
impl HostingApi for GitLabClient {
    async fn resolve_repository_id(
        &self,
        user: &str,
        repo: &str,
        auth: &AuthOptions,
    ) -> Result<RepositoryId, HostingError> {
        let path = format!("{}/{}", user, repo);
        let url = format!("{}/projects/{}", self.base_url, encode_component(&path));

        let project: Project = self.get_json(&url, auth).await.map_err(|e| match e {
            HostingError::Status { .. } => HostingError::NotFound(path.clone()),
            other => other,
        })?;

        RepositoryId::from_json(&project.id).ok_or_else(|| HostingError::InvalidResponse {
            url,
            reason: format!("unexpected project id {}", project.id),
        })
    }

    async fn list_tags(
        &self,
        id: &RepositoryId,
        auth: &AuthOptions,
    ) -> Result<Vec<Tag>, HostingError> {
        let url = format!("{}/projects/{}/repository/tags", self.base_url, id);
        let tags: Vec<GitLabTag> = self.get_json(&url, auth).await?;

        Ok(tags
            .into_iter()
            .map(|tag| {
                let tarball_url = self.archive_url(id, &tag.commit.id);
                Tag::new(tag.name, tarball_url)
            })
            .collect())
    }

    async fn find_manifest_blob(
        &self,
        id: &RepositoryId,
        tag: &str,
        auth: &AuthOptions,
    ) -> Result<BlobId, HostingError> {
        let entries = self
            .list_tree(id, tag, auth)
            .await
            .map_err(|e| HostingError::TreeFetch {
                tag: tag.to_string(),
                source: Box::new(e),
            })?;

        entries
            .into_iter()
            .find(|entry| entry.name == MANIFEST_FILE)
            .map(|entry| BlobId::new(entry.id))
            .ok_or_else(|| HostingError::ManifestNotFound {
                tag: tag.to_string(),
            })
    }

    async fn fetch_raw_blob(
        &self,
        id: &RepositoryId,
        blob: &BlobId,
        auth: &AuthOptions,
    ) -> Result<Bytes, HostingError> {
        let url = format!(
            "{}/projects/{}/repository/raw_blobs/{}",
            self.base_url,
            id,
            encode_component(blob.as_str())
        );

        let fetch = async {
            let response = self.get(&url, auth).await?;
            let status = response.status();

            if !status.is_success() {
                warn!("GitLab API returned status {}: {}", status, url);
                return Err(HostingError::Status {
                    url: url.clone(),
                    status,
                });
            }

            Ok::<Bytes, HostingError>(response.bytes().await?)
        };

        fetch.await.map_err(|e| HostingError::BlobFetch {
            blob_id: blob.to_string(),
            source: Box::new(e),
        })
    }

    async fn open_archive(
        &self,
        url: &str,
        auth: &AuthOptions,
    ) -> Result<ArchiveStream, HostingError> {
        debug!("GET: {}", url);

        let response = auth.apply(self.client.get(url)).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("GitLab archive returned status {}: {}", status, url);
            return Err(HostingError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(ArchiveStream {
            content_type,
            content_length: response.content_length(),
            body: response.bytes_stream().map_err(HostingError::from).boxed(),
        })
    }
}
