//! Content checksums of remote tarballs
//!
//! npm verifies downloads against `dist.shasum`, the hex SHA-1 of the
//! tarball bytes. The tarball is streamed through the hasher and never held
//! in memory as a whole.

#[cfg(test)]
use mockall::automock;

use futures::StreamExt;
use sha1::{Digest, Sha1};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Timeouts, USER_AGENT};
use crate::hosting::AuthOptions;

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to download {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Trait for computing the checksum of a tarball at a URL
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ChecksumComputer: Send + Sync {
    /// Downloads `url` with the given credentials and returns its shasum
    async fn shasum(&self, url: &str, auth: &AuthOptions) -> Result<String, ChecksumError>;
}

/// SHA-1 over the streamed response body
#[derive(Debug, Clone)]
pub struct TarballShasum {
    client: reqwest::Client,
}

impl TarballShasum {
    /// The body is hashed as it arrives, so only the gap between chunks is
    /// bounded (by `timeouts.read`), not the whole download.
    pub fn new(timeouts: Timeouts) -> Result<Self, ChecksumError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeouts.connect)
            .read_timeout(timeouts.read)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ChecksumComputer for TarballShasum {
    async fn shasum(&self, url: &str, auth: &AuthOptions) -> Result<String, ChecksumError> {
        debug!("GET: {}", url);

        let response = auth.apply(self.client.get(url)).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Tarball download returned status {}: {}", status, url);
            return Err(ChecksumError::Status {
                url: url.to_string(),
                status,
            });
        }

        let mut hasher = Sha1::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            hasher.update(&chunk?);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }
}
