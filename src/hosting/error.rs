use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostingError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to list repository tree at {tag}: {source}")]
    TreeFetch {
        tag: String,
        #[source]
        source: Box<HostingError>,
    },

    #[error("Unable to find package.json at {tag}")]
    ManifestNotFound { tag: String },

    #[error("Failed to fetch blob {blob_id}: {source}")]
    BlobFetch {
        blob_id: String,
        #[source]
        source: Box<HostingError>,
    },
}

impl HostingError {
    /// Whether the error means the requested object does not exist upstream
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            HostingError::NotFound(_) | HostingError::ManifestNotFound { .. }
        )
    }
}
