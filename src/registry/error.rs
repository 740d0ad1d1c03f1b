use thiserror::Error;

use crate::checksum::ChecksumError;
use crate::hosting::HostingError;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid package name: {0}")]
    InvalidName(String),

    /// Repository id resolution failed. The cause is logged where it happens.
    #[error("Unable to get tags for repo {user}/{repo}")]
    Tags {
        user: String,
        repo: String,
        #[source]
        source: HostingError,
    },

    #[error(transparent)]
    Hosting(#[from] HostingError),

    #[error("No versions published for {0}")]
    NoVersions(String),

    #[error("Version {version} not found for {name} ({matches} matching tags)")]
    VersionNotFound {
        name: String,
        version: String,
        matches: usize,
    },

    #[error("Tag {tag} not found for {name}")]
    TagNotFound { name: String, tag: String },

    #[error("Failed to compute shasum for tag {tag}: {source}")]
    Checksum {
        tag: String,
        #[source]
        source: ChecksumError,
    },

    #[error("Failed to fetch package.json for tag {tag}: {source}")]
    Manifest {
        tag: String,
        #[source]
        source: HostingError,
    },

    #[error("Invalid package.json at tag {tag}: {source}")]
    InvalidManifest {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to open tarball for tag {tag}: {source}")]
    Archive {
        tag: String,
        #[source]
        source: HostingError,
    },
}

impl ResolveError {
    /// Whether the error should be reported as a missing package or version
    pub fn is_not_found(&self) -> bool {
        match self {
            ResolveError::InvalidName(_)
            | ResolveError::Tags { .. }
            | ResolveError::NoVersions(_)
            | ResolveError::VersionNotFound { .. }
            | ResolveError::TagNotFound { .. } => true,
            ResolveError::Manifest { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
