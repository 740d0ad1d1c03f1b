//! Tarball passthrough
//!
//! Clients download tarballs from this service; the archive is requested
//! from GitLab with the client's credentials and the body is handed back as
//! a stream without being buffered.

use std::sync::Arc;

use tracing::debug;

use crate::hosting::{ArchiveStream, AuthOptions, HostingApi};
use crate::registry::error::ResolveError;
use crate::registry::module_spec::ModuleSpec;
use crate::registry::resolver::module_tags;

pub struct TarballGateway {
    hosting: Arc<dyn HostingApi>,
}

impl TarballGateway {
    pub fn new(hosting: Arc<dyn HostingApi>) -> Self {
        Self { hosting }
    }

    /// Opens the archive of the tag named exactly `tag`
    ///
    /// Tags are listed again for every call. An unknown tag fails before
    /// any archive request is made.
    pub async fn stream_tarball(
        &self,
        spec: &ModuleSpec,
        tag: &str,
        auth: &AuthOptions,
    ) -> Result<ArchiveStream, ResolveError> {
        let (_, tags) = module_tags(self.hosting.as_ref(), spec, auth).await?;

        let Some(found) = tags.into_iter().find(|t| t.name == tag) else {
            return Err(ResolveError::TagNotFound {
                name: spec.name.clone(),
                tag: tag.to_string(),
            });
        };

        debug!("Proxy tarball {} -> {}", tag, found.tarball_url);

        self.hosting
            .open_archive(&found.tarball_url, auth)
            .await
            .map_err(|source| ResolveError::Archive {
                tag: found.name,
                source,
            })
    }
}
