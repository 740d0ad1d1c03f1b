//! Version resolution
//!
//! Turns the tags of a GitLab project into registry metadata. Each tag needs
//! two remote calls (tarball shasum and `package.json`), and tags are handled
//! strictly one after another in the order GitLab lists them.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::checksum::ChecksumComputer;
use crate::hosting::{AuthOptions, HostingApi, RepositoryId, Tag};
use crate::registry::document::{Manifest, PackageDocument, ResolvedVersion, VersionMetadata};
use crate::registry::error::ResolveError;
use crate::registry::module_spec::ModuleSpec;
use crate::registry::urls::TarballUrls;

/// Version string of a tag: a single leading `v` is dropped
pub fn version_from_tag(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Tag name a version request must match exactly
pub fn tag_for_version(version: &str) -> String {
    format!("v{}", version)
}

/// Resolves the project id and lists its tags
///
/// Nothing is reused between requests; every call goes to the hosting API.
pub(crate) async fn module_tags(
    hosting: &dyn HostingApi,
    spec: &ModuleSpec,
    auth: &AuthOptions,
) -> Result<(RepositoryId, Vec<Tag>), ResolveError> {
    let id = hosting
        .resolve_repository_id(&spec.user, &spec.repo, auth)
        .await
        .map_err(|e| {
            warn!(
                "Failed to resolve repository id for {}/{}: {}",
                spec.user, spec.repo, e
            );
            ResolveError::Tags {
                user: spec.user.clone(),
                repo: spec.repo.clone(),
                source: e,
            }
        })?;

    let tags = hosting.list_tags(&id, auth).await?;
    debug!("{} tags for {} (project {})", tags.len(), spec.name, id);

    Ok((id, tags))
}

/// Assembles registry metadata from tags, manifests and tarball checksums
pub struct VersionResolver {
    hosting: Arc<dyn HostingApi>,
    checksums: Arc<dyn ChecksumComputer>,
}

impl VersionResolver {
    pub fn new(hosting: Arc<dyn HostingApi>, checksums: Arc<dyn ChecksumComputer>) -> Self {
        Self { hosting, checksums }
    }

    /// Builds the full package document with one entry per tag
    ///
    /// `dist-tags.latest` is the version of the first tag GitLab returns,
    /// which is not necessarily the highest version.
    pub async fn resolve_all(
        &self,
        spec: &ModuleSpec,
        urls: &TarballUrls,
        auth: &AuthOptions,
    ) -> Result<PackageDocument, ResolveError> {
        let (id, tags) = module_tags(self.hosting.as_ref(), spec, auth).await?;

        let Some(first) = tags.first() else {
            return Err(ResolveError::NoVersions(spec.name.clone()));
        };
        let latest = version_from_tag(&first.name).to_string();

        // Sequential: the first failing tag aborts the document
        // and later tags are never requested.
        let mut versions = IndexMap::with_capacity(tags.len());
        for tag in &tags {
            let resolved = self.resolve_tag(&id, tag, auth).await?;
            let tarball = urls.tarball(&spec.name, &resolved.tag);
            versions.insert(
                resolved.version.clone(),
                resolved.summary(&spec.name, tarball),
            );
        }

        Ok(PackageDocument::new(&spec.name, latest, versions))
    }

    /// Builds the metadata of a single version, including `scripts`
    ///
    /// Exactly one tag must be named `v{version}`; zero or several matches
    /// are reported as [`ResolveError::VersionNotFound`].
    pub async fn resolve_one(
        &self,
        spec: &ModuleSpec,
        version: &str,
        urls: &TarballUrls,
        auth: &AuthOptions,
    ) -> Result<VersionMetadata, ResolveError> {
        let (id, tags) = module_tags(self.hosting.as_ref(), spec, auth).await?;

        let wanted = tag_for_version(version);
        let matching: Vec<Tag> = tags.into_iter().filter(|t| t.name == wanted).collect();

        let [tag] = matching.as_slice() else {
            return Err(ResolveError::VersionNotFound {
                name: spec.name.clone(),
                version: version.to_string(),
                matches: matching.len(),
            });
        };

        let resolved = self.resolve_tag(&id, tag, auth).await?;
        let tarball = urls.tarball(&spec.name, &resolved.tag);

        Ok(resolved.metadata(&spec.name, tarball))
    }

    async fn resolve_tag(
        &self,
        id: &RepositoryId,
        tag: &Tag,
        auth: &AuthOptions,
    ) -> Result<ResolvedVersion, ResolveError> {
        debug!("Resolving tag {} of project {}", tag.name, id);

        let shasum = self
            .checksums
            .shasum(&tag.tarball_url, auth)
            .await
            .map_err(|source| ResolveError::Checksum {
                tag: tag.name.clone(),
                source,
            })?;

        let bytes = self
            .hosting
            .fetch_manifest_bytes(id, &tag.name, auth)
            .await
            .map_err(|source| ResolveError::Manifest {
                tag: tag.name.clone(),
                source,
            })?;

        let manifest =
            Manifest::from_slice(&bytes).map_err(|source| ResolveError::InvalidManifest {
                tag: tag.name.clone(),
                source,
            })?;

        Ok(ResolvedVersion {
            tag: tag.name.clone(),
            version: version_from_tag(&tag.name).to_string(),
            shasum,
            tarball_url: tag.tarball_url.clone(),
            manifest,
        })
    }
}
