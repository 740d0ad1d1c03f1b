//! Registry documents served to package-manager clients

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The parts of `package.json` the registry exposes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub dependencies: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub dev_dependencies: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub scripts: Option<IndexMap<String, String>>,
}

impl Manifest {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Everything gathered for a single tag
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVersion {
    /// Tag name as returned by the hosting API, e.g. `v1.2.3`
    pub tag: String,
    /// Tag name without the leading `v`
    pub version: String,
    pub shasum: String,
    /// Archive URL on the hosting side
    pub tarball_url: String,
    pub manifest: Manifest,
}

impl ResolvedVersion {
    /// Metadata as listed in the package document
    ///
    /// `scripts` is left out and `_id` is `{tag}@{version}`.
    pub fn summary(&self, package: &str, tarball: String) -> VersionMetadata {
        VersionMetadata {
            id: format!("{}@{}", self.tag, self.version),
            scripts: None,
            ..self.metadata(package, tarball)
        }
    }

    /// Full metadata served for a single version, identified by the package
    pub fn metadata(&self, package: &str, tarball: String) -> VersionMetadata {
        VersionMetadata {
            name: package.to_string(),
            id: package.to_string(),
            version: self.version.clone(),
            dependencies: self.manifest.dependencies.clone(),
            dev_dependencies: self.manifest.dev_dependencies.clone(),
            scripts: self.manifest.scripts.clone(),
            dist: Dist {
                shasum: self.shasum.clone(),
                tarball,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    pub name: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<IndexMap<String, String>>,
    pub dist: Dist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dist {
    pub shasum: String,
    /// URL pointing back at this service, never at the hosting API
    pub tarball: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistTags {
    pub latest: String,
}

/// Response for `GET /:package`
///
/// `versions` keeps the tag order of the hosting API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDocument {
    pub name: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    pub versions: IndexMap<String, VersionMetadata>,
    #[serde(rename = "dist-tags")]
    pub dist_tags: DistTags,
}

impl PackageDocument {
    pub fn new(name: &str, latest: String, versions: IndexMap<String, VersionMetadata>) -> Self {
        Self {
            name: name.to_string(),
            id: name.to_string(),
            description: name.to_string(),
            versions,
            dist_tags: DistTags { latest },
        }
    }
}
