//! Tarball links served to clients
//!
//! `dist.tarball` always points back at this service so the client's
//! credentials are applied when the archive is fetched from GitLab.

use crate::encoding::encode_component;

/// Builds `{base}/{package}/{tag}/tarball` links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarballUrls {
    base: String,
}

impl TarballUrls {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn tarball(&self, package: &str, tag: &str) -> String {
        format!(
            "{}/{}/{}/tarball",
            self.base,
            encode_component(package),
            encode_component(tag)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tarball_encodes_package_and_tag() {
        let urls = TarballUrls::new("http://localhost:8080/");

        assert_eq!(
            urls.tarball("@acme/widgets", "v1.0.0"),
            "http://localhost:8080/%40acme%2Fwidgets/v1.0.0/tarball"
        );
        assert_eq!(
            urls.tarball("@acme/widgets", "release/2"),
            "http://localhost:8080/%40acme%2Fwidgets/release%2F2/tarball"
        );
    }
}
