//! Scoped package names

use crate::registry::error::ResolveError;

/// A package name split into the GitLab namespace and project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    /// Full package name, e.g. `@acme/widgets`
    pub name: String,
    pub user: String,
    pub repo: String,
}

impl ModuleSpec {
    /// Parses `@user/repo`. Unscoped names are not served.
    pub fn parse(name: &str) -> Result<Self, ResolveError> {
        let invalid = || ResolveError::InvalidName(name.to_string());

        let scoped = name.strip_prefix('@').ok_or_else(invalid)?;
        let (user, repo) = scoped.split_once('/').ok_or_else(invalid)?;

        if user.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            user: user.to_string(),
            repo: repo.to_string(),
        })
    }
}
