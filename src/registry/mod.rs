//! Registry layer
//!
//! Maps registry requests onto the hosting API.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Resolver   │────▶│   Hosting    │◀────│   Tarball    │
//! │ (documents)  │     │  (GitLab)    │     │  (stream)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Checksum   │
//! │   (shasum)   │
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`module_spec`]: `@user/repo` package names
//! - [`resolver`]: Package and version documents
//! - [`tarball`]: Tarball passthrough
//! - [`document`]: Wire types of the registry API
//! - [`urls`]: Tarball links that route back through this service
//! - [`error`]: Resolution errors

pub mod document;
pub mod error;
pub mod module_spec;
pub mod resolver;
pub mod tarball;
pub mod urls;

pub use document::{PackageDocument, VersionMetadata};
pub use error::ResolveError;
pub use module_spec::ModuleSpec;
pub use resolver::VersionResolver;
pub use tarball::TarballGateway;
pub use urls::TarballUrls;
