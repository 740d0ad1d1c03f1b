//! npm registry facade over a GitLab instance
//!
//! Package-manager clients talk to this service as if it were an npm
//! registry. Package names of the form `@user/repo` are mapped onto GitLab
//! projects, tags onto versions, and repository archives onto tarballs.
//!
//! # Modules
//!
//! - [`config`]: Runtime configuration and constants
//! - [`hosting`]: Client for the GitLab API (project ids, tags, files, archives)
//! - [`checksum`]: Streaming shasum of remote tarballs
//! - [`registry`]: Version resolution and tarball passthrough
//! - [`server`]: HTTP routes that expose the registry API
//! - [`logging`]: Tracing subscriber setup

pub mod checksum;
pub mod config;
mod encoding;
pub mod hosting;
pub mod logging;
pub mod registry;
pub mod server;
