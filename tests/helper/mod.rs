//! Test utilities

mod gitlab;
mod http;

pub use gitlab::*;
pub use http::*;
