//! HTTP server exposing the registry API
//!
//! # Modules
//!
//! - [`routes`]: Request handlers
//! - [`auth`]: Token extraction from inbound requests
//! - [`error`]: Mapping of resolution errors to responses

pub mod auth;
pub mod error;
pub mod routes;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::checksum::TarballShasum;
use crate::config::ProxyConfig;
use crate::hosting::{GitLabClient, HostingApi};
use crate::registry::{TarballGateway, VersionResolver};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<VersionResolver>,
    pub gateway: Arc<TarballGateway>,
    pub public_url: Option<String>,
    pub default_token: Option<String>,
}

impl AppState {
    /// Wires the GitLab client and shasum computer described by `config`
    pub fn from_config(config: &ProxyConfig) -> anyhow::Result<Self> {
        let timeouts = config.timeouts();
        let hosting: Arc<dyn HostingApi> = Arc::new(
            GitLabClient::new(config.gitlab_base_url(), timeouts)
                .context("Failed to create GitLab client")?,
        );
        let checksums = Arc::new(
            TarballShasum::new(timeouts).context("Failed to create tarball client")?,
        );

        Ok(Self {
            resolver: Arc::new(VersionResolver::new(hosting.clone(), checksums)),
            gateway: Arc::new(TarballGateway::new(hosting)),
            public_url: config.public_base_url().map(str::to_string),
            default_token: config.default_token.clone(),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{package}", get(routes::package_document))
        .route("/{package}/{version}", get(routes::version_metadata))
        .route("/{package}/{version}/tarball", get(routes::tarball))
        .with_state(state)
}

/// Binds the listener and serves until Ctrl-C
pub async fn run_server(config: ProxyConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;

    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;

    info!(
        "npm-gitlab-proxy listening on {} (GitLab API: {})",
        listener.local_addr()?,
        config.gitlab_base_url()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
