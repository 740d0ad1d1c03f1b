use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use npm_gitlab_proxy::config::ProxyConfig;
use npm_gitlab_proxy::logging::{self, LogFormat};

#[derive(Parser)]
#[command(name = "npm-gitlab-proxy")]
#[command(version, about = "npm registry serving tagged GitLab repositories")]
struct Cli {
    /// JSON config file; flags and environment override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Base URL of the GitLab API
    #[arg(long, env = "GITLAB_URL")]
    gitlab_url: Option<String>,

    /// Externally visible URL of this proxy, used in tarball links
    #[arg(long, env = "PUBLIC_URL")]
    public_url: Option<String>,

    /// Token used when a request carries none
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<ProxyConfig> {
        let mut config = match &self.config {
            Some(path) => ProxyConfig::from_file(path)?,
            None => ProxyConfig::default(),
        };

        if let Some(listen) = self.listen {
            config.listen = listen;
        }
        if let Some(gitlab_url) = self.gitlab_url {
            config.gitlab_url = gitlab_url;
        }
        if let Some(public_url) = self.public_url {
            config.public_url = Some(public_url);
        }
        if let Some(token) = self.token {
            config.default_token = Some(token);
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_format, cli.log_level);
    let config = cli.into_config()?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(npm_gitlab_proxy::server::run_server(config))
}
