use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sitefeed::app::AppContext;
use sitefeed::cli::{Cli, Commands};
use sitefeed::config::Config;
use sitefeed::http::HttpServer;

const DEFAULT_LOG_FILTER: &str = "sitefeed=info,tower_http=info";

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command() {
        Commands::DefaultConfig => {
            print!("{}", Config::default_config_content());
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            // The browser worker must be running before any request is accepted.
            let ctx = AppContext::launch(&config).context("Failed to start the browser session")?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to build the HTTP runtime")?;

            runtime.block_on(HttpServer::new(config.server, Arc::new(ctx)).run())?;
        }
    }

    Ok(())
}
