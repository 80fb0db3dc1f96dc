use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sitefeed")]
#[command(about = "Turn any web page into an RSS feed", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (default: ~/.config/sitefeed/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the browser and serve HTTP (default)
    Serve {
        /// Address to bind
        #[arg(long, env = "SITEFEED_HOST")]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long, env = "SITEFEED_PORT")]
        port: Option<u16>,
    },
    /// Print an annotated default configuration
    DefaultConfig,
}

impl Cli {
    /// The subcommand to run, `serve` with file/env settings when none is given
    pub fn command(&self) -> Commands {
        match &self.command {
            Some(Commands::Serve { host, port }) => Commands::Serve {
                host: host.clone(),
                port: *port,
            },
            Some(Commands::DefaultConfig) => Commands::DefaultConfig,
            None => Commands::Serve {
                host: None,
                port: None,
            },
        }
    }
}
