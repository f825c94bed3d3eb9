//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;

/// rowserve - server-side row model backend for grid clients
#[derive(Parser, Debug)]
#[command(name = "rowserve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the bundled demo grids over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// Surface internal error detail in responses
        #[arg(long)]
        debug: bool,

        /// Disable the permissive CORS layer
        #[arg(long)]
        no_cors: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
