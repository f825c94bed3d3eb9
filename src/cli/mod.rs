//! CLI module for rowserve
//!
//! Provides the command-line interface:
//! - serve: boot the demo registry and enter the serving loop

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{demo_registry, demo_source, serve};
pub use errors::{CliError, CliResult};

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Serve {
            bind,
            debug,
            no_cors,
        } => serve(bind, debug, no_cors),
    }
}
