// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marquee - rich webhook notifications for media processing jobs.
//!
//! This is the binary entry point the host invokes once per event.

mod check;
mod logging;
mod notify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Marquee - rich webhook notifications for media processing jobs.
#[derive(Parser, Debug)]
#[command(name = "marquee", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Deliver one job lifecycle notification.
    Notify(notify::NotifyArgs),
    /// Validate configuration and print a redacted summary.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => marquee_config::load_and_validate_path(path),
        None => marquee_config::load_and_validate(),
    };

    match cli.command {
        Commands::Notify(args) => {
            let code = notify::run_notify(args, loaded).await;
            std::process::exit(code);
        }
        Commands::CheckConfig => match loaded {
            Ok(config) => check::print_summary(&config),
            Err(errors) => {
                marquee_config::render_errors(&errors);
                std::process::exit(1);
            }
        },
    }
}
