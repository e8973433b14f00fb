// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maitre - business-data chatbot for restaurant point-of-sale systems.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod classify;
mod serve;
mod shutdown;
mod show_config;

use clap::{Parser, Subcommand};

/// Maitre - business-data chatbot for restaurant point-of-sale systems.
#[derive(Parser, Debug)]
#[command(name = "maitre", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP chat gateway.
    Serve,
    /// Score a query and show which model tier would answer it.
    Classify {
        /// The question to classify.
        query: String,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match maitre_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            maitre_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("maitre: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Classify { query }) => {
            print!("{}", classify::run_classify(&config, &query));
        }
        Some(Commands::Config) => match show_config::render_effective_config(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("maitre: failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("maitre: use --help for available commands");
        }
    }
}
