//! `atelier` -- virtual try-on from the command line.
//!
//! # Environment variables
//!
//! | Variable                  | Required         | Default                   |
//! |---------------------------|------------------|---------------------------|
//! | `FASHN_API_KEY`           | for `try-on`     | --                        |
//! | `FASHN_BASE_URL`          | no               | `https://api.fashn.ai/v1` |
//! | `TRYON_POLL_INTERVAL_MS`  | no               | `2000`                    |
//! | `TRYON_POLL_MAX_ATTEMPTS` | no               | unbounded                 |
//! | `TRYON_POLL_TIMEOUT_SECS` | no               | unbounded                 |
//! | `CATALOG_BASE_URL`        | catalog commands | --                        |

use std::process::ExitCode;

use atelier_cli::args::Cli;
use atelier_cli::commands;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "atelier_cli=info,atelier_fashn=info,atelier_camera=info";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match commands::run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
