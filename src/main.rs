//! Rank the emoji reactions used across a Slack workspace.
//!
//! Authenticates with `$SLACK_API_TOKEN`, reads a page of recent history from
//! each public and private channel, and prints every emoji seen in reactions
//! ordered by how often it was applied. See [config] for the other supported
//! environment variables.

use dotenvy::dotenv;
use std::{env, io, process::ExitCode};
use tracing::{error, warn};

mod config;
mod de;
mod error;
mod pipeline;
mod report;
mod slack;
mod tally;

/// Application entrypoint. Initialises tracing, loads any `.env`, and runs a
/// single survey to completion. Requests are made strictly one after another,
/// so a single-threaded runtime suffices.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    match pipeline::run(|k| env::var(k).ok(), &mut io::stdout()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
