//! NewsDesk command-line client
//!
//! ```bash
//! newsdesk login a@b.com --password secret
//! newsdesk ask "What happened with the climate bill?"
//! newsdesk timeline "AI regulation"
//! newsdesk call GET /user
//! ```
//!
//! The session is kept in the data directory between invocations.

mod args;
mod commands;

use anyhow::Result;
use clap::Parser;

use args::Args;
use newsdesk_core::NewsDesk;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    newsdesk_core::init_logging();

    let desk = NewsDesk::new(args.config())?;
    desk.initialize()?;

    let result = commands::run(&desk, args.command).await;
    if let Err(e) = &result {
        tracing::debug!(error = ?e, "Command failed");
    }

    result
}
