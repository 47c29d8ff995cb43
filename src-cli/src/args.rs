//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use newsdesk_core::Config;

/// NewsDesk - news search, questions and timelines from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "newsdesk")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Backend base URL
    #[arg(long, env = "NEWSDESK_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the persisted session
    #[arg(long, env = "NEWSDESK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, env = "NEWSDESK_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an account and sign in
    Register {
        email: String,
        name: String,
        #[arg(long, env = "NEWSDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in with an existing account
    Login {
        email: String,
        #[arg(long, env = "NEWSDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Revalidate the stored session and print the current user
    Whoami,
    /// Authenticated request against any backend path
    Call {
        /// HTTP method, e.g. GET or POST
        method: String,
        path: String,
        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },
    /// Keyword article search
    Search { query: String },
    /// Ask the assistant; falls back to article search
    Ask { query: String },
    /// Chronological timeline for a topic
    Timeline { topic: String },
}

impl Args {
    /// Environment defaults with command-line overrides applied
    pub fn config(&self) -> Config {
        let mut config = match &self.data_dir {
            Some(dir) => Config::new(dir.clone()),
            None => Config::from_env(),
        };

        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if self.timeout.is_some() {
            config.request_timeout_secs = self.timeout;
        }

        config
    }
}
