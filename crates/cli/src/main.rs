// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod render;
mod widget;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::Result;
use quotedesk_api::{ApiError, ClientConfig, DEFAULT_BASE_URL, Marketplace};
use quotedesk_persistence::FileStorage;
use tracing::debug;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

/// QuoteDesk - quotes, bookings and disputes from the terminal
#[derive(Debug, Parser)]
#[command(name = "quotedesk", author, version, about, long_about = None)]
struct Args {
    /// Base URL of the marketplace server
    #[arg(long, env = "QUOTEDESK_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Where the session cache is kept [default: ~/.quotedesk/session.json]
    #[arg(long, env = "QUOTEDESK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Session cookie copied from a signed-in browser
    #[arg(long, env = "QUOTEDESK_SESSION_COOKIE", hide_env_values = true)]
    session_cookie: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn session_path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".quotedesk")
                .join("session.json")
        })
    }

    fn config(&self) -> Result<ClientConfig, ApiError> {
        Ok(ClientConfig::new(&self.api_url)?
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_session_cookie(self.session_cookie.clone()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // RUST_LOG wins over -v/-q.
    let level = args.verbosity.log_level_filter().as_trace();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        )
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(args).await {
        match err.downcast_ref::<ApiError>() {
            Some(api) => eprintln!("error: {}", api.user_message()),
            None => eprintln!("error: {err}"),
        }
        debug!("{err:?}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let path = args.session_path();
    debug!(api_url = %args.api_url, session_file = %path.display(), "starting");
    let market = Marketplace::new(args.config()?, Arc::new(FileStorage::new(path)))?;
    let today = chrono::Local::now().date_naive();
    args.command.run(&market, today).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::{DisputeCommand, ReviewCommand};
    use quotedesk_domain::Role;

    #[test]
    fn test_args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_quotes_as_role() {
        let args = Args::try_parse_from(["quotedesk", "quotes", "--as", "artist", "--json"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Quotes {
                role: Some(Role::Artist),
                json: true
            }
        ));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(Args::try_parse_from(["quotedesk", "set-role", "wizard"]).is_err());
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        assert!(
            Args::try_parse_from(["quotedesk", "review", "submit", "q-1", "--rating", "6"])
                .is_err()
        );
        let args =
            Args::try_parse_from(["quotedesk", "review", "submit", "q-1", "--rating", "5"])
                .unwrap();
        assert!(matches!(
            args.command,
            Command::Review(ReviewCommand::Submit { rating: 5, .. })
        ));
    }

    #[test]
    fn test_dispute_raise_requires_reason() {
        assert!(Args::try_parse_from(["quotedesk", "dispute", "raise", "q-1"]).is_err());
        let args = Args::try_parse_from([
            "quotedesk", "dispute", "raise", "q-1", "--reason", "No show",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Command::Dispute(DisputeCommand::Raise { details: None, .. })
        ));
    }

    #[test]
    fn test_explicit_session_file_wins() {
        let args = Args::try_parse_from([
            "quotedesk",
            "--session-file",
            "/tmp/qd.json",
            "logout",
        ])
        .unwrap();
        assert_eq!(args.session_path(), PathBuf::from("/tmp/qd.json"));
    }

    #[test]
    fn test_config_rejects_bad_url() {
        let args =
            Args::try_parse_from(["quotedesk", "--api-url", "ftp://example.com", "whoami"])
                .unwrap();
        assert!(matches!(args.config(), Err(ApiError::Config(_))));
    }
}
