//! CLI interface for dogreport.
//!
//! Running `dogreport` with no subcommand produces a report: it fetches past
//! walks, keeps the ones not reported before, and prints them as HTML on
//! stdout. Diagnostics go to stderr so the report can be redirected as is.
//!
//! Other subcommands manage the login and inspect local or remote state.

mod format;
mod login;
mod lookup;
mod report;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use crate::config::Config;
use crate::credentials;
use crate::source::auth::{AuthError, AuthSession};
use crate::source::{self, FirebaseClient};
use crate::storage::Storage;

/// dogreport — an HTML digest of your dog's walks.
#[derive(Debug, Parser)]
#[command(name = "dogreport", version, after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Increase log output on stderr (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

const USAGE_HELP: &str = r#"Getting started:
  1. dogreport login --username you@example.com --password '...'
  2. dogreport > walks.html
     → reports every walk not reported before
  3. dogreport status

Walks are reported once. Run with --dry-run to preview without
marking anything as reported."#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report walks not reported before (the default).
    Report(ReportArgs),

    /// Log in and save the credentials and token for later runs.
    Login {
        /// Account email. Falls back to DOGREPORT_USERNAME, then the saved one.
        #[arg(long)]
        username: Option<String>,

        /// Account password. Falls back to DOGREPORT_PASSWORD, then the saved one.
        #[arg(long)]
        password: Option<String>,
    },

    /// Show what has been reported so far.
    Status,

    /// Print a backend record as JSON.
    Lookup {
        #[command(subcommand)]
        target: LookupTarget,
    },
}

#[derive(Debug, Default, clap::Args)]
pub struct ReportArgs {
    /// Write the report to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Render the report without marking its walks as reported.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum LookupTarget {
    /// A walker's profile.
    Walker { id: i64 },

    /// Reviews left for a walker.
    Reviews { id: i64 },

    /// A dog's record.
    Dog { id: String },

    /// Your own owner record.
    Owner,

    /// Walk products offered by the service.
    WalkTypes,

    /// Walkers currently near you.
    Nearby,
}

/// Run the parsed CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config, storage: &Storage) -> Result<(), String> {
    match cli.command {
        None => report::cmd_report(config, storage, &ReportArgs::default()),
        Some(Command::Report(args)) => report::cmd_report(config, storage, &args),
        Some(Command::Login { username, password }) => {
            login::cmd_login(config, storage, username.as_deref(), password.as_deref())
        }
        Some(Command::Status) => cmd_status(storage),
        Some(Command::Lookup { target }) => lookup::cmd_lookup(config, storage, &target),
    }
}

fn cmd_status(storage: &Storage) -> Result<(), String> {
    let record = storage
        .load_reported()
        .map_err(|e| format!("failed to load reported walks: {e}"))?;
    println!("{}", format::format_status(&record));
    Ok(())
}

/// Authenticate and build a backend client.
///
/// Reuses the stored token when it still decodes; otherwise logs in with
/// the resolved credentials and saves the new token before returning.
fn connect(config: &Config, storage: &Storage) -> Result<FirebaseClient, String> {
    let http = source::http_client(config.timeout())
        .map_err(|e| format!("failed to build HTTP client: {e}"))?;

    let stored = storage
        .load_credentials()
        .map_err(|e| format!("failed to load credentials: {e}"))?;

    let session = match AuthSession::from_token(&stored.token) {
        Ok(session) => session,
        Err(e) => {
            debug!("stored token unusable ({e}), logging in");
            let login = credentials::resolve(None, None, &stored)
                .ok_or_else(|| AuthError::MissingCredentials.to_string())?;
            login::authenticate(&http, config, storage, &login)?
        }
    };

    Ok(FirebaseClient::new(http, &config.firebase_url, session))
}
