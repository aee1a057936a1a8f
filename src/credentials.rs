//! Login detail resolution.
//!
//! Username and password are each resolved through a chain:
//!
//! 1. `--username` / `--password` — explicit per-command override
//! 2. `DOGREPORT_USERNAME` / `DOGREPORT_PASSWORD` env vars
//! 3. `~/.dogreport/credentials.json` — saved by `dogreport login`

use std::env;

use crate::storage::Credentials;

pub const USERNAME_VAR: &str = "DOGREPORT_USERNAME";
pub const PASSWORD_VAR: &str = "DOGREPORT_PASSWORD";

/// A username and password ready to exchange for a token.
#[derive(Clone, PartialEq, Eq)]
pub struct Login {
    pub username: String,
    pub password: String,
}

/// Resolve login details from flags, the environment, then stored credentials.
///
/// Returns `None` when either part cannot be found anywhere.
pub fn resolve(
    username: Option<&str>,
    password: Option<&str>,
    stored: &Credentials,
) -> Option<Login> {
    resolve_with(username, password, stored, |key| env::var(key).ok())
}

fn resolve_with(
    username: Option<&str>,
    password: Option<&str>,
    stored: &Credentials,
    env: impl Fn(&str) -> Option<String>,
) -> Option<Login> {
    let pick = |explicit: Option<&str>, var: &str, saved: &str| {
        explicit
            .map(String::from)
            .or_else(|| env(var))
            .filter(|s| !s.is_empty())
            .or_else(|| Some(saved.to_string()).filter(|s| !s.is_empty()))
    };

    Some(Login {
        username: pick(username, USERNAME_VAR, &stored.username)?,
        password: pick(password, PASSWORD_VAR, &stored.password)?,
    })
}
