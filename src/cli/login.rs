//! Login command: exchange credentials for a token and save both.

use reqwest::blocking::Client;
use tracing::info;

use crate::config::Config;
use crate::credentials::{self, Login};
use crate::source;
use crate::source::auth::{self, AuthError, AuthSession};
use crate::storage::{Credentials, Storage};

pub(super) fn cmd_login(
    config: &Config,
    storage: &Storage,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<(), String> {
    let stored = storage
        .load_credentials()
        .map_err(|e| format!("failed to load credentials: {e}"))?;
    let login = credentials::resolve(username, password, &stored)
        .ok_or_else(|| AuthError::MissingCredentials.to_string())?;

    let http = source::http_client(config.timeout())
        .map_err(|e| format!("failed to build HTTP client: {e}"))?;
    let session = authenticate(&http, config, storage, &login)?;

    eprintln!("Logged in as {} (owner {})", login.username, session.owner_id);
    Ok(())
}

/// Log in, check the token, and persist the credentials that produced it.
pub(super) fn authenticate(
    http: &Client,
    config: &Config,
    storage: &Storage,
    login: &Login,
) -> Result<AuthSession, String> {
    let token = auth::login(http, &config.login_url, &login.username, &login.password)
        .map_err(|e| e.to_string())?;
    let session = AuthSession::from_token(&token).map_err(|e| e.to_string())?;

    storage
        .save_credentials(&Credentials {
            username: login.username.clone(),
            password: login.password.clone(),
            token,
        })
        .map_err(|e| format!("failed to save credentials: {e}"))?;
    info!(owner = session.owner_id, "saved new token");

    Ok(session)
}
