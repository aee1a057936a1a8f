//! Walk sources: where walks and walker profiles come from.
//!
//! [`WalkSource`] is the seam between the report pipeline and the backend.
//! The production implementation reads the service's Firebase REST API
//! with a token obtained from [`auth`].

pub mod auth;
#[cfg(test)]
pub(crate) mod fake;
mod firebase;

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::model::{ParseWalkIdError, Walk, WalkId, Walker, WalkerId};

pub use firebase::FirebaseClient;

/// Errors that can occur while reading from the backend.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request for {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {path} returned {status}")]
    Status { path: String, status: StatusCode },

    /// The backend refused the token, usually because it expired.
    #[error("request for {path} returned 401 Unauthorized; run `dogreport login` for a new token")]
    Unauthorized { path: String },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid walk id {raw:?}: {source}")]
    InvalidWalkId {
        raw: String,
        #[source]
        source: ParseWalkIdError,
    },
}

pub type Result<T> = core::result::Result<T, FetchError>;

/// Supplies the walks to report and the profiles of their walkers.
pub trait WalkSource {
    /// Every past walk known for the owner, keyed by id.
    fn past_walks(&self) -> Result<BTreeMap<WalkId, Walk>>;

    /// A walker's profile, or `None` if the backend has no such walker.
    fn walker(&self, id: WalkerId) -> Result<Option<Walker>>;
}

/// Build the HTTP client shared by login and data requests.
pub fn http_client(timeout: Duration) -> core::result::Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("dogreport/", env!("CARGO_PKG_VERSION")))
        .build()
}
