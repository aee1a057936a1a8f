//! Firebase REST reads.
//!
//! Every backend path is readable as `GET <base>/<path>.json?auth=<token>`.
//! A path with no data answers with JSON `null`.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{Document, Walk, WalkId, Walker, WalkerId};

use super::auth::AuthSession;
use super::{FetchError, Result, WalkSource};

/// Read-only client for the backend's Firebase database.
pub struct FirebaseClient {
    http: Client,
    base_url: String,
    session: AuthSession,
}

impl FirebaseClient {
    pub fn new(http: Client, base_url: &str, session: AuthSession) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Reviews left for a walker.
    pub fn walker_reviews(&self, id: WalkerId) -> Result<Document> {
        self.get(&format!("walkers-reviews-by-walker/{id}"))
    }

    pub fn dog(&self, id: &str) -> Result<Document> {
        self.get(&format!("dogs/{id}"))
    }

    /// The authenticated owner's own record.
    pub fn owner(&self) -> Result<Document> {
        self.get(&format!("owners/{}", self.session.owner_id))
    }

    /// Walk products offered by the service.
    pub fn walk_types(&self) -> Result<Document> {
        self.get("walk-types")
    }

    /// Walkers currently near the owner.
    pub fn nearby_walkers(&self) -> Result<Document> {
        self.get(&format!("walkers-nearby-owner/{}", self.session.owner_id))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}.json", self.base_url)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "fetching");
        let http_err = |source| FetchError::Http {
            path: path.to_string(),
            source,
        };

        let response = self
            .http
            .get(self.url(path))
            .query(&[("auth", &self.session.token)])
            .send()
            .map_err(http_err)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status,
            });
        }

        let body = response.text().map_err(http_err)?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

impl WalkSource for FirebaseClient {
    fn past_walks(&self) -> Result<BTreeMap<WalkId, Walk>> {
        let raw = self.get(&format!("walks-past-by-owner/{}", self.session.owner_id))?;
        parse_walk_ids(raw)
    }

    fn walker(&self, id: WalkerId) -> Result<Option<Walker>> {
        self.get(&format!("walkers-profiles/{id}"))
    }
}

/// Convert the backend's text-keyed walk map into numerically keyed walks.
///
/// `None` is the backend's answer for an owner with no walks yet. Keys must
/// be canonical decimal, so each key names exactly one walk.
fn parse_walk_ids(raw: Option<BTreeMap<String, Walk>>) -> Result<BTreeMap<WalkId, Walk>> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, walk)| {
            let id = key
                .parse()
                .map_err(|source| FetchError::InvalidWalkId { raw: key, source })?;
            Ok((id, walk))
        })
        .collect()
}
