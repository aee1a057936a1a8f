//! Credential storage: the login details and the last token they produced.

use serde::{Deserialize, Serialize};

use super::{Result, Storage};

const FILE: &str = "credentials.json";

/// Stored login details and cached token.
///
/// Every field may be empty: an empty token means "log in again".
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub token: String,
}

// Keeps secrets out of logs and error output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Storage {
    /// Loads stored credentials, or empty ones if none were saved.
    pub fn load_credentials(&self) -> Result<Credentials> {
        Ok(self.read_record(FILE)?.unwrap_or_default())
    }

    /// Saves credentials, readable only by the current user.
    pub fn save_credentials(&self, credentials: &Credentials) -> Result<()> {
        self.write_record(FILE, credentials, true)
    }
}
