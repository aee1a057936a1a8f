//! Authentication against the service.
//!
//! A token is a JWT whose payload carries the owner id under `d.owner_id`.
//! A stored token is reused as long as that payload decodes. Otherwise a
//! fresh token is requested from the login endpoint with the owner's email
//! and password.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, info};

/// Errors that can occur while obtaining or reading a token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(
        "no credentials: run `dogreport login --username <email>` \
         or set DOGREPORT_USERNAME and DOGREPORT_PASSWORD"
    )]
    MissingCredentials,

    #[error("login request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected login response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("login rejected for {username}")]
    Rejected { username: String },

    #[error("malformed token: {0}")]
    MalformedToken(String),
}

pub type Result<T> = core::result::Result<T, AuthError>;

/// Token segments may use either base64 alphabet, padded or not.
const LENIENT_CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT_CONFIG);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT_CONFIG);

/// An authenticated session: the token plus the owner it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub owner_id: i64,
}

#[derive(Deserialize)]
struct Claims {
    d: ClaimsData,
}

#[derive(Deserialize)]
struct ClaimsData {
    owner_id: i64,
}

impl AuthSession {
    /// Build a session from a token, reading the owner id from its payload.
    pub fn from_token(token: &str) -> Result<Self> {
        let payload = token
            .split('.')
            .nth(1)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AuthError::MalformedToken("expected three dot-separated parts".into())
            })?;

        let bytes = URL_SAFE_LENIENT
            .decode(payload)
            .or_else(|_| STANDARD_LENIENT.decode(payload))
            .map_err(|e| AuthError::MalformedToken(format!("payload is not base64: {e}")))?;

        let claims: Claims = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::MalformedToken(format!("payload has no owner id: {e}")))?;

        Ok(Self {
            token: token.to_string(),
            owner_id: claims.d.owner_id,
        })
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: LoginData,
}

#[derive(Default, Deserialize)]
struct LoginData {
    #[serde(default)]
    token: String,
}

/// Exchange an email and password for a fresh token.
pub fn login(http: &Client, login_url: &str, username: &str, password: &str) -> Result<String> {
    info!(username, "requesting a new token");

    let body = http
        .post(login_url)
        .header(ACCEPT, "application/json, text/plain, */*")
        .form(&[
            ("type", "owner"),
            ("email", username),
            ("password", password),
        ])
        .send()?
        .text()?;

    token_from_response(&body, username)
}

fn token_from_response(body: &str, username: &str) -> Result<String> {
    let response: LoginResponse = serde_json::from_str(body)?;
    debug!(status = %response.status, "login response");

    if response.status == "fail" || response.data.token.is_empty() {
        return Err(AuthError::Rejected {
            username: username.to_string(),
        });
    }
    Ok(response.data.token)
}

#[cfg(test)]
mod tests {
    use super::*;

    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

    fn token_with_payload(payload: &str, engine: &GeneralPurpose) -> String {
        format!("header.{}.signature", engine.encode(payload))
    }

    #[test]
    fn reads_owner_id_from_token() {
        let token = token_with_payload(
            r#"{"v":0,"d":{"token":"x","owner_id":4321,"uid":"u"},"iat":1500000000}"#,
            &URL_SAFE_NO_PAD,
        );

        let session = AuthSession::from_token(&token).unwrap();
        assert_eq!(session.owner_id, 4321);
        assert_eq!(session.token, token);
    }

    #[test]
    fn accepts_padded_standard_payload() {
        let token = token_with_payload(r#"{"d":{"owner_id":7}}"#, &STANDARD);
        assert_eq!(AuthSession::from_token(&token).unwrap().owner_id, 7);
    }

    #[test]
    fn rejects_token_without_payload() {
        let err = AuthSession::from_token("not-a-jwt").unwrap_err();
        assert!(matches!(err, AuthError::MalformedToken(_)));

        let err = AuthSession::from_token("").unwrap_err();
        assert!(matches!(err, AuthError::MalformedToken(_)));
    }

    #[test]
    fn rejects_payload_without_owner() {
        let token = token_with_payload(r#"{"d":{"uid":"u"}}"#, &URL_SAFE_NO_PAD);
        let err = AuthSession::from_token(&token).unwrap_err();
        assert!(matches!(err, AuthError::MalformedToken(_)));
    }

    #[test]
    fn login_response_yields_token() {
        let body = r#"{"status":"success","data":{"success":true,"token":"abc.def.ghi"}}"#;
        assert_eq!(token_from_response(body, "me@test").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn failed_login_is_rejected() {
        let body = r#"{"status":"fail","data":{"success":false}}"#;
        let err = token_from_response(body, "me@test").unwrap_err();
        assert!(matches!(err, AuthError::Rejected { ref username } if username == "me@test"));
    }

    #[test]
    fn garbage_login_response_is_decode_error() {
        let err = token_from_response("<html>", "me@test").unwrap_err();
        assert!(matches!(err, AuthError::Decode(_)));
    }
}
