//! Walk types: one completed visit and what happened on it.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::walker::WalkerId;

/// Identifier of a walk.
///
/// The backend keys walks by a decimal string. Internally it is a number so
/// that ordering is numeric: larger ids are more recent walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalkId(pub u64);

impl fmt::Display for WalkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Error parsing a [`WalkId`] from its text form.
#[derive(Debug, thiserror::Error)]
pub enum ParseWalkIdError {
    #[error(transparent)]
    Number(#[from] ParseIntError),

    /// Parses as a number but is not how that number is written, e.g. `07`.
    #[error("not in canonical decimal form")]
    NonCanonical,
}

impl FromStr for WalkId {
    type Err = ParseWalkIdError;

    /// Only the canonical decimal form is accepted, so distinct keys never
    /// map to the same id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self(s.parse()?);
        if id.to_string() != s {
            return Err(ParseWalkIdError::NonCanonical);
        }
        Ok(id)
    }
}

// Serialized as text, the way the backend and the reported-walks file key it.
impl Serialize for WalkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WalkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid walk id {raw:?}: {e}")))
    }
}

/// A completed walk as recorded by the backend.
///
/// Fields the backend omits deserialize to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Walk {
    /// Calendar date, as displayed by the backend.
    pub date: String,

    pub walker_id: WalkerId,

    /// 1 when the walker locked the door on the way out.
    pub is_door_locked: i64,
    pub is_pee: i64,
    pub is_poo: i64,

    /// Distance covered, in miles.
    pub distance: f64,

    pub payout: f64,
    pub tip: f64,
    pub total: f64,

    pub note: String,
    pub photo_url: String,

    /// URL of the rendered route map.
    pub walk_map: String,

    pub invoice: Invoice,

    /// Scheduled start.
    pub walk_start: String,
    /// Actual start.
    pub walk_started: String,
    /// Actual end.
    pub walk_completed: String,
    /// Scheduled end.
    pub walk_end: String,
}

/// What the owner was billed for a walk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    /// Line items, in invoice order.
    pub charges: Vec<Charge>,
}

/// A single invoice line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Charge {
    pub description: String,
    pub amount: f64,
}
