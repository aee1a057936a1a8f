//! Walker types: the person behind a walk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a walker. Distinct from [`WalkId`](super::WalkId).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WalkerId(pub i64);

impl fmt::Display for WalkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A walker's public profile.
///
/// `Walker::default()` stands in for a profile the backend does not have.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Walker {
    pub id: WalkerId,
    pub first_name: String,

    /// Thumbnail image URL.
    pub thumb: String,
    pub picture: String,
    pub bio: String,
    pub walk_completed_count: i64,
    pub rating: f64,
}
