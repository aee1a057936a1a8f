//! Reported-walk storage.
//!
//! Loaded at the start of a report run and saved only after the report was
//! rendered and emitted. A run that fails before that leaves the file as it
//! was, so the same walks are attempted again next time.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::dedup::ReportedSet;

use super::{Result, Storage};

const FILE: &str = "reported.json";

/// The reported set as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportedRecord {
    pub walks: ReportedSet,

    /// When the set was last saved. `None` before the first report.
    pub updated_at: Option<Timestamp>,
}

impl Storage {
    /// Loads the reported set, or an empty one if nothing was reported yet.
    pub fn load_reported(&self) -> Result<ReportedRecord> {
        Ok(self.read_record(FILE)?.unwrap_or_default())
    }

    /// Replaces the stored reported set, stamping the save time.
    pub fn save_reported(&self, walks: &ReportedSet) -> Result<()> {
        let record = ReportedRecord {
            walks: walks.clone(),
            updated_at: Some(Timestamp::now()),
        };
        self.write_record(FILE, &record, false)
    }
}
