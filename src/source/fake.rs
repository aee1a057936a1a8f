//! In-memory walk source for tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use reqwest::StatusCode;

use crate::model::{Walk, WalkId, Walker, WalkerId};

use super::{FetchError, Result, WalkSource};

/// Serves fixed walks and walker profiles, recording which walkers were
/// requested.
#[derive(Default)]
pub struct FakeSource {
    pub walks: BTreeMap<WalkId, Walk>,
    pub walkers: BTreeMap<WalkerId, Walker>,
    pub failing_walker: Option<WalkerId>,
    pub fail_walks: bool,
    pub requested: RefCell<Vec<WalkerId>>,
}

impl FakeSource {
    /// One walk per `(walk id, walker id)` pair, each walker with a profile.
    pub fn with_walks(entries: &[(u64, i64)]) -> Self {
        let walks = entries
            .iter()
            .map(|&(id, walker)| {
                let walk = Walk {
                    date: format!("walk-{id}"),
                    walker_id: WalkerId(walker),
                    ..Walk::default()
                };
                (WalkId(id), walk)
            })
            .collect();
        let walkers = entries
            .iter()
            .map(|&(_, walker)| {
                let profile = Walker {
                    id: WalkerId(walker),
                    first_name: format!("walker-{walker}"),
                    ..Walker::default()
                };
                (WalkerId(walker), profile)
            })
            .collect();
        Self {
            walks,
            walkers,
            ..Self::default()
        }
    }
}

fn unavailable(path: &str) -> FetchError {
    FetchError::Status {
        path: path.to_string(),
        status: StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl WalkSource for FakeSource {
    fn past_walks(&self) -> Result<BTreeMap<WalkId, Walk>> {
        if self.fail_walks {
            return Err(unavailable("walks"));
        }
        Ok(self.walks.clone())
    }

    fn walker(&self, id: WalkerId) -> Result<Option<Walker>> {
        self.requested.borrow_mut().push(id);
        if self.failing_walker == Some(id) {
            return Err(unavailable("walker"));
        }
        Ok(self.walkers.get(&id).cloned())
    }
}
