//! The report run: fetch, filter, look up walkers, render.
//!
//! Runs strictly in sequence and touches no local state. The caller owns
//! emitting the report and persisting the updated reported set, which it
//! must only do once this returns successfully.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::dedup::{self, ReportedSet};
use crate::report;
use crate::source::{self, WalkSource};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct ReportRun {
    /// The rendered report, or `None` when every walk was already reported.
    pub html: Option<String>,

    /// The reported set including this run's walks.
    pub reported: ReportedSet,

    /// How many walks this run reports.
    pub new_walks: usize,
}

/// Produce a report of the walks `source` knows that `reported` does not.
///
/// Each distinct walker is fetched exactly once. A walker the backend does
/// not know is rendered with an empty profile; any fetch error aborts the
/// run before anything is rendered.
pub fn run(source: &impl WalkSource, reported: ReportedSet) -> source::Result<ReportRun> {
    let all = source.past_walks()?;
    info!(walks = all.len(), "fetched past walks");

    let dedup = dedup::filter_pending(all, reported);
    if dedup.is_empty() {
        info!("nothing to report");
        return Ok(ReportRun {
            html: None,
            reported: dedup.reported,
            new_walks: 0,
        });
    }
    info!(
        pending = dedup.pending.len(),
        walkers = dedup.walker_ids.len(),
        "walks pending"
    );

    let mut walkers = BTreeMap::new();
    for &id in &dedup.walker_ids {
        match source.walker(id)? {
            Some(walker) => {
                debug!(walker = %id, name = %walker.first_name, "fetched walker");
                walkers.insert(id, walker);
            }
            None => warn!(walker = %id, "walker profile not found, rendering placeholder"),
        }
    }

    let html = report::render(&dedup.pending, &walkers);
    Ok(ReportRun {
        html,
        new_walks: dedup.pending.len(),
        reported: dedup.reported,
    })
}
