//! Deduplication: decide which walks still need reporting.
//!
//! The reported set only ever grows. A walk is pending when the source knows
//! it and the reported set does not; filtering marks every pending walk as
//! reported and collects the walkers whose profiles the report needs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{Walk, WalkId, WalkerId};

/// Walks already surfaced in a previous report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportedSet(BTreeSet<WalkId>);

impl ReportedSet {
    /// Marks a walk as reported. Returns `false` if it already was.
    pub fn insert(&mut self, id: WalkId) -> bool {
        self.0.insert(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most recent reported walk, if any.
    pub fn latest(&self) -> Option<WalkId> {
        self.0.last().copied()
    }
}

impl FromIterator<WalkId> for ReportedSet {
    fn from_iter<I: IntoIterator<Item = WalkId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The outcome of filtering all known walks against the reported set.
#[derive(Debug, Clone, Default)]
pub struct Dedup {
    /// Walks absent from the reported set when filtering started.
    pub pending: BTreeMap<WalkId, Walk>,

    /// The reported set with every pending walk added.
    pub reported: ReportedSet,

    /// Distinct walkers referenced by pending walks.
    pub walker_ids: BTreeSet<WalkerId>,
}

impl Dedup {
    /// Whether there is nothing new to report.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Split `all` into walks already reported and walks still pending.
///
/// Pure set arithmetic: `pending = all \ reported` and
/// `reported' = reported ∪ all`. Never fails.
pub fn filter_pending(all: BTreeMap<WalkId, Walk>, mut reported: ReportedSet) -> Dedup {
    let mut pending = BTreeMap::new();
    let mut walker_ids = BTreeSet::new();

    for (id, walk) in all {
        if reported.insert(id) {
            walker_ids.insert(walk.walker_id);
            pending.insert(id, walk);
        }
    }

    Dedup {
        pending,
        reported,
        walker_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(walker: i64) -> Walk {
        Walk {
            walker_id: WalkerId(walker),
            ..Walk::default()
        }
    }

    fn walks(entries: &[(u64, i64)]) -> BTreeMap<WalkId, Walk> {
        entries
            .iter()
            .map(|&(id, walker)| (WalkId(id), walk(walker)))
            .collect()
    }

    fn ids(dedup: &Dedup) -> Vec<u64> {
        dedup.pending.keys().map(|id| id.0).collect()
    }

    #[test]
    fn pending_is_set_difference() {
        let reported: ReportedSet = [WalkId(1), WalkId(2)].into_iter().collect();
        let dedup = filter_pending(walks(&[(2, 10), (3, 10), (4, 11)]), reported);

        assert_eq!(ids(&dedup), vec![3, 4]);
    }

    #[test]
    fn reported_becomes_union() {
        let reported: ReportedSet = [WalkId(1), WalkId(2)].into_iter().collect();
        let dedup = filter_pending(walks(&[(2, 10), (3, 10)]), reported);

        let expected: ReportedSet = [1, 2, 3].map(WalkId).into_iter().collect();
        assert_eq!(dedup.reported, expected);
    }

    #[test]
    fn walker_ids_are_deduplicated() {
        let dedup = filter_pending(walks(&[(1, 10), (2, 10), (3, 11)]), ReportedSet::default());

        let walkers: Vec<i64> = dedup.walker_ids.iter().map(|id| id.0).collect();
        assert_eq!(walkers, vec![10, 11]);
    }

    #[test]
    fn walker_ids_only_cover_pending_walks() {
        let reported: ReportedSet = [WalkId(1)].into_iter().collect();
        let dedup = filter_pending(walks(&[(1, 10), (2, 11)]), reported);

        assert!(!dedup.walker_ids.contains(&WalkerId(10)));
        assert!(dedup.walker_ids.contains(&WalkerId(11)));
    }

    #[test]
    fn empty_source_leaves_reported_unchanged() {
        let reported: ReportedSet = [WalkId(5)].into_iter().collect();
        let dedup = filter_pending(BTreeMap::new(), reported.clone());

        assert!(dedup.is_empty());
        assert!(dedup.walker_ids.is_empty());
        assert_eq!(dedup.reported, reported);
    }

    #[test]
    fn repeated_filter_without_persisting_is_stable() {
        let reported: ReportedSet = [WalkId(1)].into_iter().collect();
        let all = walks(&[(1, 10), (2, 10), (3, 12)]);

        let first = filter_pending(all.clone(), reported.clone());
        let second = filter_pending(all, reported);

        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn repeated_filter_with_persisting_reports_nothing() {
        let all = walks(&[(1, 10), (2, 10)]);

        let first = filter_pending(all.clone(), ReportedSet::default());
        assert_eq!(ids(&first), vec![1, 2]);

        let second = filter_pending(all, first.reported);
        assert!(second.is_empty());
    }

    #[test]
    fn latest_is_highest_id() {
        let reported: ReportedSet = [WalkId(99), WalkId(100), WalkId(20)].into_iter().collect();
        assert_eq!(reported.latest(), Some(WalkId(100)));
        assert_eq!(ReportedSet::default().latest(), None);
    }
}
