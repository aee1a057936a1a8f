//! Output formatting for CLI display.

use crate::storage::ReportedRecord;

use super::LookupTarget;

/// Format the reported-walk record for `dogreport status`.
pub(super) fn format_status(record: &ReportedRecord) -> String {
    let mut lines = vec![if record.walks.is_empty() {
        "no walks reported yet".to_string()
    } else {
        let n = record.walks.len();
        format!("{n} walk{} reported", if n == 1 { "" } else { "s" })
    }];

    if let Some(latest) = record.walks.latest() {
        lines.push(format!("latest walk: {latest}"));
    }

    match record.updated_at {
        Some(at) => lines.push(format!("last report: {at}")),
        None => lines.push("last report: never".to_string()),
    }

    lines.join("\n")
}

/// Short human-readable description of what is being looked up.
pub(super) fn describe_lookup(target: &LookupTarget) -> String {
    match target {
        LookupTarget::Walker { id } => format!("walker {id}"),
        LookupTarget::Reviews { id } => format!("reviews for walker {id}"),
        LookupTarget::Dog { id } => format!("dog {id}"),
        LookupTarget::Owner => "owner record".to_string(),
        LookupTarget::WalkTypes => "walk types".to_string(),
        LookupTarget::Nearby => "nearby walkers".to_string(),
    }
}
