//! HTML report rendering.
//!
//! Each walk becomes one outer table whose rows are small nested tables:
//! title, walker, media, flags, money, charges, timing, and the note.
//! Walks are ordered most recent first and separated by `<hr>`.
//!
//! Numbers are formatted with `{:.N}`, which rounds the exact binary value
//! of the float and breaks exact decimal ties to even: `1.005` renders as
//! `1.00` (its binary value is just below the tie) and `0.125` as `0.12`.
//!
//! Strings from the backend are inserted verbatim.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::model::{Walk, WalkId, Walker, WalkerId};

const STYLE: &str = "<style>table, th, td { border: 1px solid black; }</style>";

/// Render the pending walks as one HTML document.
///
/// Returns `None` when there is nothing to report, so callers can tell
/// "no report" apart from an empty document. Walkers missing from
/// `walkers` render as a zero-valued profile.
pub fn render(
    pending: &BTreeMap<WalkId, Walk>,
    walkers: &BTreeMap<WalkerId, Walker>,
) -> Option<String> {
    if pending.is_empty() {
        return None;
    }

    let placeholder = Walker::default();
    let mut html = String::from("<html><body>\n");
    html.push_str(STYLE);
    html.push('\n');

    for walk in pending.values().rev() {
        let walker = walkers.get(&walk.walker_id).unwrap_or(&placeholder);
        html.push_str(&render_walk(walk, walker));
        html.push_str("\n<hr>\n");
    }

    html.push_str("</body></html>\n");
    Some(html)
}

/// Render a single walk as an outer table of nested tables.
fn render_walk(walk: &Walk, walker: &Walker) -> String {
    let title = format!("<b>{}</b>", walk.date);

    let walker_row = table(&[vec![
        format!("<img src=\"{}\" width=\"50px\">", walker.thumb),
        walker.first_name.clone(),
        format!("{:.3}", walker.rating),
        walker.walk_completed_count.to_string(),
    ]]);

    let media = table(&[
        vec![linked_image(&walk.photo_url)],
        vec![linked_image(&walk.walk_map)],
    ]);

    let flags = table(&[
        cells(&["door locked", "peed", "pood", "distance"]),
        vec![
            walk.is_door_locked.to_string(),
            walk.is_pee.to_string(),
            walk.is_poo.to_string(),
            format!("{:.2} miles", walk.distance),
        ],
    ]);

    let money = table(&[
        cells(&["payout", "tip", "total"]),
        vec![
            format!("{:.2}", walk.payout),
            format!("{:.2}", walk.tip),
            format!("{:.2}", walk.total),
        ],
    ]);

    let (descriptions, amounts): (Vec<String>, Vec<String>) = walk
        .invoice
        .charges
        .iter()
        .map(|c| (c.description.clone(), format!("{:.2}", c.amount)))
        .unzip();
    let charges = table(&[descriptions, amounts]);

    let timing = table(&[
        cells(&["scheduled start", "start", "end", "scheduled end"]),
        vec![
            walk.walk_start.clone(),
            walk.walk_started.clone(),
            walk.walk_completed.clone(),
            walk.walk_end.clone(),
        ],
    ]);

    table(&[
        vec![title],
        vec![walker_row],
        vec![media],
        vec![flags],
        vec![money],
        vec![charges],
        vec![timing],
        vec![walk.note.clone()],
    ])
}

/// Render rows of pre-formatted cells as a `<table>`.
///
/// An empty row still produces its `<tr>` pair.
fn table(rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table>\n");
    for row in rows {
        out.push_str("<tr>\n");
        for cell in row {
            // Writing to a String cannot fail.
            let _ = write!(out, "<td>{cell}</td>");
        }
        out.push_str("\n</tr>\n");
    }
    out.push_str("</table>");
    out
}

fn cells(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| (*s).to_string()).collect()
}

fn linked_image(url: &str) -> String {
    format!("<a href=\"{url}\"><img src=\"{url}\" width=\"600px\"></a>")
}
