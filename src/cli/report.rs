//! Report command: emit new walks, then remember them.

use std::fs;

use tracing::info;

use crate::config::Config;
use crate::pipeline;
use crate::source::WalkSource;
use crate::storage::Storage;

use super::ReportArgs;

pub(super) fn cmd_report(
    config: &Config,
    storage: &Storage,
    args: &ReportArgs,
) -> Result<(), String> {
    // Authenticate before reading any report state.
    let client = super::connect(config, storage)?;

    report_new_walks(&client, storage, args.dry_run, |html, new_walks| {
        match &args.out {
            Some(path) => {
                fs::write(path, html)
                    .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
                eprintln!("Reported {new_walks} walk(s) → {}", path.display());
            }
            None => print!("{html}"),
        }
        Ok(())
    })
}

/// Run the report against `source`, hand any new walks to `emit`, then
/// save the grown reported set.
///
/// Nothing is saved unless `emit` succeeded first. A fetch error, an empty
/// report, or a dry run leaves the stored set as it was.
fn report_new_walks(
    source: &impl WalkSource,
    storage: &Storage,
    dry_run: bool,
    emit: impl FnOnce(&str, usize) -> Result<(), String>,
) -> Result<(), String> {
    let record = storage
        .load_reported()
        .map_err(|e| format!("failed to load reported walks: {e}"))?;

    let run = pipeline::run(source, record.walks).map_err(|e| e.to_string())?;

    let Some(html) = run.html else {
        // Nothing new: emit nothing and leave the saved set untouched.
        return Ok(());
    };
    emit(&html, run.new_walks)?;

    if dry_run {
        info!("dry run, reported walks not saved");
        return Ok(());
    }

    // The report is already out; a failure here is surfaced but not undone.
    storage
        .save_reported(&run.reported)
        .map_err(|e| format!("report emitted but failed to save reported walks: {e}"))?;
    info!(total = run.reported.len(), "saved reported walks");

    Ok(())
}
