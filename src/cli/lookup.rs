//! Lookup command: print a single backend record as JSON.

use serde::Serialize;

use crate::config::Config;
use crate::model::WalkerId;
use crate::source::{FetchError, WalkSource};
use crate::storage::Storage;

use super::LookupTarget;
use super::format::describe_lookup;

pub(super) fn cmd_lookup(
    config: &Config,
    storage: &Storage,
    target: &LookupTarget,
) -> Result<(), String> {
    let client = super::connect(config, storage)?;
    let what = describe_lookup(target);
    let failed = |e: FetchError| format!("failed to look up {what}: {e}");

    let document = match target {
        LookupTarget::Walker { id } => {
            // The one lookup with a typed record.
            let walker = client.walker(WalkerId(*id)).map_err(failed)?;
            let walker = walker.ok_or_else(|| format!("no {what} found"))?;
            return print_json(&walker, &what);
        }
        LookupTarget::Reviews { id } => client.walker_reviews(WalkerId(*id)),
        LookupTarget::Dog { id } => client.dog(id),
        LookupTarget::Owner => client.owner(),
        LookupTarget::WalkTypes => client.walk_types(),
        LookupTarget::Nearby => client.nearby_walkers(),
    }
    .map_err(failed)?;

    if document.is_null() {
        return Err(format!("no {what} found"));
    }
    print_json(&document, &what)
}

fn print_json<T: Serialize>(value: &T, what: &str) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize {what}: {e}"))?;
    println!("{json}");
    Ok(())
}
