//! Library search path listings.

use rab_common::EnvProvider;
use serde_json::{Map, Value};
use tracing::debug;

/// Sentinel recorded for a directory that cannot be listed.
pub const UNREADABLE: &str = "(unreadable)";

/// Snapshot the contents of each library search path entry, keyed by the
/// entry's position. Listings are sorted for determinism; an unreadable
/// directory records [`UNREADABLE`] instead.
pub fn collect_search_path(env: &dyn EnvProvider) -> Value {
    let mut data = Map::new();
    for (index, dir) in env.search_path().iter().enumerate() {
        let listing = match env.list_dir(dir) {
            Ok(mut entries) => {
                entries.sort();
                entries.join(":")
            }
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "search path entry unreadable");
                UNREADABLE.to_string()
            }
        };
        data.insert(index.to_string(), Value::String(listing));
    }
    Value::Object(data)
}
