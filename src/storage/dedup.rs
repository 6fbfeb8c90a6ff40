use crate::model::{Deal, StorageError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// What gets written to disk: the calendar day and every deal key already
/// notified on that day. A day change makes the whole record stale.
#[derive(Debug, Serialize, Deserialize)]
struct DedupRecord {
    day: NaiveDate,
    keys: Vec<String>,
}

/// Day-scoped set of already-notified deal keys, persisted as one JSON
/// file that is overwritten wholesale at the end of a run.
pub struct DedupStore {
    path: PathBuf,
}

impl DedupStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Keys notified earlier today. A missing, unreadable, malformed or
    /// stale-dated record reads as empty; re-notifying beats silently
    /// losing deals.
    pub fn load(&self, today: NaiveDate) -> HashSet<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return HashSet::new(),
        };
        let record: DedupRecord = match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!("Malformed dedup state, starting fresh: {e}");
                return HashSet::new();
            }
        };
        if record.day != today {
            return HashSet::new();
        }
        record.keys.into_iter().collect()
    }

    /// Overwrites the stored record with today's full key set.
    pub fn persist(&self, today: NaiveDate, keys: &HashSet<String>) -> Result<(), StorageError> {
        let mut keys: Vec<String> = keys.iter().cloned().collect();
        keys.sort();
        let record = DedupRecord { day: today, keys };
        fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        Ok(())
    }
}

/// Deals whose key has not been notified today, ranked order preserved.
pub fn filter_new(deals: Vec<Deal>, known: &HashSet<String>) -> Vec<Deal> {
    deals
        .into_iter()
        .filter(|deal| !known.contains(&deal.dedup_key()))
        .collect()
}
