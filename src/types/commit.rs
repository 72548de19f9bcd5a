use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::hash::{compute_commit_id, Id};

/// an immutable node in the commit DAG.
///
/// `tracked` maps an absolute working-tree path to the blob id holding its
/// content as of this commit; it is the full snapshot, not a delta.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// seconds since the Unix epoch; 0 for the initial commit
    pub timestamp: i64,
    pub message: String,
    pub parents: Vec<Id>,
    pub tracked: BTreeMap<String, Id>,
}

impl Commit {
    /// the repository's very first commit: epoch-0 timestamp, fixed message,
    /// no parents, empty snapshot.
    pub fn initial() -> Self {
        Self {
            timestamp: 0,
            message: "initial commit".to_string(),
            parents: vec![],
            tracked: BTreeMap::new(),
        }
    }

    /// an ordinary (or merge) commit built by the caller from drained staging.
    pub fn new(parents: Vec<Id>, message: impl Into<String>, tracked: BTreeMap<String, Id>) -> Self {
        Self {
            timestamp: Local::now().timestamp(),
            message: message.into(),
            parents,
            tracked,
        }
    }

    /// content-addressed identity, computed over the logical fields.
    pub fn id(&self) -> Id {
        compute_commit_id(
            &format_timestamp(self.timestamp),
            &self.message,
            &self.parents,
            self.tracked.iter().map(|(k, v)| (k.as_str(), v)),
        )
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// formatted log entry, per the `===` block format; does not include the
    /// trailing blank line separating entries (callers add that).
    pub fn log_entry(&self, id: &Id) -> String {
        let mut out = String::new();
        out.push_str("===\n");
        out.push_str(&format!("commit {}\n", id));
        if self.is_merge() {
            out.push_str(&format!(
                "Merge: {} {}\n",
                self.parents[0].short(),
                self.parents[1].short()
            ));
        }
        out.push_str(&format!("Date: {}\n", format_timestamp(self.timestamp)));
        out.push_str(&self.message);
        out.push('\n');
        out
    }
}

/// format a Unix timestamp as `EEE MMM d HH:mm:ss yyyy Z` in local time,
/// e.g. `Wed Dec 31 16:00:00 1969 -0800`.
pub fn format_timestamp(epoch_secs: i64) -> String {
    let dt: DateTime<Local> = Local
        .timestamp_opt(epoch_secs, 0)
        .single()
        .unwrap_or_else(|| Local.timestamp_opt(0, 0).single().unwrap());
    dt.format("%a %b %-d %H:%M:%S %Y %z").to_string()
}
