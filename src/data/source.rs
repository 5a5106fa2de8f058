// src/data/source.rs

use crate::domain::listing::Listing;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The two listing pools a request works with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub used: Vec<Listing>,
    pub featured: Vec<Listing>,
}

impl Snapshot {
    pub fn new(used: Vec<Listing>, featured: Vec<Listing>) -> Self {
        Self { used, featured }
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty() && self.featured.is_empty()
    }

    /// Both pools back to back, general pool first. A listing present in
    /// both pools appears twice.
    pub fn all(&self) -> Vec<&Listing> {
        self.used.iter().chain(self.featured.iter()).collect()
    }
}

/// Where handlers get listings from. Implementations must not fail: a
/// missing or broken store reads as empty pools.
pub trait ListingSource: Send + Sync {
    fn snapshot(&self) -> Snapshot;
}

/// Reads the dataset file on every request, so edits show up without a
/// restart.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListingSource for JsonFileSource {
    fn snapshot(&self) -> Snapshot {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    event_name = "data.read_failed",
                    path = %self.path.display(),
                    error = %e,
                    "could not read data file"
                );
                return Snapshot::default();
            }
        };

        let doc: Value = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(
                    event_name = "data.parse_failed",
                    path = %self.path.display(),
                    error = %e,
                    "data file is not valid JSON"
                );
                return Snapshot::default();
            }
        };

        let snapshot = parse_document(&doc);
        if snapshot.is_empty() {
            warn!(
                event_name = "data.empty",
                path = %self.path.display(),
                "data file has no listings"
            );
        }
        debug!(
            event_name = "data.loaded",
            used = snapshot.used.len(),
            featured = snapshot.featured.len(),
            "dataset loaded"
        );
        snapshot
    }
}

/// Pulls both pools out of `{"data": {"used_cars": [..], "featured_used_cars": [..]}}`.
pub fn parse_document(doc: &Value) -> Snapshot {
    let data = doc.get("data");
    Snapshot {
        used: parse_pool(data.and_then(|d| d.get("used_cars")), "used_cars"),
        featured: parse_pool(
            data.and_then(|d| d.get("featured_used_cars")),
            "featured_used_cars",
        ),
    }
}

// Records that do not fit the Listing shape are skipped one by one
// instead of discarding the whole pool.
fn parse_pool(pool: Option<&Value>, name: &str) -> Vec<Listing> {
    let Some(Value::Array(records)) = pool else {
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| match Listing::deserialize(record) {
            Ok(listing) => Some(listing),
            Err(e) => {
                warn!(
                    event_name = "data.record_skipped",
                    pool = name,
                    index = idx,
                    error = %e,
                    "skipping malformed listing"
                );
                None
            }
        })
        .collect()
}

/// Fixed in-memory pools.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: Snapshot,
}

impl StaticSource {
    pub fn new(used: Vec<Listing>, featured: Vec<Listing>) -> Self {
        Self {
            snapshot: Snapshot::new(used, featured),
        }
    }
}

impl ListingSource for StaticSource {
    fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }
}
