//! Snapshot: all zones at one timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{GridError, GridResult};
use crate::zone::Zone;

/// Production and exchange data for every zone at a single timestamp.
///
/// A snapshot is rebuilt from scratch for each timestamp; nothing is carried
/// over between snapshots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl Snapshot {
    /// Create a snapshot and check its structure.
    pub fn new(datetime: Option<DateTime<Utc>>, zones: Vec<Zone>) -> GridResult<Self> {
        let snapshot = Self { datetime, zones };
        snapshot.validate_structure()?;
        Ok(snapshot)
    }

    /// Return all zones in input order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Look a zone up by key.
    pub fn zone(&self, key: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.key == key)
    }

    /// Check structural well-formedness: unique non-empty keys, no
    /// self-exchange, finite numbers.
    ///
    /// This does not apply the validity filter; zones that fail it are still
    /// structurally fine and are simply left out of the solve.
    pub fn validate_structure(&self) -> GridResult<()> {
        let mut seen = HashSet::with_capacity(self.zones.len());
        for (position, zone) in self.zones.iter().enumerate() {
            if zone.key.is_empty() {
                return Err(GridError::EmptyKey { position });
            }
            if !seen.insert(zone.key.as_str()) {
                return Err(GridError::DuplicateZone {
                    key: zone.key.clone(),
                });
            }
            if zone.exchange.contains_key(&zone.key) {
                return Err(GridError::SelfExchange {
                    key: zone.key.clone(),
                });
            }

            let values = zone
                .production
                .iter()
                .filter_map(|(tech, v)| v.map(|v| (format!("production.{tech}"), v)))
                .chain(
                    zone.exchange
                        .iter()
                        .map(|(k, v)| (format!("exchange.{k}"), *v)),
                );
            for (field, value) in values {
                if !value.is_finite() {
                    return Err(GridError::NonFinite {
                        key: zone.key.clone(),
                        field,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

/// On-disk layout: either one snapshot or a list of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotFile {
    Many { snapshots: Vec<Snapshot> },
    One(Snapshot),
}

impl SnapshotFile {
    pub fn into_snapshots(self) -> Vec<Snapshot> {
        match self {
            SnapshotFile::Many { snapshots } => snapshots,
            SnapshotFile::One(snapshot) => vec![snapshot],
        }
    }
}
