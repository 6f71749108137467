//! Incremental snapshot builder.

use chrono::{DateTime, Utc};
use ft_core::{Real, ZoneId};

use crate::error::GridResult;
use crate::snapshot::Snapshot;
use crate::zone::Zone;

/// Builder for constructing a snapshot incrementally.
///
/// Use `add_zone`, `set_production` and `add_flow` to build up the snapshot,
/// then call `build()` to validate and freeze it into a `Snapshot`.
///
/// `add_flow` records a flow on both sides, so snapshots built this way are
/// always exchange-consistent.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    datetime: Option<DateTime<Utc>>,
    zones: Vec<Zone>,
}

impl SnapshotBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn datetime(&mut self, datetime: DateTime<Utc>) -> &mut Self {
        self.datetime = Some(datetime);
        self
    }

    /// Add a zone and return its handle.
    pub fn add_zone(&mut self, key: impl Into<String>) -> GridResult<ZoneId> {
        let id = ZoneId::from_index(self.zones.len())?;
        self.zones.push(Zone::new(key));
        Ok(id)
    }

    /// Set production of one technology in a zone.
    pub fn set_production(&mut self, zone: ZoneId, technology: impl Into<String>, value: Real) {
        if let Some(z) = self.zones.get_mut(zone.index()) {
            z.production.insert(technology.into(), Some(value));
        }
    }

    /// Record `flow` travelling from `from` to `to`.
    ///
    /// Adds an import on `to` and an export on `from`. A negative flow
    /// reverses the direction. Repeated calls accumulate.
    pub fn add_flow(&mut self, from: ZoneId, to: ZoneId, flow: Real) {
        let (Some(from_key), Some(to_key)) = (self.key(from), self.key(to)) else {
            return;
        };
        let (from_key, to_key) = (from_key.to_string(), to_key.to_string());

        if let Some(z) = self.zones.get_mut(to.index()) {
            *z.exchange.entry(from_key).or_insert(0.0) += flow;
        }
        if let Some(z) = self.zones.get_mut(from.index()) {
            *z.exchange.entry(to_key).or_insert(0.0) -= flow;
        }
    }

    /// Record a one-sided exchange entry on `zone` towards a neighbor that may
    /// not be part of the snapshot.
    pub fn set_exchange(&mut self, zone: ZoneId, neighbor: impl Into<String>, flow: Real) {
        if let Some(z) = self.zones.get_mut(zone.index()) {
            z.exchange.insert(neighbor.into(), flow);
        }
    }

    fn key(&self, zone: ZoneId) -> Option<&str> {
        self.zones.get(zone.index()).map(|z| z.key.as_str())
    }

    /// Validate and build the final snapshot.
    pub fn build(self) -> GridResult<Snapshot> {
        Snapshot::new(self.datetime, self.zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridError;

    #[test]
    fn builder_basic() {
        let mut builder = SnapshotBuilder::new();
        let a = builder.add_zone("A").unwrap();
        let b = builder.add_zone("B").unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);

        builder.set_production(a, "coal", 100.0);
        builder.add_flow(a, b, 60.0);
        builder.add_flow(a, b, 40.0);

        let snapshot = builder.build().unwrap();
        assert_eq!(snapshot.zone("A").unwrap().exchange["B"], -100.0);
        assert_eq!(snapshot.zone("B").unwrap().exchange["A"], 100.0);
        assert_eq!(snapshot.zone("A").unwrap().production["coal"], Some(100.0));
    }

    #[test]
    fn build_rejects_duplicates() {
        let mut builder = SnapshotBuilder::new();
        builder.add_zone("X").unwrap();
        builder.add_zone("X").unwrap();
        assert!(matches!(
            builder.build(),
            Err(GridError::DuplicateZone { .. })
        ));
    }

    #[test]
    fn one_sided_exchange() {
        let mut builder = SnapshotBuilder::new();
        let a = builder.add_zone("A").unwrap();
        builder.set_exchange(a, "RU", 15.0);
        let snapshot = builder.build().unwrap();
        assert_eq!(snapshot.zone("A").unwrap().exchange["RU"], 15.0);
    }

    mod proptests {
        use super::*;
        use crate::DEFAULT_STORAGE_KEYS;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn flows_are_mirrored(
                flows in prop::collection::vec((0usize..4, 0usize..4, -50.0..50.0_f64), 0..10),
            ) {
                let mut builder = SnapshotBuilder::new();
                let ids: Vec<_> = (0..4)
                    .map(|i| builder.add_zone(format!("Z{i}")).unwrap())
                    .collect();
                for (from, to, flow) in flows {
                    if from != to {
                        builder.add_flow(ids[from], ids[to], flow);
                    }
                }
                let snapshot = builder.build().unwrap();

                for zone in snapshot.zones() {
                    for (neighbor, flow) in &zone.exchange {
                        let back = snapshot.zone(neighbor).unwrap().exchange[&zone.key];
                        prop_assert_eq!(*flow, -back);
                    }
                }

                let net: f64 = snapshot
                    .zones()
                    .iter()
                    .map(|z| z.aggregates(DEFAULT_STORAGE_KEYS).net_exchange)
                    .sum();
                prop_assert!(net.abs() < 1e-9);
            }
        }
    }
}
