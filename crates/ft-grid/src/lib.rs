//! ft-grid: snapshot data model for flowtrace.
//!
//! Provides:
//! - Zone records with production mixes, signed exchanges and derived aggregates
//! - Snapshots (one timestamp) and an incremental snapshot builder
//! - Validity filtering of zones before they enter the linear system
//! - Stable indexing from zone keys to solver unknowns
//! - YAML/JSON loading
//!
//! # Example
//!
//! ```
//! use ft_grid::SnapshotBuilder;
//!
//! let mut builder = SnapshotBuilder::new();
//! let fr = builder.add_zone("FR").unwrap();
//! let de = builder.add_zone("DE").unwrap();
//! builder.set_production(fr, "nuclear", 100.0);
//! builder.set_production(de, "coal", 80.0);
//! builder.add_flow(fr, de, 20.0);
//! let snapshot = builder.build().unwrap();
//!
//! assert_eq!(snapshot.zones().len(), 2);
//! assert_eq!(snapshot.zone("DE").unwrap().exchange["FR"], 20.0);
//! ```

pub mod builder;
pub mod error;
pub mod indexing;
pub mod io;
pub mod snapshot;
pub mod validate;
pub mod zone;

// Re-exports for ergonomics
pub use builder::SnapshotBuilder;
pub use error::{GridError, GridResult};
pub use indexing::IndexMap;
pub use io::{load_snapshots, snapshots_from_json_str, snapshots_from_yaml_str};
pub use snapshot::{Snapshot, SnapshotFile};
pub use validate::{ExclusionReason, ValidityRule, ZoneStatus, classify};
pub use zone::{Aggregates, DEFAULT_STORAGE_KEYS, Zone};
