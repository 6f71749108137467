//! Stable indexing for solver integration.
//!
//! Maps the zones that enter the linear system to contiguous unknown
//! indices (0..N), in snapshot order.

use ft_core::ZoneId;
use std::collections::HashMap;

use crate::error::{GridError, GridResult};

/// Bidirectional zone key <-> unknown index map.
#[derive(Debug, Clone, Default)]
pub struct IndexMap {
    /// Contiguous list of keys (index -> key).
    keys: Vec<String>,

    /// Reverse lookup: key -> index.
    key_to_idx: HashMap<String, usize>,
}

impl IndexMap {
    /// Build an index map from zone keys. Order is preserved.
    pub fn new<I, S>(keys: I) -> GridResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::default();
        for key in keys {
            let key = key.into();
            if map.key_to_idx.contains_key(&key) {
                return Err(GridError::DuplicateZone { key });
            }
            map.key_to_idx.insert(key.clone(), map.keys.len());
            map.keys.push(key);
        }
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Unknown index of a zone, if it takes part in the solve.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.key_to_idx.get(key).copied()
    }

    pub fn zone_id(&self, key: &str) -> Option<ZoneId> {
        self.index_of(key).and_then(|i| ZoneId::from_index(i).ok())
    }

    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.key_to_idx.contains_key(key)
    }
}
