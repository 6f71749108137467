use core::fmt;
use core::num::NonZeroU32;

use crate::{FtError, FtResult};

/// Handle for a zone's position inside one snapshot.
///
/// Stored as position + 1 so that `Option<ZoneId>` needs no extra space.
/// Positions past `u32::MAX - 1` are rejected rather than wrapped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(NonZeroU32);

impl ZoneId {
    pub fn from_index(index: usize) -> FtResult<Self> {
        u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(FtError::IndexOverflow { index })
    }

    /// Position of the zone in its snapshot.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl TryFrom<usize> for ZoneId {
    type Error = FtError;

    fn try_from(index: usize) -> FtResult<Self> {
        Self::from_index(index)
    }
}

impl fmt::Debug for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZoneId(#{})", self.index())
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}
