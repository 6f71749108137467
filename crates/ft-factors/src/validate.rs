//! Factor table validation.

use ft_core::ensure_finite;

use crate::FactorError;
use crate::table::{FactorTable, Metric};

/// Every factor must be finite and non-negative; fossil ratios must also be
/// at most 1.
pub fn validate_table(table: &FactorTable) -> Result<(), FactorError> {
    let defaults = table.defaults.iter().map(|(tech, v)| (None, tech, *v));
    let overrides = table.zone_overrides.iter().flat_map(|(zone, entries)| {
        entries
            .iter()
            .map(move |(tech, v)| (Some(zone.as_str()), tech, *v))
    });

    for (zone, tech, value) in defaults.chain(overrides) {
        let location = match zone {
            Some(zone) => format!("'{tech}' in zone '{zone}'"),
            None => format!("'{tech}'"),
        };
        if tech.is_empty() {
            return Err(FactorError::Invalid {
                what: "empty technology name".to_string(),
            });
        }
        let value = ensure_finite(value, format!("factor for {location}")).map_err(|e| {
            FactorError::Invalid {
                what: e.to_string(),
            }
        })?;
        if value < 0.0 {
            return Err(FactorError::Invalid {
                what: format!("factor for {location} must be >= 0, got {value}"),
            });
        }
        if table.metric == Metric::FossilFuelRatio && value > 1.0 {
            return Err(FactorError::Invalid {
                what: format!("fossil ratio for {location} must be <= 1, got {value}"),
            });
        }
    }
    Ok(())
}
