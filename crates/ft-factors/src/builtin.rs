//! Built-in factor tables.

use crate::table::{FactorTable, Metric};

/// Direct plus lifecycle emission factors, gCO2eq/kWh.
const CARBON_INTENSITY: &[(&str, f64)] = &[
    ("biomass", 230.0),
    ("coal", 930.0),
    ("gas", 490.0),
    ("geothermal", 38.0),
    ("hydro", 24.0),
    ("nuclear", 12.0),
    ("oil", 650.0),
    ("solar", 45.0),
    ("wind", 0.0),
    ("unknown", 700.0),
];

/// `unknown` is left out: its fossil share is not known.
const FOSSIL_FUEL_RATIO: &[(&str, f64)] = &[
    ("biomass", 0.0),
    ("coal", 1.0),
    ("gas", 1.0),
    ("geothermal", 0.0),
    ("hydro", 0.0),
    ("nuclear", 0.0),
    ("oil", 1.0),
    ("solar", 0.0),
    ("wind", 0.0),
];

impl FactorTable {
    /// The bundled table for a metric.
    pub fn builtin(metric: Metric) -> Self {
        let entries = match metric {
            Metric::CarbonIntensity => CARBON_INTENSITY,
            Metric::FossilFuelRatio => FOSSIL_FUEL_RATIO,
        };
        let mut table = FactorTable::new(metric);
        for (tech, factor) in entries {
            table.insert(*tech, *factor);
        }
        table
    }
}
