//! Mass balance, monotonicity and idempotence properties.

use ft_core::{Tolerances, nearly_equal};
use ft_factors::{FactorTable, Metric};
use ft_grid::{Snapshot, SnapshotBuilder, Zone};
use ft_solver::*;
use proptest::prelude::*;

const TOL: Tolerances = Tolerances {
    abs: 1e-6,
    rel: 1e-8,
};

/// Closed grid: every flow is recorded on both sides and every zone keeps
/// enough production to cover its exports.
fn closed_grid(mixes: &[(f64, f64, f64)], flows: &[(usize, usize, f64)]) -> Snapshot {
    let mut builder = SnapshotBuilder::new();
    let ids: Vec<_> = mixes
        .iter()
        .enumerate()
        .map(|(i, &(coal, gas, wind))| {
            let id = builder.add_zone(format!("Z{i}")).unwrap();
            builder.set_production(id, "coal", coal);
            builder.set_production(id, "gas", gas);
            builder.set_production(id, "wind", wind);
            id
        })
        .collect();

    for &(from, to, flow) in flows {
        let (from, to) = (from % ids.len(), to % ids.len());
        if from != to {
            builder.add_flow(ids[from], ids[to], flow);
        }
    }
    builder.build().unwrap()
}

fn mixes() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((0.0..100.0_f64, 0.0..100.0_f64, 20.0..100.0_f64), 2..6)
}

fn flows() -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    prop::collection::vec((0usize..6, 0usize..6, -1.0..1.0_f64), 0..12)
}

proptest! {
    #[test]
    fn consumed_equals_emitted(mixes in mixes(), flows in flows()) {
        let snapshot = closed_grid(&mixes, &flows);
        let factors = FactorTable::builtin(Metric::CarbonIntensity);
        let config = SolverConfig::default();

        let result = solve(&snapshot, &factors, &config).unwrap();
        prop_assert_eq!(result.len(), mixes.len());

        let keys: Vec<String> = snapshot.zones().iter().map(|z| z.key.clone()).collect();
        let consumed = result.consumption_weighted_mean(&snapshot, &config).unwrap();
        let zones = keys.iter().map(String::as_str);
        let produced = production_weighted_factor(&snapshot, &factors, &config, zones).unwrap();
        prop_assert!(nearly_equal(consumed, produced, TOL), "{consumed} != {produced}");
    }

    #[test]
    fn fossil_ratio_stays_in_unit_interval(mixes in mixes(), flows in flows()) {
        let snapshot = closed_grid(&mixes, &flows);
        let factors = FactorTable::builtin(Metric::FossilFuelRatio);

        let result = solve(&snapshot, &factors, &SolverConfig::default()).unwrap();
        for (zone, x) in result.iter() {
            prop_assert!((-1e-12..=1.0 + 1e-12).contains(&x), "{zone}: {x}");
        }
    }

    #[test]
    fn single_technology_is_idempotent(
        tech in prop::sample::select(vec![
            "biomass", "coal", "gas", "hydro", "nuclear", "oil", "solar", "wind",
        ]),
        value in 0.1..1e4_f64,
    ) {
        let factors = FactorTable::builtin(Metric::CarbonIntensity);
        let zone = Zone::new("S").with_production(tech, value);
        let snapshot = Snapshot::new(None, vec![zone]).unwrap();

        let result = solve(&snapshot, &factors, &SolverConfig::default()).unwrap();
        let expected = factors.factor("S", tech).unwrap();
        prop_assert!(nearly_equal(result.get("S").unwrap(), expected, TOL));
    }

    #[test]
    fn more_dirty_imports_never_lower_intensity(
        own in 1.0..500.0_f64,
        low in 0.0..100.0_f64,
        extra in 0.0..100.0_f64,
    ) {
        let factors = FactorTable::builtin(Metric::CarbonIntensity);
        let importer = |import: f64| {
            let mut builder = SnapshotBuilder::new();
            let dirty = builder.add_zone("DIRTY").unwrap();
            let clean = builder.add_zone("CLEAN").unwrap();
            builder.set_production(dirty, "coal", 200.0);
            builder.set_production(clean, "wind", own);
            builder.add_flow(dirty, clean, import);
            let snapshot = builder.build().unwrap();
            solve(&snapshot, &factors, &SolverConfig::default())
                .unwrap()
                .get("CLEAN")
                .unwrap()
        };

        let before = importer(low);
        let after = importer(low + extra);
        prop_assert!(after + 1e-9 >= before, "{after} < {before}");
    }
}
