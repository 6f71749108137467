use ft_grid::*;

const SINGLE_YAML: &str = r#"
datetime: 2017-03-01T12:00:00Z
zones:
  - countryCode: FR
    production:
      nuclear: 45000
      hydro: 8000
      coal: null
    exchange:
      DE: -2000
      ES: -1500
  - countryCode: DE
    production:
      coal: 20000
      wind: 12000
    exchange:
      FR: 2000
"#;

#[test]
fn load_single_snapshot_yaml() {
    let snapshots = snapshots_from_yaml_str(SINGLE_YAML).unwrap();
    assert_eq!(snapshots.len(), 1);

    let snapshot = &snapshots[0];
    assert!(snapshot.datetime.is_some());
    assert_eq!(snapshot.zones().len(), 2);

    let fr = snapshot.zone("FR").unwrap();
    let agg = fr.aggregates(DEFAULT_STORAGE_KEYS);
    assert_eq!(agg.production, 53000.0);
    assert_eq!(agg.export, 3500.0);
}

#[test]
fn load_snapshot_list_json() {
    let json = r#"{
        "snapshots": [
            {"zones": [{"countryCode": "A", "production": {"coal": 1.0}}]},
            {"zones": [{"key": "B", "production": {"wind": 2.0}}]}
        ]
    }"#;
    let snapshots = snapshots_from_json_str(json).unwrap();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[1].zones()[0].key, "B");
}

#[test]
fn load_rejects_duplicate_zone() {
    let yaml = r#"
zones:
  - countryCode: PL
  - countryCode: PL
"#;
    let err = snapshots_from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, GridError::DuplicateZone { .. }));
}

#[test]
fn load_from_file_by_extension() {
    let temp_dir = std::env::temp_dir();

    let yaml_path = temp_dir.join("ft_grid_loading_snapshot.yaml");
    std::fs::write(&yaml_path, SINGLE_YAML).unwrap();
    let from_yaml = load_snapshots(&yaml_path).unwrap();

    let json_path = temp_dir.join("ft_grid_loading_snapshot.json");
    std::fs::write(&json_path, serde_json::to_string(&from_yaml[0]).unwrap()).unwrap();
    let from_json = load_snapshots(&json_path).unwrap();

    assert_eq!(from_yaml, from_json);
}

#[test]
fn missing_file_reports_path() {
    let path = std::env::temp_dir().join("ft_grid_does_not_exist.yaml");
    let err = load_snapshots(&path).unwrap_err();
    assert!(format!("{err}").contains("ft_grid_does_not_exist"));
}

#[test]
fn classify_mixed_snapshot() {
    let mut builder = SnapshotBuilder::new();
    let a = builder.add_zone("A").unwrap();
    let b = builder.add_zone("B").unwrap();
    let c = builder.add_zone("C").unwrap();
    builder.set_production(a, "coal", 100.0);
    builder.add_flow(a, b, 50.0);
    builder.set_production(c, "gas", 10.0);
    builder.set_exchange(c, "X", -30.0);
    let snapshot = builder.build().unwrap();

    let strict = classify(&snapshot, ValidityRule::RequireProduction, DEFAULT_STORAGE_KEYS);
    assert_eq!(
        strict,
        vec![
            ZoneStatus::Valid,
            ZoneStatus::Excluded(ExclusionReason::NoProduction),
            ZoneStatus::Excluded(ExclusionReason::ExportExceedsSupply),
        ]
    );

    let relaxed = classify(&snapshot, ValidityRule::AllowImportOnly, DEFAULT_STORAGE_KEYS);
    assert!(relaxed[1].is_valid());
}
