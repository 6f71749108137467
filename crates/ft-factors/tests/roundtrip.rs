use ft_factors::*;

#[test]
fn roundtrip_yaml_builtin_table() {
    let table = FactorTable::builtin(Metric::CarbonIntensity).with_override("PL", "coal", 1050.0);

    let path = std::env::temp_dir().join("ft_factors_roundtrip.yaml");
    save_yaml(&path, &table).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(table, loaded);
    assert_eq!(loaded.factor("PL", "coal"), Some(1050.0));
}

#[test]
fn parse_handwritten_yaml() {
    let yaml = r#"
metric: fossil_fuel_ratio
defaults:
  coal: 1
  gas: 1
  wind: 0
zone_overrides:
  NO-NO1:
    gas: 0.5
"#;
    let table = from_yaml_str(yaml).unwrap();
    assert_eq!(table.metric, Metric::FossilFuelRatio);
    assert_eq!(table.factor("NO-NO1", "gas"), Some(0.5));
    assert_eq!(table.factor("SE", "gas"), Some(1.0));
}

#[test]
fn metric_defaults_to_carbon() {
    let table = from_yaml_str("defaults: {coal: 930}").unwrap();
    assert_eq!(table.metric, Metric::CarbonIntensity);
}

#[test]
fn invalid_yaml_table_rejected() {
    let yaml = r#"
metric: fossil_fuel_ratio
defaults:
  coal: 2
"#;
    assert!(matches!(
        from_yaml_str(yaml),
        Err(FactorError::Invalid { .. })
    ));
}

#[test]
fn json_table_loads() {
    let path = std::env::temp_dir().join("ft_factors_table.json");
    std::fs::write(&path, r#"{"defaults": {"coal": 930.0, "wind": 0.0}}"#).unwrap();
    let table = load(&path).unwrap();
    assert_eq!(table.factor("DE", "coal"), Some(930.0));
}
