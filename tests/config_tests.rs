// Integration tests for TOML engine configuration.

use std::io::Write;

use beatleap_core::*;

#[test]
fn defaults_are_valid() {
    let config = EngineConfig::default();
    assert!(config.validate().is_ok());
    assert!((config.sensitivity - DEFAULT_SENSITIVITY).abs() < 1e-6);
    assert!((config.lateral_range - DEFAULT_LATERAL_RANGE).abs() < 1e-6);
    assert!((config.target_spacing - DEFAULT_TARGET_SPACING).abs() < 1e-6);
    assert!((config.lookahead_sec - DEFAULT_LOOKAHEAD_SEC).abs() < 1e-9);
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = EngineConfig::from_toml_str("sensitivity = 2.5\nrng_seed = 99\n").unwrap();
    assert!((config.sensitivity - 2.5).abs() < 1e-6);
    assert_eq!(config.rng_seed, 99);
    assert!((config.target_spacing - DEFAULT_TARGET_SPACING).abs() < 1e-6);
}

#[test]
fn empty_toml_is_default() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn unknown_keys_are_rejected() {
    let err = EngineConfig::from_toml_str("sensitivty = 2.0").unwrap_err();
    assert!(matches!(err, EngineError::Parse(_)), "got {err:?}");
}

#[test]
fn out_of_range_values_are_rejected() {
    for text in [
        "sensitivity = 0.0",
        "sensitivity = -1.0",
        "sensitivity = 50.0",
        "lateral_range = -2.0",
        "target_spacing = 0.0",
        "lookahead_sec = 0.0",
    ] {
        let err = EngineConfig::from_toml_str(text).unwrap_err();
        assert!(
            matches!(err, EngineError::InvalidConfig(_)),
            "{text:?} gave {err:?}"
        );
    }
}

#[test]
fn sensitivity_cap_is_inclusive() {
    let config = EngineConfig::from_toml_str(&format!("sensitivity = {MAX_SENSITIVITY:.1}")).unwrap();
    assert!((config.sensitivity - MAX_SENSITIVITY).abs() < 1e-6);
    let err = EngineConfig::from_toml_str("sensitivity = 10.5").unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfig(_)));
}

#[test]
fn zero_lateral_range_is_allowed() {
    let config = EngineConfig::from_toml_str("lateral_range = 0.0").unwrap();
    assert_eq!(config.lateral_range, 0.0);
}

#[test]
fn loads_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "sensitivity = 1.0").unwrap();
    writeln!(file, "lookahead_sec = 0.25").unwrap();
    let config = EngineConfig::load(file.path()).unwrap();
    assert!((config.sensitivity - 1.0).abs() < 1e-6);
    assert!((config.lookahead_sec - 0.25).abs() < 1e-9);
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
}
