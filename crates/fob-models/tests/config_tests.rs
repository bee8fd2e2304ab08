use std::fs;

use fob_models::{BuildOptions, ModelsError, RegistrationOrder};
use tempfile::tempdir;

#[test]
fn loads_options_from_explicit_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("models.toml");
    fs::write(&path, "registration_order = \"unified\"\n").expect("write config");

    let options = BuildOptions::load(Some(&path)).expect("config loads");
    assert_eq!(options.registration_order, RegistrationOrder::Unified);
    assert!(options.parallel);
}

#[test]
fn wrong_value_type_is_a_config_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("models.toml");
    fs::write(&path, "parallel = \"sometimes\"\n").expect("write config");

    let error = BuildOptions::load(Some(&path)).unwrap_err();
    assert!(matches!(error, ModelsError::Config { .. }), "{error}");
}
