use kestrel_config::{ConfigWarning, KestrelConfig};

#[test]
fn unknown_keys_are_reported_with_full_paths() {
    let text = r#"
verbose = true

[resolve]
cahce = false

[logging]
colour = "always"
"#;

    let (config, diagnostics) = KestrelConfig::load_from_str_with_diagnostics(text).unwrap();
    assert!(config.resolve.cache);
    assert_eq!(
        diagnostics.unknown_keys,
        vec!["logging.colour", "resolve.cahce", "verbose"]
    );
    assert!(diagnostics.warnings.is_empty());
}

#[test]
fn clean_config_has_no_diagnostics() {
    let (_config, diagnostics) =
        KestrelConfig::load_from_str_with_diagnostics("[logging]\nlevel = \"warning\"\n").unwrap();
    assert!(diagnostics.is_empty());
}

#[test]
fn invalid_logging_level_is_a_warning() {
    let (_config, diagnostics) =
        KestrelConfig::load_from_str_with_diagnostics("[logging]\nlevel = \"kestrel=verbose\"\n")
            .unwrap();
    assert_eq!(
        diagnostics.warnings,
        vec![ConfigWarning::LoggingLevelInvalid {
            value: "kestrel=verbose".to_owned(),
            normalized: "kestrel=verbose".to_owned(),
        }]
    );
}

#[test]
fn diagnostics_load_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kestrel.toml");
    std::fs::write(&path, "[resolve]\nimplicit_imports = [\"\"]\n").unwrap();

    let (_config, diagnostics) = KestrelConfig::load_from_path_with_diagnostics(&path).unwrap();
    assert_eq!(diagnostics.warnings.len(), 1);
    assert!(diagnostics.unknown_keys.is_empty());
}
