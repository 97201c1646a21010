use kinship::config::*;
use kinship::errors::KinshipError;
use tempfile::TempDir;

#[test]
fn test_default_config_is_strict() {
    let config = ResolverConfig::default();
    assert_eq!(config.version, 1);
    assert_eq!(config.reference_policy, ReferencePolicy::Strict);
    assert!(!config.infer_generations);
}

#[test]
fn test_missing_config_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded, ResolverConfig::default());
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    let config = ResolverConfig {
        reference_policy: ReferencePolicy::FirstWins,
        infer_generations: true,
        ..ResolverConfig::default()
    };
    save_config(dir.path(), &config).unwrap();
    assert!(get_config_path(dir.path()).exists());
    assert!(!get_config_path(dir.path()).with_extension("tmp").exists());

    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_path_layout() {
    let dir = TempDir::new().unwrap();
    assert!(get_kinship_dir(dir.path()).ends_with(".kinship"));
    assert!(get_config_path(dir.path()).ends_with(".kinship/config.json"));
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(get_kinship_dir(dir.path())).unwrap();
    std::fs::write(
        get_config_path(dir.path()),
        r#"{ "reference_policy": "first_wins" }"#,
    )
    .unwrap();

    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded.reference_policy, ReferencePolicy::FirstWins);
    assert_eq!(loaded.version, 1);
    assert!(!loaded.infer_generations);
}

#[test]
fn test_corrupt_config_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(get_kinship_dir(dir.path())).unwrap();
    std::fs::write(get_config_path(dir.path()), "{ not json").unwrap();

    let err = load_config(dir.path()).unwrap_err();
    assert!(matches!(err, KinshipError::Config { .. }));
    assert!(err.to_string().contains("resolver config") && err.to_string().contains("is not valid"));
}
