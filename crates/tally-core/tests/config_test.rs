use std::collections::HashMap;
use std::io::Write;

use tally_core::config::TallyConfig;
use tally_core::errors::ConfigError;

#[test]
fn defaults_are_valid() {
    let config = TallyConfig::default();
    config.validate().unwrap();
    assert!((config.scoring.weights.sum() - 1.0).abs() < 1e-9);
    assert_eq!(config.batch.max_batch_size, 200);
    assert_eq!(config.batch.research_concurrency, 10);
    assert_eq!(config.monitor.window_size, 100);
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = TallyConfig::from_toml(
        r#"
        [batch]
        max_batch_size = 50

        [resolver]
        research_timeout_ms = 750
        "#,
    )
    .unwrap();
    assert_eq!(config.batch.max_batch_size, 50);
    assert_eq!(config.batch.research_concurrency, 10);
    assert_eq!(config.resolver.research_timeout_ms, 750);
    assert_eq!(config.scoring.decision_threshold, 0.6);
}

#[test]
fn weights_not_summing_to_one_are_rejected() {
    let err = TallyConfig::from_toml(
        r#"
        [scoring.weights]
        keyword = 0.5
        "#,
    )
    .unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "scoring.weights"),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = TallyConfig::from_toml("[batch\nmax_batch_size = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn load_reads_file_and_reports_missing_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[learning]\nmin_records_for_promotion = 3").unwrap();
    let config = TallyConfig::load(file.path()).unwrap();
    assert_eq!(config.learning.min_records_for_promotion, 3);

    let missing = std::path::Path::new("/definitely/not/here/tally.toml");
    assert!(matches!(
        TallyConfig::load(missing),
        Err(ConfigError::FileNotFound { .. })
    ));
}

#[test]
fn env_overrides_apply_and_ignore_garbage() {
    let vars: HashMap<&str, &str> = [
        ("TALLY_BATCH_MAX_SIZE", "120"),
        ("TALLY_RESEARCH_CONCURRENCY", "not-a-number"),
        ("TALLY_RESEARCH_TIMEOUT_MS", "900"),
    ]
    .into_iter()
    .collect();
    let mut config = TallyConfig::default();
    config.apply_env_overrides_from(|k| vars.get(k).map(|v| v.to_string()));
    assert_eq!(config.batch.max_batch_size, 120);
    assert_eq!(config.batch.research_concurrency, 10);
    assert_eq!(config.resolver.research_timeout_ms, 900);
}
