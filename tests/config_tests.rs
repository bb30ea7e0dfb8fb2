use steering::config::{DEFAULT_STEERING_DIR, SteeringConfig};
use steering::context::DEFAULT_MAX_BYTES;

#[test]
fn test_default_config() {
    let config = SteeringConfig::default();

    assert_eq!(config.steering.dir, DEFAULT_STEERING_DIR);
    assert_eq!(config.context.max_bytes, DEFAULT_MAX_BYTES);
    assert!(config.context.max_documents.is_none());
}

#[test]
fn test_config_toml_round_trip() {
    let config = SteeringConfig::default();
    let text = config.to_toml().unwrap();

    assert!(text.contains("[steering]"));
    assert!(text.contains("[context]"));
    let parsed: SteeringConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_unknown_values_fail_to_parse() {
    let result: Result<SteeringConfig, _> = toml::from_str("[context]\nmax_bytes = \"lots\"\n");
    assert!(result.is_err());
}
