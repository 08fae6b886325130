use std::io::Write;

use deskflow_core::config::AppConfig;

#[test]
fn test_load_full_config_from_file() {
    let toml_content = r#"
[model]
provider = "openai"
model_id = "gpt-4o-mini"
api_key = "sk-test-key"
max_tokens = 512
temperature = 0.0

[model.retry]
max_retries = 3
initial_backoff_ms = 100

[gateway]
bind = "0.0.0.0:9999"
cors_origins = ["http://localhost:5173"]
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");

    assert_eq!(config.model.provider, "openai");
    assert_eq!(config.model.model_id, "gpt-4o-mini");
    assert_eq!(config.model.api_key, Some("sk-test-key".to_string()));
    assert_eq!(config.model.max_tokens, 512);

    let retry = config.model.retry.expect("retry configured");
    assert_eq!(retry.max_retries, 3);
    assert_eq!(retry.initial_backoff_ms, 100);

    assert_eq!(config.gateway.bind, "0.0.0.0:9999");
    assert_eq!(config.gateway.cors_origins, vec!["http://localhost:5173"]);
}

#[test]
fn test_load_expands_env_vars() {
    std::env::set_var("DESKFLOW_TEST_API_KEY", "sk-from-env");
    let toml_content = r#"
[model]
api_key = "${DESKFLOW_TEST_API_KEY}"
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");
    assert_eq!(config.model.api_key, Some("sk-from-env".to_string()));
    std::env::remove_var("DESKFLOW_TEST_API_KEY");
}

#[test]
fn test_missing_config_file_is_a_distinct_error() {
    let err = AppConfig::load(std::path::Path::new("/nonexistent/deskflow.toml"))
        .expect_err("missing file");
    assert!(err.to_string().contains("Config file not found"));
}
