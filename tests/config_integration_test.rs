//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interference between tests.

use json_redactor::config::load_config;
use json_redactor::redaction::{OutputStyle, RedactionEngine, StrategyKind};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for name in [
        "JSON_REDACTOR_KEYS",
        "JSON_REDACTOR_KEY_FILE",
        "JSON_REDACTOR_KEY_PATTERNS",
        "JSON_REDACTOR_STRATEGY",
        "JSON_REDACTOR_MASK_PLACEHOLDER",
        "JSON_REDACTOR_OUTPUT_STYLE",
        "JSON_REDACTOR_LOG_LEVEL",
        "TEST_REDACTOR_PLACEHOLDER",
    ] {
        std::env::remove_var(name);
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file(
        r#"
[matching]
keys = ["email", "password"]
key_patterns = ["(?i)token$"]

[redaction]
strategy = "hash"
mask_placeholder = "[removed]"

[output]
style = "pretty"

[logging]
level = "debug"
local_enabled = false
local_path = "/tmp/json-redactor"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");
    assert_eq!(config.matching.keys, vec!["email", "password"]);
    assert_eq!(config.matching.key_patterns, vec!["(?i)token$"]);
    assert_eq!(config.redaction.strategy, StrategyKind::Hash);
    assert_eq!(config.redaction.mask_placeholder, "[removed]");
    assert_eq!(config.output.style, OutputStyle::Pretty);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file("[matching]\nkeys = [\"ssn\"]\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.redaction.strategy, StrategyKind::Mask);
    assert_eq!(config.redaction.mask_placeholder, "***REDACTED***");
    assert_eq!(config.output.style, OutputStyle::Compact);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_REDACTOR_PLACEHOLDER", "<gone>");

    let file = config_file(
        "[matching]\nkeys = [\"a\"]\n\n[redaction]\nmask_placeholder = \"${TEST_REDACTOR_PLACEHOLDER}\"\n",
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.redaction.mask_placeholder, "<gone>");

    cleanup_env_vars();
}

#[test]
fn test_env_var_substitution_missing() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file("[redaction]\nmask_placeholder = \"${TEST_REDACTOR_PLACEHOLDER}\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("TEST_REDACTOR_PLACEHOLDER"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("JSON_REDACTOR_KEYS", "phone, ssn");
    std::env::set_var("JSON_REDACTOR_KEY_PATTERNS", "^pass,secret$");
    std::env::set_var("JSON_REDACTOR_STRATEGY", "hash");
    std::env::set_var("JSON_REDACTOR_OUTPUT_STYLE", "pretty");
    std::env::set_var("JSON_REDACTOR_LOG_LEVEL", "error");

    let file = config_file("[matching]\nkeys = [\"email\"]\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.matching.keys, vec!["email", "phone", "ssn"]);
    assert_eq!(config.matching.key_patterns, vec!["^pass", "secret$"]);
    assert_eq!(config.redaction.strategy, StrategyKind::Hash);
    assert_eq!(config.output.style, OutputStyle::Pretty);
    assert_eq!(config.logging.level, "error");

    cleanup_env_vars();
}

#[test]
fn test_invalid_env_override() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("JSON_REDACTOR_STRATEGY", "encrypt");

    let file = config_file("");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("encrypt"));

    cleanup_env_vars();
}

#[test]
fn test_invalid_toml() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file("[matching\nkeys = \n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_invalid_logging_level() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = config_file("[logging]\nlevel = \"chatty\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration validation failed"));
}

#[test]
fn test_engine_from_config_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let mut keys = NamedTempFile::new().unwrap();
    writeln!(keys, "house\ntel").unwrap();

    let file = config_file(&format!(
        "[matching]\nkey_file = '{}'\n\n[redaction]\nmask_placeholder = \"#\"\n",
        keys.path().display()
    ));
    let config = load_config(file.path()).unwrap();
    let engine = RedactionEngine::from_config(&config).unwrap();

    let mut output = Vec::new();
    engine
        .process(
            r#"{"addresses":[{"house":"1","tel":"11-22","zip":"9"}]}"#.as_bytes(),
            &mut output,
        )
        .unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        r##"{"addresses":[{"house":"#","tel":"#","zip":"9"}]}"##
    );
}
