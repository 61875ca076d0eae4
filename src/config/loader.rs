//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RedactorConfig;
use crate::domain::errors::RedactorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Prefix of all environment variable overrides
pub const ENV_PREFIX: &str = "JSON_REDACTOR_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RedactorConfig
/// 4. Applies environment variable overrides (JSON_REDACTOR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use json_redactor::config::loader::load_config;
///
/// let config = load_config("json-redactor.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RedactorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RedactorError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RedactorError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: RedactorConfig = toml::from_str(&contents)
        .map_err(|e| RedactorError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RedactorError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Reads literal keys from a key file
///
/// Keys are separated by commas and/or newlines; surrounding whitespace is
/// trimmed and blank entries are dropped.
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read
pub fn load_key_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        RedactorError::Configuration(format!(
            "Failed to read key file {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(split_keys(&contents))
}

/// Splits a comma and/or newline separated key list
pub fn split_keys(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        // Comment lines are copied untouched
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RedactorError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the JSON_REDACTOR_* prefix
///
/// List values (`KEYS`, `KEY_PATTERNS`) are comma-separated and appended to
/// the values from the file.
pub fn apply_env_overrides(config: &mut RedactorConfig) -> Result<()> {
    let var = |name: &str| std::env::var(format!("{ENV_PREFIX}{name}")).ok();

    if let Some(val) = var("KEYS") {
        config.matching.keys.extend(split_keys(&val));
    }
    if let Some(val) = var("KEY_FILE") {
        config.matching.key_file = Some(val.into());
    }
    if let Some(val) = var("KEY_PATTERNS") {
        config.matching.key_patterns.extend(
            val.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        );
    }
    if let Some(val) = var("STRATEGY") {
        config.redaction.strategy = val.parse().map_err(RedactorError::Configuration)?;
    }
    if let Some(val) = var("MASK_PLACEHOLDER") {
        config.redaction.mask_placeholder = val;
    }
    if let Some(val) = var("OUTPUT_STYLE") {
        config.output.style = val.parse().map_err(RedactorError::Configuration)?;
    }
    if let Some(val) = var("LOG_LEVEL") {
        config.logging.level = val;
    }

    Ok(())
}
