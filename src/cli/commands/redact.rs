//! Redact command implementation
//!
//! Merges command-line flags over the configuration file, builds the
//! redaction engine and streams one document from the input to the output.

use crate::config::{apply_env_overrides, load_config, split_keys, RedactorConfig};
use crate::domain::errors::RedactorError;
use crate::domain::result::Result;
use crate::redaction::{OutputStyle, RedactionEngine, StrategyKind};
use crate::{log_error_with_context, log_redaction_complete, log_redaction_start};
use clap::Args;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for redacting a document
#[derive(Args, Debug, Default)]
pub struct RedactArgs {
    /// Path to JSON file. Reads from stdin if omitted.
    pub input_file: Option<PathBuf>,

    /// Comma-separated sensitive keys (case-insensitive)
    #[arg(long)]
    pub keys: Option<String>,

    /// File with sensitive keys, separated by commas and/or newlines
    #[arg(long, value_name = "PATH")]
    pub key_file: Option<PathBuf>,

    /// Regex pattern searched in each key. Can be used multiple times.
    #[arg(long, value_name = "REGEX")]
    pub keys_regex: Vec<String>,

    /// Replace each sensitive value with a deterministic SHA-256 hash of the
    /// original value
    #[arg(long)]
    pub hash: bool,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl RedactArgs {
    /// Load the configuration and merge these arguments over it
    ///
    /// Without a configuration file the defaults are used, still subject to
    /// `JSON_REDACTOR_*` environment overrides. Keys and patterns from the
    /// command line are appended; `--key-file` replaces a configured key file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be loaded or the
    /// merged configuration is invalid.
    pub fn resolve_config(
        &self,
        config_path: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<RedactorConfig> {
        let mut config = match config_path {
            Some(path) => load_config(path)?,
            None => {
                let mut config = RedactorConfig::default();
                apply_env_overrides(&mut config)?;
                config
            }
        };

        if let Some(ref keys) = self.keys {
            config.matching.keys.extend(split_keys(keys));
        }
        if let Some(ref key_file) = self.key_file {
            config.matching.key_file = Some(key_file.clone());
        }
        config
            .matching
            .key_patterns
            .extend(self.keys_regex.iter().cloned());

        if self.hash {
            config.redaction.strategy = StrategyKind::Hash;
        }
        if self.pretty {
            config.output.style = OutputStyle::Pretty;
        }
        if let Some(level) = log_level {
            config.logging.level = level.to_string();
        }

        config.validate().map_err(RedactorError::Configuration)?;

        Ok(config)
    }

    /// Execute the redaction and return the process exit code
    pub fn execute(&self, config: &RedactorConfig) -> i32 {
        match self.run(config) {
            Ok(()) => 0,
            Err(e) => {
                log_error_with_context!(&e, "Redaction failed");
                report_error(&e);
                e.exit_code()
            }
        }
    }

    fn run(&self, config: &RedactorConfig) -> Result<()> {
        tracing::debug!(
            keys = config.matching.keys.len(),
            key_file = ?config.matching.key_file,
            key_patterns = ?config.matching.key_patterns,
            strategy = %config.redaction.strategy,
            style = %config.output.style,
            "Resolved configuration"
        );

        self.check_paths()?;
        let engine = RedactionEngine::from_config(config)?;

        let input = self.open_input()?;
        let output = self.open_output()?;

        let start = Instant::now();
        log_redaction_start!(self.input_name(), self.output_name());
        engine.process(input, output)?;
        log_redaction_complete!(start.elapsed());

        Ok(())
    }

    fn check_paths(&self) -> Result<()> {
        let Some(ref input) = self.input_file else {
            return Ok(());
        };

        if !input.is_file() {
            return Err(RedactorError::Configuration(format!(
                "Input file not found: {}",
                input.display()
            )));
        }

        if let Some(ref output) = self.output {
            if output.exists() && same_file(input, output)? {
                return Err(RedactorError::Configuration(format!(
                    "Output file must differ from the input file: {}",
                    output.display()
                )));
            }
        }

        Ok(())
    }

    fn open_input(&self) -> Result<Box<dyn Read>> {
        match self.input_file {
            Some(ref path) => {
                let file = File::open(path).map_err(|e| {
                    RedactorError::Configuration(format!(
                        "Failed to open input file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(io::stdin().lock())),
        }
    }

    fn open_output(&self) -> Result<Box<dyn Write>> {
        match self.output {
            Some(ref path) => {
                let file = File::create(path).map_err(|e| {
                    RedactorError::Io(format!(
                        "Failed to create output file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    }

    fn input_name(&self) -> String {
        self.input_file
            .as_ref()
            .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
    }

    fn output_name(&self) -> String {
        self.output
            .as_ref()
            .map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string())
    }
}

fn same_file(a: &Path, b: &Path) -> Result<bool> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

/// Render an error for the terminal
pub fn error_message(error: &RedactorError) -> String {
    match error {
        RedactorError::Configuration(msg) => format!("Error: {msg}"),
        RedactorError::Processing(e) => e.to_string(),
        other => format!("Error: {other}"),
    }
}

/// Print an error to stderr
pub fn report_error(error: &RedactorError) {
    eprintln!("{}", error_message(error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::{NamedTempFile, TempDir};

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_resolve_config_merges_flags() {
        let args = RedactArgs {
            keys: Some("email, phone".to_string()),
            keys_regex: vec!["^pass".to_string()],
            hash: true,
            pretty: true,
            ..Default::default()
        };
        let config = args.resolve_config(None, Some("debug")).unwrap();
        assert!(config.matching.keys.contains(&"email".to_string()));
        assert!(config.matching.keys.contains(&"phone".to_string()));
        assert!(config.matching.key_patterns.contains(&"^pass".to_string()));
        assert_eq!(config.redaction.strategy, StrategyKind::Hash);
        assert_eq!(config.output.style, OutputStyle::Pretty);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_resolve_config_appends_to_file() {
        let file = json_file("[matching]\nkeys = [\"ssn\"]\n");
        let args = RedactArgs {
            keys: Some("email".to_string()),
            ..Default::default()
        };
        let path = file.path().to_string_lossy().to_string();
        let config = args.resolve_config(Some(&path), None).unwrap();
        assert!(config.matching.keys.contains(&"ssn".to_string()));
        assert!(config.matching.keys.contains(&"email".to_string()));
    }

    #[test]
    fn test_resolve_config_invalid_log_level() {
        let err = RedactArgs::default()
            .resolve_config(None, Some("loud"))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_execute_writes_output_file() {
        let input = json_file(r#"{"name":"Alice","email":"alice@x.com"}"#);
        let dir = TempDir::new().unwrap();
        let out_path = dir.path().join("out.json");

        let args = RedactArgs {
            input_file: Some(input.path().to_path_buf()),
            keys: Some("email".to_string()),
            output: Some(out_path.clone()),
            ..Default::default()
        };
        let config = args.resolve_config(None, None).unwrap();
        assert_eq!(args.execute(&config), 0);
        assert_eq!(
            fs::read_to_string(out_path).unwrap(),
            r#"{"name":"Alice","email":"***REDACTED***"}"#
        );
    }

    #[test]
    fn test_execute_missing_matcher() {
        let input = json_file("{}");
        let args = RedactArgs {
            input_file: Some(input.path().to_path_buf()),
            ..Default::default()
        };
        let config = args.resolve_config(None, None).unwrap();
        assert_eq!(args.execute(&config), 2);
    }

    #[test]
    fn test_execute_missing_input_file() {
        let args = RedactArgs {
            input_file: Some(PathBuf::from("/nonexistent/input.json")),
            keys: Some("a".to_string()),
            ..Default::default()
        };
        let config = args.resolve_config(None, None).unwrap();
        assert_eq!(args.execute(&config), 2);
    }

    #[test]
    fn test_execute_invalid_regex() {
        let input = json_file("{}");
        let args = RedactArgs {
            input_file: Some(input.path().to_path_buf()),
            keys_regex: vec!["[unclosed".to_string()],
            ..Default::default()
        };
        let config = args.resolve_config(None, None).unwrap();
        assert_eq!(args.execute(&config), 2);
    }

    #[test]
    fn test_execute_malformed_json() {
        let input = json_file(r#"{"a": [1, 2"#);
        let dir = TempDir::new().unwrap();
        let args = RedactArgs {
            input_file: Some(input.path().to_path_buf()),
            keys: Some("a".to_string()),
            output: Some(dir.path().join("out.json")),
            ..Default::default()
        };
        let config = args.resolve_config(None, None).unwrap();
        assert_eq!(args.execute(&config), 1);
    }

    #[test]
    fn test_execute_refuses_to_overwrite_input() {
        let input = json_file(r#"{"a":1}"#);
        let args = RedactArgs {
            input_file: Some(input.path().to_path_buf()),
            keys: Some("a".to_string()),
            output: Some(input.path().to_path_buf()),
            ..Default::default()
        };
        let config = args.resolve_config(None, None).unwrap();
        assert_eq!(args.execute(&config), 2);
        assert_eq!(fs::read_to_string(input.path()).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_error_messages() {
        let err = RedactorError::Configuration(
            "Must specify sensitive keys via --keys, --key-file or --keys-regex.".to_string(),
        );
        assert_eq!(
            error_message(&err),
            "Error: Must specify sensitive keys via --keys, --key-file or --keys-regex."
        );

        let source = regex::Regex::new("(").unwrap_err();
        let err = RedactorError::from(crate::domain::InvalidPatternError::new("(", source));
        assert!(error_message(&err).starts_with("Error: Invalid regex '(': "));

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RedactorError::from(crate::domain::ProcessingError::from(source));
        assert!(error_message(&err).starts_with("Error processing JSON: "));
    }
}
