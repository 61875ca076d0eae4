//! Result type alias for json-redactor

use super::errors::RedactorError;

/// Result type alias for json-redactor operations
///
/// # Examples
///
/// ```
/// use json_redactor::domain::result::Result;
/// use json_redactor::domain::errors::RedactorError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RedactorError::Configuration("no keys".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RedactorError>;
