use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

/// Why a path could not be taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvPathError {
    /// The variable is not set.
    #[error("Missing environment variable: {0}")]
    Missing(String),
    /// The variable is set to an empty or whitespace-only value.
    #[error("Environment variable {0} is set but empty")]
    Empty(String),
}

/// Reads a filesystem path from an environment variable.
///
/// The raw OS value is used, so a path that is not valid unicode is still
/// returned as-is. Unicode values have surrounding whitespace trimmed.
pub fn get_env_path(name: &str) -> Result<PathBuf, EnvPathError> {
    path_from_value(name, std::env::var_os(name))
}

fn path_from_value(name: &str, value: Option<OsString>) -> Result<PathBuf, EnvPathError> {
    let value = value.ok_or_else(|| EnvPathError::Missing(name.to_string()))?;
    match value.to_str() {
        Some(text) if text.trim().is_empty() => Err(EnvPathError::Empty(name.to_string())),
        Some(text) => Ok(PathBuf::from(text.trim())),
        None => Ok(PathBuf::from(value)),
    }
}
