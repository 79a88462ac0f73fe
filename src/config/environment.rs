//! Environment variable configuration source.
//!
//! Recognized variables:
//! - `FSALIAS_MAX_SYMLINK_DEPTH` — positive integer
//! - `FSALIAS_ALLOW_SYMLINK_ALIASES` — `true`/`false`/`1`/`0`
//! - `FSALIAS_BASE_DIR` — absolute path

use std::env;
use std::path::PathBuf;

use crate::config::PartialConfig;
use crate::error::{Error, Result};

const MAX_SYMLINK_DEPTH: &str = "FSALIAS_MAX_SYMLINK_DEPTH";
const ALLOW_SYMLINK_ALIASES: &str = "FSALIAS_ALLOW_SYMLINK_ALIASES";
const BASE_DIR: &str = "FSALIAS_BASE_DIR";

/// Read the `FSALIAS_*` variables into a partial configuration.
///
/// A variable that is set but unparsable is a validation error, not a
/// silent fallback: a deployment that misconfigures its resolution
/// depth should find out at startup.
pub(crate) fn from_env() -> Result<PartialConfig> {
    let mut partial = PartialConfig::default();

    if let Ok(value) = env::var(MAX_SYMLINK_DEPTH) {
        let depth = value.parse::<usize>().map_err(|e| Error::Validation {
            field: MAX_SYMLINK_DEPTH.to_string(),
            message: format!("'{value}' is not a valid depth: {e}"),
        })?;
        partial.max_symlink_depth = Some(depth);
    }

    if let Ok(value) = env::var(ALLOW_SYMLINK_ALIASES) {
        partial.allow_symlink_aliases = Some(parse_bool(ALLOW_SYMLINK_ALIASES, &value)?);
    }

    if let Ok(value) = env::var(BASE_DIR) {
        partial.base_dir = Some(PathBuf::from(value));
    }

    Ok(partial)
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::Validation {
            field: field.to_string(),
            message: format!("'{value}' is not a valid boolean"),
        }),
    }
}
