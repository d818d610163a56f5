//! Setup Errors
//!
//! Per-frame code never fails. Everything that can go wrong happens while
//! loading configuration or wiring collaborators, and is reported here.

/// Errors raised while loading configuration or building a rig.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error while reading a config file.
    Io(std::io::Error),
    /// JSON serialization/deserialization error.
    Json(serde_json::Error),
    /// A configuration value failed validation.
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
    /// A required collaborator (collision world, projector) was never supplied.
    MissingCollaborator(&'static str),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        ConfigError::InvalidValue { field, reason }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for `{field}`: {reason}")
            }
            ConfigError::MissingCollaborator(name) => {
                write!(f, "missing collaborator: {name}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Reject non-finite values before any range check runs.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be finite"))
    }
}

/// Reject negative values (zero is allowed).
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        Err(ConfigError::invalid(field, "must not be negative"))
    } else {
        Ok(())
    }
}
