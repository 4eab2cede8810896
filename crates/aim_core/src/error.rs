use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by the nearest-target resolver.
///
/// Neither case is recoverable inside the resolver: the caller has to supply a
/// populated catalog or a finite pose before asking again.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ResolveError {
    #[error("target catalog is empty")]
    EmptyCatalog,

    #[error("query point ({x}, {y}) is not finite")]
    InvalidQueryPoint { x: f64, y: f64 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_messages() {
        assert_eq!(ResolveError::EmptyCatalog.to_string(), "target catalog is empty");
        let err = ResolveError::InvalidQueryPoint { x: f64::NAN, y: 1.0 };
        assert_eq!(err.to_string(), "query point (NaN, 1) is not finite");
    }

    #[test]
    fn test_config_error_invalid_message() {
        let err = ConfigError::invalid("arm.back_limit", "must exceed front limit");
        assert_eq!(
            err.to_string(),
            "Invalid config value `arm.back_limit`: must exceed front limit"
        );
    }
}
