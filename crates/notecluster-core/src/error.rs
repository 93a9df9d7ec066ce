//! Error types and exit codes for notecluster
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage or configuration error (bad flags, invalid size bounds)
//! - 3: Data error (unreadable or malformed snapshot)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args or configuration (2)
    Usage = 2,
    /// Data error - malformed snapshot (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while loading inputs or running the pipeline
#[derive(Error, Debug)]
pub enum ClusterError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid clustering config: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("snapshot not found: {path:?}")]
    SnapshotNotFound { path: PathBuf },

    #[error("invalid snapshot {path:?}: {reason}")]
    InvalidSnapshot { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl ClusterError {
    /// Create an error for clustering bounds that cannot be satisfied
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        ClusterError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        ClusterError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed operation
    pub fn failed(operation: &str, error: impl std::fmt::Display) -> Self {
        ClusterError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ClusterError::UsageError(_)
            | ClusterError::InvalidConfig { .. }
            | ClusterError::InvalidValue { .. } => ExitCode::Usage,

            ClusterError::SnapshotNotFound { .. } | ClusterError::InvalidSnapshot { .. } => {
                ExitCode::Data
            }

            ClusterError::Io(_)
            | ClusterError::Json(_)
            | ClusterError::Toml(_)
            | ClusterError::FailedOperation { .. }
            | ClusterError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ClusterError::UsageError(_) => "usage_error",
            ClusterError::InvalidConfig { .. } => "invalid_config",
            ClusterError::InvalidValue { .. } => "invalid_value",
            ClusterError::SnapshotNotFound { .. } => "snapshot_not_found",
            ClusterError::InvalidSnapshot { .. } => "invalid_snapshot",
            ClusterError::Io(_) => "io_error",
            ClusterError::Json(_) => "json_error",
            ClusterError::Toml(_) => "toml_error",
            ClusterError::FailedOperation { .. } => "failed_operation",
            ClusterError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for notecluster operations
pub type Result<T> = std::result::Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_usage_errors() {
        let err = ClusterError::invalid_config("min_cluster_size (8) exceeds max_cluster_size (4)");
        assert_eq!(err.exit_code(), ExitCode::Usage);
        assert_eq!(
            err.to_string(),
            "invalid clustering config: min_cluster_size (8) exceeds max_cluster_size (4)"
        );
    }

    #[test]
    fn test_snapshot_errors_are_data_errors() {
        let err = ClusterError::InvalidSnapshot {
            path: PathBuf::from("vault.json"),
            reason: "duplicate note path: a.md".to_string(),
        };
        assert_eq!(err.exit_code(), ExitCode::Data);
    }

    #[test]
    fn test_to_json_envelope() {
        let err = ClusterError::invalid_value("format", "xml");
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 2);
        assert_eq!(json["error"]["type"], "invalid_value");
        assert_eq!(json["error"]["message"], "invalid format: xml");
    }
}
