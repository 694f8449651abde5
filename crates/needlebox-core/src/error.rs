//! Inventory error handling
//!
//! Typed errors for reading inventory documents, with descriptive messages
//! and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an inventory document
#[derive(Error, Debug)]
pub enum InventoryError {
    /// File does not exist
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Permission denied reading the file
    #[error("Permission denied: cannot read '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other read failure
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File extension is not one we know how to parse
    #[error("Unsupported inventory format for '{path}': expected a .toml or .json file")]
    UnsupportedFormat { path: PathBuf },

    /// TOML document could not be parsed into tool records
    #[error("Invalid TOML inventory: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON document could not be parsed into tool records
    #[error("Invalid JSON inventory: {0}")]
    Json(#[from] serde_json::Error),
}

impl InventoryError {
    /// Create an error from an I/O error with path context
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => InventoryError::NotFound { path },
            io::ErrorKind::PermissionDenied => InventoryError::PermissionDenied {
                path,
                source: error,
            },
            _ => InventoryError::Read {
                path,
                source: error,
            },
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            InventoryError::NotFound { .. } => Some("Check the path and try again."),
            InventoryError::PermissionDenied { .. } => {
                Some("Check file permissions or run as a user who can read the file.")
            }
            InventoryError::UnsupportedFormat { .. } => {
                Some("Rename the file with a .toml or .json extension.")
            }
            InventoryError::Toml(_) | InventoryError::Json(_) => Some(
                "Every tool needs a `type` plus brand, model, material and date_acquired.",
            ),
            InventoryError::Read { .. } => None,
        }
    }
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = InventoryError::from_io(io_err, PathBuf::from("/missing/tools.toml"));

        assert!(matches!(err, InventoryError::NotFound { .. }));
        assert!(err.to_string().contains("/missing/tools.toml"));
    }

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = InventoryError::from_io(io_err, PathBuf::from("/locked/tools.toml"));

        assert!(matches!(err, InventoryError::PermissionDenied { .. }));
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_other_io_classification() {
        let io_err = io::Error::new(io::ErrorKind::Other, "device error");
        let err = InventoryError::from_io(io_err, PathBuf::from("/dev/tools.toml"));

        assert!(matches!(err, InventoryError::Read { .. }));
        assert!(err.recovery_suggestion().is_none());
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = InventoryError::UnsupportedFormat {
            path: PathBuf::from("tools.yaml"),
        };
        let msg = err.to_string();
        assert!(msg.contains("tools.yaml"));
        assert!(msg.contains(".toml or .json"));
    }
}
