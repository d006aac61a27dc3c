//! Error types for footprint generation and output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for footprint operations.
pub type FootprintResult<T> = Result<T, FootprintError>;

/// Errors that can occur while building, generating or writing a footprint.
#[derive(Debug, Error)]
pub enum FootprintError {
    /// Pin count is not valid for the package family.
    #[error("Invalid pin count {pins} for {family}: {message}")]
    InvalidPinCount {
        /// Package family the check belongs to.
        family: &'static str,
        /// Offending pin count.
        pins: u32,
        /// Description of the constraint.
        message: String,
    },

    /// A numeric dimension is out of range.
    #[error("Invalid dimension '{name}' = {value}: {message}")]
    InvalidDimension {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Description of the constraint.
        message: String,
    },

    /// Footprint name cannot be used as a KiCad token or file name.
    #[error("Invalid footprint name '{name}': {message}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Description of what's wrong.
        message: String,
    },

    /// A required parameter was not supplied.
    #[error("Missing parameter '{name}' for {family} footprint")]
    MissingParameter {
        /// Package family being generated.
        family: &'static str,
        /// Name of the missing parameter.
        name: &'static str,
    },

    /// Package type cannot be generated.
    #[error("Unsupported package type: {package}")]
    UnsupportedPackage {
        /// Package type as found in the input.
        package: String,
    },

    /// Failed to create the output directory.
    #[error("Failed to create directory: {path}")]
    DirectoryCreate {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the footprint file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to read an input file.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Package guess file is not valid JSON for the expected layout.
    #[error("Failed to parse package guess: {path}")]
    GuessParse {
        /// Path to the file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl FootprintError {
    /// Creates an invalid pin count error.
    pub fn invalid_pin_count(family: &'static str, pins: u32, message: impl Into<String>) -> Self {
        Self::InvalidPinCount {
            family,
            pins,
            message: message.into(),
        }
    }

    /// Creates an invalid dimension error.
    pub fn invalid_dimension(name: &'static str, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidDimension {
            name,
            value,
            message: message.into(),
        }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a missing parameter error.
    #[must_use]
    pub const fn missing(family: &'static str, name: &'static str) -> Self {
        Self::MissingParameter { family, name }
    }

    /// Creates a directory creation error.
    pub fn directory_create(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Returns true for errors caused by the caller's parameters rather than I/O.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPinCount { .. }
                | Self::InvalidDimension { .. }
                | Self::InvalidName { .. }
                | Self::MissingParameter { .. }
                | Self::UnsupportedPackage { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_count_error_display() {
        let err = FootprintError::invalid_pin_count("SOIC", 13, "must be even");
        assert_eq!(err.to_string(), "Invalid pin count 13 for SOIC: must be even");
        assert!(err.is_validation());
    }

    #[test]
    fn missing_parameter_display() {
        let err = FootprintError::missing("QFN", "pitch");
        assert_eq!(err.to_string(), "Missing parameter 'pitch' for QFN footprint");
    }

    #[test]
    fn io_errors_are_not_validation() {
        let err = FootprintError::file_write(
            "/tmp/out/R.kicad_mod",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_validation());
        assert!(err.to_string().contains("R.kicad_mod"));
    }
}
