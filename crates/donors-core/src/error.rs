use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the political-donors pipeline.
#[derive(Error, Debug)]
pub enum DonorsError {
    /// The contributions file could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created or written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A raw line carried fewer fields than the fixed record layout needs.
    #[error("Truncated record: found {found} fields, expected at least {expected}")]
    TruncatedRecord { found: usize, expected: usize },

    /// Statistics were requested from an aggregate holding no values.
    #[error("Aggregate {0} has no contributions")]
    EmptyAggregate(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The run summary could not be serialized.
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the donors crates.
pub type Result<T> = std::result::Result<T, DonorsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DonorsError::FileRead {
            path: PathBuf::from("/input/itcont.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/input/itcont.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_file_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DonorsError::FileWrite {
            path: PathBuf::from("/output/medianvals_by_zip.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to write file /output/medianvals_by_zip.txt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_display_truncated_record() {
        let err = DonorsError::TruncatedRecord {
            found: 3,
            expected: 16,
        };
        assert_eq!(
            err.to_string(),
            "Truncated record: found 3 fields, expected at least 16"
        );
    }

    #[test]
    fn test_error_display_empty_aggregate() {
        let err = DonorsError::EmptyAggregate("C00177436|30004".to_string());
        assert_eq!(err.to_string(), "Aggregate C00177436|30004 has no contributions");
    }

    #[test]
    fn test_error_display_config() {
        let err = DonorsError::Config("buffer size must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: buffer size must be positive"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: DonorsError = io_err.into();
        assert!(matches!(err, DonorsError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: DonorsError = anyhow::anyhow!("upstream failure").into();
        assert_eq!(err.to_string(), "upstream failure");
    }
}
