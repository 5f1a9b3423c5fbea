//! Error types for loading and transforming the sales event log.
//!
//! Load failures ([`OccupancyError::Io`], [`OccupancyError::MissingColumn`],
//! [`OccupancyError::Parse`]) abort the whole load. [`OccupancyError::EmptyData`]
//! is scoped to a single draw and never stops the other draws from rendering.

use crate::models::DrawNo;

/// Result type for occupancy operations
pub type OccupancyResult<T> = Result<T, OccupancyError>;

/// Error type for occupancy operations
#[derive(Debug, thiserror::Error)]
pub enum OccupancyError {
    /// The source file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the CSV header.
    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    /// A row holds a value that does not conform to its column's format.
    #[error("Parse error at line {line}, column '{column}': {message}")]
    Parse {
        line: u64,
        column: String,
        message: String,
    },

    /// No rows of a draw survive the weekend and progress window filters.
    #[error("No weekend sales inside the progress window for draw {draw_no}")]
    EmptyData { draw_no: DrawNo },

    /// Caller supplied parameters outside their valid domain.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Configuration file or environment could not be resolved.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl OccupancyError {
    /// Create a parse error for a row value.
    pub fn parse(line: u64, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column: column.into(),
            message: message.into(),
        }
    }

    /// Whether the error should abort the whole computation.
    ///
    /// Only [`OccupancyError::EmptyData`] is recoverable: the draw is skipped.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::EmptyData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = OccupancyError::parse(3, "wager_datetime", "invalid timestamp 'x'");
        assert_eq!(
            err.to_string(),
            "Parse error at line 3, column 'wager_datetime': invalid timestamp 'x'"
        );
    }

    #[test]
    fn test_empty_data_is_not_fatal() {
        let err = OccupancyError::EmptyData {
            draw_no: DrawNo::new(7),
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("draw 7"));
    }

    #[test]
    fn test_load_errors_are_fatal() {
        let missing = OccupancyError::MissingColumn {
            column: "draw_no".to_string(),
        };
        assert!(missing.is_fatal());
        assert!(OccupancyError::parse(2, "draw_no", "not an integer").is_fatal());
        assert!(OccupancyError::InvalidParameters("x".into()).is_fatal());
    }
}
