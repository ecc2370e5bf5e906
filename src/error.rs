//! Error types for crontab operations.

use thiserror::Error;

/// Result type for crontab operations.
pub type CronResult<T> = Result<T, CronError>;

/// Crontab-specific errors.
#[derive(Debug, Error)]
pub enum CronError {
    /// Field segment matching none of the recognized shapes
    #[error("Invalid segment '{0}'")]
    InvalidSegment(String),

    /// Entry line with fewer than five time fields before the command
    #[error("Expected five time fields before the command: '{0}'")]
    TooFewFields(String),

    /// `@` token not present in the special-schedule table
    #[error("Unknown special schedule '{0}'")]
    UnknownSpecial(String),

    /// Entry parse failure located at a document line (1-based)
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        source: Box<CronError>,
    },

    /// Value outside the field's domain
    #[error("Value {value} out of range {min}-{max} for {field}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Range whose start exceeds its end
    #[error("Invalid range {0}-{1}: start must not exceed end")]
    InvalidRange(u32, u32),

    /// Step that is not a positive integer
    #[error("Invalid step {0}: step must be positive")]
    InvalidStep(u32),

    /// Name alias not present in the field's name table
    #[error("Unknown name '{name}' for {field}")]
    UnknownName { field: &'static str, name: String },

    /// Filesystem error from the I/O adapter
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure talking to the system crontab binary
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl CronError {
    /// Wrap an entry parse failure with the 1-based document line it occurred on.
    pub(crate) fn at_line(self, line: usize) -> Self {
        CronError::Line {
            line,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CronError::InvalidSegment("1-".to_string());
        assert_eq!(err.to_string(), "Invalid segment '1-'");

        let err = CronError::OutOfRange {
            field: "minute",
            value: 61,
            min: 0,
            max: 59,
        };
        assert_eq!(err.to_string(), "Value 61 out of range 0-59 for minute");
    }

    #[test]
    fn test_line_wrapper() {
        let err = CronError::TooFewFields("* * *".to_string()).at_line(3);
        let display = err.to_string();
        assert!(display.starts_with("Line 3:"));
        assert!(display.contains("five time fields"));
    }
}
