//! Error types for the console logger

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Console sink could not be allocated
    #[error("Console allocation failed: {0}")]
    ConsoleAllocation(String),

    /// HTML file sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSink { path: String, message: String },

    /// Format directive does not match the supplied argument kind
    #[error("Format mismatch: directive '%{directive}' expects {expected}, got {found}")]
    FormatMismatch {
        directive: char,
        expected: &'static str,
        found: &'static str,
    },

    /// Format directive with no remaining argument
    #[error("Missing argument for directive '%{directive}' at position {position}")]
    MissingArgument { directive: char, position: usize },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ConsoleError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        ConsoleError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConsoleError::FileSink {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a format mismatch error
    pub fn format_mismatch(directive: char, expected: &'static str, found: &'static str) -> Self {
        ConsoleError::FormatMismatch {
            directive,
            expected,
            found,
        }
    }

    /// Create a missing argument error
    pub fn missing_argument(directive: char, position: usize) -> Self {
        ConsoleError::MissingArgument { directive, position }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ConsoleError::Other(msg.into())
    }
}
