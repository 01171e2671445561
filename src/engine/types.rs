// Core types for the artifact engine

use std::path::PathBuf;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error types for engine operations
#[derive(Debug)]
pub enum EngineError {
    /// No result directory matches the test case identifier
    NoMatchingDirectory {
        /// Directory that was scanned
        results_dir: PathBuf,
        /// Identifier that matched nothing
        test_case: String,
    },

    /// The external capture capability failed
    Capture(String),

    /// I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NoMatchingDirectory {
                results_dir,
                test_case,
            } => write!(
                f,
                "No result directory matching '{}' under {}",
                test_case,
                results_dir.display()
            ),
            EngineError::Capture(msg) => write!(f, "Capture error: {}", msg),
            EngineError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::NoMatchingDirectory { .. } => None,
            EngineError::Capture(_) => None,
            EngineError::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err)
    }
}

/// A structured test failure carried from the point of catch to the report.
///
/// Replaces implicit "currently propagating exception" capture: whoever
/// catches the failure builds one of these and hands it to
/// `ReportLog::error_details_from`, so the log call never depends on ambient
/// state.
#[derive(Debug, Clone)]
pub struct TestFailure {
    message: String,
    trace: String,
}

impl TestFailure {
    /// Create a failure whose trace is just the message
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            trace: message.clone(),
            message,
        }
    }

    /// Create a failure with an explicit trace
    pub fn with_trace(message: impl Into<String>, trace: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: trace.into(),
        }
    }

    /// Build a failure from any error, flattening its source chain into the
    /// trace
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        let message = err.to_string();
        let mut trace = message.clone();
        let mut cause = err.source();
        while let Some(err) = cause {
            trace.push_str("\ncaused by: ");
            trace.push_str(&err.to_string());
            cause = err.source();
        }
        Self { message, trace }
    }

    /// Short failure message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Full trace text, one cause per line
    pub fn trace(&self) -> &str {
        &self.trace
    }
}

impl std::fmt::Display for TestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<EngineError> for TestFailure {
    fn from(err: EngineError) -> Self {
        TestFailure::from_error(&err)
    }
}
