pub mod capture;
pub mod clock;
pub mod paths;
pub mod report;
pub mod types;
pub mod versioner;

pub use capture::{ArtifactCapture, CaptureTarget};
pub use clock::{LocalTimestamp, REPORT_TIME_FORMAT};
pub use paths::{PathBuilder, PathSpec};
pub use report::{ERROR_DETAILS_HEADER, ReportLog, VERDICT_PREFIX, read_verdict};
pub use types::{EngineError, EngineResult, TestFailure};
pub use versioner::ResultDirVersioner;
