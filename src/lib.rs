//! Test Trail - durable audit trails for browser acceptance tests.
//!
//! This crate provides:
//! - Versioned result directories per test case (`<test_case>_<n>`)
//! - Append-only, timestamped text reports with semantic write operations
//! - Screenshot naming and saving through a caller-supplied capture capability
//! - A run wrapper that guarantees a final verdict line and session release
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use test_trail::{CaptureTarget, EngineResult, TestSession, run_test_case};
//!
//! struct Browser; // stands in for a live automation session
//!
//! impl CaptureTarget for Browser {
//!     fn capture_to(&mut self, path: &Path) -> EngineResult<()> {
//!         std::fs::write(path, b"png bytes")?;
//!         Ok(())
//!     }
//! }
//!
//! impl TestSession for Browser {
//!     fn release(&mut self) {}
//! }
//!
//! let outcome = run_test_case(Path::new("test/checkout.rs"), Browser, |report, shots| {
//!     report.procedure("open the checkout page")?;
//!     shots.save("checkout_page")?;
//!     report.expected_result("the order summary is shown")?;
//!     Ok(())
//! })
//! .unwrap();
//! assert!(outcome.passed);
//! ```

pub mod config;
pub mod engine;
pub mod runner;

// Re-export engine types
pub use engine::{
    ArtifactCapture, CaptureTarget, EngineError, EngineResult, LocalTimestamp, PathBuilder,
    PathSpec, ReportLog, ResultDirVersioner, TestFailure, read_verdict,
};

// Re-export runner types
pub use runner::{RunOutcome, TestSession, run_in, run_test_case};
