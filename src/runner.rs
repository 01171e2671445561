//! Top-level run wrapper.
//!
//! Ties the engine pieces together for one test-case run: create the next
//! versioned result directory, run the test body with a report and a bound
//! screenshot capture, and guarantee that a final verdict line is written and
//! the session released on every exit path, including unwinding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::capture::{ArtifactCapture, CaptureTarget};
use crate::engine::report::ReportLog;
use crate::engine::types::{EngineResult, TestFailure};
use crate::engine::versioner::ResultDirVersioner;

/// A browser/automation session the runner captures from and must release.
///
/// `release` is called once after the test body on non-panicking paths.
/// Sessions whose release matters on unwind should also release in their
/// `Drop` impl; the runner drops the session during unwinding.
pub trait TestSession: CaptureTarget {
    /// Release the underlying session
    fn release(&mut self);
}

/// Summary of one completed test run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Test case identifier
    pub test_case: String,

    /// Result directory created for this run
    pub result_dir: PathBuf,

    /// Report file inside the result directory
    pub report_path: PathBuf,

    /// Whether the test body completed without failure
    pub passed: bool,

    /// Failure message when `passed` is false
    pub error: Option<String>,

    /// When the run started
    #[serde(with = "chrono::serde::ts_seconds")]
    pub started: DateTime<Utc>,
}

/// Writes the NG verdict if the run unwinds before a verdict was recorded
struct VerdictGuard<'a> {
    report: &'a ReportLog,
    armed: bool,
}

impl Drop for VerdictGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.report.test_result("NG");
        }
    }
}

/// Run one test case end to end, deriving the result location from the test
/// script path (`results` directory next to the script, test case = file
/// stem).
///
/// The body receives the run's report and a screenshot capture bound to the
/// run's result directory, and reports failure by returning a `TestFailure`.
/// On success the report ends with `試験結果_OK`; on failure the error
/// details are recorded followed by `試験結果_NG`. The session is released
/// either way.
pub fn run_test_case<S, F>(script_path: &Path, session: S, body: F) -> EngineResult<RunOutcome>
where
    S: TestSession,
    F: FnOnce(&ReportLog, &mut ArtifactCapture<S>) -> Result<(), TestFailure>,
{
    let versioner = ResultDirVersioner::for_script(script_path);
    run_in(&versioner, session, body)
}

/// As `run_test_case`, over an explicit versioner
pub fn run_in<S, F>(versioner: &ResultDirVersioner, session: S, body: F) -> EngineResult<RunOutcome>
where
    S: TestSession,
    F: FnOnce(&ReportLog, &mut ArtifactCapture<S>) -> Result<(), TestFailure>,
{
    let started = Utc::now();
    let result_dir = versioner.create_next()?;
    let report = ReportLog::new(&result_dir);
    report.ensure_created()?;

    let mut capture = ArtifactCapture::new(&result_dir, session);

    let mut guard = VerdictGuard {
        report: &report,
        armed: true,
    };
    let outcome = body(&report, &mut capture);
    guard.armed = false;

    let mut session = capture.into_capability();
    session.release();

    let error = match outcome {
        Ok(()) => {
            report.test_result("OK")?;
            None
        }
        Err(failure) => {
            report.error_details_from(&failure)?;
            report.test_result("NG")?;
            Some(failure.message().to_string())
        }
    };

    Ok(RunOutcome {
        test_case: versioner.test_case().to_string(),
        result_dir,
        report_path: report.path().to_path_buf(),
        passed: error.is_none(),
        error,
        started,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::report::read_verdict;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::tempdir;

    struct FakeSession {
        released: Rc<Cell<bool>>,
    }

    impl CaptureTarget for FakeSession {
        fn capture_to(&mut self, path: &Path) -> EngineResult<()> {
            fs::write(path, b"\x89PNG")?;
            Ok(())
        }
    }

    impl TestSession for FakeSession {
        fn release(&mut self) {
            self.released.set(true);
        }
    }

    #[test]
    fn test_successful_run_writes_ok_verdict_and_releases() {
        let tmp = tempdir().unwrap();
        let versioner = ResultDirVersioner::new(tmp.path().join("results"), "checkout");
        let released = Rc::new(Cell::new(false));
        let session = FakeSession {
            released: released.clone(),
        };

        let outcome = run_in(&versioner, session, |report, shots| {
            report.procedure("open the top page")?;
            shots.save("top_page")?;
            Ok(())
        })
        .unwrap();

        assert!(outcome.passed);
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.test_case, "checkout");
        assert!(released.get());
        assert_eq!(
            read_verdict(&outcome.report_path).unwrap(),
            Some("OK".to_string())
        );
    }

    #[test]
    fn test_failing_run_records_details_then_ng_verdict() {
        let tmp = tempdir().unwrap();
        let versioner = ResultDirVersioner::new(tmp.path().join("results"), "checkout");
        let released = Rc::new(Cell::new(false));
        let session = FakeSession {
            released: released.clone(),
        };

        let outcome = run_in(&versioner, session, |report, _| {
            report.procedure("open the top page")?;
            Err(TestFailure::new("page title mismatch"))
        })
        .unwrap();

        assert!(!outcome.passed);
        assert_eq!(outcome.error, Some("page title mismatch".to_string()));
        assert!(released.get());

        let contents = fs::read_to_string(&outcome.report_path).unwrap();
        assert!(contents.contains("エラー内容:\npage title mismatch"));
        let last = contents.lines().last().unwrap();
        assert!(last.ends_with("試験結果_NG"), "{:?}", last);
    }

    #[test]
    fn test_unwinding_run_still_gets_ng_verdict() {
        let tmp = tempdir().unwrap();
        let versioner = ResultDirVersioner::new(tmp.path().join("results"), "checkout");
        let session = FakeSession {
            released: Rc::new(Cell::new(false)),
        };

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            run_in(&versioner, session, |report, _| {
                report.procedure("about to fault")?;
                panic!("unexpected fault");
            })
        }));
        assert!(result.is_err());

        let report_path = tmp
            .path()
            .join("results")
            .join("checkout_1")
            .join("checkout_1.txt");
        assert_eq!(
            read_verdict(&report_path).unwrap(),
            Some("NG".to_string())
        );
    }

    #[test]
    fn test_consecutive_runs_get_increasing_sequences() {
        let tmp = tempdir().unwrap();
        let versioner = ResultDirVersioner::new(tmp.path().join("results"), "checkout");

        for expected in ["checkout_1", "checkout_2"] {
            let session = FakeSession {
                released: Rc::new(Cell::new(false)),
            };
            let outcome = run_in(&versioner, session, |_, _| Ok(())).unwrap();
            assert_eq!(
                outcome.result_dir.file_name().unwrap().to_string_lossy(),
                expected
            );
        }
    }

    #[test]
    fn test_outcome_serializes_round_trip() {
        let outcome = RunOutcome {
            test_case: "checkout".to_string(),
            result_dir: PathBuf::from("results/checkout_1"),
            report_path: PathBuf::from("results/checkout_1/checkout_1.txt"),
            passed: false,
            error: Some("boom".to_string()),
            started: Utc::now(),
        };

        let json = serde_json::to_string(&outcome).unwrap();
        let back: RunOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back.test_case, outcome.test_case);
        assert_eq!(back.passed, outcome.passed);
        assert_eq!(back.error, outcome.error);
    }
}
