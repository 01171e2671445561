//! Versioned result directories for test-case runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::engine::types::{EngineError, EngineResult};

/// Computes and creates the next numbered result directory for one test case.
///
/// Directories are named `<test_case>_<n>` with `n >= 1`, monotonic from the
/// observed maximum. The versioner is stateless across runs: every call
/// rescans the filesystem, so sequence numbers stay correct when result
/// directories are added or removed by hand between runs.
///
/// The scan is a non-atomic read-then-create; concurrent runs of the same
/// test case can compute the same sequence and share a directory. Callers
/// serialize runs themselves.
#[derive(Debug, Clone)]
pub struct ResultDirVersioner {
    results_dir: PathBuf,
    test_case: String,
}

impl ResultDirVersioner {
    /// Create a versioner over an explicit results directory
    pub fn new(results_dir: impl Into<PathBuf>, test_case: impl Into<String>) -> Self {
        Self {
            results_dir: results_dir.into(),
            test_case: test_case.into(),
        }
    }

    /// Derive the versioner from a test script path: the test case is the
    /// script's file stem and results live in a `results` directory next to
    /// the script.
    pub fn for_script(script_path: &Path) -> Self {
        let parent = script_path.parent().unwrap_or_else(|| Path::new("."));
        let test_case = script_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "test_case".to_string());
        Self::new(parent.join(config::results_dir_name()), test_case)
    }

    /// Test case identifier this versioner scans for
    pub fn test_case(&self) -> &str {
        &self.test_case
    }

    /// Parent directory holding the numbered result directories
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// True iff any existing subdirectory name contains the test case
    /// identifier. This is containment, not an anchored match: a directory
    /// for `login_extra` also matches test case `login`. A missing results
    /// directory reads as no match.
    pub fn exists(&self) -> EngineResult<bool> {
        if !self.results_dir.exists() {
            return Ok(false);
        }
        for entry in fs::read_dir(&self.results_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            if entry.file_name().to_string_lossy().contains(&self.test_case) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Highest sequence number among matching result directories.
    /// `NoMatchingDirectory` when nothing matching carries a parseable
    /// sequence.
    pub fn max_sequence(&self) -> EngineResult<u32> {
        self.list_runs()?
            .into_iter()
            .map(|(sequence, _)| sequence)
            .max()
            .ok_or_else(|| EngineError::NoMatchingDirectory {
                results_dir: self.results_dir.clone(),
                test_case: self.test_case.clone(),
            })
    }

    /// Sequence number the next run will use, without creating anything
    pub fn next_sequence(&self) -> EngineResult<u32> {
        if self.exists()? {
            Ok(self.max_sequence()? + 1)
        } else {
            Ok(1)
        }
    }

    /// Create the next result directory `<test_case>_<n>` and return its
    /// path. Creation is idempotent: an already existing directory of the
    /// same name is not an error, and missing parents are created.
    pub fn create_next(&self) -> EngineResult<PathBuf> {
        let sequence = self.next_sequence()?;
        let dir = self
            .results_dir
            .join(format!("{}_{}", self.test_case, sequence));
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Existing result directories for this test case with their sequence
    /// numbers, sorted ascending. Matching directories without a parseable
    /// numeric tail are skipped.
    pub fn list_runs(&self) -> EngineResult<Vec<(u32, PathBuf)>> {
        let mut runs = Vec::new();
        if !self.results_dir.exists() {
            return Ok(runs);
        }
        for entry in fs::read_dir(&self.results_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.contains(&self.test_case) {
                continue;
            }
            // The sequence is whatever follows the last '_'
            if let Some(sequence) = name.rsplit('_').next().and_then(|s| s.parse::<u32>().ok()) {
                runs.push((sequence, path));
            }
        }
        runs.sort_by_key(|(sequence, _)| *sequence);
        Ok(runs)
    }
}
