//! Append-only text report bound to one result directory.
//!
//! The report is the human-readable audit trail of a run: one timestamped
//! line per entry, in exactly the order the entries were appended, never
//! rewritten. Line format is `"<YYYY-MM-DD HH:MM:SS>  <message>"` with two
//! spaces between timestamp and message.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config;
use crate::engine::clock;
use crate::engine::paths::{PathBuilder, PathSpec};
use crate::engine::types::{EngineResult, TestFailure};

/// Prefix of the final verdict line, completed with the result string
/// ("OK" / "NG")
pub const VERDICT_PREFIX: &str = "試験結果_";

/// Header line of a structured error-details entry
pub const ERROR_DETAILS_HEADER: &str = "エラー内容:";

/// Append-only, timestamped test report.
///
/// The report file carries the name of its result directory with a `.txt`
/// extension and lives inside that directory. Every append opens the file,
/// writes one entry, and closes it; no handle is held across calls, so
/// sequential single-writer use is safe while concurrent writers are not
/// synchronized.
#[derive(Debug, Clone)]
pub struct ReportLog {
    builder: PathBuilder,
    path: PathBuf,
    echo: bool,
}

impl ReportLog {
    /// Bind a report to `result_dir`. Nothing is written until the first
    /// append or an explicit `ensure_created`.
    pub fn new(result_dir: impl Into<PathBuf>) -> Self {
        let dir = result_dir.into();
        let name = dir
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "report".to_string());
        let builder = PathBuilder::new(&dir);
        let path = builder.build(&PathSpec::new(name).extension("txt"));
        Self {
            builder,
            path,
            echo: config::echo_report_lines(),
        }
    }

    /// Set whether appended lines are also echoed to stdout
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Path of the report file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the result directory tree and an empty report file. Idempotent.
    pub fn ensure_created(&self) -> EngineResult<()> {
        fs::create_dir_all(self.builder.base_dir())?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(())
    }

    /// Append one timestamped entry. This is the sole primitive mutator; the
    /// semantic wrappers below delegate here unchanged except for message
    /// formatting. Failures (disk full, permissions) propagate to the caller.
    pub fn append_line(&self, text: &str) -> EngineResult<()> {
        let now = clock::now_string();

        if !self.path.is_file() {
            self.ensure_created()?;
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}  {}", now, text)?;

        if self.echo {
            println!("{}  {}", now, text);
        }
        Ok(())
    }

    /// Record a test procedure step
    pub fn procedure(&self, text: &str) -> EngineResult<()> {
        self.append_line(text)
    }

    /// Record an expected result
    pub fn expected_result(&self, text: &str) -> EngineResult<()> {
        self.append_line(text)
    }

    /// Record a free-form comment
    pub fn comment(&self, text: &str) -> EngineResult<()> {
        self.append_line(text)
    }

    /// Record the final verdict, e.g. `試験結果_OK` for `result = "OK"`
    pub fn test_result(&self, result: &str) -> EngineResult<()> {
        self.append_line(&format!("{}{}", VERDICT_PREFIX, result))
    }

    /// Record error details verbatim, no prefix
    pub fn error_details(&self, text: &str) -> EngineResult<()> {
        self.append_line(text)
    }

    /// Record a structured failure as an `エラー内容:` block followed by its
    /// trace
    pub fn error_details_from(&self, failure: &TestFailure) -> EngineResult<()> {
        self.append_line(&format!("{}\n{}", ERROR_DETAILS_HEADER, failure.trace()))
    }
}

/// Last verdict recorded in a report file, without the `試験結果_` prefix.
/// `None` when the report holds no verdict line.
pub fn read_verdict(path: &Path) -> EngineResult<Option<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents.lines().rev().find_map(verdict_of))
}

/// Verdict carried by one report line, if that line is a verdict entry: the
/// prefix must immediately follow the `"<timestamp>  "` header. Messages that
/// merely quote the verdict literal (a comment, a line of an error trace) do
/// not count.
fn verdict_of(line: &str) -> Option<String> {
    const HEADER_MASK: &str = "0000-00-00 00:00:00  ";
    if !line.is_char_boundary(HEADER_MASK.len()) {
        return None;
    }
    let (header, message) = line.split_at(HEADER_MASK.len());
    let timestamped = header
        .chars()
        .zip(HEADER_MASK.chars())
        .all(|(c, m)| if m == '0' { c.is_ascii_digit() } else { c == m });
    if !timestamped {
        return None;
    }
    message.strip_prefix(VERDICT_PREFIX).map(str::to_string)
}
