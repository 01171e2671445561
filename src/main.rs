use clap::{Parser, Subcommand};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use test_trail::{ReportLog, ResultDirVersioner, read_verdict};

/// Test Trail - audit trails for browser acceptance tests
#[derive(Parser, Debug)]
#[command(
    name = "test-trail",
    about = "Inspect versioned result directories and test reports",
    after_help = "ENVIRONMENT VARIABLES:\n\
        TEST_TRAIL_RESULTS_DIR       Name of the per-script results directory\n\
        TEST_TRAIL_ECHO              Echo report lines to stdout (0/false to disable)\n\
        TEST_TRAIL_TIMESTAMP_FORMAT  Timestamp format for artifact file names"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List existing runs of a test case with their verdicts
    List {
        /// Test case identifier (script base name)
        test_case: String,

        /// Results directory to scan
        #[arg(short, long, env = "TEST_TRAIL_RESULTS_DIR", default_value = "results")]
        results_dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the next result directory for a test case
    Next {
        /// Test case identifier (script base name)
        test_case: String,

        /// Results directory to scan
        #[arg(short, long, env = "TEST_TRAIL_RESULTS_DIR", default_value = "results")]
        results_dir: PathBuf,

        /// Create the directory instead of only printing its path
        #[arg(long)]
        create: bool,
    },
}

/// One row of `list` output
#[derive(Debug, Serialize)]
struct RunRow {
    sequence: u32,
    dir: PathBuf,
    verdict: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command {
        Some(Commands::List {
            test_case,
            results_dir,
            json,
        }) => {
            let versioner = ResultDirVersioner::new(&results_dir, &test_case);

            let mut rows = Vec::new();
            for (sequence, dir) in versioner.list_runs()? {
                let report = ReportLog::new(&dir);
                let verdict = if report.path().is_file() {
                    read_verdict(report.path())?
                } else {
                    None
                };
                rows.push(RunRow {
                    sequence,
                    dir,
                    verdict,
                });
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!(
                    "No runs found for '{}' under {}",
                    test_case,
                    results_dir.display()
                );
            } else {
                for row in &rows {
                    let verdict = row.verdict.as_deref().unwrap_or("-");
                    println!("{:>4}  {:<2}  {}", row.sequence, verdict, row.dir.display());
                }
            }
        }

        Some(Commands::Next {
            test_case,
            results_dir,
            create,
        }) => {
            let versioner = ResultDirVersioner::new(&results_dir, &test_case);

            if create {
                let dir = versioner.create_next()?;
                println!("{}", dir.display());
            } else {
                let sequence = versioner.next_sequence()?;
                let dir = versioner
                    .results_dir()
                    .join(format!("{}_{}", test_case, sequence));
                println!("{}", dir.display());
            }
        }

        None => {
            println!("Test Trail - audit trails for browser acceptance tests");
            println!();
            println!("Usage: test-trail <COMMAND>");
            println!();
            println!("Commands:");
            println!("  list  List existing runs of a test case with their verdicts");
            println!("  next  Show the next result directory for a test case");
            println!();
            println!("Run with --help for more information.");
        }
    }

    Ok(())
}
