//! Suite runner — loads, compares and tallies every case of a run
//!
//! Cases run one after another in registration order. Documents are fetched
//! through a [`DocumentSource`] so the runner never touches the filesystem
//! itself; [`FsSource`] is the implementation used by the command line.
//!
//! A case whose document cannot be loaded is recorded as failed and flags the
//! report with an error; the remaining cases still run.

use std::path::Path;

use serde_json::Value;

use crate::comparator::compare_detailed;
use crate::report::{CaseResult, RunReport, Verdict};
use crate::suite::{Suite, TestCase};
use crate::{Error, Result};

/// Where case documents come from
pub trait DocumentSource {
    /// Read and parse the document at `path`
    fn load(&self, path: &Path) -> Result<Value>;
}

/// Reads documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn load(&self, path: &Path) -> Result<Value> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_document(path, &text)
    }
}

/// Parse JSON text, attributing failures to `path`
pub fn parse_document(path: &Path, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Run every case of `suite` and collect the report
pub fn run_suite<S: DocumentSource + ?Sized>(suite: &Suite, source: &S) -> RunReport {
    let mut report = RunReport::new(suite.declared_count());

    for case in suite.cases() {
        tracing::info!(name = %case.name, "testing");
        match run_case(case, source) {
            Ok(result) => {
                tracing::info!(record = %result.record(), "result");
                report.push(result);
            }
            Err(err) => {
                tracing::error!(name = %case.name, error = %err, "case could not be loaded");
                report.mark_error();
                report.push(CaseResult {
                    name: case.name.clone(),
                    verdict: Verdict::Fail,
                    digests: None,
                });
            }
        }
    }

    report
}

/// Load and compare a single case
pub fn run_case<S: DocumentSource + ?Sized>(case: &TestCase, source: &S) -> Result<CaseResult> {
    let left = source.load(&case.left)?;
    let right = source.load(&case.right)?;

    let comparison = compare_detailed(left, right);
    tracing::debug!(
        name = %case.name,
        left = %comparison.left_digest,
        right = %comparison.right_digest,
        same = comparison.same,
        "canonical digests"
    );

    let verdict = if comparison.same {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    Ok(CaseResult {
        name: case.name.clone(),
        verdict,
        digests: Some((comparison.left_digest, comparison.right_digest)),
    })
}
