//! Result file emission
//!
//! A run leaves exactly one result file in the save directory: `Pass` when
//! every case passed, `Fail` otherwise. Stale result files from earlier runs
//! are removed first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jsoncmp_core::RunReport;

pub const PASS_FILE: &str = "Pass";
pub const FAIL_FILE: &str = "Fail";

/// Path of the result file a report is written to
pub fn result_path(dir: &Path, report: &RunReport) -> PathBuf {
    let name = if report.is_passing() {
        PASS_FILE
    } else {
        FAIL_FILE
    };
    dir.join(name)
}

/// Delete result files left by a previous run
pub fn clear_stale(dir: &Path) -> io::Result<()> {
    for name in [PASS_FILE, FAIL_FILE] {
        match fs::remove_file(dir.join(name)) {
            Ok(()) => tracing::debug!(file = name, "removed stale result file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Replace any previous result with this report's JSON
pub fn write_report(dir: &Path, report: &RunReport) -> io::Result<PathBuf> {
    clear_stale(dir)?;
    let path = result_path(dir, report);
    fs::write(&path, report.to_json())?;
    Ok(path)
}
