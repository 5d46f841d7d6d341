//! Run report — per-case records plus the aggregate summary
//!
//! The emitted result collection is a JSON array whose first element is the
//! summary object and whose remaining elements are status tokens, one per
//! case, in run order:
//!
//! ```text
//! [{"count":2,"error":0,"fail":1,"pass":1,"rslt":1},"goodregs","failflags"]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of a passing case's status token
pub const PASS_MARKER: &str = "good";

/// Prefix of a failing case's status token
pub const FAIL_MARKER: &str = "fail";

/// Pass/fail outcome of a single case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn marker(self) -> &'static str {
        match self {
            Verdict::Pass => PASS_MARKER,
            Verdict::Fail => FAIL_MARKER,
        }
    }
}

/// Outcome of one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub name: String,
    pub verdict: Verdict,
    /// Canonical digests of both sides, absent when a side failed to load
    pub digests: Option<(String, String)>,
}

impl CaseResult {
    /// Status token: the verdict marker followed by the case name
    pub fn record(&self) -> String {
        format!("{}{}", self.verdict.marker(), self.name)
    }
}

/// Aggregate counters; field order is the emitted key order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Pairs given on input
    pub count: usize,
    /// 1 when input resolution or loading failed
    pub error: u8,
    pub fail: usize,
    pub pass: usize,
    /// 0 when every case passed without error, 1 otherwise
    pub rslt: u8,
}

/// Run-scoped accumulator of case results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    count: usize,
    error: bool,
    results: Vec<CaseResult>,
}

impl RunReport {
    /// Empty report for a run of `count` declared pairs
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Report for a run rejected before any case ran
    pub fn errored(count: usize) -> Self {
        Self {
            count,
            error: true,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: CaseResult) {
        self.results.push(result);
    }

    pub fn mark_error(&mut self) {
        self.error = true;
    }

    pub fn results(&self) -> &[CaseResult] {
        &self.results
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn pass_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.verdict == Verdict::Pass)
            .count()
    }

    pub fn fail_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.verdict == Verdict::Fail)
            .count()
    }

    /// True when no case failed and no error was raised
    pub fn is_passing(&self) -> bool {
        !self.error && self.fail_count() == 0
    }

    pub fn summary(&self) -> Summary {
        Summary {
            count: self.count,
            error: u8::from(self.error),
            fail: self.fail_count(),
            pass: self.pass_count(),
            rslt: u8::from(!self.is_passing()),
        }
    }

    /// Summary object followed by one status token per case
    pub fn to_records(&self) -> Vec<Value> {
        let mut records = Vec::with_capacity(self.results.len() + 1);
        // Integer fields only, serialization cannot fail
        records.push(serde_json::to_value(self.summary()).unwrap_or_default());
        records.extend(self.results.iter().map(|r| Value::String(r.record())));
        records
    }

    /// Compact JSON text of [`RunReport::to_records`]
    pub fn to_json(&self) -> String {
        Value::Array(self.to_records()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, verdict: Verdict) -> CaseResult {
        CaseResult {
            name: name.into(),
            verdict,
            digests: None,
        }
    }

    #[test]
    fn test_record_tokens() {
        assert_eq!(case("regs", Verdict::Pass).record(), "goodregs");
        assert_eq!(case("regs", Verdict::Fail).record(), "failregs");
    }

    #[test]
    fn test_summary_counts() {
        let mut report = RunReport::new(3);
        report.push(case("a", Verdict::Pass));
        report.push(case("b", Verdict::Fail));
        report.push(case("c", Verdict::Pass));

        let summary = report.summary();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.pass, 2);
        assert_eq!(summary.fail, 1);
        assert_eq!(summary.error, 0);
        assert_eq!(summary.rslt, 1);
        assert!(!report.is_passing());
    }

    #[test]
    fn test_all_pass_is_passing() {
        let mut report = RunReport::new(1);
        report.push(case("a", Verdict::Pass));
        assert!(report.is_passing());
        assert_eq!(report.summary().rslt, 0);
    }

    #[test]
    fn test_error_is_not_passing() {
        let mut report = RunReport::new(1);
        report.push(case("a", Verdict::Pass));
        report.mark_error();
        assert!(!report.is_passing());
        assert_eq!(report.summary().error, 1);
    }

    #[test]
    fn test_json_layout() {
        let mut report = RunReport::new(2);
        report.push(case("regs", Verdict::Pass));
        report.push(case("flags", Verdict::Fail));
        assert_eq!(
            report.to_json(),
            r#"[{"count":2,"error":0,"fail":1,"pass":1,"rslt":1},"goodregs","failflags"]"#
        );
    }

    #[test]
    fn test_errored_report_has_only_summary() {
        let report = RunReport::errored(0);
        assert_eq!(
            report.to_json(),
            r#"[{"count":0,"error":1,"fail":0,"pass":0,"rslt":1}]"#
        );
    }

    #[test]
    fn test_summary_serde_key_order() {
        let summary = Summary {
            count: 4,
            error: 0,
            fail: 0,
            pass: 4,
            rslt: 0,
        };
        let text = serde_json::to_string(&summary).unwrap();
        assert_eq!(text, r#"{"count":4,"error":0,"fail":0,"pass":4,"rslt":0}"#);
        let back: Summary = serde_json::from_str(&text).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn test_records_summary_matches_serde_form() {
        let mut report = RunReport::new(1);
        report.push(case("regs", Verdict::Fail));
        let records = report.to_records();
        assert_eq!(
            records[0].to_string(),
            serde_json::to_string(&report.summary()).unwrap()
        );
        let back: Summary = serde_json::from_value(records[0].clone()).unwrap();
        assert_eq!(back, report.summary());
    }
}
