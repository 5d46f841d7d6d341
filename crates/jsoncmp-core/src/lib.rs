//! jsoncmp Core - case-insensitive JSON sameness engine
//!
//! Decides whether pairs of JSON documents are "the same" once key casing and
//! the casing of hex-tagged values are ignored.
//!
//! # Architecture
//!
//! ```text
//! paths → Suite → DocumentSource → Normalizer → Canonical Form → Comparator
//!                                                                   ↓
//!                                                               RunReport
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same input always produces identical results
//! - **Order sensitive**: key order is part of a document's identity
//! - **Total**: normalization and comparison never fail on parsed documents

pub mod comparator;
pub mod error;
pub mod normalizer;
pub mod report;
pub mod runner;
pub mod suite;

pub use comparator::{canonical_digest, canonical_form, compare, compare_detailed, Comparison};
pub use error::{Error, Result};
pub use normalizer::{normalize, normalized};
pub use report::{CaseResult, RunReport, Summary, Verdict};
pub use runner::{run_case, run_suite, DocumentSource, FsSource};
pub use suite::{DuplicatePolicy, Suite, TestCase};
