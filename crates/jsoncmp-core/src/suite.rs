//! Test suite — resolves a flat path list into named left/right cases
//!
//! # Input shape
//!
//! Paths come in pairs: `left1 right1 left2 right2 ...`. Each pair becomes a
//! [`TestCase`] named after the left file's base name without its extension.
//! When the left path has no extension, `.json` is appended to both paths.
//!
//! # Duplicate names
//!
//! Two pairs can derive the same case name (e.g. `a/x.json` and `b/x.json`).
//! Under [`DuplicatePolicy::Replace`] the later pair replaces the earlier one
//! and keeps its position in the run order; [`DuplicatePolicy::Reject`]
//! refuses the suite instead.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Extension appended to both paths of a pair whose left path has none
pub const DEFAULT_EXTENSION: &str = "json";

/// One named left/right document pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub left: PathBuf,
    pub right: PathBuf,
}

impl TestCase {
    /// Build a case from a pair of paths, deriving its name from `left`
    pub fn from_pair(left: impl Into<PathBuf>, right: impl Into<PathBuf>) -> Self {
        let mut left = left.into();
        let mut right = right.into();

        let name = case_name(&left);
        if left.extension().is_none() {
            left = with_default_extension(left);
            right = with_default_extension(right);
        }

        Self { name, left, right }
    }
}

/// What to do when two pairs derive the same case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Later pair silently replaces the earlier registration
    #[default]
    Replace,
    /// Duplicate names are a usage error
    Reject,
}

/// Ordered registry of the cases of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suite {
    cases: Vec<TestCase>,
    declared: usize,
    replaced: Vec<String>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a flat `left right left right ...` path list
    ///
    /// # Errors
    /// `NotEnoughPaths` for fewer than two paths, `OddPathCount` when the list
    /// cannot be paired, `DuplicateCase` under [`DuplicatePolicy::Reject`].
    pub fn from_paths<P: AsRef<Path>>(paths: &[P], policy: DuplicatePolicy) -> Result<Self> {
        if paths.len() < 2 {
            return Err(Error::NotEnoughPaths);
        }
        if paths.len() % 2 != 0 {
            return Err(Error::OddPathCount(paths.len()));
        }

        let mut suite = Suite::new();
        for pair in paths.chunks_exact(2) {
            let case = TestCase::from_pair(pair[0].as_ref(), pair[1].as_ref());
            suite.register(case, policy)?;
        }
        Ok(suite)
    }

    /// Register a case, applying the duplicate policy
    pub fn register(&mut self, case: TestCase, policy: DuplicatePolicy) -> Result<()> {
        self.declared += 1;

        match self.cases.iter_mut().find(|c| c.name == case.name) {
            Some(_) if policy == DuplicatePolicy::Reject => {
                Err(Error::DuplicateCase { name: case.name })
            }
            Some(existing) => {
                tracing::warn!(
                    name = %case.name,
                    previous = %existing.left.display(),
                    replacement = %case.left.display(),
                    "duplicate test case name; later pair replaces earlier one"
                );
                self.replaced.push(case.name.clone());
                *existing = case;
                Ok(())
            }
            None => {
                self.cases.push(case);
                Ok(())
            }
        }
    }

    /// Cases in run order
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Number of pairs given, including those later replaced
    pub fn declared_count(&self) -> usize {
        self.declared
    }

    /// Names whose earlier registration was replaced, once per replacement
    pub fn replaced_names(&self) -> &[String] {
        &self.replaced
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Base name of a path with its extension removed
pub fn case_name(path: &Path) -> String {
    let stem = if path.extension().is_some() {
        path.file_stem()
    } else {
        path.file_name()
    };
    match stem {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => String::new(),
    }
}

/// Directory that receives the result file: the one holding the first path
pub fn save_dir<P: AsRef<Path>>(paths: &[P]) -> Option<PathBuf> {
    let first = paths.first()?.as_ref();
    match first.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Some(dir.to_path_buf()),
        _ => Some(PathBuf::from(".")),
    }
}

fn with_default_extension(path: PathBuf) -> PathBuf {
    let mut raw: OsString = path.into_os_string();
    raw.push(".");
    raw.push(DEFAULT_EXTENSION);
    PathBuf::from(raw)
}
