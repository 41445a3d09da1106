//! Window-count comparison of local results against reference results.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RunnerError;
use crate::report::TestResult;

pub const REFERENCE_IMPLEMENTATION: &str = "python-skyfield";

#[derive(Debug, Clone, PartialEq)]
pub struct CaseComparison {
    pub test_case: String,
    pub result_windows: usize,
    /// `None` when the reference has no result for this case.
    pub reference_windows: Option<usize>,
}

impl CaseComparison {
    pub fn matches(&self) -> bool {
        self.reference_windows == Some(self.result_windows)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Comparison {
    pub entries: Vec<CaseComparison>,
}

impl Comparison {
    pub fn matched(&self) -> usize {
        self.entries.iter().filter(|e| e.matches()).count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn all_match(&self) -> bool {
        self.matched() == self.total()
    }
}

/// Extracts the test case name from `<impl>_<case>_<YYYYMMDD>_<HHMMSS>.json`
/// or the untimestamped `<impl>_<case>.json`.
pub fn test_case_from_file_name(file_name: &str, implementation: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".json")?;
    let rest = stem.strip_prefix(implementation)?.strip_prefix('_')?;
    if rest.is_empty() {
        return None;
    }

    match strip_timestamp(rest) {
        Some(case) if !case.is_empty() => Some(case.to_string()),
        _ => Some(rest.to_string()),
    }
}

fn strip_timestamp(name: &str) -> Option<&str> {
    let (head, time) = name.rsplit_once('_')?;
    let (case, date) = head.rsplit_once('_')?;
    let digits = |s: &str, n: usize| s.len() == n && s.bytes().all(|b| b.is_ascii_digit());
    (digits(date, 8) && digits(time, 6)).then_some(case)
}

/// Latest result file per test case. Timestamps sort lexicographically.
pub fn collect_results(
    results_dir: &Path,
    implementation: &str,
) -> Result<BTreeMap<String, PathBuf>, RunnerError> {
    if !results_dir.exists() {
        return Err(RunnerError::DirectoryNotFound(
            results_dir.display().to_string(),
        ));
    }

    let mut latest: BTreeMap<String, PathBuf> = BTreeMap::new();
    for entry in fs::read_dir(results_dir)? {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(case) = test_case_from_file_name(file_name, implementation) else {
            continue;
        };
        match latest.get(&case) {
            Some(current) if current.file_name() >= path.file_name() => {}
            _ => {
                latest.insert(case, path);
            }
        }
    }
    Ok(latest)
}

fn read_result(path: &Path) -> Result<TestResult, RunnerError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn compare_with_reference(
    results_dir: &Path,
    reference_dir: &Path,
    implementation: &str,
) -> Result<Comparison, RunnerError> {
    let mut comparison = Comparison::default();

    for (test_case, path) in collect_results(results_dir, implementation)? {
        let result = read_result(&path)?;
        let reference_path =
            reference_dir.join(format!("{REFERENCE_IMPLEMENTATION}_{test_case}.json"));

        let reference_windows = if reference_path.exists() {
            Some(read_result(&reference_path)?.visibility_windows.len())
        } else {
            log::warn!("no reference result for {test_case}");
            None
        };

        comparison.entries.push(CaseComparison {
            test_case,
            result_windows: result.visibility_windows.len(),
            reference_windows,
        });
    }
    Ok(comparison)
}
