//! Batch processing of test case files into result files.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::calculator::VisibilityCalculator;
use crate::case::TestCase;
use crate::config::Config;
use crate::error::RunnerError;
use crate::report::TestResult;

/// Outcome of one processed test case.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub test_case: String,
    pub output_file: PathBuf,
    pub window_count: usize,
    pub execution_time: Duration,
}

pub struct Runner {
    config: Config,
    calculator: VisibilityCalculator,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        let calculator = VisibilityCalculator::new(
            &config.implementation,
            &config.version,
            config.range_rate_lookahead,
        );
        Self { config, calculator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `<case>.json` when a name is given, otherwise every `*.json` in the test data directory.
    pub fn discover_cases(&self, case: Option<&str>) -> Result<Vec<PathBuf>, RunnerError> {
        let dir = &self.config.test_data_dir;
        if !dir.exists() {
            return Err(RunnerError::DirectoryNotFound(dir.display().to_string()));
        }

        if let Some(name) = case {
            return Ok(vec![dir.join(format!("{name}.json"))]);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Processes cases in order and stops at the first malformed one.
    pub fn run(&self, case: Option<&str>) -> Result<Vec<CaseSummary>, RunnerError> {
        let files = self.discover_cases(case)?;
        log::info!(
            "{} test case(s) in {}",
            files.len(),
            self.config.test_data_dir.display()
        );
        fs::create_dir_all(&self.config.results_dir)?;

        let mut summaries = Vec::with_capacity(files.len());
        for file in &files {
            summaries.push(self.run_file(file)?);
        }
        Ok(summaries)
    }

    pub fn run_file(&self, path: &Path) -> Result<CaseSummary, RunnerError> {
        let case_error = |source| RunnerError::Case {
            file: path.display().to_string(),
            source,
        };

        let case = TestCase::from_file(path).map_err(case_error)?;
        log::info!("processing {} ({})", case.name, path.display());

        let started = std::time::Instant::now();
        let result = self.calculator.calculate(&case).map_err(case_error)?;
        let execution_time = started.elapsed();

        let output_file = self.write_result(&result)?;
        log::info!(
            "{}: {} window(s) in {}",
            result.test_case,
            result.visibility_windows.len(),
            humantime::format_duration(round_to_millis(execution_time))
        );

        Ok(CaseSummary {
            test_case: result.test_case,
            output_file,
            window_count: result.visibility_windows.len(),
            execution_time,
        })
    }

    pub fn write_result(&self, result: &TestResult) -> Result<PathBuf, RunnerError> {
        fs::create_dir_all(&self.config.results_dir)?;
        let file_name = result_file_name(
            &self.config.implementation,
            &result.test_case,
            &Utc::now().format("%Y%m%d_%H%M%S").to_string(),
        );
        let path = self.config.results_dir.join(file_name);
        fs::write(&path, result.to_json_pretty()?)?;
        Ok(path)
    }
}

pub fn result_file_name(implementation: &str, test_case: &str, stamp: &str) -> String {
    format!("{implementation}_{test_case}_{stamp}.json")
}

fn round_to_millis(duration: Duration) -> Duration {
    Duration::from_millis(duration.as_millis() as u64)
}
