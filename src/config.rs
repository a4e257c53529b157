use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::helper::tabulate::TabulationFormat;

pub const DEFAULT_RUN_LOG: &str = "engraft_run_log.txt";

/// Settings for one engraftment estimation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngraftConfig {
    pub mapping: PathBuf,
    pub output: PathBuf,
    /// relative paths in the mapping table are resolved against this directory
    pub input_dir: PathBuf,
    pub run_log: PathBuf,
    pub threads: usize,
    pub quiet: bool,
}

impl EngraftConfig {
    pub fn new(mapping: &str, output: &str) -> Self {
        let output = PathBuf::from(output);
        let run_log = default_run_log(&output);
        EngraftConfig {
            mapping: PathBuf::from(mapping),
            output,
            input_dir: PathBuf::from("."),
            run_log,
            threads: 1,
            quiet: false,
        }
    }

    pub fn with_input_dir(mut self, input_dir: Option<String>) -> Self {
        if let Some(dir) = input_dir {
            self.input_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn with_run_log(mut self, run_log: Option<String>) -> Self {
        if let Some(log) = run_log {
            self.run_log = PathBuf::from(log);
        }
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// JSON run report written beside the output table.
    pub fn report_path(&self) -> PathBuf {
        let mut name = self
            .output
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".report.json");
        self.output.with_file_name(name)
    }
}

fn default_run_log(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) => parent.join(DEFAULT_RUN_LOG),
        None => PathBuf::from(DEFAULT_RUN_LOG),
    }
}

/// Settings for a reference tabulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabulateConfig {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub format: TabulationFormat,
    pub top: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engraft_config_defaults() {
        let config = EngraftConfig::new("mapping.tsv", "results/engraftment.csv");
        assert_eq!(config.input_dir, PathBuf::from("."));
        assert_eq!(config.run_log, PathBuf::from("results/engraft_run_log.txt"));
        assert_eq!(
            config.report_path(),
            PathBuf::from("results/engraftment.csv.report.json")
        );
        assert_eq!(config.threads, 1);
    }

    #[test]
    fn test_engraft_config_overrides() {
        let config = EngraftConfig::new("mapping.tsv", "out.csv")
            .with_input_dir(Some("/data".to_string()))
            .with_run_log(Some("/logs/run.txt".to_string()))
            .with_threads(0)
            .with_quiet(true);
        assert_eq!(config.input_dir, PathBuf::from("/data"));
        assert_eq!(config.run_log, PathBuf::from("/logs/run.txt"));
        assert_eq!(config.threads, 1);
        assert!(config.quiet);
    }
}
