use std::fmt::Display;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use getset::{Getters, Setters};
use serde::{Deserialize, Serialize};

use crate::config::EngraftConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Getters, Setters)]
pub struct EngraftReport {
    #[getset(get = "pub", set = "pub")]
    process_start_time: DateTime<Local>,
    #[getset(get = "pub", set = "pub")]
    process_end_time: DateTime<Local>,
    #[getset(get = "pub")]
    current_version: String,
    #[getset(get = "pub")]
    config: EngraftConfig,
    #[getset(get = "pub")]
    rows_written: usize,
    #[getset(get = "pub")]
    skipped: Vec<SkippedSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkippedSample {
    MalformedRow { line: u64, fields: usize },
    UndecodableRow { line: u64 },
    Sample { simulation: String, reason: String },
}

impl Display for SkippedSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkippedSample::MalformedRow { line, fields } => {
                write!(f, "Mapping line {} skipped: {} fields", line, fields)
            }
            SkippedSample::UndecodableRow { line } => {
                write!(f, "Mapping line {} skipped: not valid UTF-8", line)
            }
            SkippedSample::Sample { simulation, reason } => {
                write!(f, "Sample {} skipped: {}", simulation, reason)
            }
        }
    }
}

impl EngraftReport {
    pub fn new(config: &EngraftConfig) -> Self {
        EngraftReport {
            process_start_time: Local::now(),
            process_end_time: Local::now(),
            current_version: env!("CARGO_PKG_VERSION").to_string(),
            config: config.clone(),
            rows_written: 0,
            skipped: Vec::new(),
        }
    }

    pub fn add_written(&mut self) {
        self.rows_written += 1;
    }

    pub fn add_skipped(&mut self, skipped: SkippedSample) {
        self.skipped.push(skipped);
    }

    pub fn malformed_rows(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| {
                matches!(
                    s,
                    SkippedSample::MalformedRow { .. } | SkippedSample::UndecodableRow { .. }
                )
            })
            .count()
    }

    pub fn write_json(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_and_json() {
        let config = EngraftConfig::new("mapping.tsv", "out.csv");
        let mut report = EngraftReport::new(&config);
        report.add_written();
        report.add_skipped(SkippedSample::MalformedRow { line: 3, fields: 5 });
        report.add_skipped(SkippedSample::Sample {
            simulation: "sim2".to_string(),
            reason: "Missing input".to_string(),
        });

        report.add_skipped(SkippedSample::UndecodableRow { line: 4 });

        assert_eq!(*report.rows_written(), 1);
        assert_eq!(report.malformed_rows(), 2);
        assert_eq!(report.current_version(), env!("CARGO_PKG_VERSION"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();
        let parsed: EngraftReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.skipped(), report.skipped());
    }

    #[test]
    fn test_skipped_display() {
        let skipped = SkippedSample::Sample {
            simulation: "sim9".to_string(),
            reason: "zero reads".to_string(),
        };
        assert_eq!(skipped.to_string(), "Sample sim9 skipped: zero reads");
    }
}
