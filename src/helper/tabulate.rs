//! Per-file counts of the reference each alignment record landed on.

use std::collections::BTreeMap;
use std::io::{self, BufRead};
use std::path::Path;

use clap::ValueEnum;
use getset::Getters;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::helper::io::{find_files_with_suffix, open_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum TabulationFormat {
    /// `*.txt` listings, reference id in the second column
    Listing,
    /// `*.sam` files, header lines skipped, reference id in the third column
    Sam,
}

impl TabulationFormat {
    pub fn suffix(&self) -> &'static str {
        match self {
            TabulationFormat::Listing => ".txt",
            TabulationFormat::Sam => ".sam",
        }
    }

    fn reference_column(&self) -> usize {
        match self {
            TabulationFormat::Listing => 1,
            TabulationFormat::Sam => 2,
        }
    }

    fn skips(&self, line: &str) -> bool {
        match self {
            TabulationFormat::Listing => false,
            TabulationFormat::Sam => line.starts_with('@'),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Getters)]
pub struct ReferenceCounts {
    /// file name -> reference id -> count
    #[getset(get = "pub")]
    per_file: BTreeMap<String, BTreeMap<String, u64>>,
    #[getset(get = "pub")]
    totals: BTreeMap<String, u64>,
    /// records without a reference column
    #[getset(get = "pub")]
    short_rows: u64,
}

impl ReferenceCounts {
    pub fn add_file<R: BufRead>(
        &mut self,
        file_name: &str,
        reader: R,
        format: TabulationFormat,
    ) -> io::Result<()> {
        let column = format.reference_column();
        let counts = self.per_file.entry(file_name.to_string()).or_default();
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() || format.skips(&line) {
                continue;
            }
            match line.split('\t').nth(column) {
                Some(reference) => {
                    *counts.entry(reference.to_string()).or_insert(0) += 1;
                    *self.totals.entry(reference.to_string()).or_insert(0) += 1;
                }
                None => self.short_rows += 1,
            }
        }
        Ok(())
    }

    /// Matrix columns: every reference by name, or the `top` most frequent
    /// (ties broken by name).
    pub fn columns(&self, top: Option<usize>) -> Vec<String> {
        match top {
            None => self.totals.keys().cloned().collect(),
            Some(n) => self
                .totals
                .iter()
                .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
                .take(n)
                .map(|(reference, _)| reference.clone())
                .collect(),
        }
    }

    pub fn count(&self, file_name: &str, reference: &str) -> u64 {
        self.per_file
            .get(file_name)
            .and_then(|counts| counts.get(reference))
            .copied()
            .unwrap_or(0)
    }
}

/// Tabulates every matching file directly under `dir`.
pub fn tabulate_directory(dir: &Path, format: TabulationFormat) -> io::Result<ReferenceCounts> {
    let mut counts = ReferenceCounts::default();
    for path in find_files_with_suffix(dir, format.suffix())? {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        counts.add_file(&file_name, open_text(&path)?, format)?;
    }
    Ok(counts)
}

/// Writes the tab-delimited `FileName` x reference matrix.
pub fn write_matrix(
    counts: &ReferenceCounts,
    columns: &[String],
    path: &Path,
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;

    let mut header = vec!["FileName".to_string()];
    header.extend(columns.iter().cloned());
    wtr.write_record(&header)?;

    for file_name in counts.per_file().keys() {
        let mut row = vec![file_name.clone()];
        row.extend(
            columns
                .iter()
                .map(|reference| counts.count(file_name, reference).to_string()),
        );
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
