use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use getset::Getters;
use serde::{Deserialize, Serialize};

use super::correction::Correction;
use super::error::EngraftError;
use super::read_ids::ReadPartition;
use super::resolver::AmbiguitySplit;

pub const OUTPUT_HEADER: [&str; 12] = [
    "Simulation",
    "Total_Donor",
    "Total_Pre",
    "Percent_Donor",
    "Percent_Pre",
    "Alignment_Adjustment",
    "Uniquely_Donor",
    "Uniquely_Pre",
    "Ambiguous",
    "Amb_Donor",
    "Amb_Pre",
    "Unmapped",
];

/// One output row. Field order is the column order of [`OUTPUT_HEADER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct EngraftmentRecord {
    #[serde(rename = "Simulation")]
    simulation: String,
    #[serde(rename = "Total_Donor")]
    total_donor: u64,
    #[serde(rename = "Total_Pre")]
    total_pre: u64,
    #[serde(rename = "Percent_Donor")]
    percent_donor: f64,
    #[serde(rename = "Percent_Pre")]
    percent_pre: f64,
    #[serde(rename = "Alignment_Adjustment")]
    alignment_adjustment: f64,
    #[serde(rename = "Uniquely_Donor")]
    uniquely_donor: u64,
    #[serde(rename = "Uniquely_Pre")]
    uniquely_pre: u64,
    #[serde(rename = "Ambiguous")]
    ambiguous: u64,
    #[serde(rename = "Amb_Donor")]
    amb_donor: u64,
    #[serde(rename = "Amb_Pre")]
    amb_pre: u64,
    #[serde(rename = "Unmapped")]
    unmapped: i64,
}

impl EngraftmentRecord {
    pub fn from_estimate(
        simulation: &str,
        partition: &ReadPartition,
        split: &AmbiguitySplit,
        correction: &Correction,
    ) -> Self {
        EngraftmentRecord {
            simulation: simulation.to_string(),
            total_donor: *split.d_tot(),
            total_pre: *split.p_tot(),
            percent_donor: *correction.corr_d(),
            percent_pre: *correction.corr_p(),
            alignment_adjustment: *correction.factor(),
            uniquely_donor: *partition.d_uniq(),
            uniquely_pre: *partition.p_uniq(),
            ambiguous: *partition.ambig(),
            amb_donor: *split.amb_donor_reads(),
            amb_pre: *split.amb_pre_reads(),
            unmapped: partition.unknown(),
        }
    }
}

/// Appends engraftment rows to a comma-delimited output file.
///
/// The header is written only by whoever creates the file; opening an existing
/// file appends after its current rows.
pub struct RecordEmitter {
    path: PathBuf,
    file: Mutex<File>,
}

impl RecordEmitter {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = match OpenOptions::new().append(true).create_new(true).open(path) {
            Ok(mut file) => {
                let mut header = OUTPUT_HEADER.join(",");
                header.push('\n');
                file.write_all(header.as_bytes())?;
                file
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                OpenOptions::new().append(true).open(path)?
            }
            Err(e) => return Err(e),
        };
        Ok(RecordEmitter {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the full row first, then writes it with a single append.
    pub fn append(&self, record: &EngraftmentRecord) -> Result<(), EngraftError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        wtr.serialize(record)?;
        let line = wtr.into_inner().map_err(|e| e.into_error())?;

        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output file lock poisoned"))?;
        file.write_all(&line)?;
        file.flush()?;
        Ok(())
    }
}
