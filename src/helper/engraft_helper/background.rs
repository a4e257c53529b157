use std::io;
use std::path::Path;

use getset::Getters;
use serde::{Deserialize, Serialize};

use super::error::EngraftError;
use super::sample::{AlignmentKey, SampleDescriptor};
use super::utils::ensure_exists;
use crate::helper::io::{count_fastq_reads, count_lines};

/// Fraction of a reference sample's own reads that aligned back to its own reference.
pub fn self_alignment_rate(fastq: &Path, alignment: &Path) -> Result<f64, EngraftError> {
    let total = count_fastq_reads(fastq)?;
    if total == 0 {
        return Err(EngraftError::EmptySample {
            path: fastq.display().to_string(),
        });
    }
    let matched = count_lines(alignment)?;
    Ok(matched as f64 / total as f64)
}

/// Raw number of reads from one reference sample that aligned to the other reference.
pub fn crossover_count(key: &AlignmentKey) -> io::Result<u64> {
    count_lines(&key.path())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct BackgroundRates {
    #[getset(get = "pub")]
    base_donor: f64,
    #[getset(get = "pub")]
    base_pre: f64,
    /// pre-sample reads aligned to the donor reference
    #[getset(get = "pub")]
    base_p_d: u64,
    /// donor-sample reads aligned to the pre reference
    #[getset(get = "pub")]
    base_d_p: u64,
}

impl BackgroundRates {
    pub fn new(base_donor: f64, base_pre: f64, base_p_d: u64, base_d_p: u64) -> Self {
        BackgroundRates {
            base_donor,
            base_pre,
            base_p_d,
            base_d_p,
        }
    }

    /// Measures self- and cross-alignment on the forward FASTQ of each reference sample.
    pub fn measure(sample: &SampleDescriptor) -> Result<Self, EngraftError> {
        let donor_self = sample.donor_self_key();
        let pre_self = sample.pre_self_key();
        let pre_to_donor = sample.pre_to_donor_key();
        let donor_to_pre = sample.donor_to_pre_key();

        for path in [
            sample.donor_fastq_fwd().to_path_buf(),
            sample.pre_fastq_fwd().to_path_buf(),
            donor_self.path(),
            pre_self.path(),
            pre_to_donor.path(),
            donor_to_pre.path(),
        ] {
            ensure_exists(sample.simulation(), &path)?;
        }

        Ok(BackgroundRates {
            base_donor: self_alignment_rate(sample.donor_fastq_fwd(), &donor_self.path())?,
            base_pre: self_alignment_rate(sample.pre_fastq_fwd(), &pre_self.path())?,
            base_p_d: crossover_count(&pre_to_donor)?,
            base_d_p: crossover_count(&donor_to_pre)?,
        })
    }

    /// Expected alignment yield of a pure sample.
    pub fn mean_ratio(&self) -> f64 {
        (self.base_donor + self.base_pre) / 2.0
    }
}
