use std::path::{Path, PathBuf};

use csv::{ByteRecord, StringRecord};
use getset::Getters;

use super::error::EngraftError;

pub const MAPPING_FIELD_COUNT: usize = 8;

/// One row of the driver (mapping) table.
#[derive(Debug, Clone, Getters)]
pub struct SampleDescriptor {
    #[getset(get = "pub")]
    simulation: String,
    #[getset(get = "pub")]
    post_fastq: PathBuf,
    #[getset(get = "pub")]
    donor_id: String,
    #[getset(get = "pub")]
    donor_fastq_fwd: PathBuf,
    #[getset(get = "pub")]
    donor_fastq_rev: PathBuf,
    #[getset(get = "pub")]
    pre_id: String,
    #[getset(get = "pub")]
    pre_fastq_fwd: PathBuf,
    #[getset(get = "pub")]
    pre_fastq_rev: PathBuf,
}

impl SampleDescriptor {
    /// Builds a descriptor from a mapping row, resolving relative paths against `base_dir`.
    pub fn from_record(
        record: &StringRecord,
        line: u64,
        base_dir: &Path,
    ) -> Result<Self, EngraftError> {
        if record.len() != MAPPING_FIELD_COUNT {
            return Err(EngraftError::MalformedRow {
                line,
                fields: record.len(),
            });
        }
        let field = |i: usize| record[i].to_string();
        let path = |i: usize| base_dir.join(&record[i]);

        Ok(SampleDescriptor {
            simulation: field(0),
            post_fastq: path(1),
            donor_id: field(2),
            donor_fastq_fwd: path(3),
            donor_fastq_rev: path(4),
            pre_id: field(5),
            pre_fastq_fwd: path(6),
            pre_fastq_rev: path(7),
        })
    }

    pub fn post_donor_key(&self) -> AlignmentKey {
        AlignmentKey::new(&self.post_fastq, &self.donor_id, AlignmentRole::PostDonor)
    }

    pub fn post_pre_key(&self) -> AlignmentKey {
        AlignmentKey::new(&self.post_fastq, &self.pre_id, AlignmentRole::PostPre)
    }

    pub fn donor_self_key(&self) -> AlignmentKey {
        AlignmentKey::new(
            &self.donor_fastq_fwd,
            &self.donor_id,
            AlignmentRole::SelfAlignment,
        )
    }

    pub fn pre_self_key(&self) -> AlignmentKey {
        AlignmentKey::new(&self.pre_fastq_fwd, &self.pre_id, AlignmentRole::SelfAlignment)
    }

    /// Pre-sample reads aligned against the donor reference.
    pub fn pre_to_donor_key(&self) -> AlignmentKey {
        AlignmentKey::new(
            &self.pre_fastq_fwd,
            &self.donor_id,
            AlignmentRole::CrossAlignment,
        )
    }

    /// Donor-sample reads aligned against the pre reference.
    pub fn donor_to_pre_key(&self) -> AlignmentKey {
        AlignmentKey::new(
            &self.donor_fastq_fwd,
            &self.pre_id,
            AlignmentRole::CrossAlignment,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentRole {
    PostDonor,
    PostPre,
    SelfAlignment,
    CrossAlignment,
}

impl AlignmentRole {
    fn separator(&self) -> &'static str {
        match self {
            // the pre listing of a post sample carries a double underscore on disk
            AlignmentRole::PostPre => "__",
            AlignmentRole::PostDonor
            | AlignmentRole::SelfAlignment
            | AlignmentRole::CrossAlignment => "_",
        }
    }
}

/// Identifies an alignment listing by the FASTQ it came from, the reference it
/// was aligned against and its role in the estimate.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AlignmentKey {
    #[getset(get = "pub")]
    fastq: PathBuf,
    #[getset(get = "pub")]
    reference_id: String,
    #[getset(get = "pub")]
    role: AlignmentRole,
}

impl AlignmentKey {
    pub fn new(fastq: &Path, reference_id: &str, role: AlignmentRole) -> Self {
        AlignmentKey {
            fastq: fastq.to_path_buf(),
            reference_id: reference_id.to_string(),
            role,
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}{}{}_aligned.txt",
            fastq_stem(&self.fastq),
            self.role.separator(),
            self.reference_id
        )
    }

    pub fn path(&self) -> PathBuf {
        match self.fastq.parent() {
            Some(parent) => parent.join(self.file_name()),
            None => PathBuf::from(self.file_name()),
        }
    }
}

/// Re-splits a raw mapping row as a text line stripped at both ends and
/// split on tabs: a trailing tab adds no field, inner whitespace is kept.
pub fn mapping_fields(record: &ByteRecord, line: u64) -> Result<StringRecord, EngraftError> {
    let joined = record.iter().collect::<Vec<&[u8]>>().join(&b'\t');
    let text = std::str::from_utf8(&joined).map_err(|_| EngraftError::UndecodableRow { line })?;
    Ok(text.trim().split('\t').collect())
}

/// File name of a FASTQ with a trailing `.gz` and every `.fastq` removed.
pub fn fastq_stem(fastq: &Path) -> String {
    let name = fastq
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    name.replace(".fastq", "")
}
