use std::collections::HashSet;
use std::io::{self, BufRead};
use std::path::Path;

use getset::Getters;
use serde::{Deserialize, Serialize};

use crate::helper::io::open_text;

/// Loads the distinct read identifiers (first whitespace-delimited token) of an alignment listing.
pub fn load_read_ids(path: &Path) -> io::Result<HashSet<String>> {
    let reader = open_text(path)?;
    let mut ids = HashSet::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(id) = line.split_whitespace().next() {
            if !ids.contains(id) {
                ids.insert(id.to_string());
            }
        }
    }
    Ok(ids)
}

/// Split of a post-treatment sample's reads by which reference they aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ReadPartition {
    #[getset(get = "pub")]
    total_n: u64,
    #[getset(get = "pub")]
    d_uniq: u64,
    #[getset(get = "pub")]
    p_uniq: u64,
    #[getset(get = "pub")]
    ambig: u64,
}

impl ReadPartition {
    pub fn new(total_n: u64, d_uniq: u64, p_uniq: u64, ambig: u64) -> Self {
        ReadPartition {
            total_n,
            d_uniq,
            p_uniq,
            ambig,
        }
    }

    pub fn from_sets(donor: &HashSet<String>, pre: &HashSet<String>, total_n: u64) -> Self {
        let ambig = donor.intersection(pre).count() as u64;
        ReadPartition {
            total_n,
            d_uniq: donor.len() as u64 - ambig,
            p_uniq: pre.len() as u64 - ambig,
            ambig,
        }
    }

    /// Reads aligned to neither reference. Negative when the listings name
    /// more reads than the post FASTQ holds.
    pub fn unknown(&self) -> i64 {
        self.total_n as i64 - self.ambig as i64 - self.d_uniq as i64 - self.p_uniq as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_read_ids() {
        let ids = load_read_ids(Path::new("tests/data/S1_D1_aligned.txt")).unwrap();
        assert_eq!(ids, set(&["read1", "read2", "read3"]));
    }

    #[test]
    fn test_load_read_ids_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_aligned.txt");
        fs::write(&path, "").unwrap();
        assert!(load_read_ids(&path).unwrap().is_empty());

        fs::write(&path, "\n   \n").unwrap();
        assert!(load_read_ids(&path).unwrap().is_empty());

        assert!(load_read_ids(&dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_partition_from_sets() {
        let donor = set(&["a", "b", "c", "d"]);
        let pre = set(&["c", "d", "e"]);
        let partition = ReadPartition::from_sets(&donor, &pre, 10);
        assert_eq!(partition, ReadPartition::new(10, 2, 1, 2));
        assert_eq!(partition.unknown(), 5);
    }

    #[test]
    fn test_partition_matches_set_algebra() {
        let donor = set(&["r1", "r2", "r3", "r5", "r8"]);
        let pre = set(&["r2", "r3", "r4", "r9"]);
        let partition = ReadPartition::from_sets(&donor, &pre, 12);

        let d_only = donor.difference(&pre).count() as u64;
        let p_only = pre.difference(&donor).count() as u64;
        let union = donor.union(&pre).count() as u64;

        assert_eq!(*partition.d_uniq(), d_only);
        assert_eq!(*partition.p_uniq(), p_only);
        assert_eq!(*partition.ambig(), union - d_only - p_only);

        let swapped = ReadPartition::from_sets(&pre, &donor, 12);
        assert_eq!(swapped.d_uniq(), partition.p_uniq());
        assert_eq!(swapped.p_uniq(), partition.d_uniq());
        assert_eq!(swapped.ambig(), partition.ambig());
    }

    #[test]
    fn test_unknown_can_be_negative() {
        let partition = ReadPartition::new(3, 2, 2, 1);
        assert_eq!(partition.unknown(), -2);
    }
}
