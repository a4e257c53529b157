use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum DataType {
    Plain,
    Gz,
}

impl DataType {
    pub fn from_path(path: &Path) -> Self {
        if path.extension().map(|ext| ext == "gz").unwrap_or(false) {
            DataType::Gz
        } else {
            DataType::Plain
        }
    }
}

/// Opens a text file for buffered reading, decoding gzip when the path ends with `.gz`.
pub fn open_text(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let stream: Box<dyn Read> = match DataType::from_path(path) {
        DataType::Plain => Box::new(file),
        DataType::Gz => Box::new(MultiGzDecoder::new(BufReader::new(file))),
    };
    Ok(Box::new(BufReader::new(stream)))
}

/// Counts lines in a file. A trailing line without a newline still counts.
pub fn count_lines(path: &Path) -> io::Result<u64> {
    let mut reader = open_text(path)?;
    let mut count = 0u64;
    let mut last = b'\n';
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        count += buf.iter().filter(|&&b| b == b'\n').count() as u64;
        last = buf[buf.len() - 1];
        let len = buf.len();
        reader.consume(len);
    }
    if last != b'\n' {
        count += 1;
    }
    Ok(count)
}

/// Number of FASTQ records, taken as line count / 4.
///
/// The division truncates: a file whose line count is not a multiple of four
/// is not flagged, the partial record is simply dropped.
pub fn count_fastq_reads(path: &Path) -> io::Result<u64> {
    Ok(count_lines(path)? / 4)
}

/// Lists regular files in `input` whose name ends with `suffix`, sorted by file name.
pub fn find_files_with_suffix(input: &Path, suffix: &str) -> io::Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Input path '{}' does not exist", input.display()),
        ));
    }
    if !input.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("Input path '{}' is not a directory", input.display()),
        ));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        let path = entry.path();
        let matched = path
            .file_name()
            .and_then(|f| f.to_str())
            .map(|name| name.ends_with(suffix))
            .unwrap_or(false);
        if path.is_file() && matched {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    #[test]
    fn test_count_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "one\ntwo\nthree").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 3);

        fs::write(&path, "one\ntwo\n").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 2);

        fs::write(&path, "").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 0);
    }

    #[test]
    fn test_count_fastq_reads_truncates() {
        let path = Path::new("tests/data/donor.fastq");
        assert_eq!(count_fastq_reads(path).unwrap(), 3);

        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.fastq");
        fs::write(&broken, "@r1\nACGT\n+\nIIII\n@r2\nACGT\n").unwrap();
        assert_eq!(count_fastq_reads(&broken).unwrap(), 1);
    }

    #[test]
    fn test_count_fastq_reads_gz() {
        let plain = fs::read("tests/data/donor.fastq").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("donor.fastq.gz");
        let mut encoder = GzEncoder::new(File::create(&gz_path).unwrap(), Compression::default());
        encoder.write_all(&plain).unwrap();
        encoder.finish().unwrap();

        assert_eq!(DataType::from_path(&gz_path), DataType::Gz);
        assert_eq!(
            count_fastq_reads(&gz_path).unwrap(),
            count_fastq_reads(Path::new("tests/data/donor.fastq")).unwrap()
        );
    }

    #[test]
    fn test_find_files_with_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("c.sam"), "").unwrap();
        fs::create_dir(dir.path().join("d.txt")).unwrap();

        let files = find_files_with_suffix(dir.path(), ".txt").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        assert!(find_files_with_suffix(&dir.path().join("missing"), ".txt").is_err());
    }
}
