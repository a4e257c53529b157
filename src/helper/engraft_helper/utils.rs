use std::io::{Result as IoResult, Write};
use std::path::Path;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};

use super::error::EngraftError;

pub fn log_line<W: Write>(writer: &mut W, message: &str) -> IoResult<()> {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(writer, "[{}] {}", now, message)?;
    writer.flush()?;
    Ok(())
}

pub fn ensure_exists(sample: &str, path: &Path) -> Result<(), EngraftError> {
    if path.exists() {
        Ok(())
    } else {
        Err(EngraftError::MissingInput {
            sample: sample.to_string(),
            path: path.display().to_string(),
        })
    }
}

pub fn sample_progress_bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.green/white} {pos}/{len} samples {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_line_format() {
        let mut buf: Vec<u8> = Vec::new();
        log_line(&mut buf, "Starting engraftment estimate").unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] Starting engraftment estimate\n"));
        // [YYYY-mm-dd HH:MM:SS]
        assert_eq!(line.find(']'), Some(20));
    }

    #[test]
    fn test_ensure_exists() {
        assert!(ensure_exists("sim1", Path::new("tests/data/donor.fastq")).is_ok());
        let err = ensure_exists("sim1", Path::new("tests/data/nope.fastq")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing input for sample sim1: tests/data/nope.fastq"
        );
    }
}
