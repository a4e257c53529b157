use std::error::Error;

use crate::config::TabulateConfig;
use crate::helper::tabulate::{ReferenceCounts, tabulate_directory, write_matrix};

pub fn run_tabulate(config: &TabulateConfig) -> Result<ReferenceCounts, Box<dyn Error>> {
    let counts = tabulate_directory(&config.input_dir, config.format)?;
    let columns = counts.columns(config.top);
    write_matrix(&counts, &columns, &config.output)?;

    if *counts.short_rows() > 0 {
        println!(
            "Skipped {} records without a reference column",
            counts.short_rows()
        );
    }
    match config.top {
        Some(n) => println!(
            "Output file {} created successfully, keeping the top {} references.",
            config.output.display(),
            n
        ),
        None => println!("Output file {} created successfully.", config.output.display()),
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::tabulate::TabulationFormat;
    use std::fs;

    #[test]
    fn test_run_tabulate_sam_top() {
        let dir = tempfile::tempdir().unwrap();
        let sams = dir.path().join("sams");
        fs::create_dir(&sams).unwrap();
        fs::write(
            sams.join("a.sam"),
            "@HD\tVN:1.6\nr1\t0\tMAG1\t1\nr2\t0\tMAG2\t1\nr3\t0\tMAG2\t1\n",
        )
        .unwrap();
        fs::write(sams.join("b.sam"), "r1\t0\tMAG3\t1\nr2\t0\tMAG2\t1\n").unwrap();

        let config = TabulateConfig {
            input_dir: sams,
            output: dir.path().join("counts.tsv"),
            format: TabulationFormat::Sam,
            top: Some(1),
        };
        run_tabulate(&config).unwrap();

        let content = fs::read_to_string(&config.output).unwrap();
        assert_eq!(content, "FileName\tMAG2\na.sam\t2\nb.sam\t1\n");
    }

    #[test]
    fn test_run_tabulate_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = TabulateConfig {
            input_dir: dir.path().join("nope"),
            output: dir.path().join("counts.tsv"),
            format: TabulationFormat::Listing,
            top: None,
        };
        assert!(run_tabulate(&config).is_err());
    }
}
