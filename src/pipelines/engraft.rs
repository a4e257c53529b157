use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;

use csv::ReaderBuilder;
use rayon::prelude::*;

use crate::config::EngraftConfig;
use crate::helper::engraft_helper::*;
use crate::helper::io::count_fastq_reads;

/// Runs the engraftment estimate over every row of the mapping table and
/// appends one output row per successfully estimated sample.
pub fn run_engraft(config: &EngraftConfig) -> Result<EngraftReport, Box<dyn Error>> {
    if !config.mapping.is_file() {
        return Err(EngraftError::MappingFileNotFound(config.mapping.display().to_string()).into());
    }

    let logfile = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.run_log)?;
    let mut logger = BufWriter::new(logfile);
    let mut report = EngraftReport::new(config);

    log_line(&mut logger, "Starting engraftment estimate")?;
    log_line(&mut logger, &format!("Mapping file: {}", config.mapping.display()))?;
    log_line(&mut logger, &format!("Output file: {}", config.output.display()))?;
    log_line(&mut logger, &format!("Input directory: {}", config.input_dir.display()))?;

    let samples = read_mapping(config, &mut logger, &mut report)?;
    log_line(&mut logger, &format!("Samples to estimate: {}", samples.len()))?;

    let emitter = RecordEmitter::open(&config.output)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let bar = sample_progress_bar(samples.len() as u64, config.quiet);
    let results: Vec<Result<EngraftmentRecord, EngraftError>> = pool.install(|| {
        samples
            .par_iter()
            .map(|sample| {
                let result = estimate_sample(sample);
                bar.inc(1);
                result
            })
            .collect()
    });
    bar.finish_and_clear();

    for (sample, result) in samples.iter().zip(results) {
        match result {
            Ok(record) => {
                if *record.unmapped() < 0 {
                    log_line(
                        &mut logger,
                        &format!(
                            "Warning: sample {} lists more aligned reads than its FASTQ holds",
                            sample.simulation()
                        ),
                    )?;
                }
                if let Err(e) = emitter.append(&record) {
                    log_line(&mut logger, &format!("Error writing output: {}", e))?;
                    return Err(e.into());
                }
                report.add_written();
                log_line(
                    &mut logger,
                    &format!(
                        "Sample {}: donor {}, pre {}, adjustment {}",
                        sample.simulation(),
                        record.total_donor(),
                        record.total_pre(),
                        record.alignment_adjustment()
                    ),
                )?;
            }
            Err(e) => {
                println!("{}, skipping.", e);
                let skipped = SkippedSample::Sample {
                    simulation: sample.simulation().to_string(),
                    reason: e.to_string(),
                };
                log_line(&mut logger, &skipped.to_string())?;
                report.add_skipped(skipped);
            }
        }
    }

    report.set_process_end_time(chrono::Local::now());
    report.write_json(&config.report_path())?;
    log_line(
        &mut logger,
        &format!(
            "Engraftment estimate completed: {} rows written to {}, {} skipped",
            report.rows_written(),
            emitter.path().display(),
            report.skipped().len()
        ),
    )?;
    Ok(report)
}

/// Reads the tab-delimited mapping table, skipping its header line and any
/// row that is not valid UTF-8 or does not hold exactly eight fields.
fn read_mapping(
    config: &EngraftConfig,
    logger: &mut BufWriter<File>,
    report: &mut EngraftReport,
) -> Result<Vec<SampleDescriptor>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_path(&config.mapping)?;

    let mut samples = Vec::new();
    for record in rdr.byte_records() {
        let parsed = match record {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                mapping_fields(&record, line).and_then(|fields| {
                    SampleDescriptor::from_record(&fields, line, &config.input_dir)
                })
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(EngraftError::UndecodableRow {
                line: e.position().map(|p| p.line()).unwrap_or(0),
            }),
        };
        let skipped = match parsed {
            Ok(sample) => {
                samples.push(sample);
                continue;
            }
            Err(EngraftError::MalformedRow { line, fields }) => {
                SkippedSample::MalformedRow { line, fields }
            }
            Err(EngraftError::UndecodableRow { line }) => SkippedSample::UndecodableRow { line },
            Err(e) => return Err(e.into()),
        };
        log_line(logger, &skipped.to_string())?;
        report.add_skipped(skipped);
    }
    Ok(samples)
}

/// Estimates donor and pre totals for one mapping row.
pub fn estimate_sample(sample: &SampleDescriptor) -> Result<EngraftmentRecord, EngraftError> {
    let donor_listing = sample.post_donor_key().path();
    let pre_listing = sample.post_pre_key().path();
    for path in [&donor_listing, &pre_listing, sample.post_fastq()] {
        ensure_exists(sample.simulation(), path)?;
    }

    let donor_ids = load_read_ids(&donor_listing)?;
    let pre_ids = load_read_ids(&pre_listing)?;
    let total_n = count_fastq_reads(sample.post_fastq())?;
    if total_n == 0 {
        return Err(EngraftError::ZeroTotalReads(sample.simulation().to_string()));
    }
    let partition = ReadPartition::from_sets(&donor_ids, &pre_ids, total_n);

    let rates = BackgroundRates::measure(sample)?;
    let split = resolve(&partition, &rates);
    let correction = correct(
        sample.simulation(),
        *split.d_tot(),
        *split.p_tot(),
        total_n,
        rates.mean_ratio(),
    )?;

    Ok(EngraftmentRecord::from_estimate(
        sample.simulation(),
        &partition,
        &split,
        &correction,
    ))
}
