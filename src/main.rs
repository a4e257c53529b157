use std::error::Error;
use std::process::ExitCode;

use bt2_engraft::cli::Args;
use bt2_engraft::pipelines::{run_engraft, run_tabulate};
use clap::Parser;

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    if let Some(config) = args.command.engraft_config() {
        println!(
            "Running engraftment estimate with mapping: {}, output: {}",
            config.mapping.display(),
            config.output.display()
        );
        let report = run_engraft(&config)?;
        println!(
            "{} rows written, {} skipped",
            report.rows_written(),
            report.skipped().len()
        );
    } else if let Some(config) = args.command.tabulate_config() {
        println!(
            "Tabulating {:?} files in {}",
            config.format,
            config.input_dir.display()
        );
        run_tabulate(&config)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
