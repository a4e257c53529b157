use clap::builder::styling::{AnsiColor, Color};
use clap::builder::styling::{Style, Styles};
use clap::{ColorChoice, Parser, Subcommand};

use crate::config::{EngraftConfig, TabulateConfig};
use crate::helper::tabulate::TabulationFormat;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "engraft",
    version = env!("CARGO_PKG_VERSION"),
    about = "\x1b[1;91mEngraftment estimates from Bowtie2 alignment listings\x1b[0m",
    color = ColorChoice::Always,
    styles = get_styles(),
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate donor and pre-treatment fractions for every sample in a mapping table
    #[command(alias = "e")]
    Estimate {
        /// Mapping file (tab-delimited, 8 columns, one header line)
        #[arg(short, long)]
        mapping: String,

        /// Output table; created with a header if absent, appended otherwise
        #[arg(short, long)]
        output: String,

        /// Directory that relative paths in the mapping file are resolved against
        #[arg(short, long)]
        input: Option<String>,

        /// Run log path, defaults to engraft_run_log.txt beside the output
        #[arg(short, long)]
        log: Option<String>,

        /// Number of samples estimated in parallel
        #[arg(short, long, default_value_t = 1)]
        threads: usize,

        /// Hide the progress bar
        #[arg(short, long, default_value_t = false)]
        quiet: bool,
    },

    /// Count reference hits per alignment file into a tab-delimited matrix
    #[command(alias = "t")]
    Tabulate {
        /// Directory holding the alignment files
        #[arg(short, long)]
        input: String,

        /// Output matrix path
        #[arg(short, long)]
        output: String,

        /// Input file format
        #[arg(short, long, value_enum, default_value_t = TabulationFormat::Listing)]
        format: TabulationFormat,

        /// Keep only the N references with the most hits
        #[arg(long)]
        top: Option<usize>,
    },
}

impl Commands {
    pub fn engraft_config(&self) -> Option<EngraftConfig> {
        match self {
            Commands::Estimate {
                mapping,
                output,
                input,
                log,
                threads,
                quiet,
            } => Some(
                EngraftConfig::new(mapping, output)
                    .with_input_dir(input.clone())
                    .with_run_log(log.clone())
                    .with_threads(*threads)
                    .with_quiet(*quiet),
            ),
            _ => None,
        }
    }

    pub fn tabulate_config(&self) -> Option<TabulateConfig> {
        match self {
            Commands::Tabulate {
                input,
                output,
                format,
                top,
            } => Some(TabulateConfig {
                input_dir: input.into(),
                output: output.into(),
                format: *format,
                top: *top,
            }),
            _ => None,
        }
    }
}

fn ansi(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Yellow section headings, green literals and valid values, red errors.
pub fn get_styles() -> Styles {
    let heading = ansi(AnsiColor::Yellow).bold().underline();
    let alert = ansi(AnsiColor::Red).bold();
    Styles::styled()
        .usage(heading)
        .header(heading)
        .literal(ansi(AnsiColor::Green))
        .invalid(alert)
        .error(alert)
        .valid(ansi(AnsiColor::Green).bold().underline())
        .placeholder(ansi(AnsiColor::White))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_estimate() {
        let args = Args::try_parse_from([
            "engraft", "e", "-m", "map.tsv", "-o", "out.csv", "-i", "/data", "-t", "4",
        ])
        .unwrap();
        let config = args.command.engraft_config().unwrap();
        assert_eq!(config.mapping, PathBuf::from("map.tsv"));
        assert_eq!(config.input_dir, PathBuf::from("/data"));
        assert_eq!(config.threads, 4);
        assert!(args.command.tabulate_config().is_none());
    }

    #[test]
    fn test_parse_tabulate() {
        let args = Args::try_parse_from([
            "engraft", "tabulate", "-i", "sams", "-o", "m.tsv", "-f", "sam", "--top", "20",
        ])
        .unwrap();
        let config = args.command.tabulate_config().unwrap();
        assert_eq!(config.format, TabulationFormat::Sam);
        assert_eq!(config.top, Some(20));
    }

    #[test]
    fn test_help_styles() {
        use clap::CommandFactory;

        let styles = get_styles();
        let heading = ansi(AnsiColor::Yellow).bold().underline();
        assert_eq!(*styles.get_header(), heading);
        assert_eq!(*styles.get_usage(), heading);
        assert_eq!(*styles.get_error(), ansi(AnsiColor::Red).bold());
        assert_eq!(*styles.get_literal(), ansi(AnsiColor::Green));

        let help = Args::command().render_help().ansi().to_string();
        assert!(help.contains("estimate"));
        assert!(help.contains("tabulate"));
    }
}
