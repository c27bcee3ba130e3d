use std::{io::Write, num::NonZeroU64, path::PathBuf};

use anyhow::Error;

use clap::{ArgAction, Parser};

use nucdiv_core::{label, summary, table, Aggregator};

const NAME: &str = env!("CARGO_BIN_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Summarise genome-wide nucleotide diversity from per-site π.
///
/// Reads every '*.sites.pi' file (as written by 'vcftools --site-pi') in the input directory,
/// excludes invariant sites, and writes one row per population with the mean π over segregating
/// sites scaled to a genome-wide estimate.
#[derive(Debug, Parser)]
#[clap(name = NAME, author = AUTHOR, version = VERSION, about)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Genome size in base pairs.
    ///
    /// Used to scale the mean π over segregating sites to a genome-wide estimate.
    #[arg(
        short = 'g',
        long,
        default_value_t = summary::DEFAULT_GENOME_SIZE,
        value_name = "INT"
    )]
    genome_size: NonZeroU64,

    /// Directory containing per-site diversity files.
    #[arg(short = 'd', long, default_value = ".", value_name = "DIR")]
    input_dir: PathBuf,

    /// Output table.
    ///
    /// If the file already exists, it will be overwritten. Nothing is written if any input fails.
    #[arg(short = 'o', long, default_value = table::DEFAULT_OUTPUT, value_name = "FILE")]
    output: PathBuf,

    /// Prefix removed from input paths to create population IDs.
    ///
    /// Every occurrence of the prefix in each input path is removed. If the prefix is not found,
    /// the full path is used and a warning is printed.
    #[arg(long, default_value = label::DEFAULT_PREFIX, value_name = "STRING")]
    label_prefix: String,

    /// Output precision.
    ///
    /// Number of decimals used for real-valued columns. By default, the shortest representation
    /// that reads back to the same value is used, in exponent form for very small values.
    #[arg(short = 'p', long, value_name = "INT")]
    precision: Option<usize>,

    /// Suppress warnings.
    ///
    /// By default, only warnings are printed. By setting this flag, warnings will be disabled.
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbosity.
    ///
    /// Flag can be set multiple times to increase verbosity: once for progress, twice for
    /// debugging information.
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Print CLI arguments for debugging.
    #[clap(long, hide = true)]
    debug: bool,
}

impl Cli {
    pub fn run(self) -> Result<(), Error> {
        if self.debug {
            eprintln!("{self:#?}");
        }

        let level = if self.quiet {
            log::LevelFilter::Off
        } else {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };

        match env_logger::Builder::new()
            .filter_level(level)
            .target(env_logger::Target::Stderr)
            .format(|buf, record| {
                let level = record.level().as_str().to_lowercase();
                let args = record.args();
                writeln!(buf, "[nucdiv {level:>5}] {args}")
            })
            .try_init()
        {
            Ok(()) => (),
            Err(e) => eprintln!("failed to setup logger: {e}"),
        }

        Aggregator::from(self).run()?;

        Ok(())
    }
}

impl From<Cli> for Aggregator {
    fn from(args: Cli) -> Self {
        Aggregator::builder()
            .set_genome_size(args.genome_size)
            .set_input_dir(args.input_dir)
            .set_output(args.output)
            .set_label_prefix(args.label_prefix)
            .set_precision(args.precision)
            .build()
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use clap::error::ErrorKind as ClapErrorKind;

    fn try_parse_args(cmd: &str) -> Result<Cli, clap::Error> {
        Parser::try_parse_from(cmd.split_whitespace())
    }

    fn parse_args(cmd: &str) -> Cli {
        try_parse_args(cmd).expect("failed to parse command")
    }

    #[test]
    fn test_no_arguments() {
        let args = parse_args("nucdiv");

        assert_eq!(args.genome_size.get(), 44_029_313);
        assert_eq!(args.input_dir, Path::new("."));
        assert_eq!(args.output, Path::new("./Final_nuc_diversity.txt"));
        assert_eq!(args.label_prefix, "./vcftools_pi_haploid/");
        assert_eq!(args.precision, None);
        assert!(!args.quiet);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_parse_options() {
        let args = parse_args("nucdiv -g 1000 -d pi -o out.tsv --label-prefix pi/ -p 4 -vv");

        assert_eq!(args.genome_size.get(), 1000);
        assert_eq!(args.input_dir, Path::new("pi"));
        assert_eq!(args.output, Path::new("out.tsv"));
        assert_eq!(args.label_prefix, "pi/");
        assert_eq!(args.precision, Some(4));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_zero_genome_size() {
        let result = try_parse_args("nucdiv --genome-size 0");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ValueValidation);
    }

    #[test]
    fn test_negative_precision() {
        let result = try_parse_args("nucdiv --precision=-1");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ValueValidation);
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        let result = try_parse_args("nucdiv -q -v");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_unexpected_positional() {
        let result = try_parse_args("nucdiv popA.sites.pi");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::UnknownArgument);
    }

    #[test]
    fn test_into_aggregator() {
        let aggregator = Aggregator::from(parse_args("nucdiv -g 12 -o table.tsv"));

        assert_eq!(aggregator.genome_size().get(), 12);
        assert_eq!(aggregator.output(), Path::new("table.tsv"));
    }
}
