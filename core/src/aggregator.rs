//! Aggregating per-site diversity files into a summary table.

use std::{
    fmt, io,
    num::NonZeroU64,
    path::{Path, PathBuf},
};

use crate::{
    input::{self, DiscoveryError},
    label::{self, Label},
    site::{self, ReadError},
    summary::{self, ZeroSnpsError},
    table::{self, Writer},
    PopulationSummary, SummaryTable,
};

/// Aggregates per-site diversity files into a table of genome-wide π summaries.
///
/// Use the [`Builder`] to construct an aggregator; the defaults search the working directory and
/// write `./Final_nuc_diversity.txt`.
#[derive(Debug)]
pub struct Aggregator {
    genome_size: NonZeroU64,
    input_dir: PathBuf,
    label_prefix: String,
    output: PathBuf,
    writer: Writer,
}

impl Aggregator {
    /// Returns a builder with default settings.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the per-site diversity files that will be aggregated, in order.
    pub fn discover(&self) -> Result<Vec<PathBuf>, Error> {
        Ok(input::discover(&self.input_dir)?)
    }

    /// Reads and summarises a single per-site diversity file.
    pub fn summarize_path<P>(&self, path: P) -> Result<PopulationSummary, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        let sites = site::read_sites(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let label = Label::derive(path, &self.label_prefix);
        if !label.prefix_found() {
            log::warn!(
                "Label prefix '{prefix}' not found in '{path}', using the full path as population ID",
                prefix = self.label_prefix,
                path = path.display(),
            );
        }

        Ok(PopulationSummary::from_sites(label, &sites, self.genome_size)?)
    }

    /// Summarises all discovered files without writing any output.
    ///
    /// Rows are in discovery order. The first error aborts aggregation.
    pub fn aggregate(&self) -> Result<SummaryTable, Error> {
        let paths = self.discover()?;

        if paths.is_empty() {
            log::warn!(
                "No files matching '*{suffix}' found in '{dir}'",
                suffix = input::SUFFIX,
                dir = self.input_dir.display(),
            );
        } else {
            log::info!(
                "Found {n} files matching '*{suffix}' in '{dir}'",
                n = paths.len(),
                suffix = input::SUFFIX,
                dir = self.input_dir.display(),
            );
        }

        let mut table = SummaryTable::new();

        for path in paths {
            let summary = self.summarize_path(&path)?;

            log::info!(
                "{population}: {snps} SNPs, mean π {mean_pi}, factor {factor}, \
                genome-wide π {genomewide_pi}",
                population = summary.population,
                snps = summary.snps,
                mean_pi = summary.mean_pi,
                factor = summary.factor,
                genomewide_pi = summary.genomewide_pi,
            );

            table.push(summary);
        }

        Ok(table)
    }

    /// Summarises all discovered files and writes the table to the output path.
    ///
    /// The output is only written once all files have been summarised, so no output is written if
    /// any file fails. An existing output file is overwritten.
    pub fn run(&self) -> Result<SummaryTable, Error> {
        let table = self.aggregate()?;

        self.writer
            .write_to_path(&self.output, &table)
            .map_err(|source| Error::Write {
                path: self.output.clone(),
                source,
            })?;

        log::info!(
            "Wrote {n} rows to '{path}'",
            n = table.len(),
            path = self.output.display()
        );

        Ok(table)
    }

    /// Returns the genome size used for normalisation.
    pub fn genome_size(&self) -> NonZeroU64 {
        self.genome_size
    }

    /// Returns the path the table is written to.
    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Builder::default().build()
    }
}

/// A builder to create an [`Aggregator`].
#[derive(Debug, Default)]
pub struct Builder {
    genome_size: Option<NonZeroU64>,
    input_dir: Option<PathBuf>,
    label_prefix: Option<String>,
    output: Option<PathBuf>,
    precision: Option<usize>,
}

impl Builder {
    /// Returns a new aggregator.
    pub fn build(self) -> Aggregator {
        Aggregator {
            genome_size: self.genome_size.unwrap_or(summary::DEFAULT_GENOME_SIZE),
            input_dir: self.input_dir.unwrap_or_else(|| PathBuf::from(".")),
            label_prefix: self
                .label_prefix
                .unwrap_or_else(|| String::from(label::DEFAULT_PREFIX)),
            output: self
                .output
                .unwrap_or_else(|| PathBuf::from(table::DEFAULT_OUTPUT)),
            writer: Writer::default().set_precision(self.precision),
        }
    }

    /// Set genome size used for normalisation.
    ///
    /// If unset, [`summary::DEFAULT_GENOME_SIZE`] is used.
    pub fn set_genome_size(mut self, genome_size: NonZeroU64) -> Self {
        self.genome_size = Some(genome_size);
        self
    }

    /// Set directory searched for per-site diversity files.
    ///
    /// If unset, the working directory is used.
    pub fn set_input_dir<P>(mut self, input_dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.input_dir = Some(input_dir.into());
        self
    }

    /// Set prefix removed from input paths to create population IDs.
    ///
    /// If unset, [`label::DEFAULT_PREFIX`] is used.
    pub fn set_label_prefix<S>(mut self, label_prefix: S) -> Self
    where
        S: Into<String>,
    {
        self.label_prefix = Some(label_prefix.into());
        self
    }

    /// Set output path.
    ///
    /// If unset, [`table::DEFAULT_OUTPUT`] is used.
    pub fn set_output<P>(mut self, output: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.output = Some(output.into());
        self
    }

    /// Set precision of real-valued output columns.
    ///
    /// If unset, the shortest representation that reads back to the same value is used, always
    /// with a decimal point and in exponent form for very small or large values.
    pub fn set_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }
}

/// An error associated with aggregation.
#[derive(Debug)]
pub enum Error {
    /// The input directory could not be listed.
    Discovery(DiscoveryError),
    /// An input file could not be read.
    Read {
        /// Path to the input file.
        path: PathBuf,
        /// The underlying error.
        source: ReadError,
    },
    /// A population has no segregating sites.
    ZeroSnps(ZeroSnpsError),
    /// The output table could not be written.
    Write {
        /// Path to the output file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

impl From<DiscoveryError> for Error {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

impl From<ZeroSnpsError> for Error {
    fn from(e: ZeroSnpsError) -> Self {
        Self::ZeroSnps(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Discovery(e) => write!(f, "{e}"),
            Error::Read { path, source } => {
                write!(f, "failed to read '{}': {source}", path.display())
            }
            Error::ZeroSnps(e) => write!(f, "{e}"),
            Error::Write { path, source } => {
                write!(f, "failed to write '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Discovery(e) => Some(e),
            Error::Read { source, .. } => Some(source),
            Error::ZeroSnps(e) => Some(e),
            Error::Write { source, .. } => Some(source),
        }
    }
}
