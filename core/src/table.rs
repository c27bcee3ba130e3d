//! Summary tables.
//!
//! A summary table is written as tab-separated text with a fixed header and one row per
//! population, in the order the rows were added:
//!
//! ```text
//! PopID	Genome_size	Number_of_snps	PI_from_snps	factor	final_genomewide_pi
//! popA.sites.pi	12	3	0.5	4.0	0.125
//! ```

use std::{fs, io, path::Path};

use crate::PopulationSummary;

/// The output file written by default.
pub const DEFAULT_OUTPUT: &str = "./Final_nuc_diversity.txt";

/// Column names of a written summary table.
pub const HEADER: [&str; 6] = [
    "PopID",
    "Genome_size",
    "Number_of_snps",
    "PI_from_snps",
    "factor",
    "final_genomewide_pi",
];

/// An ordered collection of population summaries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummaryTable {
    rows: Vec<PopulationSummary>,
}

impl SummaryTable {
    /// Creates a new, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row.
    pub fn push(&mut self, summary: PopulationSummary) {
        self.rows.push(summary);
    }

    /// Returns the rows in insertion order.
    pub fn rows(&self) -> &[PopulationSummary] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<PopulationSummary> for SummaryTable {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = PopulationSummary>,
    {
        Self {
            rows: Vec::from_iter(iter),
        }
    }
}

impl Extend<PopulationSummary> for SummaryTable {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = PopulationSummary>,
    {
        self.rows.extend(iter)
    }
}

/// A builder to write a summary table.
#[derive(Debug, Default)]
pub struct Writer {
    precision: Option<usize>,
}

impl Writer {
    /// Set precision.
    ///
    /// Real-valued columns are written with the given number of decimals. If unset, the shortest
    /// representation that reads back to the same value is used. Whole numbers keep a trailing
    /// `.0`, and values below 1e-4 are written in exponent form, e.g. `1.3627e-8`.
    pub fn set_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    /// Write table to writer.
    pub fn write<W>(&self, writer: W, table: &SummaryTable) -> io::Result<()>
    where
        W: io::Write,
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        writer.write_record(HEADER)?;

        for row in table.rows() {
            writer.write_record([
                row.population.clone(),
                row.genome_size.to_string(),
                row.snps.to_string(),
                self.format_real(row.mean_pi),
                self.format_real(row.factor),
                self.format_real(row.genomewide_pi),
            ])?;
        }

        writer.flush()
    }

    /// Write table to path.
    ///
    /// The table is formatted in full before the file is created. If path already exists, it will
    /// be overwritten.
    pub fn write_to_path<P>(&self, path: P, table: &SummaryTable) -> io::Result<()>
    where
        P: AsRef<Path>,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, table)?;

        fs::write(path, buf)
    }

    fn format_real(&self, x: f64) -> String {
        match self.precision {
            Some(precision) => format!("{x:.precision$}"),
            None => format!("{x:?}"),
        }
    }
}
