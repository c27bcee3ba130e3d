//! Reader for per-site diversity files.
//!
//! The expected format is the tab-separated output of `vcftools --site-pi`, i.e. a header line
//! followed by one line per site:
//!
//! ```text
//! CHROM	POS	PI
//! chr1	1042	0.5
//! chr1	1187	0
//! ```
//!
//! Only the `PI` column is required. Other columns are permitted and ignored, except that `CHROM`
//! and `POS` are kept for diagnostics when present.

use std::{fmt, io, path::Path};

use crate::input;

use super::Site;

const PI_COLUMN: &str = "PI";
const CONTIG_COLUMN: &str = "CHROM";
const POSITION_COLUMN: &str = "POS";

#[derive(Clone, Copy, Debug)]
struct Columns {
    pi: usize,
    contig: Option<usize>,
    position: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self, ReadError> {
        let find = |name| header.iter().position(|column| column == name);

        let pi = find(PI_COLUMN).ok_or(ReadError::MissingColumn { column: PI_COLUMN })?;

        Ok(Self {
            pi,
            contig: find(CONTIG_COLUMN),
            position: find(POSITION_COLUMN),
        })
    }
}

/// A per-site diversity reader.
///
/// The reader is an iterator over the sites in the input.
pub struct Reader<R> {
    inner: csv::Reader<R>,
    columns: Columns,
    buf: csv::StringRecord,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Creates a new reader, reading the header from the inner reader.
    ///
    /// # Errors
    ///
    /// If the header cannot be read, or if it has no `PI` column.
    pub fn new(inner: R) -> Result<Self, ReadError> {
        let mut inner = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(true)
            .from_reader(inner);

        let columns = Columns::from_header(inner.headers()?)?;

        Ok(Self {
            inner,
            columns,
            buf: csv::StringRecord::new(),
        })
    }

    /// Reads the next site, returning `None` when the input is exhausted.
    pub fn read_site(&mut self) -> Result<Option<Site>, ReadError> {
        if self.inner.read_record(&mut self.buf)? {
            self.parse_site().map(Some)
        } else {
            Ok(None)
        }
    }

    fn parse_site(&self) -> Result<Site, ReadError> {
        let field = |i| self.buf.get(i);

        let raw_pi = field(self.columns.pi).unwrap_or_default();
        let pi = match raw_pi.trim().parse::<f64>() {
            Ok(pi) if pi.is_finite() && pi >= 0.0 => pi,
            _ => {
                return Err(ReadError::InvalidPi {
                    line: self.buf.position().map(|p| p.line()),
                    value: raw_pi.to_string(),
                })
            }
        };

        Ok(Site {
            contig: self.columns.contig.and_then(field).map(String::from),
            position: self
                .columns
                .position
                .and_then(field)
                .and_then(|s| s.trim().parse().ok()),
            pi,
        })
    }
}

impl Reader<Box<dyn io::Read>> {
    /// Creates a new reader from a path, decompressing the input if required.
    pub fn from_path<P>(path: P) -> Result<Self, ReadError>
    where
        P: AsRef<Path>,
    {
        Self::new(input::open(path)?)
    }
}

impl<R> Iterator for Reader<R>
where
    R: io::Read,
{
    type Item = Result<Site, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_site().transpose()
    }
}

impl<R> fmt::Debug for Reader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// An error associated with reading a per-site diversity file.
#[derive(Debug)]
pub enum ReadError {
    /// I/O error.
    Io(io::Error),
    /// Malformed tab-separated input, e.g. a row with the wrong number of fields.
    ///
    /// I/O errors encountered after the header has been read are also reported here.
    Format(csv::Error),
    /// A required column is missing from the header.
    MissingColumn {
        /// The name of the missing column.
        column: &'static str,
    },
    /// A π value is not a finite, non-negative number.
    InvalidPi {
        /// The line on which the value occurred, if known.
        line: Option<u64>,
        /// The raw value.
        value: String,
    },
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for ReadError {
    fn from(e: csv::Error) -> Self {
        Self::Format(e)
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "{e}"),
            ReadError::Format(e) => write!(f, "{e}"),
            ReadError::MissingColumn { column } => {
                write!(f, "missing required column '{column}' in header")
            }
            ReadError::InvalidPi { line, value } => {
                write!(f, "invalid π value '{value}'")?;

                if let Some(line) = line {
                    write!(f, " on line {line}")?;
                }

                if value.to_ascii_lowercase().contains("nan") {
                    write!(f, " {NAN_HINT}")?;
                }

                Ok(())
            }
        }
    }
}

// vcftools writes NaN for sites where π is undefined
const NAN_HINT: &str = "(vcftools writes '-nan' for sites without enough called genotypes; \
    remove these sites before summarising)";

impl std::error::Error for ReadError {}
