//! Per-site diversity records.

use std::path::Path;

pub mod reader;
pub use reader::{ReadError, Reader};

/// A single site from a per-site diversity file.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    /// Contig name, if the input has a `CHROM` column.
    pub contig: Option<String>,
    /// One-based position, if the input has a parseable `POS` column.
    pub position: Option<u64>,
    /// Nucleotide diversity at the site.
    pub pi: f64,
}

impl Site {
    /// Creates a new site with no positional information.
    pub fn from_pi(pi: f64) -> Self {
        Self {
            contig: None,
            position: None,
            pi,
        }
    }

    /// Returns `true` if the site is invariant, i.e. has zero diversity.
    pub fn is_invariant(&self) -> bool {
        self.pi == 0.0
    }
}

/// Reads all sites from a per-site diversity file.
///
/// The file must be tab-separated with a header containing a `PI` column, and may be
/// gzip compressed.
///
/// # Errors
///
/// If the file cannot be opened, or if the contents are malformed. See [`ReadError`] for details.
pub fn read_sites<P>(path: P) -> Result<Vec<Site>, ReadError>
where
    P: AsRef<Path>,
{
    Reader::from_path(path)?.collect()
}
