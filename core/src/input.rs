//! Discovering and opening per-site diversity inputs.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead},
    path::{Path, PathBuf},
};

use flate2::bufread::MultiGzDecoder;
use walkdir::WalkDir;

/// The file name suffix of per-site diversity files.
pub const SUFFIX: &str = ".sites.pi";

/// Returns the per-site diversity files in a directory.
///
/// Only regular, non-hidden files directly within `dir` whose name ends in [`SUFFIX`] are
/// returned; the search is not recursive. Paths are returned as `dir` joined with the file name,
/// and are sorted by file name. If no files match, an empty list is returned. Entries that cannot
/// be inspected, such as dangling symlinks, are skipped.
pub fn discover<P>(dir: P) -> Result<Vec<PathBuf>, DiscoveryError>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() && is_input_name(entry.file_name()) => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            // Only a failure to read `dir` itself is fatal; e.g. dangling symlinks are skipped
            Err(e) if e.depth() > 0 => {
                log::debug!("Skipping unreadable directory entry: {e}");
                None
            }
            Err(e) => Some(Err(DiscoveryError {
                dir: dir.to_path_buf(),
                source: e.into(),
            })),
        })
        .collect()
}

// Hidden files are skipped, matching a shell glob of `*.sites.pi`
fn is_input_name(name: &std::ffi::OsStr) -> bool {
    name.to_str()
        .map_or(false, |name| !name.starts_with('.') && name.ends_with(SUFFIX))
}

/// An error associated with listing the input directory.
#[derive(Debug)]
pub struct DiscoveryError {
    dir: PathBuf,
    source: io::Error,
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to list input directory '{}': {}",
            self.dir.display(),
            self.source
        )
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// The compression format of an input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    /// Uncompressed text.
    Plain,
    /// Gzip or BGZF compressed text.
    Gzip,
}

impl Format {
    const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

    /// Detects the format from the leading bytes of an input.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&Self::GZIP_MAGIC) {
            Self::Gzip
        } else {
            Self::Plain
        }
    }
}

/// Opens a path for reading, decompressing it if required.
pub fn open<P>(path: P) -> io::Result<Box<dyn io::Read>>
where
    P: AsRef<Path>,
{
    let reader = io::BufReader::new(File::open(path)?);

    from_reader(reader)
}

/// Wraps a buffered reader, decompressing it if required.
pub fn from_reader<R>(mut reader: R) -> io::Result<Box<dyn io::Read>>
where
    R: BufRead + 'static,
{
    match Format::detect(reader.fill_buf()?) {
        Format::Plain => Ok(Box::new(reader)),
        Format::Gzip => {
            log::debug!("Detected gzip compressed input");
            Ok(Box::new(MultiGzDecoder::new(reader)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{fs, io::Read as _, io::Write as _};

    use flate2::{write::GzEncoder, Compression};

    #[test]
    fn test_detect_gzip() {
        assert_eq!(Format::detect(&[0x1f, 0x8b, 0x08]), Format::Gzip);
        assert_eq!(Format::detect(b"CHROM\tPOS\tPI\n"), Format::Plain);
        assert_eq!(Format::detect(b""), Format::Plain);
    }

    #[test]
    fn test_discover_filters_and_sorts() -> io::Result<()> {
        let dir = tempfile::tempdir()?;

        for name in [
            "popB.sites.pi",
            "popA.sites.pi",
            "popC.sites.pi.log",
            "notes.txt",
            ".hidden.sites.pi",
        ] {
            fs::write(dir.path().join(name), "")?;
        }
        fs::create_dir(dir.path().join("nested.sites.pi"))?;
        fs::write(dir.path().join("nested.sites.pi").join("popD.sites.pi"), "")?;

        let found = discover(dir.path()).unwrap();

        assert_eq!(
            found,
            vec![
                dir.path().join("popA.sites.pi"),
                dir.path().join("popB.sites.pi"),
            ]
        );

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_dangling_symlinks() -> io::Result<()> {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("popA.sites.pi"), "")?;
        symlink(dir.path().join("gone"), dir.path().join("old_link"))?;
        symlink(dir.path().join("gone"), dir.path().join("popB.sites.pi"))?;

        assert_eq!(
            discover(dir.path()).unwrap(),
            vec![dir.path().join("popA.sites.pi")]
        );

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinked_inputs() -> io::Result<()> {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("popA.txt"), "")?;
        symlink(dir.path().join("popA.txt"), dir.path().join("popA.sites.pi"))?;

        assert_eq!(
            discover(dir.path()).unwrap(),
            vec![dir.path().join("popA.sites.pi")]
        );

        Ok(())
    }

    #[test]
    fn test_discover_empty() -> io::Result<()> {
        let dir = tempfile::tempdir()?;

        assert!(discover(dir.path()).unwrap().is_empty());

        Ok(())
    }

    #[test]
    fn test_discover_missing_dir() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("missing");

        let error = discover(&missing).unwrap_err();
        assert!(error.to_string().contains("failed to list input directory"));

        Ok(())
    }

    #[test]
    fn test_open_decompresses_gzip() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("popA.sites.pi");

        let mut encoder = GzEncoder::new(fs::File::create(&path)?, Compression::default());
        encoder.write_all(b"CHROM\tPOS\tPI\nchr1\t10\t0.5\n")?;
        encoder.finish()?;

        let mut text = String::new();
        open(&path)?.read_to_string(&mut text)?;

        assert_eq!(text, "CHROM\tPOS\tPI\nchr1\t10\t0.5\n");

        Ok(())
    }
}
