//! Population labels derived from input paths.

use std::{fmt, path::Path};

/// The directory prefix removed from input paths by default.
pub const DEFAULT_PREFIX: &str = "./vcftools_pi_haploid/";

/// A population label.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Label {
    name: String,
    prefix_found: bool,
}

impl Label {
    /// Derives a label from an input path by removing a directory prefix.
    ///
    /// Every occurrence of `prefix` in the path is removed. If `prefix` does not occur, the full
    /// path is used unchanged, and [`Label::prefix_found`] returns `false` so that callers can
    /// report it. The file name suffix is kept, so `./vcftools_pi_haploid/popA.sites.pi` becomes
    /// `popA.sites.pi`.
    pub fn derive<P>(path: P, prefix: &str) -> Self
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref().to_string_lossy();

        if !prefix.is_empty() && path.contains(prefix) {
            Self {
                name: path.replace(prefix, ""),
                prefix_found: true,
            }
        } else {
            Self {
                name: path.into_owned(),
                prefix_found: false,
            }
        }
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the prefix was found and removed when deriving the label.
    pub fn prefix_found(&self) -> bool {
        self.prefix_found
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.name
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_strips_prefix() {
        let label = Label::derive("./vcftools_pi_haploid/popA.sites.pi", DEFAULT_PREFIX);

        assert_eq!(label.as_str(), "popA.sites.pi");
        assert!(label.prefix_found());
    }

    #[test]
    fn test_derive_strips_prefix_within_path() {
        let label = Label::derive("../run1/./vcftools_pi_haploid/popA.sites.pi", DEFAULT_PREFIX);

        assert_eq!(label.as_str(), "../run1/popA.sites.pi");
        assert!(label.prefix_found());
    }

    #[test]
    fn test_derive_without_prefix_is_unchanged() {
        let label = Label::derive("./popA.sites.pi", DEFAULT_PREFIX);

        assert_eq!(label.as_str(), "./popA.sites.pi");
        assert!(!label.prefix_found());
    }

    #[test]
    fn test_derive_strips_every_occurrence() {
        let label = Label::derive(
            "./vcftools_pi_haploid/./vcftools_pi_haploid/p.sites.pi",
            DEFAULT_PREFIX,
        );

        assert_eq!(label.as_str(), "p.sites.pi");
        assert!(label.prefix_found());

        assert_eq!(
            Label::derive("a/b/a/b/pop.sites.pi", "a/b/").as_str(),
            "pop.sites.pi"
        );
    }

    #[test]
    fn test_derive_with_empty_prefix() {
        let label = Label::derive("./popA.sites.pi", "");

        assert_eq!(label.as_str(), "./popA.sites.pi");
        assert!(!label.prefix_found());
    }
}
