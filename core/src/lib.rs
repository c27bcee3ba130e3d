#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Genome-wide nucleotide diversity summaries from per-site π.
//!
//! This serves as the core library implementation for the `nucdiv` CLI, but can also be used as a
//! free-standing library.
//!
//! # Overview
//!
//! Per-site diversity files (as written by `vcftools --site-pi`, named `*.sites.pi`) are found
//! in a directory, and each is reduced to a single [`PopulationSummary`]: invariant sites are
//! dropped, the remaining π values are averaged, and the average is scaled by the fraction of the
//! genome that is segregating. The summaries are collected in a [`SummaryTable`], which is written
//! as a tab-separated file.
//!
//! The [`Aggregator`] ties this together; the individual steps are exposed in [`input`],
//! [`site`], [`label`], [`summary`], and [`table`].
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroU64;
//!
//! use nucdiv_core::{PopulationSummary, Site};
//!
//! let sites = [0.0, 0.25, 0.5, 0.75].map(Site::from_pi);
//! let genome_size = NonZeroU64::new(12).unwrap();
//!
//! let summary = PopulationSummary::from_sites("popA", &sites, genome_size).unwrap();
//!
//! assert_eq!(summary.snps, 3);
//! assert_eq!(summary.mean_pi, 0.5);
//! assert_eq!(summary.factor, 4.0);
//! assert_eq!(summary.genomewide_pi, 0.125);
//! ```

#[cfg(test)]
#[macro_use]
pub(crate) mod approx;

pub mod aggregator;
pub use aggregator::Aggregator;

pub mod input;

pub mod label;
pub use label::Label;

pub mod site;
pub use site::Site;

pub mod summary;
pub use summary::PopulationSummary;

pub mod table;
pub use table::SummaryTable;
