//! Genome-wide π summaries for a single population.

use std::{fmt, num::NonZeroU64};

use crate::Site;

/// The genome size used by default, in base pairs.
///
/// This is the total assembled length of the *Cryphonectria parasitica* v2 reference.
pub const DEFAULT_GENOME_SIZE: NonZeroU64 = match NonZeroU64::new(44_029_313) {
    Some(size) => size,
    None => panic!("genome size must be non-zero"),
};

/// A genome-wide π summary for a single population.
///
/// Invariant sites (those with π = 0) are excluded; the mean π over the remaining, segregating
/// sites is then scaled by the fraction of the genome that is segregating. Writing `S` for the
/// number of segregating sites and `L` for the genome size:
///
/// ```text
/// factor = L / S
/// genomewide_pi = mean_pi / factor = mean_pi * S / L
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PopulationSummary {
    /// Population identifier.
    pub population: String,
    /// Genome size used for normalisation, in base pairs.
    pub genome_size: u64,
    /// Number of segregating sites, i.e. sites with non-zero π.
    pub snps: u64,
    /// Mean π over segregating sites.
    pub mean_pi: f64,
    /// Normalisation factor, genome size divided by number of segregating sites.
    pub factor: f64,
    /// Genome-wide π.
    pub genomewide_pi: f64,
}

impl PopulationSummary {
    /// Summarises the sites of a population.
    ///
    /// # Errors
    ///
    /// If there are no sites with non-zero π, in which case the normalisation factor is undefined.
    pub fn from_sites<'a, S, I>(
        population: S,
        sites: I,
        genome_size: NonZeroU64,
    ) -> Result<Self, ZeroSnpsError>
    where
        S: Into<String>,
        I: IntoIterator<Item = &'a Site>,
    {
        let population = population.into();

        let (total, snps, sum) = sites
            .into_iter()
            .fold((0u64, 0u64, 0.0), |(total, snps, sum), site| {
                if site.is_invariant() {
                    (total + 1, snps, sum)
                } else {
                    (total + 1, snps + 1, sum + site.pi)
                }
            });

        log::debug!(
            "Excluded {invariant} invariant sites out of {total} for population '{population}'",
            invariant = total - snps,
        );

        if snps == 0 {
            return Err(ZeroSnpsError { population, total });
        }

        let genome_size = genome_size.get();
        let mean_pi = sum / snps as f64;
        let factor = genome_size as f64 / snps as f64;

        Ok(Self {
            population,
            genome_size,
            snps,
            mean_pi,
            factor,
            genomewide_pi: mean_pi / factor,
        })
    }
}

/// An error associated with summarising a population without segregating sites.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ZeroSnpsError {
    population: String,
    total: u64,
}

impl ZeroSnpsError {
    /// Returns the population that has no segregating sites.
    pub fn population(&self) -> &str {
        &self.population
    }
}

impl fmt::Display for ZeroSnpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no sites with non-zero π for population '{}' ({} sites in total), \
            cannot normalise by genome size",
            self.population, self.total
        )
    }
}

impl std::error::Error for ZeroSnpsError {}
