//! Batch scoring over candidate lists.
//!
//! Each pair is scored independently against the read-only graph and written
//! to the slot matching its index, so the sequential and parallel paths
//! produce identical vectors.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{candidates::CandidatePair, error::MetricError};

use super::LinkMetric;

/// Temporal cutoffs applied during a batch.
///
/// # Examples
/// ```
/// use linkpred_core::Cutoffs;
///
/// assert_eq!(Cutoffs::per_pair(None), Cutoffs::Unbounded);
/// assert_eq!(Cutoffs::Uniform(3.0).at(10), Some(3.0));
/// assert_eq!(Cutoffs::PerPair(&[1.0, 2.0]).at(1), Some(2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoffs<'a> {
    /// No cutoff; neighbourhoods are unrestricted.
    Unbounded,
    /// The same cutoff for every pair.
    Uniform(f64),
    /// One cutoff per pair, matched by index.
    PerPair(&'a [f64]),
}

impl<'a> Cutoffs<'a> {
    /// Builds per-pair cutoffs from optional caller-supplied timestamps.
    #[must_use]
    pub const fn per_pair(timestamps: Option<&'a [f64]>) -> Self {
        match timestamps {
            Some(values) => Self::PerPair(values),
            None => Self::Unbounded,
        }
    }

    /// Builds cutoffs from an optional single cutoff.
    #[must_use]
    pub const fn uniform(cutoff: Option<f64>) -> Self {
        match cutoff {
            Some(value) => Self::Uniform(value),
            None => Self::Unbounded,
        }
    }

    /// Returns the cutoff for the pair at `index`.
    #[must_use]
    pub fn at(self, index: usize) -> Option<f64> {
        match self {
            Self::Unbounded => None,
            Self::Uniform(value) => Some(value),
            Self::PerPair(values) => values.get(index).copied(),
        }
    }

    fn validate(self, pairs: usize) -> Result<(), MetricError> {
        match self {
            Self::PerPair(values) if values.len() != pairs => Err(MetricError::MismatchedLength {
                pairs,
                timestamps: values.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Scores `pairs` on the calling thread.
///
/// # Errors
/// Returns [`MetricError::MismatchedLength`] when per-pair cutoffs do not
/// match `pairs`, and the first scoring failure otherwise.
pub fn score_pairs<M: LinkMetric + ?Sized>(
    metric: &M,
    pairs: &[CandidatePair],
    cutoffs: Cutoffs<'_>,
) -> Result<Vec<f64>, MetricError> {
    cutoffs.validate(pairs.len())?;
    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| metric.score(pair.left, pair.right, cutoffs.at(index)))
        .collect()
}

/// Scores `pairs` on the rayon pool, keeping input order.
///
/// # Errors
/// Same as [`score_pairs`]; when several pairs fail, any one of their errors
/// may be reported.
#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub fn score_pairs_parallel<M: LinkMetric + Sync + ?Sized>(
    metric: &M,
    pairs: &[CandidatePair],
    cutoffs: Cutoffs<'_>,
) -> Result<Vec<f64>, MetricError> {
    cutoffs.validate(pairs.len())?;
    pairs
        .par_iter()
        .enumerate()
        .map(|(index, pair)| metric.score(pair.left, pair.right, cutoffs.at(index)))
        .collect()
}
