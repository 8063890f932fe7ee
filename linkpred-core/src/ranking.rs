//! Ranked output of a link-prediction run.
//!
//! Scores are sorted descending with a stable sort, so candidates with equal
//! scores keep the lexicographic order in which they were enumerated.

use crate::candidates::CandidatePair;

/// One scored candidate.
///
/// # Examples
/// ```
/// use linkpred_core::ScoreRecord;
///
/// let record = ScoreRecord::new(0, 3, 1.0);
/// assert_eq!(record.as_tuple(), (0, 3, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRecord {
    /// Smaller endpoint.
    pub left: usize,
    /// Larger endpoint.
    pub right: usize,
    /// Metric score.
    pub score: f64,
}

impl ScoreRecord {
    /// Creates a record.
    #[must_use]
    pub const fn new(left: usize, right: usize, score: f64) -> Self {
        Self { left, right, score }
    }

    /// Returns `(left, right, score)`.
    #[must_use]
    pub const fn as_tuple(&self) -> (usize, usize, f64) {
        (self.left, self.right, self.score)
    }

    /// Returns the endpoints as a [`CandidatePair`].
    #[must_use]
    pub const fn pair(&self) -> CandidatePair {
        CandidatePair::new(self.left, self.right)
    }
}

/// Zips `pairs` with `scores` and sorts the records by descending score.
///
/// Equal scores keep their input order. Callers pass `scores` produced from
/// `pairs`, so both have the same length; extra entries on either side are
/// ignored.
///
/// # Examples
/// ```
/// use linkpred_core::{CandidatePair, rank_records};
///
/// let pairs = [CandidatePair::new(0, 3), CandidatePair::new(1, 3), CandidatePair::new(2, 3)];
/// let ranked = rank_records(&pairs, &[1.0, 2.0, 1.0]);
/// let order: Vec<_> = ranked.iter().map(|r| (r.left, r.right)).collect();
/// assert_eq!(order, [(1, 3), (0, 3), (2, 3)]);
/// ```
#[must_use]
pub fn rank_records(pairs: &[CandidatePair], scores: &[f64]) -> Vec<ScoreRecord> {
    let mut records: Vec<ScoreRecord> = pairs
        .iter()
        .zip(scores)
        .map(|(pair, &score)| ScoreRecord::new(pair.left, pair.right, score))
        .collect();
    records.sort_by(|a, b| b.score.total_cmp(&a.score));
    records
}

/// Represents the output of a [`crate::LinkPredictor::run`] invocation.
///
/// # Examples
/// ```
/// use linkpred_core::{Prediction, ScoreRecord};
///
/// let prediction = Prediction::new(vec![ScoreRecord::new(0, 3, 1.0)], 2, 4, 4);
/// assert_eq!(prediction.records().len(), 1);
/// assert_eq!(prediction.candidate_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    records: Vec<ScoreRecord>,
    candidate_count: usize,
    num_nodes: usize,
    num_edges: usize,
}

impl Prediction {
    /// Builds a prediction from ranked records and graph statistics.
    #[must_use]
    pub const fn new(
        records: Vec<ScoreRecord>,
        candidate_count: usize,
        num_nodes: usize,
        num_edges: usize,
    ) -> Self {
        Self {
            records,
            candidate_count,
            num_nodes,
            num_edges,
        }
    }

    /// Returns the top-K records, best first.
    #[must_use]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// Consumes the prediction, returning the records.
    #[must_use]
    pub fn into_records(self) -> Vec<ScoreRecord> {
        self.records
    }

    /// Number of candidates scored before truncation.
    #[must_use]
    pub const fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Node count of the ranked graph.
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Edge count of the ranked graph.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }
}
