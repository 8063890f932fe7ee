//! Ranking quality measures for labelled candidate scores.
//!
//! Labels are `true` for candidates that turned out to be real links. The
//! measures follow the usual conventions: ROC-AUC counts tied scores as one
//! half, and the precision-recall curve places a threshold at every distinct
//! score.

mod holdout;

use std::cmp::Ordering;

use crate::error::EvaluationError;

pub use holdout::{EvaluationReport, Holdout, HoldoutSplit};

type EvalResult<T> = core::result::Result<T, EvaluationError>;

fn check_lengths(labels: &[bool], scores: &[f64]) -> EvalResult<()> {
    if labels.len() != scores.len() {
        return Err(EvaluationError::LengthMismatch {
            labels: labels.len(),
            scores: scores.len(),
        });
    }
    if labels.is_empty() {
        return Err(EvaluationError::Empty);
    }
    Ok(())
}

/// Area under the ROC curve.
///
/// Computed from the Mann–Whitney rank-sum statistic with tied scores given
/// their average rank, so a positive tied with a negative counts one half.
///
/// # Errors
/// Returns [`EvaluationError::LengthMismatch`] when the inputs differ in
/// length, [`EvaluationError::Empty`] for empty inputs, and
/// [`EvaluationError::SingleClass`] when only one label value is present.
///
/// # Examples
/// ```
/// use linkpred_core::roc_auc;
///
/// let auc = roc_auc(&[false, false, true, true], &[0.1, 0.4, 0.35, 0.8])?;
/// assert!((auc - 0.75).abs() < 1e-12);
/// # Ok::<(), linkpred_core::EvaluationError>(())
/// ```
#[expect(clippy::float_arithmetic, reason = "rank statistics")]
pub fn roc_auc(labels: &[bool], scores: &[f64]) -> EvalResult<f64> {
    check_lengths(labels, scores)?;
    let positives = labels.iter().filter(|&&label| label).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(EvaluationError::SingleClass);
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut positive_rank_sum = 0.0_f64;
    let mut start = 0;
    while start < order.len() {
        let score = scores[order[start]];
        let mut end = start + 1;
        while end < order.len() && scores[order[end]].total_cmp(&score) == Ordering::Equal {
            end += 1;
        }
        // Ranks are 1-based; the tie group covers ranks start+1 ..= end.
        let average_rank = (start + 1 + end) as f64 / 2.0;
        let tied_positives = order[start..end]
            .iter()
            .filter(|&&index| labels[index])
            .count();
        positive_rank_sum += average_rank * tied_positives as f64;
        start = end;
    }

    let positives = positives as f64;
    let negatives = negatives as f64;
    Ok((positive_rank_sum - positives * (positives + 1.0) / 2.0) / (positives * negatives))
}

/// Precision and recall at each distinct score threshold.
///
/// `precision` and `recall` hold one more entry than `thresholds`; the last
/// point is always precision `1`, recall `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionRecallCurve {
    /// Precision per threshold, then `1.0`.
    pub precision: Vec<f64>,
    /// Recall per threshold, then `0.0`. Non-increasing.
    pub recall: Vec<f64>,
    /// Distinct scores in ascending order.
    pub thresholds: Vec<f64>,
}

impl PrecisionRecallCurve {
    /// Step-wise area under the curve, `Σ (R_n - R_{n+1}) · P_n`.
    ///
    /// # Examples
    /// ```
    /// use linkpred_core::precision_recall_curve;
    ///
    /// let curve = precision_recall_curve(&[true, false, true], &[0.9, 0.5, 0.1])?;
    /// assert!((curve.average_precision() - (0.5 + 0.5 * 2.0 / 3.0)).abs() < 1e-12);
    /// # Ok::<(), linkpred_core::EvaluationError>(())
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "step-wise integration")]
    pub fn average_precision(&self) -> f64 {
        self.recall
            .windows(2)
            .zip(&self.precision)
            .map(|(step, precision)| (step[0] - step[1]) * precision)
            .sum()
    }
}

/// Computes the precision-recall curve.
///
/// Points past the first threshold that already reaches full recall are
/// dropped.
///
/// # Errors
/// Returns [`EvaluationError::LengthMismatch`] and
/// [`EvaluationError::Empty`] as [`roc_auc`] does, and
/// [`EvaluationError::NoPositives`] when no label is `true`.
///
/// # Examples
/// ```
/// use linkpred_core::precision_recall_curve;
///
/// let curve = precision_recall_curve(&[false, false, true, true], &[0.1, 0.4, 0.35, 0.8])?;
/// assert_eq!(curve.thresholds, [0.35, 0.4, 0.8]);
/// assert_eq!(curve.recall, [1.0, 0.5, 0.5, 0.0]);
/// # Ok::<(), linkpred_core::EvaluationError>(())
/// ```
#[expect(clippy::float_arithmetic, reason = "precision and recall ratios")]
pub fn precision_recall_curve(labels: &[bool], scores: &[f64]) -> EvalResult<PrecisionRecallCurve> {
    check_lengths(labels, scores)?;
    let total_positives = labels.iter().filter(|&&label| label).count();
    if total_positives == 0 {
        return Err(EvaluationError::NoPositives);
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    // Walk from the highest score down, emitting one point per distinct score.
    let mut precision = Vec::new();
    let mut recall = Vec::new();
    let mut thresholds = Vec::new();
    let (mut true_positives, mut false_positives) = (0_usize, 0_usize);
    let mut position = 0;
    while position < order.len() {
        let score = scores[order[position]];
        while position < order.len()
            && scores[order[position]].total_cmp(&score) == Ordering::Equal
        {
            if labels[order[position]] {
                true_positives += 1;
            } else {
                false_positives += 1;
            }
            position += 1;
        }
        precision.push(true_positives as f64 / (true_positives + false_positives) as f64);
        recall.push(true_positives as f64 / total_positives as f64);
        thresholds.push(score);
        if true_positives == total_positives {
            break;
        }
    }

    precision.reverse();
    recall.reverse();
    thresholds.reverse();
    precision.push(1.0);
    recall.push(0.0);
    Ok(PrecisionRecallCurve {
        precision,
        recall,
        thresholds,
    })
}

/// Fraction of true links among the first `k` ranked labels.
///
/// When fewer than `k` labels exist the fraction is taken over those
/// available. Returns `0` when `k` is zero or there are no labels.
///
/// # Examples
/// ```
/// use linkpred_core::precision_at_k;
///
/// assert_eq!(precision_at_k(&[true, false, true, false], 2), 0.5);
/// assert_eq!(precision_at_k(&[true], 10), 1.0);
/// assert_eq!(precision_at_k(&[], 3), 0.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "hit ratio")]
pub fn precision_at_k(ranked_labels: &[bool], k: usize) -> f64 {
    let window = &ranked_labels[..k.min(ranked_labels.len())];
    if window.is_empty() {
        return 0.0;
    }
    let hits = window.iter().filter(|&&label| label).count();
    hits as f64 / window.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseResult;
    use rstest::rstest;

    use crate::test_utils::suite_proptest_config;

    #[rstest]
    #[case::perfect(&[false, true], &[0.1, 0.9], 1.0)]
    #[case::inverted(&[true, false], &[0.1, 0.9], 0.0)]
    #[case::all_tied(&[true, false, true, false], &[0.5, 0.5, 0.5, 0.5], 0.5)]
    #[case::partial_tie(&[true, false, false], &[0.7, 0.7, 0.1], 0.75)]
    fn auc_matches_hand_computation(
        #[case] labels: &[bool],
        #[case] scores: &[f64],
        #[case] expected: f64,
    ) {
        let auc = roc_auc(labels, scores).expect("both classes present");
        assert!((auc - expected).abs() < 1e-12, "{auc} != {expected}");
    }

    #[rstest]
    #[case::mismatch(&[true], &[0.1, 0.2], EvaluationError::LengthMismatch { labels: 1, scores: 2 })]
    #[case::empty(&[], &[], EvaluationError::Empty)]
    #[case::only_positive(&[true, true], &[0.1, 0.2], EvaluationError::SingleClass)]
    #[case::only_negative(&[false], &[0.1], EvaluationError::SingleClass)]
    fn auc_rejects_degenerate_input(
        #[case] labels: &[bool],
        #[case] scores: &[f64],
        #[case] expected: EvaluationError,
    ) {
        assert_eq!(roc_auc(labels, scores), Err(expected));
    }

    #[test]
    fn curve_requires_positives() {
        assert_eq!(
            precision_recall_curve(&[false, false], &[0.3, 0.1]),
            Err(EvaluationError::NoPositives)
        );
    }

    #[test]
    fn curve_groups_tied_scores() {
        let curve = precision_recall_curve(&[true, false, true, false], &[0.5, 0.5, 0.2, 0.2])
            .expect("positives present");
        assert_eq!(curve.thresholds, [0.2, 0.5]);
        assert_eq!(curve.precision, [0.5, 0.5, 1.0]);
        assert_eq!(curve.recall, [1.0, 0.5, 0.0]);
    }

    #[test]
    fn curve_matches_reference_example() {
        let curve = precision_recall_curve(&[false, false, true, true], &[0.1, 0.4, 0.35, 0.8])
            .expect("positives present");
        let expected_precision = [2.0 / 3.0, 0.5, 1.0, 1.0];
        for (got, want) in curve.precision.iter().zip(expected_precision) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[rstest]
    #[case::zero_k(&[true, true], 0, 0.0)]
    #[case::half(&[true, false, true, true], 2, 0.5)]
    #[case::short_list(&[false, true], 5, 0.5)]
    fn precision_at_k_cases(#[case] labels: &[bool], #[case] k: usize, #[case] expected: f64) {
        assert_eq!(precision_at_k(labels, k), expected);
    }

    fn check_auc_bounds(labels: &[bool], scores: &[f64]) -> TestCaseResult {
        let has_both = labels.contains(&true) && labels.contains(&false);
        prop_assume!(has_both);
        let auc = roc_auc(labels, scores)?;
        prop_assert!((0.0..=1.0).contains(&auc));
        let flipped: Vec<f64> = scores.iter().map(|score| -score).collect();
        let mirrored = roc_auc(labels, &flipped)?;
        prop_assert!((auc + mirrored - 1.0).abs() < 1e-9);
        Ok(())
    }

    fn check_curve_shape(labels: &[bool], scores: &[f64]) -> TestCaseResult {
        prop_assume!(labels.contains(&true));
        let curve = precision_recall_curve(labels, scores)?;
        prop_assert_eq!(curve.precision.len(), curve.thresholds.len() + 1);
        prop_assert_eq!(curve.recall.len(), curve.thresholds.len() + 1);
        prop_assert_eq!(curve.recall.first().copied(), Some(1.0));
        prop_assert_eq!(curve.recall.last().copied(), Some(0.0));
        for window in curve.recall.windows(2) {
            prop_assert!(window[0] >= window[1]);
        }
        for window in curve.thresholds.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
        Ok(())
    }

    fn labelled_scores() -> impl Strategy<Value = (Vec<bool>, Vec<f64>)> {
        prop::collection::vec((any::<bool>(), 0_u8..8), 1..40).prop_map(|rows| {
            rows.into_iter()
                .map(|(label, score)| (label, f64::from(score)))
                .unzip()
        })
    }

    proptest! {
        #![proptest_config(suite_proptest_config(256))]

        #[test]
        fn auc_is_bounded_and_mirrors((labels, scores) in labelled_scores()) {
            check_auc_bounds(&labels, &scores)?;
        }

        #[test]
        fn curve_is_well_formed((labels, scores) in labelled_scores()) {
            check_curve_shape(&labels, &scores)?;
        }
    }
}
