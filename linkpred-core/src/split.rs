//! Random train/validation/test partitions over node indices.

use rand::{Rng, seq::SliceRandom};

use crate::{Result, error::LinkPredError};

/// Three disjoint boolean masks covering every node.
///
/// # Examples
/// ```
/// use linkpred_core::NodeSplit;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let split = NodeSplit::random(10, 0.2, 0.3, &mut rng)?;
/// assert_eq!(split.counts(), (5, 2, 3));
/// # Ok::<(), linkpred_core::LinkPredError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSplit {
    train: Vec<bool>,
    val: Vec<bool>,
    test: Vec<bool>,
}

impl NodeSplit {
    /// Permutes `0..num_nodes` and assigns the first `n - val - test` indices
    /// to training, the next `floor(n·val_ratio)` to validation and the
    /// remaining `floor(n·test_ratio)` to test.
    ///
    /// # Errors
    /// Returns [`LinkPredError::InvalidSplitRatio`] when a ratio is not
    /// finite, lies outside `[0, 1]`, or the two ratios sum past `1`.
    pub fn random<R: Rng + ?Sized>(
        num_nodes: usize,
        val_ratio: f64,
        test_ratio: f64,
        rng: &mut R,
    ) -> Result<Self> {
        check_ratio("val_ratio", val_ratio)?;
        check_ratio("test_ratio", test_ratio)?;
        let combined = val_ratio + test_ratio;
        if combined > 1.0 {
            return Err(LinkPredError::InvalidSplitRatio {
                parameter: "val_ratio + test_ratio",
                value: combined,
            });
        }

        let test_count = floor_share(num_nodes, test_ratio);
        let val_count = floor_share(num_nodes, val_ratio);
        let train_count = num_nodes.saturating_sub(test_count + val_count);

        let mut order: Vec<usize> = (0..num_nodes).collect();
        order.shuffle(rng);

        let mut split = Self {
            train: vec![false; num_nodes],
            val: vec![false; num_nodes],
            test: vec![false; num_nodes],
        };
        for (position, node) in order.into_iter().enumerate() {
            let mask = if position < train_count {
                &mut split.train
            } else if position < train_count + val_count {
                &mut split.val
            } else {
                &mut split.test
            };
            mask[node] = true;
        }
        Ok(split)
    }

    /// Training membership, indexed by node.
    #[must_use]
    pub fn train_mask(&self) -> &[bool] {
        &self.train
    }

    /// Validation membership, indexed by node.
    #[must_use]
    pub fn val_mask(&self) -> &[bool] {
        &self.val
    }

    /// Test membership, indexed by node.
    #[must_use]
    pub fn test_mask(&self) -> &[bool] {
        &self.test
    }

    /// Returns `(train, val, test)` member counts.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        let count = |mask: &[bool]| mask.iter().filter(|&&member| member).count();
        (count(&self.train), count(&self.val), count(&self.test))
    }
}

pub(crate) fn check_ratio(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LinkPredError::InvalidSplitRatio { parameter, value })
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "ratio is validated to lie in [0, 1], so the product fits in usize"
)]
pub(crate) fn floor_share(total: usize, ratio: f64) -> usize {
    ((total as f64) * ratio).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseResult;
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::test_utils::suite_proptest_config;

    #[rstest]
    #[case::negative("val_ratio", -0.1, 0.1)]
    #[case::above_one("test_ratio", 0.0, 1.5)]
    #[case::nan("val_ratio", f64::NAN, 0.1)]
    #[case::sum_past_one("val_ratio + test_ratio", 0.6, 0.6)]
    fn rejects_invalid_ratios(#[case] parameter: &str, #[case] val: f64, #[case] test: f64) {
        let mut rng = SmallRng::seed_from_u64(1);
        let err = NodeSplit::random(10, val, test, &mut rng).expect_err("ratio must be rejected");
        match err {
            LinkPredError::InvalidSplitRatio { parameter: got, .. } => assert_eq!(got, parameter),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn same_seed_gives_same_split() {
        let first = NodeSplit::random(50, 0.1, 0.1, &mut SmallRng::seed_from_u64(42))
            .expect("ratios are valid");
        let second = NodeSplit::random(50, 0.1, 0.1, &mut SmallRng::seed_from_u64(42))
            .expect("ratios are valid");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_graph_yields_empty_masks() {
        let split = NodeSplit::random(0, 0.5, 0.5, &mut SmallRng::seed_from_u64(3))
            .expect("ratios are valid");
        assert_eq!(split.counts(), (0, 0, 0));
    }

    fn check_partition(nodes: usize, val: f64, test: f64, seed: u64) -> TestCaseResult {
        let split = NodeSplit::random(nodes, val, test, &mut SmallRng::seed_from_u64(seed))?;
        for node in 0..nodes {
            let memberships = [split.train_mask(), split.val_mask(), split.test_mask()]
                .iter()
                .filter(|mask| mask[node])
                .count();
            prop_assert_eq!(memberships, 1, "node {} must be in exactly one mask", node);
        }
        let (_, val_count, test_count) = split.counts();
        prop_assert_eq!(val_count, floor_share(nodes, val));
        prop_assert_eq!(test_count, floor_share(nodes, test));
        Ok(())
    }

    proptest! {
        #![proptest_config(suite_proptest_config(256))]

        #[test]
        fn masks_are_disjoint_and_covering(
            nodes in 0_usize..200,
            val in 0_u8..=50,
            test in 0_u8..=50,
            seed in any::<u64>(),
        ) {
            check_partition(nodes, f64::from(val) / 100.0, f64::from(test) / 100.0, seed)?;
        }
    }
}
