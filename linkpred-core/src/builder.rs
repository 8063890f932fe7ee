//! Builder utilities for configuring the link-prediction pipeline.
//!
//! Exposes the execution strategy, temporal configuration, and the builder
//! validation that runs before a [`LinkPredictor`] is constructed.

use crate::{Result, error::LinkPredError, metric::MetricKind, predictor::LinkPredictor};

/// Indicates how [`LinkPredictor`] scores candidate batches.
///
/// `Auto` resolves deterministically: it maps to `Parallel` when the
/// `parallel` feature is compiled in and to `Sequential` otherwise.
///
/// # Examples
/// ```
/// use linkpred_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Allow the library to select the backend.
    #[default]
    Auto,
    /// Score on the calling thread.
    Sequential,
    /// Score on the rayon pool.
    Parallel,
}

impl ExecutionStrategy {
    /// Resolves `Auto` for the current build.
    ///
    /// # Errors
    /// Returns [`LinkPredError::BackendUnavailable`] when `Parallel` is
    /// requested without the `parallel` feature.
    ///
    /// # Examples
    /// ```
    /// use linkpred_core::ExecutionStrategy;
    ///
    /// let resolved = ExecutionStrategy::Sequential.resolve()?;
    /// assert_eq!(resolved, ExecutionStrategy::Sequential);
    /// assert_ne!(ExecutionStrategy::Auto.resolve()?, ExecutionStrategy::Auto);
    /// # Ok::<(), linkpred_core::LinkPredError>(())
    /// ```
    pub const fn resolve(self) -> Result<Self> {
        match self {
            #[cfg(feature = "parallel")]
            Self::Auto | Self::Parallel => Ok(Self::Parallel),
            #[cfg(not(feature = "parallel"))]
            Self::Auto => Ok(Self::Sequential),
            #[cfg(not(feature = "parallel"))]
            Self::Parallel => Err(LinkPredError::BackendUnavailable {
                requested: Self::Parallel,
            }),
            Self::Sequential => Ok(Self::Sequential),
        }
    }
}

/// What the pipeline does when temporal mode is on but no cutoff is set.
///
/// # Examples
/// ```
/// use linkpred_core::CutoffFallback;
///
/// assert_eq!(CutoffFallback::default(), CutoffFallback::AllNeighbours);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutoffFallback {
    /// Score with every neighbour, as if temporal mode were off.
    #[default]
    AllNeighbours,
    /// Refuse to build the pipeline.
    Reject,
}

/// Temporal filtering settings.
///
/// # Examples
/// ```
/// use linkpred_core::TemporalConfig;
///
/// let config = TemporalConfig::at(2004.0);
/// assert!(config.enabled);
/// assert_eq!(config.cutoff, Some(2004.0));
/// assert!(!TemporalConfig::default().enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemporalConfig {
    /// Restrict neighbourhoods to edges formed on or before `cutoff`.
    pub enabled: bool,
    /// Cutoff applied to every candidate.
    pub cutoff: Option<f64>,
    /// Policy when `enabled` is set without a `cutoff`.
    pub fallback: CutoffFallback,
}

impl TemporalConfig {
    /// Temporal mode at a fixed cutoff.
    #[must_use]
    pub const fn at(cutoff: f64) -> Self {
        Self {
            enabled: true,
            cutoff: Some(cutoff),
            fallback: CutoffFallback::AllNeighbours,
        }
    }

    /// Returns the cutoff the metric applies, if any.
    ///
    /// Disabled configurations never filter, whatever `cutoff` holds.
    #[must_use]
    pub const fn effective_cutoff(&self) -> Option<f64> {
        if self.enabled { self.cutoff } else { None }
    }

    fn validate(&self) -> Result<()> {
        if let Some(cutoff) = self.cutoff {
            if !cutoff.is_finite() {
                return Err(LinkPredError::InvalidCutoff { cutoff });
            }
        }
        if self.enabled && self.cutoff.is_none() && self.fallback == CutoffFallback::Reject {
            return Err(LinkPredError::MissingCutoff);
        }
        Ok(())
    }
}

/// Configures and constructs [`LinkPredictor`] instances.
///
/// # Examples
/// ```
/// use linkpred_core::{ExecutionStrategy, LinkPredictorBuilder, MetricKind};
///
/// let predictor = LinkPredictorBuilder::new()
///     .with_top_k(5)
///     .with_metric(MetricKind::Jaccard)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(predictor.top_k(), 5);
/// assert_eq!(predictor.metric(), MetricKind::Jaccard);
/// ```
#[derive(Debug, Clone)]
pub struct LinkPredictorBuilder {
    top_k: usize,
    metric: MetricKind,
    temporal: TemporalConfig,
    execution_strategy: ExecutionStrategy,
}

impl Default for LinkPredictorBuilder {
    fn default() -> Self {
        Self {
            top_k: 10,
            metric: MetricKind::default(),
            temporal: TemporalConfig::default(),
            execution_strategy: ExecutionStrategy::Auto,
        }
    }
}

impl LinkPredictorBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use linkpred_core::{ExecutionStrategy, LinkPredictorBuilder, MetricKind};
    ///
    /// let builder = LinkPredictorBuilder::new();
    /// assert_eq!(builder.top_k(), 10);
    /// assert_eq!(builder.metric(), MetricKind::CommonNeighbours);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of ranked candidates returned. Zero is allowed
    /// and yields an empty ranking.
    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Returns the configured `top_k`.
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Selects the scoring metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    /// Returns the configured metric.
    #[must_use]
    pub const fn metric(&self) -> MetricKind {
        self.metric
    }

    /// Replaces the temporal settings.
    ///
    /// # Examples
    /// ```
    /// use linkpred_core::{LinkPredictorBuilder, TemporalConfig};
    ///
    /// let builder = LinkPredictorBuilder::new().with_temporal(TemporalConfig::at(3.0));
    /// assert_eq!(builder.temporal().cutoff, Some(3.0));
    /// ```
    #[must_use]
    pub const fn with_temporal(mut self, temporal: TemporalConfig) -> Self {
        self.temporal = temporal;
        self
    }

    /// Returns the temporal settings.
    #[must_use]
    pub const fn temporal(&self) -> TemporalConfig {
        self.temporal
    }

    /// Sets the execution strategy used when scoring.
    #[must_use]
    pub const fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the configured execution strategy.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`LinkPredictor`].
    ///
    /// # Errors
    /// Returns [`LinkPredError::InvalidCutoff`] for a NaN or infinite cutoff
    /// and [`LinkPredError::MissingCutoff`] when temporal mode has no cutoff
    /// under [`CutoffFallback::Reject`].
    ///
    /// # Examples
    /// ```
    /// use linkpred_core::{
    ///     CutoffFallback, LinkPredError, LinkPredictorBuilder, TemporalConfig,
    /// };
    ///
    /// let strict = TemporalConfig {
    ///     enabled: true,
    ///     cutoff: None,
    ///     fallback: CutoffFallback::Reject,
    /// };
    /// let err = LinkPredictorBuilder::new().with_temporal(strict).build().unwrap_err();
    /// assert_eq!(err, LinkPredError::MissingCutoff);
    /// ```
    pub fn build(self) -> Result<LinkPredictor> {
        self.temporal.validate()?;
        Ok(LinkPredictor::new(
            self.top_k,
            self.metric,
            self.temporal,
            self.execution_strategy,
        ))
    }
}
