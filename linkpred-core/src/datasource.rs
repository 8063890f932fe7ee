//! Dataset provider abstraction for the linkpred pipeline.

use std::convert::Infallible;

use crate::graph::GraphData;

/// Supplies the raw graph a [`crate::LinkPredictor`] ranks.
///
/// Loading happens once per run and may be slow (disk or network). Any error
/// is fatal for the run; the pipeline reports it as
/// [`crate::LinkPredError::DatasetUnavailable`].
///
/// # Examples
/// ```
/// use linkpred_core::{GraphData, GraphSource};
///
/// struct Path3;
///
/// impl GraphSource for Path3 {
///     type Error = std::convert::Infallible;
///     fn name(&self) -> &str { "path3" }
///     fn load(&self) -> Result<GraphData, Self::Error> {
///         Ok(GraphData::from_pairs(3, &[(0, 1), (1, 2)]))
///     }
/// }
///
/// let data = Path3.load()?;
/// assert_eq!(data.num_nodes, 3);
/// assert_eq!(Path3.name(), "path3");
/// # Ok::<(), std::convert::Infallible>(())
/// ```
pub trait GraphSource {
    /// Error raised when the dataset cannot be produced.
    type Error: std::error::Error;

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Produces the node count, edge list, and optional labels.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when the dataset is unavailable or malformed.
    fn load(&self) -> Result<GraphData, Self::Error>;
}

/// [`GraphSource`] over data already held in memory.
///
/// # Examples
/// ```
/// use linkpred_core::{GraphData, GraphSource, InMemorySource};
///
/// let source = InMemorySource::new("demo", GraphData::from_pairs(2, &[(0, 1)]));
/// assert_eq!(source.name(), "demo");
/// assert_eq!(source.load()?.edges.len(), 1);
/// # Ok::<(), std::convert::Infallible>(())
/// ```
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    data: GraphData,
}

impl InMemorySource {
    /// Wraps `data` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, data: GraphData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Returns the wrapped data.
    #[must_use]
    pub const fn data(&self) -> &GraphData {
        &self.data
    }
}

impl GraphSource for InMemorySource {
    type Error = Infallible;

    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<GraphData, Self::Error> {
        Ok(self.data.clone())
    }
}
