//! File-backed [`GraphSource`] over edge lists.
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use linkpred_core::{GraphData, GraphSource};
use tracing::{info, instrument};

use crate::{
    errors::EdgeListError,
    parse::{DEFAULT_MAX_NODES, NodeIds, parse_edge_list_capped},
};

/// Graph source reading an edge-list file on every load.
///
/// # Examples
/// ```no_run
/// use linkpred_core::GraphSource;
/// use linkpred_providers_edgelist::EdgeListProvider;
///
/// let source = EdgeListProvider::new("data/hep-th.txt").with_num_nodes(27_770);
/// assert_eq!(source.name(), "hep-th");
/// let data = source.load()?;
/// assert_eq!(data.num_nodes, 27_770);
/// # Ok::<(), linkpred_providers_edgelist::EdgeListError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EdgeListProvider {
    name: String,
    path: PathBuf,
    num_nodes: Option<usize>,
    node_ids: NodeIds,
    max_nodes: usize,
}

impl EdgeListProvider {
    /// Reads `path`, naming the source after the file stem.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map_or_else(|| "edge-list".to_owned(), |stem| stem.to_string_lossy().into_owned());
        Self {
            name,
            path,
            num_nodes: None,
            node_ids: NodeIds::Index,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }

    /// Overrides the source name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declares the node count so trailing isolated nodes are kept.
    #[must_use]
    pub const fn with_num_nodes(mut self, num_nodes: usize) -> Self {
        self.num_nodes = Some(num_nodes);
        self
    }

    /// Selects how node fields are interpreted.
    #[must_use]
    pub const fn with_node_ids(mut self, node_ids: NodeIds) -> Self {
        self.node_ids = node_ids;
        self
    }

    /// Caps node indices read in [`NodeIds::Index`] mode.
    #[must_use]
    pub const fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// File read by [`GraphSource::load`].
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphSource for EdgeListProvider {
    type Error = EdgeListError;

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "edgelist.load",
        err,
        skip(self),
        fields(path = %self.path.display(), node_ids = ?self.node_ids),
    )]
    fn load(&self) -> Result<GraphData, EdgeListError> {
        let file = File::open(&self.path).map_err(|source| EdgeListError::Open {
            path: self.path.clone(),
            source,
        })?;
        let parsed =
            parse_edge_list_capped(BufReader::new(file), self.node_ids, self.max_nodes)?;
        let skipped = parsed.skipped_self_loops();
        let data = parsed.into_graph_data(self.num_nodes)?;
        info!(
            nodes = data.num_nodes,
            edges = data.edges.len(),
            skipped_self_loops = skipped,
            "edge list parsed"
        );
        Ok(data)
    }
}
