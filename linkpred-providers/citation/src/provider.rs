//! [`GraphSource`] implementation for citation datasets.
use std::{io::Cursor, path::Path};

use linkpred_core::{GraphData, GraphSource};
use tracing::{debug, info, instrument};

use crate::{
    archive::extract_members,
    dataset::CitationDataset,
    download::{
        CitationConfig, DownloadClient, Remote, UreqDownloadClient, ensure_cached, join_url,
        store,
    },
    errors::CitationError,
    parse::{CitationGraph, parse_dataset},
};

/// Citation dataset backed by a local cache.
///
/// Missing files are fetched according to [`CitationConfig::remote`]; by
/// default the LINQS tarball is downloaded once and unpacked into the cache.
///
/// # Examples
/// ```no_run
/// use linkpred_core::GraphSource;
/// use linkpred_providers_citation::{CitationConfig, CitationDataset, CitationProvider};
///
/// let config = CitationConfig::new("/var/cache/linkpred");
/// let source = CitationProvider::new(CitationDataset::Cora, config);
/// let data = source.load()?;
/// assert_eq!(data.num_nodes, 2_708);
/// # Ok::<(), linkpred_providers_citation::CitationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CitationProvider {
    dataset: CitationDataset,
    config: CitationConfig,
}

impl CitationProvider {
    /// Reads `dataset` under `config.root`.
    #[must_use]
    pub const fn new(dataset: CitationDataset, config: CitationConfig) -> Self {
        Self { dataset, config }
    }

    /// Selected dataset.
    #[must_use]
    pub const fn dataset(&self) -> CitationDataset {
        self.dataset
    }

    /// Cache and download settings.
    #[must_use]
    pub const fn config(&self) -> &CitationConfig {
        &self.config
    }

    /// Loads the dataset with paper ids and class names kept.
    ///
    /// # Errors
    /// Returns [`CitationError`] when a file is missing, cannot be
    /// downloaded, or is malformed.
    pub fn load_citations(&self) -> Result<CitationGraph, CitationError> {
        self.load_with_client(&UreqDownloadClient)
    }

    #[instrument(
        name = "citation.load",
        err,
        skip(self, client),
        fields(dataset = %self.dataset, root = %self.config.root.display()),
    )]
    pub(crate) fn load_with_client(
        &self,
        client: &dyn DownloadClient,
    ) -> Result<CitationGraph, CitationError> {
        let directory = self.config.root.join(self.dataset.as_str());
        let content_file = self.dataset.content_file();
        let cites_file = self.dataset.cites_file();
        let content_path = directory.join(&content_file);
        let cites_path = directory.join(&cites_file);

        let (content, cites) = match &self.config.remote {
            Remote::Archive(base) if !(content_path.exists() && cites_path.exists()) => {
                self.fetch_archive(base, &content_path, &cites_path, client)?
            }
            Remote::Files(base) => (
                ensure_cached(&content_path, Some(join_url(base, &content_file)), client)?,
                ensure_cached(&cites_path, Some(join_url(base, &cites_file)), client)?,
            ),
            Remote::Archive(_) | Remote::Offline => (
                ensure_cached(&content_path, None, client)?,
                ensure_cached(&cites_path, None, client)?,
            ),
        };

        let graph = parse_dataset(
            &content_file,
            Cursor::new(content),
            &cites_file,
            Cursor::new(cites),
        )?;
        info!(
            papers = graph.paper_ids().len(),
            citations = graph.data().edges.len(),
            classes = graph.label_names().len(),
            features = graph.feature_count(),
            skipped = graph.skipped_citations(),
            "citation dataset parsed"
        );
        Ok(graph)
    }

    /// Downloads the dataset tarball and caches both of its files.
    fn fetch_archive(
        &self,
        base: &str,
        content_path: &Path,
        cites_path: &Path,
        client: &dyn DownloadClient,
    ) -> Result<(Vec<u8>, Vec<u8>), CitationError> {
        let url = join_url(base, &self.dataset.archive_file());
        let payload = client.download_bytes(&url)?;
        info!(url = %url, bytes = payload.len(), "downloaded dataset archive");

        let content_file = self.dataset.content_file();
        let cites_file = self.dataset.cites_file();
        let [content, cites] = extract_members(&url, &payload, [&*content_file, &*cites_file])?;
        store(content_path, &content)?;
        store(cites_path, &cites)?;
        debug!(directory = ?content_path.parent(), "unpacked dataset archive");
        Ok((content, cites))
    }
}

impl GraphSource for CitationProvider {
    type Error = CitationError;

    fn name(&self) -> &str {
        self.dataset.as_str()
    }

    fn load(&self) -> Result<GraphData, CitationError> {
        self.load_citations().map(CitationGraph::into_data)
    }
}
