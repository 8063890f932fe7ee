//! Download-and-cache helpers for dataset files.

use std::{
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::errors::CitationError;

/// LINQS host serving `<name>.tgz` archives for Cora and CiteSeer.
pub const LINQS_BASE_URL: &str = "https://linqs-data.soe.ucsc.edu/public/lbc";

/// Where missing dataset files come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Remote {
    /// `<base>/<name>.tgz`, a gzipped tarball holding both dataset files.
    Archive(String),
    /// `<base>/<name>.content` and `<base>/<name>.cites` served as plain files.
    Files(String),
    /// Read cached files only.
    Offline,
}

impl Default for Remote {
    fn default() -> Self {
        Self::Archive(LINQS_BASE_URL.to_owned())
    }
}

/// Where dataset files are cached and fetched from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CitationConfig {
    /// Cache root; each dataset uses a subdirectory named after it.
    pub root: PathBuf,
    /// Source for files missing from the cache.
    pub remote: Remote,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self::new(default_cache_dir())
    }
}

impl CitationConfig {
    /// Caches under `root`, fetching missing datasets from the LINQS archives.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            remote: Remote::default(),
        }
    }

    /// Fetches missing files one by one from a plain-file mirror.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.remote = Remote::Files(base_url.into());
        self
    }

    /// Fetches missing datasets as `<name>.tgz` from `base_url`.
    #[must_use]
    pub fn with_archive_url(mut self, base_url: impl Into<String>) -> Self {
        self.remote = Remote::Archive(base_url.into());
        self
    }

    /// Disables downloads.
    #[must_use]
    pub fn offline(mut self) -> Self {
        self.remote = Remote::Offline;
        self
    }
}

pub(crate) fn join_url(base: &str, file_name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), file_name)
}

/// Fetches raw bytes for a URL.
pub trait DownloadClient {
    /// Downloads URL contents as bytes.
    ///
    /// # Errors
    /// Returns [`CitationError::Download`] if the request fails.
    fn download_bytes(&self, url: &str) -> Result<Vec<u8>, CitationError>;
}

pub(crate) struct UreqDownloadClient;

impl DownloadClient for UreqDownloadClient {
    fn download_bytes(&self, url: &str) -> Result<Vec<u8>, CitationError> {
        let download_error = |error: ureq::Error| CitationError::Download {
            url: url.to_owned(),
            message: error.to_string(),
        };
        let mut response = ureq::get(url).call().map_err(download_error)?;
        response.body_mut().read_to_vec().map_err(download_error)
    }
}

/// Returns the cached bytes at `path`, downloading them first when absent.
pub(crate) fn ensure_cached(
    path: &Path,
    url: Option<String>,
    client: &dyn DownloadClient,
) -> Result<Vec<u8>, CitationError> {
    if path.exists() {
        debug!(path = %path.display(), "reading cached file");
        return fs::read(path).map_err(CitationError::from);
    }
    let Some(url) = url else {
        return Err(CitationError::NotCached {
            path: path.to_path_buf(),
        });
    };

    let payload = client.download_bytes(&url)?;
    store(path, &payload)?;
    info!(url = %url, bytes = payload.len(), "downloaded dataset file");
    Ok(payload)
}

/// Writes `bytes` to `path`, creating the cache directory first.
pub(crate) fn store(path: &Path, bytes: &[u8]) -> Result<(), CitationError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_atomic(path, bytes)
}

/// Writes through a `.part` sibling so readers never see a partial file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CitationError> {
    let mut part = OsString::from(path.as_os_str());
    part.push(".part");
    let part_path = PathBuf::from(part);
    if part_path.exists() {
        fs::remove_file(&part_path)?;
    }
    fs::write(&part_path, bytes)?;
    fs::rename(&part_path, path)?;
    Ok(())
}

/// Cache root: `LINKPRED_CACHE_DIR`, then `$XDG_CACHE_HOME/linkpred`, then
/// `$HOME/.cache/linkpred`, then the system temp directory.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    if let Some(explicit) = env::var_os("LINKPRED_CACHE_DIR") {
        return PathBuf::from(explicit);
    }

    if let Some(xdg_cache) = env::var_os("XDG_CACHE_HOME") {
        return PathBuf::from(xdg_cache).join("linkpred");
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".cache").join("linkpred");
    }

    env::temp_dir().join("linkpred")
}
