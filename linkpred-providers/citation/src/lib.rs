//! Citation-network provider for LINQS-style datasets (Cora, CiteSeer).
//!
//! A dataset is a pair of tab-separated files: `<name>.content` lists one
//! paper per line (`id features... label`) and `<name>.cites` lists
//! `cited citing` pairs. Files are read from a cache directory; missing ones
//! are fetched on first use, by default from the LINQS `<name>.tgz` archives.

mod archive;
mod dataset;
mod download;
mod errors;
mod parse;
mod provider;

pub use dataset::CitationDataset;
pub use download::{CitationConfig, DownloadClient, LINQS_BASE_URL, Remote, default_cache_dir};
pub use errors::CitationError;
pub use parse::CitationGraph;
pub use provider::CitationProvider;
