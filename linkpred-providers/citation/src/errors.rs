use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while fetching or parsing a citation dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CitationError {
    /// A cached file is missing and downloads are disabled.
    #[error("`{path}` is not cached and downloads are disabled")]
    NotCached {
        /// Expected cache location.
        path: PathBuf,
    },
    /// The HTTP request failed.
    #[error("failed to download `{url}`: {message}")]
    Download {
        /// Requested URL.
        url: String,
        /// Client error text.
        message: String,
    },
    /// A downloaded archive could not be decompressed or unpacked.
    #[error("archive `{url}` is unreadable: {message}")]
    Archive {
        /// Requested URL.
        url: String,
        /// Decoder error text.
        message: String,
    },
    /// A downloaded archive lacked one of the dataset files.
    #[error("archive `{url}` has no `{member}` entry")]
    MissingMember {
        /// Requested URL.
        url: String,
        /// File name that was not found.
        member: String,
    },
    /// A content line lacked an id or a label.
    #[error("`{file}` line {line}: {message}")]
    MalformedContent {
        /// File being parsed.
        file: String,
        /// One-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },
    /// A paper id appeared twice in the content file.
    #[error("`{file}` line {line}: paper `{id}` is listed twice")]
    DuplicatePaper {
        /// File being parsed.
        file: String,
        /// One-based line number.
        line: usize,
        /// Repeated id.
        id: String,
    },
    /// A content line had a different number of feature columns.
    #[error("`{file}` line {line}: expected {expected} features, found {found}")]
    InconsistentFeatures {
        /// File being parsed.
        file: String,
        /// One-based line number.
        line: usize,
        /// Width of the first paper row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// A citation line did not hold exactly two ids.
    #[error("`{file}` line {line} has {count} fields; expected 2")]
    MalformedCites {
        /// File being parsed.
        file: String,
        /// One-based line number.
        line: usize,
        /// Number of fields found.
        count: usize,
    },
    /// The content file listed no papers.
    #[error("`{file}` lists no papers")]
    Empty {
        /// File being parsed.
        file: String,
    },
    /// Filesystem failure in the cache directory.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
