use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while reading an edge-list file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdgeListError {
    /// The file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Open {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A line could not be read.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The line held a single field.
    #[error("line {line} has a source node but no target")]
    MissingTarget {
        /// One-based line number.
        line: usize,
    },
    /// A node field was not a non-negative integer.
    #[error("line {line}: `{token}` is not a node index")]
    InvalidNodeId {
        /// One-based line number.
        line: usize,
        /// Offending field.
        token: String,
    },
    /// The timestamp field was not a finite number.
    #[error("line {line}: `{token}` is not a finite timestamp")]
    InvalidTimestamp {
        /// One-based line number.
        line: usize,
        /// Offending field.
        token: String,
    },
    /// A node index exceeded the configured node cap.
    #[error(
        "line {line}: node index {node} exceeds the cap of {max_nodes} nodes; raise the cap \
         or remap sparse identifiers"
    )]
    NodeIndexTooLarge {
        /// One-based line number.
        line: usize,
        /// Offending node index.
        node: usize,
        /// Cap in force while parsing.
        max_nodes: usize,
    },
    /// The line held more than three fields.
    #[error("line {line} has {count} fields; expected at most 3")]
    TrailingFields {
        /// One-based line number.
        line: usize,
        /// Number of fields found.
        count: usize,
    },
    /// The declared node count cannot hold every node in the file.
    #[error("declared node count {declared} is smaller than the {required} nodes referenced")]
    NodeCountTooSmall {
        /// Count supplied by the caller.
        declared: usize,
        /// Count the file requires.
        required: usize,
    },
}
