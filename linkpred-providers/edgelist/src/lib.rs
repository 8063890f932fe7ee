//! Edge-list provider reading plain-text graphs into `linkpred-core`.
//!
//! Each non-comment line holds `source target [timestamp]`, separated by
//! whitespace or commas. Lines starting with `#` or `%` are comments.

mod errors;
mod parse;
mod provider;

pub use errors::EdgeListError;
pub use parse::{
    DEFAULT_MAX_NODES, NodeIds, ParsedEdgeList, parse_edge_list, parse_edge_list_capped,
};
pub use provider::EdgeListProvider;

#[cfg(test)]
mod tests;
