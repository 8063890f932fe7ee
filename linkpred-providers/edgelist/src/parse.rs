//! Line-oriented edge-list parsing.

use std::{collections::HashMap, io::BufRead};

use linkpred_core::{EdgeRecord, GraphData};
use tracing::warn;

use crate::errors::EdgeListError;

/// How node fields map onto dense node indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeIds {
    /// Fields are node indices already.
    #[default]
    Index,
    /// Fields are opaque identifiers, numbered in order of first appearance.
    Remap,
}

/// Largest node count accepted from [`NodeIds::Index`] files by default.
///
/// A single stray index would otherwise size the adjacency table.
pub const DEFAULT_MAX_NODES: usize = 10_000_000;

/// Edges parsed from a reader, before the node count is fixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedEdgeList {
    edges: Vec<EdgeRecord>,
    required_nodes: usize,
    identifiers: Vec<String>,
    skipped_self_loops: usize,
}

impl ParsedEdgeList {
    /// Parsed edges in file order, self-loops excluded.
    #[must_use]
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    /// Smallest node count that holds every referenced node.
    #[must_use]
    pub const fn required_nodes(&self) -> usize {
        self.required_nodes
    }

    /// Original identifier per node index. Empty for [`NodeIds::Index`].
    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Number of `u u` lines dropped.
    #[must_use]
    pub const fn skipped_self_loops(&self) -> usize {
        self.skipped_self_loops
    }

    /// Fixes the node count and produces the graph payload.
    ///
    /// # Errors
    /// Returns [`EdgeListError::NodeCountTooSmall`] when `num_nodes` cannot
    /// hold every referenced node.
    pub fn into_graph_data(self, num_nodes: Option<usize>) -> Result<GraphData, EdgeListError> {
        let required = self.required_nodes;
        let num_nodes = match num_nodes {
            Some(declared) if declared < required => {
                return Err(EdgeListError::NodeCountTooSmall { declared, required });
            }
            Some(declared) => declared,
            None => required,
        };
        Ok(GraphData::new(num_nodes, self.edges))
    }
}

/// Parses `source target [timestamp]` lines.
///
/// Fields are separated by whitespace or commas. Blank lines and lines whose
/// first non-blank character is `#` or `%` are ignored. Self-loops are
/// skipped with a warning. Node indices must stay below
/// [`DEFAULT_MAX_NODES`]; see [`parse_edge_list_capped`].
///
/// # Errors
/// Returns an [`EdgeListError`] naming the first malformed line.
///
/// # Examples
/// ```
/// use linkpred_providers_edgelist::{NodeIds, parse_edge_list};
///
/// let raw = "# cites\n0 1 1999\n1,2,2001\n";
/// let parsed = parse_edge_list(raw.as_bytes(), NodeIds::Index)?;
/// assert_eq!(parsed.edges().len(), 2);
/// assert_eq!(parsed.required_nodes(), 3);
/// assert_eq!(parsed.edges()[1].timestamp, Some(2001.0));
/// # Ok::<(), linkpred_providers_edgelist::EdgeListError>(())
/// ```
pub fn parse_edge_list<R: BufRead>(reader: R, ids: NodeIds) -> Result<ParsedEdgeList, EdgeListError> {
    parse_edge_list_capped(reader, ids, DEFAULT_MAX_NODES)
}

/// Parses like [`parse_edge_list`], rejecting [`NodeIds::Index`] fields at or
/// above `max_nodes`.
///
/// Remapped identifiers are numbered densely and are not capped.
///
/// # Errors
/// Returns [`EdgeListError::NodeIndexTooLarge`] for an index past the cap,
/// and the errors of [`parse_edge_list`] otherwise.
///
/// # Examples
/// ```
/// use linkpred_providers_edgelist::{EdgeListError, NodeIds, parse_edge_list_capped};
///
/// let err = parse_edge_list_capped("0 4000000000\n".as_bytes(), NodeIds::Index, 1_000)
///     .expect_err("index is past the cap");
/// assert!(matches!(err, EdgeListError::NodeIndexTooLarge { line: 1, .. }));
///
/// let parsed = parse_edge_list_capped("a 4000000000\n".as_bytes(), NodeIds::Remap, 1_000)?;
/// assert_eq!(parsed.required_nodes(), 2);
/// # Ok::<(), EdgeListError>(())
/// ```
pub fn parse_edge_list_capped<R: BufRead>(
    reader: R,
    ids: NodeIds,
    max_nodes: usize,
) -> Result<ParsedEdgeList, EdgeListError> {
    let mut resolver = Resolver::new(ids, max_nodes);
    let mut parsed = ParsedEdgeList::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| EdgeListError::Read {
            line: line_no,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }

        let fields: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect();
        let (source, target, stamp) = match fields.as_slice() {
            [] => continue,
            [source, target] => (*source, *target, None),
            [source, target, stamp] => (*source, *target, Some(*stamp)),
            [_] => return Err(EdgeListError::MissingTarget { line: line_no }),
            more => {
                return Err(EdgeListError::TrailingFields {
                    line: line_no,
                    count: more.len(),
                });
            }
        };

        let source = resolver.resolve(line_no, source)?;
        let target = resolver.resolve(line_no, target)?;
        let timestamp = stamp.map(|raw| parse_timestamp(line_no, raw)).transpose()?;

        if source == target {
            warn!(line = line_no, node = source, "skipping self-loop");
            parsed.skipped_self_loops += 1;
            continue;
        }

        let edge = EdgeRecord::new(source, target);
        parsed.edges.push(match timestamp {
            Some(stamp) => edge.with_timestamp(stamp),
            None => edge,
        });
    }

    parsed.required_nodes = resolver.required_nodes();
    parsed.identifiers = resolver.into_identifiers();
    Ok(parsed)
}

fn parse_timestamp(line: usize, raw: &str) -> Result<f64, EdgeListError> {
    raw.parse::<f64>()
        .ok()
        .filter(|stamp| stamp.is_finite())
        .ok_or_else(|| EdgeListError::InvalidTimestamp {
            line,
            token: raw.to_owned(),
        })
}

enum Resolver {
    Index {
        max: Option<usize>,
        cap: usize,
    },
    Remap {
        lookup: HashMap<String, usize>,
        identifiers: Vec<String>,
    },
}

impl Resolver {
    fn new(ids: NodeIds, cap: usize) -> Self {
        match ids {
            NodeIds::Index => Self::Index { max: None, cap },
            NodeIds::Remap => Self::Remap {
                lookup: HashMap::new(),
                identifiers: Vec::new(),
            },
        }
    }

    fn resolve(&mut self, line: usize, token: &str) -> Result<usize, EdgeListError> {
        match self {
            Self::Index { max, cap } => {
                let node = token
                    .parse::<usize>()
                    .map_err(|_| EdgeListError::InvalidNodeId {
                        line,
                        token: token.to_owned(),
                    })?;
                if node >= *cap {
                    return Err(EdgeListError::NodeIndexTooLarge {
                        line,
                        node,
                        max_nodes: *cap,
                    });
                }
                *max = Some(max.map_or(node, |seen| seen.max(node)));
                Ok(node)
            }
            Self::Remap {
                lookup,
                identifiers,
            } => {
                if let Some(&node) = lookup.get(token) {
                    return Ok(node);
                }
                let node = identifiers.len();
                identifiers.push(token.to_owned());
                lookup.insert(token.to_owned(), node);
                Ok(node)
            }
        }
    }

    fn required_nodes(&self) -> usize {
        match self {
            Self::Index { max, .. } => max.map_or(0, |node| node.saturating_add(1)),
            Self::Remap { identifiers, .. } => identifiers.len(),
        }
    }

    fn into_identifiers(self) -> Vec<String> {
        match self {
            Self::Index { .. } => Vec::new(),
            Self::Remap { identifiers, .. } => identifiers,
        }
    }
}
