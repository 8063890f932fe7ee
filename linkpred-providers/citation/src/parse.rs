//! Parsers for `.content` and `.cites` files.

use std::{
    collections::{BTreeSet, HashMap},
    io::BufRead,
};

use linkpred_core::{EdgeRecord, GraphData};
use tracing::warn;

use crate::errors::CitationError;

/// A parsed citation dataset with the identifiers needed to map results back.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationGraph {
    data: GraphData,
    paper_ids: Vec<String>,
    label_names: Vec<String>,
    feature_count: usize,
    skipped_citations: usize,
}

impl CitationGraph {
    /// Graph payload with one label per paper.
    #[must_use]
    pub const fn data(&self) -> &GraphData {
        &self.data
    }

    /// Consumes the graph, returning the payload.
    #[must_use]
    pub fn into_data(self) -> GraphData {
        self.data
    }

    /// Paper id per node index, in content-file order.
    #[must_use]
    pub fn paper_ids(&self) -> &[String] {
        &self.paper_ids
    }

    /// Class name per label index, sorted by name.
    #[must_use]
    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// Width of each paper's feature vector.
    #[must_use]
    pub const fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Citations dropped for naming an unknown paper or citing themselves.
    #[must_use]
    pub const fn skipped_citations(&self) -> usize {
        self.skipped_citations
    }
}

struct Papers {
    ids: Vec<String>,
    lookup: HashMap<String, usize>,
    labels: Vec<String>,
    feature_count: usize,
}

fn fields(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

fn read_papers<R: BufRead>(file: &str, reader: R) -> Result<Papers, CitationError> {
    let mut papers = Papers {
        ids: Vec::new(),
        lookup: HashMap::new(),
        labels: Vec::new(),
        feature_count: 0,
    };

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let row = fields(&line);
        let (id, label, features) = match row.as_slice() {
            [] => continue,
            [id, features @ .., label] => (*id, *label, features.len()),
            [_] => {
                return Err(CitationError::MalformedContent {
                    file: file.to_owned(),
                    line: line_no,
                    message: "expected a paper id and a class label".to_owned(),
                });
            }
        };

        if papers.ids.is_empty() {
            papers.feature_count = features;
        } else if features != papers.feature_count {
            return Err(CitationError::InconsistentFeatures {
                file: file.to_owned(),
                line: line_no,
                expected: papers.feature_count,
                found: features,
            });
        }

        let node = papers.ids.len();
        if papers.lookup.insert(id.to_owned(), node).is_some() {
            return Err(CitationError::DuplicatePaper {
                file: file.to_owned(),
                line: line_no,
                id: id.to_owned(),
            });
        }
        papers.ids.push(id.to_owned());
        papers.labels.push(label.to_owned());
    }

    if papers.ids.is_empty() {
        return Err(CitationError::Empty {
            file: file.to_owned(),
        });
    }
    Ok(papers)
}

/// Parses a paper table and its citation list into a labelled graph.
///
/// Nodes are numbered in content-file order. Labels are numbered by sorted
/// class name. Citations naming a paper absent from the table, and
/// self-citations, are skipped with a warning.
pub(crate) fn parse_dataset<C: BufRead, E: BufRead>(
    content_file: &str,
    content: C,
    cites_file: &str,
    cites: E,
) -> Result<CitationGraph, CitationError> {
    let papers = read_papers(content_file, content)?;

    let label_names: Vec<String> = papers
        .labels
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let labels = papers
        .labels
        .iter()
        .map(|name| label_names.binary_search(name).unwrap_or_default())
        .collect();

    let mut edges = Vec::new();
    let mut skipped_citations = 0_usize;
    for (index, line) in cites.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let row = fields(&line);
        let (cited, citing) = match row.as_slice() {
            [] => continue,
            [cited, citing] => (*cited, *citing),
            other => {
                return Err(CitationError::MalformedCites {
                    file: cites_file.to_owned(),
                    line: line_no,
                    count: other.len(),
                });
            }
        };

        match (papers.lookup.get(cited), papers.lookup.get(citing)) {
            (Some(&left), Some(&right)) if left != right => {
                edges.push(EdgeRecord::new(left, right));
            }
            (Some(_), Some(_)) => {
                warn!(line = line_no, paper = cited, "skipping self-citation");
                skipped_citations += 1;
            }
            _ => {
                warn!(line = line_no, cited, citing, "skipping citation of unknown paper");
                skipped_citations += 1;
            }
        }
    }

    let data = GraphData::new(papers.ids.len(), edges).with_labels(labels);
    Ok(CitationGraph {
        data,
        paper_ids: papers.ids,
        label_names,
        feature_count: papers.feature_count,
        skipped_citations,
    })
}
