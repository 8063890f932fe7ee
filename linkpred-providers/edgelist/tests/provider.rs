//! Integration tests for the file-backed edge-list source.

use std::{fs, path::PathBuf};

use linkpred_core::{GraphSource, LinkPredictorBuilder, TemporalConfig};
use linkpred_providers_edgelist::{EdgeListError, EdgeListProvider, NodeIds};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

#[fixture]
fn citations() -> Fixture {
    let dir = TempDir::new().expect("temp dir must exist");
    let path = dir.path().join("citations.tsv");
    fs::write(
        &path,
        "# source target year\n0\t1\t1998\n1\t2\t1999\n0\t2\t2000\n2\t3\t2001\n3\t3\t2002\n",
    )
    .expect("fixture must be written");
    Fixture { _dir: dir, path }
}

#[rstest]
fn names_source_after_file_stem(citations: Fixture) {
    let source = EdgeListProvider::new(&citations.path);
    assert_eq!(source.name(), "citations");
    assert_eq!(source.path(), citations.path);
    assert_eq!(source.with_name("hep").name(), "hep");
}

#[rstest]
fn loads_timestamped_edges(citations: Fixture) {
    let data = EdgeListProvider::new(&citations.path)
        .load()
        .expect("file must load");
    assert_eq!(data.num_nodes, 4);
    assert_eq!(data.edges.len(), 4);
    assert!(data.edges.iter().all(|edge| edge.timestamp.is_some()));
    assert!(data.labels.is_none());
}

#[rstest]
fn declared_node_count_keeps_isolated_nodes(citations: Fixture) {
    let data = EdgeListProvider::new(&citations.path)
        .with_num_nodes(6)
        .load()
        .expect("file must load");
    assert_eq!(data.num_nodes, 6);
}

#[rstest]
fn feeds_the_ranking_pipeline(citations: Fixture) {
    let source = EdgeListProvider::new(&citations.path);
    let prediction = LinkPredictorBuilder::new()
        .with_temporal(TemporalConfig::at(2001.0))
        .build()
        .expect("configuration must be valid")
        .run(&source)
        .expect("run must succeed");
    let ranked: Vec<(usize, usize, f64)> = prediction
        .records()
        .iter()
        .map(|record| record.as_tuple())
        .collect();
    assert_eq!(ranked, [(0, 3, 1.0), (1, 3, 1.0)]);
}

#[rstest]
fn remapped_identifiers_load() {
    let dir = TempDir::new().expect("temp dir must exist");
    let path = dir.path().join("named.csv");
    fs::write(&path, "smith2001,jones1999\njones1999,lee1997\n").expect("fixture must be written");
    let data = EdgeListProvider::new(&path)
        .with_node_ids(NodeIds::Remap)
        .load()
        .expect("file must load");
    assert_eq!(data.num_nodes, 3);
    assert_eq!(data.edges.len(), 2);
}

#[rstest]
fn missing_file_reports_path() {
    let dir = TempDir::new().expect("temp dir must exist");
    let path = dir.path().join("absent.txt");
    let err = EdgeListProvider::new(&path)
        .load()
        .expect_err("absent file must fail");
    match err {
        EdgeListError::Open { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn configured_cap_rejects_stray_indices(citations: Fixture) {
    let err = EdgeListProvider::new(&citations.path)
        .with_max_nodes(3)
        .load()
        .expect_err("node 3 is past a cap of 3");
    assert!(matches!(
        err,
        EdgeListError::NodeIndexTooLarge {
            line: 5,
            node: 3,
            max_nodes: 3
        }
    ));
}
