//! Unit tests for edge-list parsing.

use linkpred_core::EdgeRecord;
use rstest::rstest;

use crate::{DEFAULT_MAX_NODES, EdgeListError, NodeIds, parse_edge_list, parse_edge_list_capped};

fn parse(raw: &str, ids: NodeIds) -> Result<crate::ParsedEdgeList, EdgeListError> {
    parse_edge_list(raw.as_bytes(), ids)
}

#[rstest]
#[case::spaces("0 1\n1 2\n")]
#[case::tabs("0\t1\n1\t2\n")]
#[case::commas("0,1\n1,2\n")]
#[case::comma_space("0, 1\n1 ,2\n")]
#[case::crlf("0 1\r\n1 2\r\n")]
#[case::comments("# header\n0 1\n% matrix market\n\n1 2\n")]
fn accepts_common_layouts(#[case] raw: &str) {
    let parsed = parse(raw, NodeIds::Index).expect("layout must parse");
    assert_eq!(
        parsed.edges(),
        &[EdgeRecord::new(0, 1), EdgeRecord::new(1, 2)]
    );
    assert_eq!(parsed.required_nodes(), 3);
    assert!(parsed.identifiers().is_empty());
}

#[test]
fn reads_optional_timestamp_column() {
    let parsed = parse("0 1 1998\n1 2\n2 3 2001.5\n", NodeIds::Index).expect("must parse");
    let stamps: Vec<Option<f64>> = parsed.edges().iter().map(|edge| edge.timestamp).collect();
    assert_eq!(stamps, [Some(1998.0), None, Some(2001.5)]);
}

#[test]
fn skips_self_loops() {
    let parsed = parse("0 1\n4 4\n1 2\n", NodeIds::Index).expect("must parse");
    assert_eq!(parsed.edges().len(), 2);
    assert_eq!(parsed.skipped_self_loops(), 1);
    // Node 4 still exists even though its only line was dropped.
    assert_eq!(parsed.required_nodes(), 5);
}

#[test]
fn remaps_opaque_identifiers_by_first_appearance() {
    let parsed = parse("paperB paperA\npaperA paperC\n", NodeIds::Remap).expect("must parse");
    assert_eq!(
        parsed.edges(),
        &[EdgeRecord::new(0, 1), EdgeRecord::new(1, 2)]
    );
    assert_eq!(parsed.identifiers(), ["paperB", "paperA", "paperC"]);
    assert_eq!(parsed.required_nodes(), 3);
}

#[test]
fn empty_input_needs_no_nodes() {
    let parsed = parse("# nothing here\n", NodeIds::Index).expect("must parse");
    assert_eq!(parsed.required_nodes(), 0);
    let data = parsed.into_graph_data(Some(4)).expect("padding allowed");
    assert_eq!(data.num_nodes, 4);
    assert!(data.edges.is_empty());
}

#[rstest]
#[case::single_field("0 1\n7\n", 2)]
fn rejects_missing_target(#[case] raw: &str, #[case] expected_line: usize) {
    let err = parse(raw, NodeIds::Index).expect_err("line must fail");
    assert!(matches!(err, EdgeListError::MissingTarget { line } if line == expected_line));
}

#[rstest]
#[case::negative("0 -1\n", "-1")]
#[case::word("zero one\n", "zero")]
#[case::fraction("0 1.5\n", "1.5")]
fn rejects_invalid_node_fields(#[case] raw: &str, #[case] token: &str) {
    let err = parse(raw, NodeIds::Index).expect_err("node field must fail");
    match err {
        EdgeListError::InvalidNodeId { line, token: found } => {
            assert_eq!(line, 1);
            assert_eq!(found, token);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case::word("0 1 soon\n", "soon")]
#[case::nan("0 1 NaN\n", "NaN")]
#[case::infinite("0 1 inf\n", "inf")]
fn rejects_invalid_timestamps(#[case] raw: &str, #[case] token: &str) {
    let err = parse(raw, NodeIds::Index).expect_err("timestamp must fail");
    assert!(matches!(err, EdgeListError::InvalidTimestamp { line: 1, token: ref found } if found == token));
}

#[test]
fn rejects_extra_fields() {
    let err = parse("0 1\n0 2 3 4\n", NodeIds::Index).expect_err("fourth field must fail");
    assert!(matches!(err, EdgeListError::TrailingFields { line: 2, count: 4 }));
}

#[test]
fn declared_count_must_cover_referenced_nodes() {
    let parsed = parse("0 5\n", NodeIds::Index).expect("must parse");
    let err = parsed
        .into_graph_data(Some(3))
        .expect_err("node 5 does not fit");
    assert!(matches!(
        err,
        EdgeListError::NodeCountTooSmall {
            declared: 3,
            required: 6
        }
    ));
}

#[rstest]
#[case::source_field("4000000000 1\n", 4_000_000_000)]
#[case::target_field("0 1\n0 4000000000\n", 4_000_000_000)]
#[case::at_cap("0 10\n", 10)]
fn rejects_indices_past_the_cap(#[case] raw: &str, #[case] node: usize) {
    let err = parse_edge_list_capped(raw.as_bytes(), NodeIds::Index, 10)
        .expect_err("index must exceed the cap");
    match err {
        EdgeListError::NodeIndexTooLarge {
            node: reported,
            max_nodes,
            ..
        } => {
            assert_eq!(reported, node);
            assert_eq!(max_nodes, 10);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn default_cap_applies_to_plain_parsing() {
    let raw = format!("0 {DEFAULT_MAX_NODES}\n");
    let err = parse(&raw, NodeIds::Index).expect_err("index must exceed the default cap");
    assert!(matches!(err, EdgeListError::NodeIndexTooLarge { line: 1, .. }));
    assert!(err.to_string().contains("remap sparse identifiers"));
}

#[test]
fn cap_admits_the_last_index() {
    let parsed =
        parse_edge_list_capped("0 9\n".as_bytes(), NodeIds::Index, 10).expect("must parse");
    assert_eq!(parsed.required_nodes(), 10);
}

#[test]
fn remapped_identifiers_ignore_the_cap() {
    let parsed = parse_edge_list_capped("0 4000000000\n".as_bytes(), NodeIds::Remap, 1)
        .expect("remapped ids are dense");
    assert_eq!(parsed.required_nodes(), 2);
    assert_eq!(parsed.identifiers(), ["0", "4000000000"]);
}
