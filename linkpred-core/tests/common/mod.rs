use linkpred_core::{EdgeRecord, GraphData, GraphSource};

/// Source whose load always fails, standing in for an unreachable dataset.
pub struct OfflineSource;

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
pub struct ConnectionRefused;

impl GraphSource for OfflineSource {
    type Error = ConnectionRefused;

    fn name(&self) -> &str {
        "offline"
    }

    fn load(&self) -> Result<GraphData, Self::Error> {
        Err(ConnectionRefused)
    }
}

/// `{(0,1),(1,2),(0,2),(2,3)}` on four nodes.
#[must_use]
pub fn triangle_with_tail() -> GraphData {
    GraphData::from_pairs(4, &[(0, 1), (1, 2), (0, 2), (2, 3)])
}

/// A small citation timeline: papers 0-2 cite each other early, 3-5 join
/// later and link back.
#[must_use]
pub fn timeline() -> GraphData {
    let stamped = |source, target, year: f64| EdgeRecord::new(source, target).with_timestamp(year);
    GraphData::new(
        6,
        vec![
            stamped(0, 1, 1998.0),
            stamped(1, 2, 1999.0),
            stamped(0, 2, 2000.0),
            stamped(2, 3, 2001.0),
            stamped(3, 4, 2003.0),
            stamped(1, 3, 2004.0),
            stamped(4, 5, 2005.0),
            stamped(3, 5, 2006.0),
        ],
    )
}
