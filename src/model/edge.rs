use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::NodeId;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

impl Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// where a directed edge came from: an original segment traversal, or a
/// duplicate added during eulerization to balance degree. the duplicate
/// variant records the edge it mirrors so the report can quantify deadhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Original,
    Duplicate { of: EdgeId },
}

/// the graph's native unit. parallel edges between the same (source, target)
/// are legal and expected: once for the segment's own direction, again for
/// its forced reverse under the "twice" policy, and again for any
/// eulerization duplicates.
#[derive(Debug, Clone)]
pub struct DirectedEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub length_km: f64,
    pub bearing_deg: f64,
    pub provenance: Provenance,
}

impl DirectedEdge {
    pub fn is_duplicate(&self) -> bool {
        matches!(self.provenance, Provenance::Duplicate { .. })
    }
}
