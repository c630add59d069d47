use super::{NodeId, WayId};

/// a single consecutive (node, node) pair lifted from a driveable way,
/// carrying the parent way's oneway tag for the graph builder.
#[derive(Debug, Clone)]
pub struct Segment {
    pub way_id: WayId,
    pub from: NodeId,
    pub to: NodeId,
    pub oneway: Option<String>,
    pub highway: Option<String>,
}
