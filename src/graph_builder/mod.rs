use std::collections::HashMap;

use crate::config::PipelineConfig;
use crate::error::RouteError;
use crate::geodesy::bearing_deg;
use crate::geodesy::haversine_km;
use crate::model::{Node, NodeId, Provenance, RoadGraph, Segment};

const FORWARD_ONEWAY_VALUES: &[&str] = &["yes", "1", "true"];
const REVERSE_ONEWAY_VALUE: &str = "-1";

/// stage 2: turns driveable segments into a directed multigraph. under the
/// default `ignore_oneway` policy every segment yields both directions,
/// regardless of its tag -- sanitation vehicles are allowed to drive
/// against traffic. when `ignore_oneway` is false, the tag is honored: a
/// forward-only segment yields one edge, and `oneway=-1` inverts the
/// segment's stored direction rather than merely suppressing the reverse.
pub fn build_graph(
    nodes: HashMap<NodeId, Node>,
    segments: &[Segment],
    config: &PipelineConfig,
) -> Result<RoadGraph, RouteError> {
    let mut graph = RoadGraph::new(nodes);

    for seg in segments {
        let from_node = graph
            .node(seg.from)
            .ok_or_else(|| RouteError::missing_node(seg.from))?;
        let to_node = graph
            .node(seg.to)
            .ok_or_else(|| RouteError::missing_node(seg.to))?;

        let length_km = haversine_km(from_node.lat, from_node.lon, to_node.lat, to_node.lon);
        let fwd_bearing = bearing_deg(from_node.lat, from_node.lon, to_node.lat, to_node.lon);
        let rev_bearing = bearing_deg(to_node.lat, to_node.lon, from_node.lat, from_node.lon);

        if config.ignore_oneway {
            graph.add_edge(seg.from, seg.to, length_km, fwd_bearing, Provenance::Original)?;
            graph.add_edge(seg.to, seg.from, length_km, rev_bearing, Provenance::Original)?;
            continue;
        }

        let tag = seg.oneway.as_deref().unwrap_or("");
        if tag == REVERSE_ONEWAY_VALUE {
            graph.add_edge(seg.to, seg.from, length_km, rev_bearing, Provenance::Original)?;
        } else if FORWARD_ONEWAY_VALUES.contains(&tag) {
            graph.add_edge(seg.from, seg.to, length_km, fwd_bearing, Provenance::Original)?;
        } else {
            graph.add_edge(seg.from, seg.to, length_km, fwd_bearing, Provenance::Original)?;
            graph.add_edge(seg.to, seg.from, length_km, rev_bearing, Provenance::Original)?;
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WayId;

    fn two_nodes() -> HashMap<NodeId, Node> {
        let mut nodes = HashMap::new();
        nodes.insert(NodeId(1), Node::new(NodeId(1), 45.300, -73.700));
        nodes.insert(NodeId(2), Node::new(NodeId(2), 45.301, -73.700));
        nodes
    }

    fn segment(oneway: Option<&str>) -> Segment {
        Segment {
            way_id: WayId(1),
            from: NodeId(1),
            to: NodeId(2),
            oneway: oneway.map(|s| s.to_string()),
            highway: Some("residential".to_string()),
        }
    }

    #[test]
    fn default_policy_doubles_every_segment() {
        let config = PipelineConfig::default();
        let graph = build_graph(two_nodes(), &[segment(Some("yes"))], &config).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn honoring_oneway_yes_yields_single_edge() {
        let mut config = PipelineConfig::default();
        config.ignore_oneway = false;
        let graph = build_graph(two_nodes(), &[segment(Some("yes"))], &config).unwrap();
        assert_eq!(graph.edge_count(), 1);
        let (_, edge) = graph.edges().next().unwrap();
        assert_eq!(edge.source, NodeId(1));
        assert_eq!(edge.target, NodeId(2));
    }

    #[test]
    fn honoring_oneway_minus_one_inverts_direction() {
        let mut config = PipelineConfig::default();
        config.ignore_oneway = false;
        let graph = build_graph(two_nodes(), &[segment(Some("-1"))], &config).unwrap();
        assert_eq!(graph.edge_count(), 1);
        let (_, edge) = graph.edges().next().unwrap();
        assert_eq!(edge.source, NodeId(2));
        assert_eq!(edge.target, NodeId(1));
    }

    #[test]
    fn honoring_oneway_absent_tag_yields_both_directions() {
        let mut config = PipelineConfig::default();
        config.ignore_oneway = false;
        let graph = build_graph(two_nodes(), &[segment(None)], &config).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }
}
