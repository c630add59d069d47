use serde::{Deserialize, Serialize};

use crate::geodesy::turn_angle;
use crate::model::{Circuit, RoadGraph};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnStats {
    pub right_turns: usize,
    pub left_turns: usize,
    pub straight: usize,
    pub u_turns: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteStats {
    pub directed_traversals: usize,
    pub unique_segments: usize,
    pub total_distance_km: f64,
    pub estimated_drive_time_minutes: f64,
    pub estimated_drive_time_hours: f64,
}

/// classifies every consecutive, non-wraparound edge pair in the circuit by
/// its turn angle. classification is exclusive: straight, right, left, and
/// U-turn (|angle| > 150 degrees) partition the angle range, so the four
/// counts sum to `circuit.len() - 1`.
pub fn turn_statistics(graph: &RoadGraph, circuit: &Circuit) -> TurnStats {
    let mut stats = TurnStats::default();
    for pair in circuit.edges.windows(2) {
        let a = graph.edge(pair[0]).expect("circuit edge exists");
        let b = graph.edge(pair[1]).expect("circuit edge exists");
        let angle = turn_angle(a.bearing_deg, b.bearing_deg);

        if angle.abs() < 10.0 {
            stats.straight += 1;
        } else if angle.abs() > 150.0 {
            stats.u_turns += 1;
        } else if angle > 0.0 {
            stats.right_turns += 1;
        } else {
            stats.left_turns += 1;
        }
    }
    stats
}

pub fn route_statistics(graph: &RoadGraph, circuit: &Circuit, average_speed_kmh: f64) -> RouteStats {
    let total_distance_km: f64 = circuit
        .edges
        .iter()
        .map(|&eid| graph.edge(eid).expect("circuit edge exists").length_km)
        .sum();
    let hours = total_distance_km / average_speed_kmh;

    RouteStats {
        directed_traversals: circuit.len(),
        unique_segments: circuit.len() / 2,
        total_distance_km,
        estimated_drive_time_minutes: hours * 60.0,
        estimated_drive_time_hours: hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Circuit, Node, NodeId, Provenance};
    use std::collections::HashMap;

    #[test]
    fn single_bidirectional_segment_is_a_u_turn() {
        let mut nodes = HashMap::new();
        nodes.insert(NodeId(1), Node::new(NodeId(1), 45.300, -73.700));
        nodes.insert(NodeId(2), Node::new(NodeId(2), 45.301, -73.700));
        let mut graph = RoadGraph::new(nodes);
        let e1 = graph.add_edge(NodeId(1), NodeId(2), 0.1113, 0.0, Provenance::Original).unwrap();
        let e2 = graph.add_edge(NodeId(2), NodeId(1), 0.1113, 180.0, Provenance::Original).unwrap();
        let circuit = Circuit::new(vec![e1, e2]);

        let turns = turn_statistics(&graph, &circuit);
        assert_eq!(turns.u_turns, 1);
        assert_eq!(turns.right_turns, 0);
        assert_eq!(turns.left_turns, 0);

        let stats = route_statistics(&graph, &circuit, 30.0);
        assert_eq!(stats.directed_traversals, 2);
        assert!((stats.total_distance_km - 0.2226).abs() < 1e-6);
    }
}
