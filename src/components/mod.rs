use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::model::{NodeId, RoadGraph};

/// diagnostic summary of stage 3, surfaced in the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentsReport {
    pub total_components: usize,
    pub sizes: Vec<usize>,
    pub largest_size: usize,
    pub excluded_node_count: usize,
    pub total_unique_segments: usize,
}

/// stage 3: partitions the graph into weakly connected components (BFS over
/// the undirected projection) and keeps only the largest. ties are broken
/// deterministically by smallest minimum node id among tied components,
/// not by iteration order.
pub fn select_largest_component(graph: &RoadGraph) -> Result<(RoadGraph, ComponentsReport), RouteError> {
    let components = weakly_connected_components(graph);
    if components.is_empty() {
        return Err(RouteError::EmptyGraph("graph has no nodes".to_string()));
    }

    let sizes: Vec<usize> = components.iter().map(|c| c.len()).collect();
    let max_size = *sizes.iter().max().unwrap();

    let largest = components
        .iter()
        .filter(|c| c.len() == max_size)
        .min_by_key(|c| c.iter().min().copied().unwrap_or(NodeId(i64::MAX)))
        .expect("at least one component of max size exists")
        .clone();

    let total_nodes: usize = sizes.iter().sum();
    let report = ComponentsReport {
        total_components: components.len(),
        sizes,
        largest_size: largest.len(),
        excluded_node_count: total_nodes - largest.len(),
        total_unique_segments: graph.edge_count() / 2,
    };

    if largest.len() < 2 {
        return Err(RouteError::EmptyGraph(
            "largest connected component has fewer than 2 nodes".to_string(),
        ));
    }

    let subgraph = graph.restrict_to_nodes(&largest);
    Ok((subgraph, report))
}

fn weakly_connected_components(graph: &RoadGraph) -> Vec<HashSet<NodeId>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut components = Vec::new();

    let mut all_ids: Vec<NodeId> = graph.node_ids().collect();
    all_ids.sort();

    for &start in &all_ids {
        if visited.contains(&start) {
            continue;
        }
        let mut component = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited.insert(start);
        while let Some(node) = queue.pop_front() {
            component.insert(node);
            for (neighbor, _) in graph.undirected_neighbors(node) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        components.push(component);
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Provenance};
    use std::collections::HashMap;

    fn node(id: i64, lat: f64, lon: f64) -> (NodeId, Node) {
        (NodeId(id), Node::new(NodeId(id), lat, lon))
    }

    #[test]
    fn picks_larger_of_two_components() {
        let mut nodes = HashMap::new();
        for n in [node(1, 0.0, 0.0), node(2, 0.0, 0.001), node(3, 0.0, 0.002)] {
            nodes.insert(n.0, n.1);
        }
        for n in [node(10, 1.0, 0.0), node(11, 1.0, 0.001)] {
            nodes.insert(n.0, n.1);
        }
        let mut graph = RoadGraph::new(nodes);
        graph.add_edge(NodeId(1), NodeId(2), 0.1, 0.0, Provenance::Original).unwrap();
        graph.add_edge(NodeId(2), NodeId(3), 0.1, 0.0, Provenance::Original).unwrap();
        graph.add_edge(NodeId(10), NodeId(11), 0.1, 0.0, Provenance::Original).unwrap();

        let (subgraph, report) = select_largest_component(&graph).unwrap();
        assert_eq!(report.total_components, 2);
        assert_eq!(subgraph.node_count(), 3);
        assert_eq!(report.excluded_node_count, 2);
    }

    #[test]
    fn tie_break_prefers_smallest_min_id() {
        let mut nodes = HashMap::new();
        for n in [node(1, 0.0, 0.0), node(2, 0.0, 0.001)] {
            nodes.insert(n.0, n.1);
        }
        for n in [node(10, 1.0, 0.0), node(11, 1.0, 0.001)] {
            nodes.insert(n.0, n.1);
        }
        let mut graph = RoadGraph::new(nodes);
        graph.add_edge(NodeId(1), NodeId(2), 0.1, 0.0, Provenance::Original).unwrap();
        graph.add_edge(NodeId(10), NodeId(11), 0.1, 0.0, Provenance::Original).unwrap();

        let (subgraph, _) = select_largest_component(&graph).unwrap();
        assert!(subgraph.node(NodeId(1)).is_some());
        assert!(subgraph.node(NodeId(10)).is_none());
    }
}
