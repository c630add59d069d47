use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::model::{NodeId, RoadGraph};

/// a min-heap entry ordered by cost ascending (reverse of the default
/// max-heap), ties broken by node id for determinism.
#[derive(PartialEq)]
struct HeapEntry {
    cost: f64,
    node: NodeId,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm over the undirected projection of `graph`, weighted
/// by edge length in kilometers. returns the node sequence from `source` to
/// `target` inclusive, or `None` if no path exists.
pub fn shortest_path_undirected(graph: &RoadGraph, source: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
    if source == target {
        return Some(vec![source]);
    }

    let mut dist: HashMap<NodeId, f64> = HashMap::new();
    let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(source, 0.0);
    heap.push(HeapEntry { cost: 0.0, node: source });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if node == target {
            break;
        }
        if cost > *dist.get(&node).unwrap_or(&f64::INFINITY) {
            continue;
        }
        let mut neighbors = graph.undirected_neighbors(node);
        neighbors.sort_by(|a, b| a.0.cmp(&b.0));
        for (neighbor, length_km) in neighbors {
            let next_cost = cost + length_km;
            let better = next_cost < *dist.get(&neighbor).unwrap_or(&f64::INFINITY);
            if better {
                dist.insert(neighbor, next_cost);
                prev.insert(neighbor, node);
                heap.push(HeapEntry { cost: next_cost, node: neighbor });
            }
        }
    }

    if !dist.contains_key(&target) {
        return None;
    }

    let mut path = vec![target];
    let mut current = target;
    while current != source {
        let p = *prev.get(&current)?;
        path.push(p);
        current = p;
    }
    path.reverse();
    Some(path)
}
