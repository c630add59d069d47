use std::collections::HashMap;

use super::{DirectedEdge, EdgeId, Node, NodeId, Provenance};
use crate::error::RouteError;

/// the road network as a directed multigraph. nodes are kept in a hashmap
/// (OSM ids are sparse; not worth remapping to dense indices at the input
/// sizes this crate targets). edges live in one flat vector indexed by
/// [`EdgeId`], with forward/reverse adjacency indices mapping a node to the
/// edge ids incident on it. edges are only ever appended, never removed or
/// mutated once the graph leaves the builder.
#[derive(Debug, Default, Clone)]
pub struct RoadGraph {
    nodes: HashMap<NodeId, Node>,
    edges: Vec<DirectedEdge>,
    forward: HashMap<NodeId, Vec<EdgeId>>,
    reverse: HashMap<NodeId, Vec<EdgeId>>,
}

impl RoadGraph {
    pub fn new(nodes: HashMap<NodeId, Node>) -> RoadGraph {
        RoadGraph {
            nodes,
            edges: Vec::new(),
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&DirectedEdge> {
        self.edges.get(id.0)
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &DirectedEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId(i), e))
    }

    /// appends a directed edge, returning its freshly assigned id. both
    /// endpoints must already exist as nodes in the graph.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        length_km: f64,
        bearing_deg: f64,
        provenance: Provenance,
    ) -> Result<EdgeId, RouteError> {
        if !self.nodes.contains_key(&source) {
            return Err(RouteError::missing_node(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(RouteError::missing_node(target));
        }
        let id = EdgeId(self.edges.len());
        self.edges.push(DirectedEdge {
            source,
            target,
            length_km,
            bearing_deg,
            provenance,
        });
        self.forward.entry(source).or_default().push(id);
        self.reverse.entry(target).or_default().push(id);
        Ok(id)
    }

    pub fn out_edges(&self, node: NodeId) -> &[EdgeId] {
        self.forward.get(&node).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn in_edges(&self, node: NodeId) -> &[EdgeId] {
        self.reverse.get(&node).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_edges(node).len()
    }

    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_edges(node).len()
    }

    /// undirected neighbors of `node` reachable via any forward or reverse
    /// edge, each paired with the edge length -- used by shortest-path
    /// search over the undirected projection.
    pub fn undirected_neighbors(&self, node: NodeId) -> Vec<(NodeId, f64)> {
        let mut out = Vec::new();
        for &eid in self.out_edges(node) {
            let e = &self.edges[eid.0];
            out.push((e.target, e.length_km));
        }
        for &eid in self.in_edges(node) {
            let e = &self.edges[eid.0];
            out.push((e.source, e.length_km));
        }
        out
    }

    /// retains only the given set of nodes, dropping every edge touching a
    /// node outside it. used by the component analyzer to cut down to the
    /// largest weakly connected component.
    pub fn restrict_to_nodes(&self, keep: &std::collections::HashSet<NodeId>) -> RoadGraph {
        let nodes = self
            .nodes
            .iter()
            .filter(|(id, _)| keep.contains(id))
            .map(|(id, n)| (*id, n.clone()))
            .collect();
        let mut out = RoadGraph::new(nodes);
        for (_, e) in self.edges() {
            if keep.contains(&e.source) && keep.contains(&e.target) {
                let _ = out.add_edge(e.source, e.target, e.length_km, e.bearing_deg, e.provenance);
            }
        }
        out
    }
}
