use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::geodesy::turn_angle;
use crate::geodesy::turn_cost;
use crate::model::{Circuit, DirectedEdge, EdgeId, NodeId, RoadGraph};

/// diagnostic summary of stage 5.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraversalReport {
    pub start_node: i64,
    pub start_method: StartMethod,
    pub splice_count: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StartMethod {
    #[default]
    Auto,
    UserSpecified,
}

/// tracks which edges remain unused, with a per-node list of the outgoing
/// edge ids still available so the greedy walk can pop from it directly
/// rather than re-scanning the full adjacency on every step.
struct Remaining {
    used: Vec<bool>,
    avail_out: HashMap<NodeId, Vec<EdgeId>>,
}

impl Remaining {
    fn new(graph: &RoadGraph) -> Remaining {
        let mut avail_out: HashMap<NodeId, Vec<EdgeId>> = HashMap::new();
        for id in graph.node_ids() {
            avail_out.insert(id, graph.out_edges(id).to_vec());
        }
        Remaining {
            used: vec![false; graph.edge_count()],
            avail_out,
        }
    }

    fn has_unused_out(&self, node: NodeId) -> bool {
        self.avail_out.get(&node).map(|v| !v.is_empty()).unwrap_or(false)
    }

    fn candidates(&self, node: NodeId) -> &[EdgeId] {
        self.avail_out.get(&node).map(|v| v.as_slice()).unwrap_or(&[])
    }

    fn consume(&mut self, node: NodeId, edge: EdgeId) {
        self.used[edge.0] = true;
        if let Some(v) = self.avail_out.get_mut(&node) {
            if let Some(pos) = v.iter().position(|&e| e == edge) {
                v.swap_remove(pos);
            }
        }
    }

    fn any_node_with_unused_out(&self) -> Option<NodeId> {
        self.avail_out
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(n, _)| *n)
            .min()
    }
}

/// stage 5: builds a closed Eulerian walk over the (already-balanced) graph,
/// greedily preferring the lowest-turn-cost unused outgoing edge at each
/// vertex. falls back to Hierholzer's standard splice step whenever a
/// partial walk gets stuck short of covering every edge.
pub fn build_circuit(
    graph: &RoadGraph,
    start_node: Option<NodeId>,
    prefer_right_turns: bool,
) -> Result<(Circuit, TraversalReport), RouteError> {
    let (start, method) = resolve_start_node(graph, start_node)?;

    let mut remaining = Remaining::new(graph);
    let total_edges = graph.edge_count();

    let (mut circuit_nodes, mut circuit_edges) = walk(graph, &mut remaining, start, prefer_right_turns);

    let mut splice_count = 0usize;
    let safety_bound = 2 * total_edges.max(1);
    let mut iterations = 0usize;

    while circuit_edges.len() < total_edges {
        iterations += 1;
        if iterations > safety_bound {
            return Err(RouteError::Internal(format!(
                "hierholzer traversal exceeded safety bound of {safety_bound} iterations"
            )));
        }

        let splice_at = circuit_nodes
            .iter()
            .position(|&n| remaining.has_unused_out(n))
            .ok_or_else(|| {
                RouteError::Internal(
                    "circuit incomplete but no node with unused outgoing edges remains".to_string(),
                )
            })?;
        let splice_node = circuit_nodes[splice_at];

        let (sub_nodes, sub_edges) = walk(graph, &mut remaining, splice_node, prefer_right_turns);
        if sub_edges.is_empty() {
            return Err(RouteError::Internal(format!(
                "unable to extend circuit at node {splice_node}: no progress made"
            )));
        }

        circuit_edges.splice(splice_at..splice_at, sub_edges);
        circuit_nodes.splice(splice_at + 1..splice_at + 1, sub_nodes[1..].iter().copied());
        splice_count += 1;
    }

    if circuit_nodes.first() != circuit_nodes.last() {
        return Err(RouteError::Internal(
            "completed traversal is not a closed walk".to_string(),
        ));
    }

    let report = TraversalReport {
        start_node: start.0,
        start_method: method,
        splice_count,
    };
    Ok((Circuit::new(circuit_edges), report))
}

/// walks from `start` along unused edges, greedily minimizing turn cost
/// against the previous edge's bearing, until no unused outgoing edge
/// remains at the current node. returns the node sequence (length =
/// edges + 1) and the edge sequence walked.
fn walk(
    graph: &RoadGraph,
    remaining: &mut Remaining,
    start: NodeId,
    prefer_right_turns: bool,
) -> (Vec<NodeId>, Vec<EdgeId>) {
    let mut nodes = vec![start];
    let mut edges = Vec::new();
    let mut current = start;
    let mut prev_bearing: Option<f64> = None;

    loop {
        let candidates = remaining.candidates(current);
        if candidates.is_empty() {
            break;
        }
        let chosen = choose_edge(graph, candidates, prev_bearing, prefer_right_turns);
        let edge = graph.edge(chosen).expect("candidate edge id exists in graph");
        remaining.consume(current, chosen);
        edges.push(chosen);
        nodes.push(edge.target);
        prev_bearing = Some(edge.bearing_deg);
        current = edge.target;
    }

    (nodes, edges)
}

/// selects the next edge among `candidates`. when a previous bearing is
/// known and right-turn preference is enabled, minimizes turn cost; ties
/// (and the initial step, which has no incoming bearing) are broken by
/// shorter edge length, then smaller target node id.
fn choose_edge(
    graph: &RoadGraph,
    candidates: &[EdgeId],
    prev_bearing: Option<f64>,
    prefer_right_turns: bool,
) -> EdgeId {
    let key = |eid: &EdgeId| -> (OrderedCost, f64, i64) {
        let e: &DirectedEdge = graph.edge(*eid).expect("candidate edge exists");
        let cost = match (prefer_right_turns, prev_bearing) {
            (true, Some(bearing_in)) => turn_cost(turn_angle(bearing_in, e.bearing_deg)),
            _ => 0.0,
        };
        (OrderedCost(cost), e.length_km, e.target.0)
    };

    *candidates
        .iter()
        .min_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(std::cmp::Ordering::Equal))
        .expect("candidates is non-empty")
}

/// thin wrapper giving f64 a total order for sort-key comparisons; turn
/// costs and lengths here are always finite.
#[derive(Clone, Copy, PartialEq)]
struct OrderedCost(f64);

impl PartialOrd for OrderedCost {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

fn resolve_start_node(graph: &RoadGraph, requested: Option<NodeId>) -> Result<(NodeId, StartMethod), RouteError> {
    if let Some(id) = requested {
        if graph.node(id).is_none() {
            return Err(RouteError::Config(format!(
                "start_node {id} is not present in the graph"
            )));
        }
        return Ok((id, StartMethod::UserSpecified));
    }

    let best = graph
        .node_ids()
        .max_by_key(|&id| {
            let degree = (graph.in_degree(id) + graph.out_degree(id)) as i64;
            (degree, -id.0)
        })
        .ok_or_else(|| RouteError::EmptyGraph("no nodes to start a circuit from".to_string()))?;
    Ok((best, StartMethod::Auto))
}
