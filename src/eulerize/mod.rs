mod matching;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::model::{EdgeId, NodeId, Provenance, RoadGraph};

pub use matching::shortest_path_undirected;

/// diagnostic summary of stage 4.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EulerizationReport {
    pub edges_added: usize,
    pub unmatched_deficit: usize,
}

/// stage 4: adds duplicate edges so every node has equal in- and
/// out-degree. nodes with `indeg > outdeg` ("deficit": they need more
/// outgoing edges) are greedily matched to nodes with `outdeg > indeg`
/// ("surplus": they need more incoming edges) by duplicating the shortest
/// path between them in the undirected projection, largest imbalances
/// first. this is a heuristic approximation of the directed Chinese
/// Postman problem, not an optimal min-cost-flow solution.
pub fn eulerize(mut graph: RoadGraph) -> Result<(RoadGraph, EulerizationReport), RouteError> {
    let mut report = EulerizationReport::default();

    let mut deficit: Vec<(NodeId, i64)> = Vec::new();
    let mut surplus: Vec<(NodeId, i64)> = Vec::new();
    for id in graph.node_ids() {
        let diff = graph.in_degree(id) as i64 - graph.out_degree(id) as i64;
        if diff > 0 {
            deficit.push((id, diff));
        } else if diff < 0 {
            surplus.push((id, -diff));
        }
    }

    if deficit.is_empty() && surplus.is_empty() {
        log::info!("eulerize: graph already balanced, no edges added");
        return Ok((graph, report));
    }

    deficit.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    surplus.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut di = 0usize;
    let mut si = 0usize;
    while di < deficit.len() && si < surplus.len() {
        let (deficit_node, deficit_need) = deficit[di];
        let (surplus_node, surplus_need) = surplus[si];
        let k = deficit_need.min(surplus_need);

        match shortest_path_undirected(&graph, deficit_node, surplus_node) {
            Some(path) => {
                for _ in 0..k {
                    for pair in path.windows(2) {
                        let (u, v) = (pair[0], pair[1]);
                        let (length_km, bearing_deg, of) = edge_data_for_pair(&graph, u, v)?;
                        graph.add_edge(u, v, length_km, bearing_deg, Provenance::Duplicate { of })?;
                        report.edges_added += 1;
                    }
                }
                deficit[di].1 -= k;
                surplus[si].1 -= k;
                if deficit[di].1 == 0 {
                    di += 1;
                }
                if surplus[si].1 == 0 {
                    si += 1;
                }
            }
            None => {
                log::warn!(
                    "no undirected path from node {} to node {}, skipping",
                    deficit_node,
                    surplus_node
                );
                report.unmatched_deficit += 1;
                di += 1;
            }
        }
    }

    Ok((graph, report))
}

/// finds an existing edge to copy length/bearing/provenance-source from for
/// a new u->v duplicate: prefer an edge already oriented u->v, otherwise
/// the reverse edge v->u (whose length is identical and whose bearing is
/// recomputed from the node coordinates).
fn edge_data_for_pair(graph: &RoadGraph, u: NodeId, v: NodeId) -> Result<(f64, f64, EdgeId), RouteError> {
    if let Some(eid) = find_edge(graph, u, v) {
        let e = graph.edge(eid).expect("edge id from find_edge exists");
        return Ok((e.length_km, e.bearing_deg, eid));
    }
    if let Some(eid) = find_edge(graph, v, u) {
        let e = graph.edge(eid).expect("edge id from find_edge exists");
        let u_node = graph.node(u).ok_or_else(|| RouteError::missing_node(u))?;
        let v_node = graph.node(v).ok_or_else(|| RouteError::missing_node(v))?;
        let bearing = crate::geodesy::bearing_deg(u_node.lat, u_node.lon, v_node.lat, v_node.lon);
        return Ok((e.length_km, bearing, eid));
    }
    Err(RouteError::Internal(format!(
        "no edge between {u} and {v} to duplicate, despite appearing in a shortest path"
    )))
}

fn find_edge(graph: &RoadGraph, u: NodeId, v: NodeId) -> Option<EdgeId> {
    graph
        .out_edges(u)
        .iter()
        .find(|&&eid| graph.edge(eid).map(|e| e.target == v).unwrap_or(false))
        .copied()
}

#[allow(dead_code)]
fn total_imbalance(graph: &RoadGraph) -> HashMap<NodeId, i64> {
    graph
        .node_ids()
        .map(|id| (id, graph.in_degree(id) as i64 - graph.out_degree(id) as i64))
        .collect()
}
