use std::collections::HashMap;
use std::path::Path;

use osmpbf::{Element, ElementReader};

use crate::error::RouteError;
use crate::model::{Node, NodeId, Way, WayId};

use super::filter::DriveabilityFilter;

/// reads a PBF extract, retaining nodes and driveable ways. malformed or
/// duplicate elements are skipped with a warning and counted rather than
/// aborting the run.
pub fn read_pbf(
    path: &Path,
    filter: &DriveabilityFilter,
) -> Result<(HashMap<NodeId, Node>, Vec<Way>, usize), RouteError> {
    let reader = ElementReader::from_path(path).map_err(|e| RouteError::Input {
        path: path.display().to_string(),
        source: e.to_string(),
    })?;

    let mut nodes: HashMap<NodeId, Node> = HashMap::new();
    let mut all_ways: Vec<Way> = Vec::new();
    let mut skipped = 0usize;

    reader
        .for_each(|element| match element {
            Element::Node(node) => {
                let id = NodeId(node.id());
                if nodes.contains_key(&id) {
                    log::warn!("node {id} occurs more than once in this file");
                }
                nodes.insert(id, Node::from(&node));
            }
            Element::DenseNode(node) => {
                let id = NodeId(node.id());
                if nodes.contains_key(&id) {
                    log::warn!("node {id} occurs more than once in this file");
                }
                nodes.insert(id, Node::from(&node));
            }
            Element::Way(way) => {
                let id = WayId(way.id());
                let mut node_ids: Vec<NodeId> = way.refs().map(NodeId).collect();
                node_ids.dedup();
                if node_ids.len() < 2 {
                    skipped += 1;
                    return;
                }
                let mut tags = HashMap::new();
                for (k, v) in way.tags() {
                    tags.insert(k.to_string(), v.trim().to_string());
                }
                all_ways.push(Way::new(id, node_ids, tags));
            }
            Element::Relation(_) => {}
        })
        .map_err(|e| RouteError::Input {
            path: path.display().to_string(),
            source: e.to_string(),
        })?;

    if nodes.is_empty() {
        return Err(RouteError::EmptyGraph("no nodes found in PBF extract".to_string()));
    }
    if all_ways.is_empty() {
        return Err(RouteError::EmptyGraph("no ways found in PBF extract".to_string()));
    }

    let ways: Vec<Way> = all_ways
        .into_iter()
        .filter(|w| {
            let ok = filter.accept(w);
            if !ok {
                skipped += 1;
            }
            ok
        })
        .collect();

    log::info!("read_pbf: {} nodes, {} driveable ways, {} skipped", nodes.len(), ways.len(), skipped);
    Ok((nodes, ways, skipped))
}
