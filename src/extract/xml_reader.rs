use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use osmio::obj_types::StringOSMObj;
use osmio::{OSMObjBase, OSMReader};

use crate::error::RouteError;
use crate::model::{Node, NodeId, Way, WayId};

use super::filter::DriveabilityFilter;

/// reads an OSM 0.6 XML extract, retaining nodes and driveable ways. mirrors
/// [`super::pbf_reader::read_pbf`]'s recovery policy: malformed elements are
/// skipped with a warning and counted, never fatal.
pub fn read_xml(
    path: &Path,
    filter: &DriveabilityFilter,
) -> Result<(HashMap<NodeId, Node>, Vec<Way>, usize), RouteError> {
    let file = File::open(path).map_err(|e| RouteError::Input {
        path: path.display().to_string(),
        source: e.to_string(),
    })?;
    let mut reader = osmio::xml::XMLReader::new(file);

    let mut nodes: HashMap<NodeId, Node> = HashMap::new();
    let mut all_ways: Vec<Way> = Vec::new();
    let mut skipped = 0usize;

    for obj in reader.objects() {
        match obj {
            StringOSMObj::Node(n) => {
                let id = NodeId(n.id());
                match n.lat_lon_f64() {
                    Some((lat, lon)) => {
                        if nodes.contains_key(&id) {
                            log::warn!("node {id} occurs more than once in this file");
                        }
                        nodes.insert(id, Node::new(id, lat, lon));
                    }
                    None => {
                        log::warn!("node {id} missing lat/lon, ignored");
                        skipped += 1;
                    }
                }
            }
            StringOSMObj::Way(w) => {
                let id = WayId(w.id());
                let mut node_ids: Vec<NodeId> = w.nodes().iter().map(|&n| NodeId(n)).collect();
                node_ids.dedup();
                if node_ids.len() < 2 {
                    skipped += 1;
                    continue;
                }
                let mut tags = HashMap::new();
                for (k, v) in w.tags() {
                    tags.insert(k.to_string(), v.trim().to_string());
                }
                all_ways.push(Way::new(id, node_ids, tags));
            }
            StringOSMObj::Relation(_) => {}
        }
    }

    if nodes.is_empty() {
        return Err(RouteError::EmptyGraph("no nodes found in OSM XML extract".to_string()));
    }
    if all_ways.is_empty() {
        return Err(RouteError::EmptyGraph("no ways found in OSM XML extract".to_string()));
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

    log::info!("read_xml: {} nodes, {} driveable ways, {} skipped", nodes.len(), ways.len(), skipped);
    Ok((nodes, ways, skipped))
}
