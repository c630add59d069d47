mod filter;
mod pbf_reader;
mod xml_reader;

pub use filter::DriveabilityFilter;

use std::collections::HashMap;
use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::RouteError;
use crate::model::{Node, NodeId, Segment, Way};

/// result of stage 1: the retained node table, the driveable ways, the
/// derived segment list, and a count of skipped/malformed elements.
pub struct ExtractResult {
    pub nodes: HashMap<NodeId, Node>,
    pub ways: Vec<Way>,
    pub segments: Vec<Segment>,
    pub skipped_count: usize,
}

/// stage 1: parse `path` (dispatching on extension) into a node table and a
/// driveable-way list, then flatten ways into consecutive-node segments.
pub fn extract(path: &Path, config: &PipelineConfig) -> Result<ExtractResult, RouteError> {
    let filter = DriveabilityFilter::new(config.highway_include.clone());

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase());

    let (nodes, ways, skipped_count) = match ext.as_deref() {
        Some("pbf") => pbf_reader::read_pbf(path, &filter)?,
        Some("osm") | Some("xml") => xml_reader::read_xml(path, &filter)?,
        other => {
            return Err(RouteError::UnsupportedFormat(format!(
                "unrecognized extension: {:?}",
                other
            )))
        }
    };

    let segments = build_segments(&ways);
    log::info!("extract: {} segments from {} ways", segments.len(), ways.len());

    Ok(ExtractResult {
        nodes,
        ways,
        segments,
        skipped_count,
    })
}

fn build_segments(ways: &[Way]) -> Vec<Segment> {
    let mut segments = Vec::new();
    for way in ways {
        for pair in way.nodes.windows(2) {
            segments.push(Segment {
                way_id: way.id,
                from: pair[0],
                to: pair[1],
                oneway: way.oneway().map(|s| s.to_string()),
                highway: way.highway().map(|s| s.to_string()),
            });
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WayId;

    #[test]
    fn build_segments_splits_multi_node_ways() {
        let mut tags = HashMap::new();
        tags.insert("highway".to_string(), "residential".to_string());
        let way = Way::new(WayId(1), vec![NodeId(1), NodeId(2), NodeId(3)], tags);
        let segments = build_segments(&[way]);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].from, NodeId(1));
        assert_eq!(segments[0].to, NodeId(2));
        assert_eq!(segments[1].from, NodeId(2));
        assert_eq!(segments[1].to, NodeId(3));
    }

    #[test]
    fn unsupported_extension_errors() {
        let path = Path::new("data.shp");
        let err = extract(path, &PipelineConfig::default());
        assert!(matches!(err, Err(RouteError::UnsupportedFormat(_))));
    }
}
