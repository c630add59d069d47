use geo::Point;
use serde::{Deserialize, Serialize};

use super::NodeId;

/// a single OSM node retained after extraction. immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Node {
        Node { id, lat, lon }
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl From<&osmpbf::elements::Node<'_>> for Node {
    fn from(node: &osmpbf::elements::Node) -> Self {
        Node {
            id: NodeId(node.id()),
            lat: node.lat(),
            lon: node.lon(),
        }
    }
}

impl From<&osmpbf::dense::DenseNode<'_>> for Node {
    fn from(node: &osmpbf::dense::DenseNode<'_>) -> Self {
        Node {
            id: NodeId(node.id()),
            lat: node.lat(),
            lon: node.lon(),
        }
    }
}
