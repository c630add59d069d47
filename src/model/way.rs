use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{NodeId, WayId};

/// a driveable OSM way: an ordered node reference list plus its raw tag map.
/// tags beyond `highway`/`oneway`/`service`/`access` are retained for
/// diagnostics but not interpreted by the graph builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Way {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
    pub tags: HashMap<String, String>,
}

impl Way {
    pub fn new(id: WayId, nodes: Vec<NodeId>, tags: HashMap<String, String>) -> Way {
        Way { id, nodes, tags }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(|s| s.as_str())
    }

    pub fn highway(&self) -> Option<&str> {
        self.tag("highway")
    }

    pub fn oneway(&self) -> Option<&str> {
        self.tag("oneway")
    }
}
