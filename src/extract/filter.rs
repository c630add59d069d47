use std::collections::HashSet;

use crate::model::Way;

/// non-driveable highway classes excluded regardless of the include set.
const NON_DRIVEABLE: &[&str] = &["footway", "cycleway", "steps", "path", "track", "pedestrian"];

const EXCLUDED_SERVICE: &[&str] = &["parking_aisle", "parking"];
const EXCLUDED_ACCESS: &[&str] = &["private", "no", "restricted"];

/// the driveability predicate applied to every retained way during
/// extraction.
pub struct DriveabilityFilter {
    highway_include: HashSet<String>,
}

impl DriveabilityFilter {
    pub fn new(highway_include: HashSet<String>) -> DriveabilityFilter {
        DriveabilityFilter { highway_include }
    }

    pub fn accept(&self, way: &Way) -> bool {
        if way.nodes.len() < 2 {
            return false;
        }
        let highway = match way.highway() {
            Some(h) => h,
            None => return false,
        };
        if NON_DRIVEABLE.contains(&highway) {
            return false;
        }
        if !self.highway_include.contains(highway) {
            return false;
        }
        if let Some(service) = way.tag("service") {
            if EXCLUDED_SERVICE.contains(&service) {
                return false;
            }
        }
        if let Some(access) = way.tag("access") {
            if EXCLUDED_ACCESS.contains(&access) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeId, WayId};
    use std::collections::HashMap;

    fn way(highway: &str, extra: &[(&str, &str)]) -> Way {
        let mut tags = HashMap::new();
        tags.insert("highway".to_string(), highway.to_string());
        for (k, v) in extra {
            tags.insert(k.to_string(), v.to_string());
        }
        Way::new(WayId(1), vec![NodeId(1), NodeId(2)], tags)
    }

    fn default_filter() -> DriveabilityFilter {
        DriveabilityFilter::new(
            ["residential", "unclassified", "service", "tertiary", "secondary"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    #[test]
    fn accepts_residential() {
        assert!(default_filter().accept(&way("residential", &[])));
    }

    #[test]
    fn rejects_footway() {
        assert!(!default_filter().accept(&way("footway", &[])));
    }

    #[test]
    fn rejects_unlisted_highway() {
        assert!(!default_filter().accept(&way("motorway", &[])));
    }

    #[test]
    fn rejects_private_access() {
        assert!(!default_filter().accept(&way("residential", &[("access", "private")])));
    }

    #[test]
    fn rejects_parking_aisle_service() {
        assert!(!default_filter().accept(&way("service", &[("service", "parking_aisle")])));
    }

    #[test]
    fn rejects_single_node_way() {
        let mut w = way("residential", &[]);
        w.nodes = vec![NodeId(1)];
        assert!(!default_filter().accept(&w));
    }
}
