use std::path::Path;

use crate::components::ComponentsReport;
use crate::config::PipelineConfig;
use crate::emit::stats::{RouteStats, TurnStats};
use crate::eulerize::EulerizationReport;
use crate::hierholzer::{StartMethod, TraversalReport};

/// renders the structured, human-readable report artifact. section order
/// mirrors the reference report generator: guarantees, included/excluded
/// tags and component selection, route statistics, turn analysis,
/// eulerization additions, and start-node method.
#[allow(clippy::too_many_arguments)]
pub fn render_report(
    source_path: &Path,
    gpx_path: &Path,
    config: &PipelineConfig,
    components: &ComponentsReport,
    route_stats: &RouteStats,
    turn_stats: &TurnStats,
    eulerization: &EulerizationReport,
    traversal: &TraversalReport,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# Generated {} from {}\n\n",
        gpx_path.display(),
        source_path.display()
    ));

    out.push_str("## 1. What the GPX route guarantees\n\n");
    out.push_str("- **Single continuous track (no breaks):** YES - a single <trk> with a single <trkseg>.\n");
    out.push_str("  The Eulerian circuit closes (start node = end node); waypoints are emitted in strict\n");
    out.push_str("  circuit order with no gaps.\n\n");
    out.push_str("- **Right-side arm collection:** every driveable segment is added as a bidirectional\n");
    out.push_str("  edge pair (forward and reverse), and the circuit traverses both exactly once, so each\n");
    out.push_str("  segment is driven once in each direction.\n\n");
    out.push_str("- **Reduced left turns where possible:** at junctions with multiple unused continuations,\n");
    out.push_str("  the traversal picks the lowest-turn-cost edge (right turns cheapest, then straight,\n");
    out.push_str("  then left, then U-turns).\n\n");

    out.push_str("## 2. What was included / excluded\n\n");
    let mut highways: Vec<&str> = config.highway_include.iter().map(|s| s.as_str()).collect();
    highways.sort();
    out.push_str(&format!("- **Included highway tags:** {}\n", highways.join(", ")));
    out.push_str("- **Excluded conditions:**\n");
    for cond in &config.excluded_conditions {
        out.push_str(&format!("  - {cond}\n"));
    }
    out.push('\n');
    out.push_str(&format!(
        "- **Connected components found:** {}\n",
        components.total_components
    ));
    out.push_str(&format!(
        "- **Component chosen:** largest ({} nodes)\n",
        components.largest_size
    ));

    let excluded_segments = components.total_unique_segments.saturating_sub(route_stats.unique_segments);
    out.push_str(&format!(
        "- **Unique segments total (all components):** {}\n",
        components.total_unique_segments
    ));
    out.push_str(&format!(
        "- **Segments routed (chosen component):** {}\n",
        route_stats.unique_segments
    ));
    out.push_str(&format!(
        "- **Segments excluded (disconnected):** {}\n\n",
        excluded_segments
    ));

    out.push_str("## 3. Route statistics\n\n");
    out.push_str(&format!(
        "- **Directed traversals:** {} (should be ~= 2 x unique segments)\n",
        route_stats.directed_traversals
    ));
    out.push_str(&format!(
        "- **Approx distance:** {:.4} km\n",
        route_stats.total_distance_km
    ));
    out.push_str(&format!(
        "- **Estimated drive time:** {:.1} minutes ({:.2} hours at {:.1} km/h average)\n\n",
        route_stats.estimated_drive_time_minutes, route_stats.estimated_drive_time_hours, config.average_speed_kmh
    ));

    out.push_str("### Turn analysis\n\n");
    out.push_str(&format!("- **Right turns:** {}\n", turn_stats.right_turns));
    out.push_str(&format!("- **Left turns:** {}\n", turn_stats.left_turns));
    out.push_str(&format!("- **Straight:** {}\n", turn_stats.straight));
    out.push_str(&format!("- **U-turns (>150 degrees):** {}\n\n", turn_stats.u_turns));

    if eulerization.edges_added > 0 {
        out.push_str("### Eulerian circuit construction\n\n");
        out.push_str(&format!(
            "- **Edges added for Eulerian property:** {}\n",
            eulerization.edges_added
        ));
        out.push_str("  (directed Chinese Postman matching heuristic)\n\n");
    }
    if eulerization.unmatched_deficit > 0 {
        out.push_str(&format!(
            "- **Unmatched imbalance (no path found):** {}\n\n",
            eulerization.unmatched_deficit
        ));
    }

    out.push_str("### Start point selection\n\n");
    let start_desc = match traversal.start_method {
        StartMethod::UserSpecified => format!("user-specified node {}", traversal.start_node),
        StartMethod::Auto => format!(
            "node {} (highest total degree among candidates)",
            traversal.start_node
        ),
    };
    out.push_str(&format!("- **Start point:** {start_desc}\n\n"));

    out.push_str("## Notes\n\n");
    out.push_str(&format!(
        "- One-way restrictions {} per configuration\n",
        if config.ignore_oneway {
            "ignored (Option A, preserves the 'twice' traversal for right-side collection)"
        } else {
            "honored (Option B)"
        }
    ));
    out.push_str(&format!("- Output saved to: {}\n", gpx_path.display()));

    out
}
