use std::io::Write;
use std::path::Path;

use crate::error::RouteError;
use crate::model::{Circuit, RoadGraph};

/// serializes the circuit as a single-track, single-segment GPX 1.1 file:
/// the first edge's source, then every edge's target, in circuit order. no
/// `<time>` elements are written so that repeated runs of the same input
/// produce byte-identical output.
pub fn circuit_to_gpx(graph: &RoadGraph, circuit: &Circuit) -> Result<String, RouteError> {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<gpx version=\"1.1\" creator=\"streetsweep\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n");
    out.push_str("  <trk>\n");
    out.push_str("    <name>Street Sweeping Route</name>\n");
    out.push_str("    <trkseg>\n");

    if !circuit.is_empty() {
        let first_edge = graph
            .edge(circuit.edges[0])
            .ok_or_else(|| RouteError::Internal("circuit references missing edge".to_string()))?;
        let first_node = graph
            .node(first_edge.source)
            .ok_or_else(|| RouteError::missing_node(first_edge.source))?;
        write_trkpt(&mut out, first_node.lat, first_node.lon);

        for &eid in &circuit.edges {
            let edge = graph
                .edge(eid)
                .ok_or_else(|| RouteError::Internal("circuit references missing edge".to_string()))?;
            let node = graph
                .node(edge.target)
                .ok_or_else(|| RouteError::missing_node(edge.target))?;
            write_trkpt(&mut out, node.lat, node.lon);
        }
    }

    out.push_str("    </trkseg>\n");
    out.push_str("  </trk>\n");
    out.push_str("</gpx>\n");
    Ok(out)
}

fn write_trkpt(out: &mut String, lat: f64, lon: f64) {
    out.push_str(&format!("      <trkpt lat=\"{:.7}\" lon=\"{:.7}\"/>\n", lat, lon));
}

/// writes `content` to `path` atomically: a temp file in the same directory
/// is written first, then renamed into place, so a reader never observes a
/// partially-written artifact.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), RouteError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp_name = format!(
        ".{}.tmp",
        path.file_name().and_then(|f| f.to_str()).unwrap_or("streetsweep-output")
    );
    let tmp_path = dir.join(tmp_name);

    let mut file = std::fs::File::create(&tmp_path).map_err(|e| RouteError::Input {
        path: tmp_path.display().to_string(),
        source: e.to_string(),
    })?;
    file.write_all(content.as_bytes()).map_err(|e| RouteError::Input {
        path: tmp_path.display().to_string(),
        source: e.to_string(),
    })?;
    file.sync_all().map_err(|e| RouteError::Input {
        path: tmp_path.display().to_string(),
        source: e.to_string(),
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| RouteError::Input {
        path: path.display().to_string(),
        source: e.to_string(),
    })?;
    Ok(())
}
