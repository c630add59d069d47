use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::components::{self, ComponentsReport};
use crate::config::PipelineConfig;
use crate::emit::{circuit_to_gpx, report, route_statistics, turn_statistics, write_atomic, RouteStats, TurnStats};
use crate::error::RouteError;
use crate::eulerize::{self, EulerizationReport};
use crate::extract;
use crate::graph_builder;
use crate::hierholzer::{self, TraversalReport};
use crate::progress::{self, CancellationToken, ProgressSink, Stage};

/// everything measured across a single `run_pipeline` invocation, returned
/// to the caller alongside the two artifact paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub gpx_path: PathBuf,
    pub report_path: PathBuf,
    pub skipped_elements: usize,
    pub components: ComponentsReport,
    pub eulerization: EulerizationReport,
    pub traversal: TraversalReport,
    pub route_stats: RouteStats,
    pub turn_stats: TurnStats,
}

/// the single synchronous entry point: parses `input_path`, runs the full
/// six-stage pipeline, and writes the GPX track and report into
/// `output_dir`, named after the input file's stem.
pub fn run_pipeline(
    input_path: &Path,
    output_dir: &Path,
    config: &PipelineConfig,
    mut progress: Option<ProgressSink>,
    cancel: Option<&CancellationToken>,
) -> Result<PipelineSummary, RouteError> {
    let check_cancelled = |cancel: Option<&CancellationToken>| -> Result<(), RouteError> {
        if cancel.map(|c| c.is_cancelled()).unwrap_or(false) {
            return Err(RouteError::Cancelled);
        }
        Ok(())
    };

    log::info!("  (((1))) extracting OSM nodes and driveable ways");
    progress::emit(&mut progress, Stage::Parsing, 10, "parsing OSM extract", None);
    let extraction = extract::extract(input_path, config)?;
    eprintln!();
    progress::emit(
        &mut progress,
        Stage::Parsing,
        20,
        "parsed OSM extract",
        Some(json!({ "nodes": extraction.nodes.len(), "ways": extraction.ways.len() })),
    );
    check_cancelled(cancel)?;

    log::info!("  (((2))) building directed multigraph");
    let full_graph = graph_builder::build_graph(extraction.nodes, &extraction.segments, config)?;
    eprintln!();
    progress::emit(
        &mut progress,
        Stage::GraphBuilt,
        40,
        "built road graph",
        Some(json!({ "edges": full_graph.edge_count() })),
    );
    check_cancelled(cancel)?;

    log::info!("  (((3))) selecting largest weakly connected component");
    let (component_graph, components_report) = components::select_largest_component(&full_graph)?;
    eprintln!();
    progress::emit(
        &mut progress,
        Stage::ComponentsAnalyzed,
        60,
        "selected largest component",
        Some(json!({
            "total_components": components_report.total_components,
            "largest_size": components_report.largest_size,
        })),
    );
    check_cancelled(cancel)?;

    log::info!("  (((4))) eulerizing graph");
    let (eulerized_graph, eulerization_report) = eulerize::eulerize(component_graph)?;
    eprintln!();
    progress::emit(
        &mut progress,
        Stage::Eulerized,
        80,
        "eulerized graph",
        Some(json!({ "edges_added": eulerization_report.edges_added })),
    );
    check_cancelled(cancel)?;

    log::info!("  (((5))) building turn-aware Eulerian circuit");
    let (circuit, traversal_report) = hierholzer::build_circuit(
        &eulerized_graph,
        config.start_node_id(),
        config.prefer_right_turns,
    )?;
    eprintln!();
    progress::emit(
        &mut progress,
        Stage::TraversalComplete,
        90,
        "built circuit",
        Some(json!({ "edges": circuit.len(), "splices": traversal_report.splice_count })),
    );
    check_cancelled(cancel)?;

    log::info!("  (((6))) emitting GPX track and report");
    let route_stats = route_statistics(&eulerized_graph, &circuit, config.average_speed_kmh);
    let turn_stats = turn_statistics(&eulerized_graph, &circuit);

    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("route");
    std::fs::create_dir_all(output_dir).map_err(|e| RouteError::Input {
        path: output_dir.display().to_string(),
        source: e.to_string(),
    })?;
    let gpx_path = output_dir.join(format!("{stem}.gpx"));
    let report_path = output_dir.join(format!("{stem}.report.md"));

    let gpx_content = circuit_to_gpx(&eulerized_graph, &circuit)?;
    write_atomic(&gpx_path, &gpx_content)?;

    let report_content = report::render_report(
        input_path,
        &gpx_path,
        config,
        &components_report,
        &route_stats,
        &turn_stats,
        &eulerization_report,
        &traversal_report,
    );
    write_atomic(&report_path, &report_content)?;
    eprintln!();

    progress::emit(
        &mut progress,
        Stage::Emitted,
        100,
        "wrote GPX and report",
        None,
    );

    Ok(PipelineSummary {
        gpx_path,
        report_path,
        skipped_elements: extraction.skipped_count,
        components: components_report,
        eulerization: eulerization_report,
        traversal: traversal_report,
        route_stats,
        turn_stats,
    })
}
