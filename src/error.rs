use thiserror::Error;

use crate::model::NodeId;

/// errors surfaced by the routing core. per-element parse failures are
/// recovered and counted rather than raised here; these variants represent
/// conditions that abort the pipeline.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("failure reading input file {path}: {source}")]
    Input { path: String, source: String },
    #[error("structure of OSM data is invalid: {0}")]
    InvalidOsmData(String),
    #[error("invalid pipeline configuration: {0}")]
    Config(String),
    #[error("graph is empty after filtering: {0}")]
    EmptyGraph(String),
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
    #[error("internal invariant violated: {0}")]
    Internal(String),
    #[error("pipeline run cancelled")]
    Cancelled,
}

impl RouteError {
    pub fn missing_node(id: NodeId) -> RouteError {
        RouteError::Internal(format!("node {id} referenced but not present in graph"))
    }
}

/// errors surfaced by the CLI binary, wrapping the library error plus
/// argument/config-file handling failures that never reach the core.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("failure reading {0}: {1}")]
    Io(String, std::io::Error),
    #[error("failure decoding configuration {0}: {1}")]
    ConfigDecode(String, String),
    #[error("unsupported configuration file type: {0}")]
    UnsupportedConfigFormat(String),
}
