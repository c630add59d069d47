pub mod components;
pub mod config;
pub mod emit;
pub mod error;
pub mod eulerize;
pub mod extract;
pub mod geodesy;
pub mod graph_builder;
pub mod hierholzer;
pub mod model;
pub mod pipeline;
pub mod progress;

pub use config::PipelineConfig;
pub use error::RouteError;
pub use pipeline::{run_pipeline, PipelineSummary};
pub use progress::{CancellationToken, ProgressEvent, ProgressSink, Stage};
