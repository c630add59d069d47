use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use kdam::{term, Bar, BarExt};
use streetsweep::error::CliError;
use streetsweep::{run_pipeline, CancellationToken, PipelineConfig, ProgressEvent};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct StreetSweepArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// build a turn-aware sweeping circuit over an OSM extract
    Route {
        #[arg(long, help = "path to a .osm.pbf or .osm/.xml extract")]
        input: String,
        #[arg(long, help = "directory to write the GPX track and report into")]
        output_dir: String,
        #[arg(long, help = "path to a TOML or JSON pipeline configuration file")]
        config: Option<String>,
        #[arg(long, help = "OSM node id to start the circuit from")]
        start_node: Option<i64>,
        #[arg(long, help = "honor oneway tags instead of treating every segment as bidirectional")]
        honor_oneway: bool,
        #[arg(long, help = "disable the right-turn traversal preference")]
        no_right_turn_preference: bool,
    },
}

/// layers a `PipelineConfig` the way the CLI needs to, but the library
/// itself never reaches for: crate defaults, then an optional file
/// (`--config`, any format the `config` crate recognizes by extension),
/// then `STREETSWEEP_*` environment variables on top.
fn load_pipeline_config(config_path: Option<&str>) -> Result<PipelineConfig, CliError> {
    let defaults_json = serde_json::to_string(&PipelineConfig::default())
        .map_err(|e| CliError::Route(streetsweep::RouteError::Internal(e.to_string())))?;

    let mut builder = config::Config::builder()
        .add_source(config::File::from_str(&defaults_json, config::FileFormat::Json));
    if let Some(f) = config_path {
        log::info!("reading pipeline configuration from {f}");
        builder = builder.add_source(config::File::with_name(f));
    }
    builder = builder.add_source(
        config::Environment::with_prefix("STREETSWEEP")
            .list_separator(",")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .map_err(|e| CliError::ConfigDecode(config_path.unwrap_or("<defaults>").to_string(), e.to_string()))?;
    cfg.try_deserialize()
        .map_err(|e| CliError::ConfigDecode(config_path.unwrap_or("<defaults>").to_string(), e.to_string()))
}

pub fn run(app: &App) -> Result<(), CliError> {
    env_logger::init();
    match app {
        App::Route {
            input,
            output_dir,
            config,
            start_node,
            honor_oneway,
            no_right_turn_preference,
        } => {
            let mut pipeline_config = load_pipeline_config(config.as_deref())?;
            if *honor_oneway {
                pipeline_config.ignore_oneway = false;
            }
            if *no_right_turn_preference {
                pipeline_config.prefer_right_turns = false;
            }
            if let Some(id) = start_node {
                pipeline_config.start_node = Some(*id);
            }

            let input_path = Path::new(input);
            let output_path = PathBuf::from(output_dir);

            term::hide_cursor()
                .map_err(|e| CliError::Route(streetsweep::RouteError::Internal(e.to_string())))?;
            let mut bar = Bar::builder()
                .desc(input.as_str())
                .total(100)
                .unit("%")
                .build()
                .map_err(|e| CliError::Route(streetsweep::RouteError::Internal(e)))?;
            let mut last_percent: u8 = 0;

            let mut sink = |event: ProgressEvent| {
                let delta = event.percent.saturating_sub(last_percent);
                if delta > 0 {
                    let _ = bar.update(delta as usize);
                    last_percent = event.percent;
                }
                log::info!("[{:>3}%] {}", event.percent, event.message);
            };

            let cancel = CancellationToken::new();
            let summary = run_pipeline(
                input_path,
                &output_path,
                &pipeline_config,
                Some(&mut sink),
                Some(&cancel),
            )?;
            eprintln!();
            eprintln!("wrote {}", summary.gpx_path.display());
            eprintln!("wrote {}", summary.report_path.display());
            Ok(())
        }
    }
}

fn main() {
    let args = StreetSweepArguments::parse();
    match run(&args.app) {
        Ok(_) => {}
        Err(e) => {
            log::error!("streetsweep failed: {e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
