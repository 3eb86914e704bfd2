//! QG field plotting tool.
//!
//! Plots streamfunction and potential vorticity from QG model grid files,
//! or increments against a base state, optionally as animated gifs.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use qg_common::PlotError;
use qg_plot::{AnimationConfig, ImageMagickJoiner, Orchestrator, PlotRequest, RunConfig};
use renderer::RenderConfig;

#[derive(Parser, Debug)]
#[command(name = "qg-plot")]
#[command(about = "Plot QG fields or increments if a base file is given")]
struct Args {
    /// Grid file path (with a %id% pattern when --gif is used)
    filepath: String,

    /// Base grid file; plots increments against it
    #[arg(short, long)]
    basefilepath: Option<PathBuf>,

    /// Output path base (with a %id% pattern when --gif is used)
    #[arg(short, long)]
    output: Option<String>,

    /// Overlay wind arrows
    #[arg(short = 'w', long)]
    plotwind: bool,

    /// Comma-separated ids substituted for %id% to build an animated gif
    #[arg(short, long)]
    gif: Option<String>,

    /// Comma-separated variables to plot (x, q)
    #[arg(long, env = "QG_PLOT_VARIABLES")]
    variables: Option<String>,

    /// JSON file overriding figure rendering settings
    #[arg(long, env = "QG_PLOT_RENDER_CONFIG")]
    render_config: Option<PathBuf>,

    /// Program used to join frames into a gif
    #[arg(long, env = "QG_PLOT_JOINER", default_value = "convert")]
    joiner: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing; stdout is reserved for the artifact report
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let config = RunConfig::from_request(PlotRequest {
        filepath: args.filepath,
        basefilepath: args.basefilepath,
        output: args.output,
        plot_wind: args.plotwind,
        gif_ids: args.gif,
        variables: args.variables,
    })?;

    let render_config = match &args.render_config {
        Some(path) => RenderConfig::from_file(path).map_err(PlotError::from)?,
        None => RenderConfig::default(),
    };

    let joiner = ImageMagickJoiner::new(AnimationConfig {
        program: args.joiner,
        ..AnimationConfig::default()
    });

    info!(
        snapshots = config.snapshots.len(),
        animate = config.animate,
        increment = config.is_increment(),
        "Starting qg-plot"
    );

    let report = Orchestrator::new(config, render_config, joiner)?.run()?;
    info!(artifacts = report.artifact_count(), "Finished");
    Ok(())
}
