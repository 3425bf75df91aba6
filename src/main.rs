//! route_planner - plan a route between two points on a street grid
//!
//! Points are given as percentages of the map extent, either on the command
//! line or interactively. The street grid comes from `route_planner.toml`
//! (or `--config`).

use clap::Parser;
use route_planner::config::{Config, ConfigSource};
use route_planner::input::{parse_percentage, prompt_percentage};
use route_planner::{Result, RoutePlanner, RouteReport, SearchStatus};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "route_planner", about = "A* route planning on a street grid")]
struct Args {
    /// Start x, percent of map width
    #[arg(value_parser = percentage)]
    start_x: Option<f32>,
    /// Start y, percent of map height
    #[arg(value_parser = percentage)]
    start_y: Option<f32>,
    /// End x, percent of map width
    #[arg(value_parser = percentage)]
    end_x: Option<f32>,
    /// End y, percent of map height
    #[arg(value_parser = percentage)]
    end_y: Option<f32>,

    /// Config file (default: ./route_planner.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the route report as JSON
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(short, long)]
    output: Option<String>,
}

fn percentage(text: &str) -> std::result::Result<f32, String> {
    parse_percentage(text).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) = match &args.config {
        Some(path) => (Config::load_from(path)?, ConfigSource::File(path.clone())),
        None => Config::load(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();
    source.log();

    let (start_x, start_y, end_x, end_y) = match (args.start_x, args.start_y, args.end_x, args.end_y) {
        (Some(sx), Some(sy), Some(ex), Some(ey)) => (sx, sy, ex, ey),
        (None, None, None, None) => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            (
                prompt_percentage("start x", &mut input, &mut output)?,
                prompt_percentage("start y", &mut input, &mut output)?,
                prompt_percentage("end x", &mut input, &mut output)?,
                prompt_percentage("end y", &mut input, &mut output)?,
            )
        }
        _ => {
            return Err(route_planner::PlannerError::Input(
                "give all four coordinates or none".to_string(),
            ))
        }
    };

    info!(
        "Street grid {}x{}, {} m across, {} closed street(s)",
        config.map.rows,
        config.map.cols,
        config.map.metric_scale,
        config.map.closed_streets.len()
    );
    let mut model = config.map.build_model()?;

    let mut planner =
        RoutePlanner::new(&mut model, start_x, start_y, end_x, end_y)?.with_mode(config.planner.expansion);
    if planner.a_star_search() == SearchStatus::Exhausted {
        warn!("No route between the selected points");
    }

    let report = RouteReport::from_planner(&planner);
    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        println!("{}", report.summary());
        for node in &report.path {
            println!("  {}", node);
        }
    }

    if let Some(path) = &args.output {
        report.save_to_file(path)?;
        info!("Saved route report to {}", path);
    }

    Ok(())
}
