use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use seismic_impact::adapters::{report, JsonEventCatalog};
use seismic_impact::core::comparator::rank_by_severity;
use seismic_impact::core::history::{
    closest_events, energy_ratio, historical_scenarios, DEFAULT_HISTORICAL_DEPTH_KM,
};
use seismic_impact::domain::ports::EventCatalog;
use seismic_impact::utils::logger;
use seismic_impact::{AttenuationModel, CalibrationConfig, DamageModel, ScenarioComparator};

#[derive(Parser)]
#[command(name = "compare-events")]
#[command(about = "Compare historical earthquakes as if they struck at a common distance")]
struct Args {
    /// JSON catalogue of historical events
    #[arg(short, long, default_value = "data/historical_events.json")]
    events: PathBuf,

    /// Epicentral distance to evaluate every event at, in km
    #[arg(short, long, default_value = "100")]
    distance: f64,

    /// Depth for events that do not record one
    #[arg(long, default_value_t = DEFAULT_HISTORICAL_DEPTH_KM)]
    default_depth: f64,

    /// Show the historical events closest to this magnitude
    #[arg(short, long)]
    magnitude: Option<f64>,

    /// Number of analogues to list with --magnitude
    #[arg(long, default_value = "3")]
    analogues: usize,

    /// Order the table by damage instead of catalogue order
    #[arg(long)]
    ranked: bool,

    /// TOML file overriding calibration constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let calibration = match &args.config {
        Some(path) => CalibrationConfig::from_file(path)
            .with_context(|| format!("Failed to load calibration {}", path.display()))?,
        None => CalibrationConfig::default(),
    };
    let attenuation = AttenuationModel::new(calibration.attenuation, calibration.felt_radius);
    let comparator = ScenarioComparator::new(DamageModel::new(calibration.damage, calibration.impact));

    let events = JsonEventCatalog::new(&args.events)
        .events()
        .with_context(|| format!("Failed to read event catalogue {}", args.events.display()))?;

    let scenarios = historical_scenarios(&events, args.distance, args.default_depth);
    let results = comparator
        .compare_with_model(&scenarios, &attenuation)
        .context("Scenario comparison failed")?;

    if args.json {
        report::write_json(&results, std::io::stdout().lock())?;
        println!();
    } else if args.ranked {
        let ranked: Vec<_> = rank_by_severity(&results).into_iter().cloned().collect();
        print!("{}", report::format_scenarios(&ranked));
    } else {
        print!("{}", report::format_scenarios(&results));
    }

    if let Some(magnitude) = args.magnitude {
        println!();
        println!("Closest historical analogues to M{:.1}:", magnitude);
        for event in closest_events(magnitude, &events, args.analogues) {
            let date = event
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unknown date".to_string());
            println!(
                "  {} (M{:.1}, {}): {:.1}x the energy",
                event.name,
                event.magnitude,
                date,
                energy_ratio(magnitude, event.magnitude)
            );
        }
    }

    Ok(())
}
