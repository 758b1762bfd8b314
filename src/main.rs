use std::fs::File;
use std::io::{self, Write};

use clap::Parser;
use seismic_impact::adapters::{report, CsvSiteProvider};
use seismic_impact::config::cli::OutputFormat;
use seismic_impact::domain::ports::SiteProvider;
use seismic_impact::utils::{logger, validation::Validate};
use seismic_impact::{CliConfig, ImpactError, ImpactPipeline, ImpactReport};

fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "Impact assessment failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.severity().exit_code());
    }
}

fn run(config: &CliConfig) -> Result<(), ImpactError> {
    let calibration = config.calibration()?;
    let mut pipeline = ImpactPipeline::new(&calibration);
    if let Some(gdp) = config.gdp_per_capita {
        pipeline = pipeline.with_gdp_per_capita(gdp);
    }

    let mut sites = match &config.sites {
        Some(path) => CsvSiteProvider::new(path).sites()?,
        None => Vec::new(),
    };
    if let Some(site) = config.inline_site()? {
        sites.push(site);
    }

    let impact = pipeline.assess_sites(&config.source(), &sites)?;

    match &config.output {
        Some(path) => {
            let file = File::create(path)?;
            write_report(&impact, config.format, file)?;
            tracing::info!("Report saved to: {}", path.display());
        }
        None => write_report(&impact, config.format, io::stdout().lock())?,
    }
    Ok(())
}

fn write_report<W: Write>(impact: &ImpactReport, format: OutputFormat, mut writer: W) -> Result<(), ImpactError> {
    match format {
        OutputFormat::Text => writer.write_all(report::format_report(impact).as_bytes())?,
        OutputFormat::Json => {
            report::write_json(impact, &mut writer)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => report::write_csv(impact, &mut writer)?,
    }
    Ok(())
}
