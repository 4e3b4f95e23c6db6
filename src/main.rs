use std::env;

use log::LevelFilter;
use simple_logger::SimpleLogger;
use sswind::batch_runner::BatchRunner;
use sswind::config::Config;

const DEFAULT_CONFIG: &str = "./data/config/sswind.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .with_module_level("sswind", LevelFilter::Debug)
        .init()?;

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    log::info!("Loading configuration from {}", config_path);

    let config = Config::from_file(&config_path)?;
    let runner = BatchRunner::new(config);
    let reports = runner.process()?;

    let outputs: usize = reports.iter().map(|r| r.outputs.len()).sum();
    log::info!("Processed {} scenes, wrote {} files", reports.len(), outputs);

    for report in &reports {
        if let Some(region) = &report.region {
            log::info!(
                "  {}: speed {:.2} +/- {:.2} m/s over {} cells",
                report.input.display(),
                region.speed_mean,
                region.speed_std,
                region.count
            );
        }
    }

    Ok(())
}
