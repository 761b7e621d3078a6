use std::path::PathBuf;

use color_eyre::Result;
use planar_barnes_hut::{csv::write_csv_positions, LogProgress, Simulation, SimulationConfig};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<()> {
    color_eyre::install()?;
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| demos.join("binary_star.yaml"), PathBuf::from);
    let config = SimulationConfig::from_path(&config_path)?;
    let generations = config.parameters.generations;

    let snapshots = Simulation::new(config.system, config.parameters)?
        .observer(LogProgress::new(generations / 10, generations))
        .simulate()?;

    let first = &snapshots[0];
    let last = &snapshots[snapshots.len() - 1];
    log::info!(
        "momentum drift: {:e}",
        (last.total_momentum() - first.total_momentum()).norm()
    );

    let out = std::env::temp_dir().join("binary_star.csv");
    write_csv_positions(&snapshots, &out)?;
    log::info!("positions written to {}", out.display());

    Ok(())
}
