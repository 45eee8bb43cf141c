//! Disassembly and sorting of glucose meters in a robotic cell.
//!
//! Usage: `glucose_meter [SCENARIO.json] [--json]`
//!
//! Without a scenario file the reference cell is simulated. `--json` prints
//! the trajectory report for a plotting tool instead of the summary table.

use log::info;
use massflow::scenario::{ConfigLoadError, DisassemblyConfig};
use massflow::{Network, SimulationEngine};

const USAGE: &str = "Usage: glucose_meter [SCENARIO.json] [--json]";

#[derive(Debug, PartialEq)]
enum Command {
    Run { path: Option<String>, json: bool },
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let mut json = false;
    let mut path = None;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => return Ok(Command::Help),
            flag if flag.starts_with('-') => return Err(format!("Unknown option '{}'", flag)),
            _ if path.is_some() => return Err(format!("Unexpected argument '{}'", arg)),
            _ => path = Some(arg),
        }
    }
    Ok(Command::Run { path, json })
}

fn load(path: Option<&str>) -> Result<(DisassemblyConfig, Network), ConfigLoadError> {
    let config = match path {
        Some(path) => {
            info!("Loading scenario from {}", path);
            DisassemblyConfig::from_path(path)?
        }
        None => DisassemblyConfig::default(),
    };
    let network = config.build_network()?;
    Ok((config, network))
}

fn main() -> Result<(), String> {
    env_logger::init();

    let (path, json) = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run { path, json }) => (path, json),
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", USAGE);
            return Err(message);
        }
    };

    let (config, network) = load(path.as_deref()).map_err(|e| e.to_string())?;
    let trajectories = SimulationEngine::new(config.simulation_config())
        .run(&network)
        .map_err(|e| e.to_string())?;

    if json {
        let report = trajectories
            .to_json(config.sample_period)
            .map_err(|e| e.to_string())?;
        println!("{}", report);
        return Ok(());
    }

    println!(
        "{} x {} ({:.1} g each), {} steps of {} s",
        config.batches_in_storage,
        config.product.name,
        config.product.total_mass(),
        trajectories.horizon(),
        config.sample_period
    );
    println!();
    println!("{:<20} {:>10} {:>10}", "stock", "initial", "final");
    for (id, series) in trajectories.stocks() {
        let initial = network.initial_mass(id).unwrap_or(series[0]);
        println!("{:<20} {:>10.2} {:>10.2}", id, initial, series[series.len() - 1]);
    }
    println!();
    println!("{:<20} {:>10}", "flow", "peak");
    for (id, series) in trajectories.flows() {
        let peak = series.iter().copied().fold(0.0, f64::max);
        println!("{:<20} {:>10.2}", id, peak);
    }
    println!();
    println!(
        "total mass {:.2} g, max deviation {:e} g",
        trajectories.initial_total(),
        trajectories.conservation_error()
    );

    Ok(())
}
