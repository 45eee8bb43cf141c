use super::config::{ConcurrencyMode, SimulationConfig};
use crate::core::errors::SimulationError;
use crate::core::event_scheduler::{EntityEvents, EventSchedule};
use crate::core::network::Network;
use crate::core::trajectory::Trajectories;
use crate::core::types::Entity;
use log::{debug, info, warn};
use rayon::prelude::*;

const CONSERVATION_TOLERANCE: f64 = 1e-9;

/// Runs the zero-order-hold stepping of a network over a fixed horizon
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Sequential engine for `horizon` steps
    pub fn sequential(horizon: u64) -> Self {
        Self::new(SimulationConfig::new(horizon))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate every entity of `network`.
    ///
    /// The whole event table is validated before stepping; on error no
    /// series is produced.
    pub fn run(&self, network: &Network) -> Result<Trajectories, SimulationError> {
        let horizon = self.config.horizon;
        let schedule = EventSchedule::build(network.events(), horizon)?;

        debug!(
            "Stepping {} entities over {} steps ({:?})",
            network.len(),
            horizon,
            self.config.concurrency_mode
        );

        let series = match self.config.concurrency_mode {
            ConcurrencyMode::Sequential => network
                .entities()
                .iter()
                .map(|entity| step_entity_of(entity, &schedule))
                .collect::<Vec<_>>(),
            ConcurrencyMode::Rayon => {
                let step_all = || {
                    network
                        .entities()
                        .par_iter()
                        .map(|entity| step_entity_of(entity, &schedule))
                        .collect::<Vec<_>>()
                };
                match self.config.thread_pool_size {
                    Some(threads) => rayon::ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .build()?
                        .install(step_all),
                    None => step_all(),
                }
            }
        };

        let mut trajectories = Trajectories::new(horizon);
        for (entity, series) in network.entities().iter().zip(series) {
            trajectories.insert(entity.id.clone(), entity.kind, entity.initial_mass, series);
        }

        let error = trajectories.conservation_error();
        if trajectories.is_conserved(CONSERVATION_TOLERANCE) {
            info!(
                "Simulated {} entities, {} events, {} steps; total mass {:.6} g",
                trajectories.len(),
                schedule.len(),
                horizon,
                trajectories.initial_total()
            );
        } else {
            warn!("Total mass not conserved: max deviation {:e} g", error);
        }
        for (id, step) in trajectories.negative_masses() {
            warn!("Entity '{}' holds negative mass from step {}", id, step);
        }

        Ok(trajectories)
    }
}

/// Simulate `network` sequentially over `n_final` steps
pub fn simulate(network: &Network, n_final: u64) -> Result<Trajectories, SimulationError> {
    SimulationEngine::sequential(n_final).run(network)
}

fn step_entity_of(entity: &Entity, schedule: &EventSchedule) -> Vec<f64> {
    step_entity(entity.initial_mass, schedule.horizon(), schedule.events_for(&entity.id))
}

/// Zero-order hold: mass changes only at scheduled steps and is carried
/// forward otherwise.
pub fn step_entity(initial_mass: f64, horizon: u64, events: Option<&EntityEvents>) -> Vec<f64> {
    let mut current = initial_mass;
    (0..horizon)
        .map(|step| {
            if let Some(delta) = events.and_then(|events| events.get(&step)) {
                current += delta;
            }
            current
        })
        .collect()
}
