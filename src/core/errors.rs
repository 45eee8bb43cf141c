use super::types::EntityId;
use thiserror::Error;

/// Malformed network topology or event table
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("Event references unknown entity '{0}'")]
    UnknownEntity(EntityId),

    #[error("Entity '{0}' is declared more than once")]
    DuplicateEntity(EntityId),

    #[error("Initial mass of entity '{id}' is not finite: {mass}")]
    NonFiniteMass { id: EntityId, mass: f64 },

    #[error("Event on entity '{entity}' at step {step} has a non-finite delta")]
    NonFiniteDelta { entity: EntityId, step: u64 },

    #[error("Stream '{stream}' arrival step overflows: sort_at {sort_at} + flow_time {flow_time}")]
    ArrivalOverflow {
        stream: String,
        sort_at: u64,
        flow_time: u64,
    },

    #[error("Arc '{arc}' endpoint '{endpoint}' is not a declared vertex")]
    ArcEndpointNotVertex { arc: EntityId, endpoint: EntityId },

    #[error("Two events target entity '{entity}' at step {step}")]
    EventCollision { entity: EntityId, step: u64 },

    #[error("Stream '{stream}' references unknown part '{part}'")]
    UnknownPart { stream: String, part: String },
}

/// Event trigger time outside the simulated horizon
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("Simulation horizon must be at least one step")]
    EmptyHorizon,

    #[error("Event on entity '{entity}' at step {step} is outside horizon [0, {horizon})")]
    EventOutOfHorizon {
        entity: EntityId,
        step: u64,
        horizon: u64,
    },
}

/// Any failure of a simulation run
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Failed to build rayon thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SimulationError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, SimulationError::Configuration(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self, SimulationError::Range(_))
    }
}
