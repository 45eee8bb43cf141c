use super::types::EntityId;
use serde::{Deserialize, Serialize};

/// Instantaneous mass change applied to one entity at one step.
///
/// Positive `delta` is an inflow, negative an outflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub entity_id: EntityId,
    pub time_step: u64,
    pub delta: f64,
}

impl Event {
    pub fn new(entity_id: impl Into<EntityId>, time_step: u64, delta: f64) -> Self {
        Self {
            entity_id: entity_id.into(),
            time_step,
            delta,
        }
    }

    pub fn inflow(entity_id: impl Into<EntityId>, time_step: u64, quantity: f64) -> Self {
        Self::new(entity_id, time_step, quantity)
    }

    pub fn outflow(entity_id: impl Into<EntityId>, time_step: u64, quantity: f64) -> Self {
        Self::new(entity_id, time_step, -quantity)
    }
}
