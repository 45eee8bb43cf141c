use super::errors::{ConfigurationError, RangeError, SimulationError};
use super::event::Event;
use super::types::EntityId;
use log::debug;
use std::collections::HashMap;

/// Per-entity table of step -> delta
pub type EntityEvents = HashMap<u64, f64>;

/// Validated event index for one horizon.
///
/// Built once before stepping so that a bad schedule fails before any
/// series is produced. Lookups are O(1) per (entity, step).
#[derive(Debug, Default)]
pub struct EventSchedule {
    horizon: u64,
    by_entity: HashMap<EntityId, EntityEvents>,
    event_count: usize,
}

impl EventSchedule {
    /// Validate `events` against `horizon` and index them.
    ///
    /// Range is checked over the whole table first, then collisions.
    pub fn build(events: &[Event], horizon: u64) -> Result<Self, SimulationError> {
        if horizon == 0 {
            return Err(RangeError::EmptyHorizon.into());
        }

        if let Some(event) = events.iter().find(|event| event.time_step >= horizon) {
            return Err(RangeError::EventOutOfHorizon {
                entity: event.entity_id.clone(),
                step: event.time_step,
                horizon,
            }
            .into());
        }

        let mut by_entity: HashMap<EntityId, EntityEvents> = HashMap::new();
        for event in events {
            let slots = by_entity.entry(event.entity_id.clone()).or_default();
            if slots.insert(event.time_step, event.delta).is_some() {
                return Err(ConfigurationError::EventCollision {
                    entity: event.entity_id.clone(),
                    step: event.time_step,
                }
                .into());
            }
        }

        debug!(
            "Indexed {} events over {} entities for horizon {}",
            events.len(),
            by_entity.len(),
            horizon
        );

        Ok(Self {
            horizon,
            by_entity,
            event_count: events.len(),
        })
    }

    pub fn horizon(&self) -> u64 {
        self.horizon
    }

    /// Events scheduled for one entity, if any
    pub fn events_for(&self, entity: &EntityId) -> Option<&EntityEvents> {
        self.by_entity.get(entity)
    }

    /// Delta scheduled for `entity` at `step`
    pub fn delta_at(&self, entity: &EntityId, step: u64) -> Option<f64> {
        self.by_entity.get(entity)?.get(&step).copied()
    }

    pub fn len(&self) -> usize {
        self.event_count
    }

    pub fn is_empty(&self) -> bool {
        self.event_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lookup() {
        let events = vec![Event::new("A", 5, -10.0), Event::new("B", 5, 10.0)];
        let schedule = EventSchedule::build(&events, 10).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.delta_at(&"A".into(), 5), Some(-10.0));
        assert_eq!(schedule.delta_at(&"A".into(), 4), None);
        assert_eq!(schedule.delta_at(&"C".into(), 5), None);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let err = EventSchedule::build(&[], 0).unwrap_err();
        assert!(matches!(err, SimulationError::Range(RangeError::EmptyHorizon)));
    }

    #[test]
    fn test_event_at_horizon_rejected() {
        let events = vec![Event::new("A", 10, 1.0)];
        let err = EventSchedule::build(&events, 10).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Range(RangeError::EventOutOfHorizon { step: 10, horizon: 10, .. })
        ));
    }

    #[test]
    fn test_range_checked_before_collisions() {
        let events = vec![
            Event::new("Y", 2, 1.0),
            Event::new("Y", 2, 1.0),
            Event::new("Y", 50, 1.0),
        ];
        let err = EventSchedule::build(&events, 10).unwrap_err();
        assert!(err.is_range());
    }

    #[test]
    fn test_collision_rejected() {
        let events = vec![Event::new("Y", 2, 1.0), Event::new("Y", 2, -1.0)];
        let err = EventSchedule::build(&events, 5).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Configuration(ConfigurationError::EventCollision { step: 2, .. })
        ));
    }
}
