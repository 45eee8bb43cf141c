use super::errors::ConfigurationError;
use super::event::Event;
use super::types::{ArcEndpoints, Entity, EntityId, EntityKind};
use std::collections::HashMap;

/// Fixed material network: entities, arc topology and the event table.
///
/// Immutable once constructed. Construction only checks shape (ids exist,
/// no duplicates, finite masses); time-related checks happen when the
/// network is simulated against a horizon.
#[derive(Debug, Clone)]
pub struct Network {
    /// Entities in declaration order
    entities: Vec<Entity>,
    /// Entity id -> position in `entities`
    index: HashMap<EntityId, usize>,
    arcs: Vec<ArcEndpoints>,
    events: Vec<Event>,
}

impl Network {
    /// Create a network of plain vertices from an initial mass mapping
    pub fn new<K, I>(initial_masses: I, events: Vec<Event>) -> Result<Self, ConfigurationError>
    where
        K: Into<EntityId>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let entities = initial_masses
            .into_iter()
            .map(|(id, mass)| Entity::vertex(id, mass))
            .collect();
        Self::with_topology(entities, Vec::new(), events)
    }

    /// Create a network with explicit entity kinds and arc endpoints
    pub fn with_topology(
        entities: Vec<Entity>,
        arcs: Vec<ArcEndpoints>,
        events: Vec<Event>,
    ) -> Result<Self, ConfigurationError> {
        let mut index = HashMap::with_capacity(entities.len());
        for (position, entity) in entities.iter().enumerate() {
            if !entity.initial_mass.is_finite() {
                return Err(ConfigurationError::NonFiniteMass {
                    id: entity.id.clone(),
                    mass: entity.initial_mass,
                });
            }
            if index.insert(entity.id.clone(), position).is_some() {
                return Err(ConfigurationError::DuplicateEntity(entity.id.clone()));
            }
        }

        for endpoints in &arcs {
            match index.get(&endpoints.arc) {
                Some(&position) if entities[position].kind == EntityKind::Arc => {}
                _ => return Err(ConfigurationError::UnknownEntity(endpoints.arc.clone())),
            }
            for endpoint in [&endpoints.source, &endpoints.destination] {
                let is_vertex = index
                    .get(endpoint)
                    .map_or(false, |&position| entities[position].kind == EntityKind::Vertex);
                if !is_vertex {
                    return Err(ConfigurationError::ArcEndpointNotVertex {
                        arc: endpoints.arc.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
        }

        for event in &events {
            if !index.contains_key(&event.entity_id) {
                return Err(ConfigurationError::UnknownEntity(event.entity_id.clone()));
            }
            if !event.delta.is_finite() {
                return Err(ConfigurationError::NonFiniteDelta {
                    entity: event.entity_id.clone(),
                    step: event.time_step,
                });
            }
        }

        Ok(Self {
            entities,
            index,
            arcs,
            events,
        })
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.index.get(id).map(|&position| &self.entities[position])
    }

    pub fn initial_mass(&self, id: &EntityId) -> Option<f64> {
        self.entity(id).map(|entity| entity.initial_mass)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn arcs(&self) -> &[ArcEndpoints] {
        &self.arcs
    }

    /// Sum of all initial masses, in entity id order
    pub fn total_initial_mass(&self) -> f64 {
        let mut entities: Vec<&Entity> = self.entities.iter().collect();
        entities.sort_by(|a, b| a.id.cmp(&b.id));
        entities.iter().map(|entity| entity.initial_mass).sum()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
