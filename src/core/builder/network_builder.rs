use crate::core::errors::ConfigurationError;
use crate::core::event::Event;
use crate::core::network::Network;
use crate::core::types::{ArcEndpoints, Entity, EntityId};
use log::debug;
use std::collections::HashMap;

/// Movement of a batch of mass along an arc.
///
/// Leaves the source vertex and enters the arc at `depart`, leaves the arc
/// and enters the destination vertex at `arrive`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub arc: EntityId,
    pub quantity: f64,
    pub depart: u64,
    pub arrive: u64,
}

impl Transfer {
    /// The four paired events of this transfer; each outflow has an equal inflow
    pub fn events(&self, endpoints: &ArcEndpoints) -> [Event; 4] {
        [
            Event::outflow(endpoints.source.clone(), self.depart, self.quantity),
            Event::inflow(self.arc.clone(), self.depart, self.quantity),
            Event::outflow(self.arc.clone(), self.arrive, self.quantity),
            Event::inflow(endpoints.destination.clone(), self.arrive, self.quantity),
        ]
    }
}

/// Imperative API for declaring a material network
///
/// Vertices and arcs are declared first; transfers along declared arcs are
/// expanded into events. Shape checks run in [`NetworkBuilder::build`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    entities: Vec<Entity>,
    arcs: HashMap<EntityId, ArcEndpoints>,
    arc_order: Vec<EntityId>,
    events: Vec<Event>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a storage vertex
    pub fn add_vertex(&mut self, id: impl Into<EntityId>, initial_mass: f64) -> EntityId {
        let id = id.into();
        self.entities.push(Entity::vertex(id.clone(), initial_mass));
        id
    }

    /// Declare an empty arc from `source` to `destination`
    pub fn add_arc(&mut self, source: &EntityId, destination: &EntityId) -> EntityId {
        self.add_arc_with_mass(source, destination, 0.0)
    }

    /// Declare an arc already holding `initial_mass` in transit
    pub fn add_arc_with_mass(
        &mut self,
        source: &EntityId,
        destination: &EntityId,
        initial_mass: f64,
    ) -> EntityId {
        let id = EntityId::arc_between(source, destination);
        self.entities.push(Entity::arc(id.clone(), initial_mass));
        let endpoints = ArcEndpoints {
            arc: id.clone(),
            source: source.clone(),
            destination: destination.clone(),
        };
        if self.arcs.insert(id.clone(), endpoints).is_none() {
            self.arc_order.push(id.clone());
        }
        id
    }

    /// Move `quantity` along `arc`, departing at `depart` and arriving at `arrive`
    pub fn transfer(
        &mut self,
        arc: &EntityId,
        quantity: f64,
        depart: u64,
        arrive: u64,
    ) -> Result<(), ConfigurationError> {
        let endpoints = self
            .arcs
            .get(arc)
            .ok_or_else(|| ConfigurationError::UnknownEntity(arc.clone()))?;

        let transfer = Transfer {
            arc: arc.clone(),
            quantity,
            depart,
            arrive,
        };
        debug!(
            "Transfer of {} g along '{}' departing {} arriving {}",
            quantity, arc, depart, arrive
        );
        self.events.extend(transfer.events(endpoints));
        Ok(())
    }

    /// Add a single raw event
    pub fn schedule_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Validate and freeze the network
    pub fn build(self) -> Result<Network, ConfigurationError> {
        let mut arcs = self.arcs;
        let arcs = self
            .arc_order
            .iter()
            .filter_map(|id| arcs.remove(id))
            .collect();
        Network::with_topology(self.entities, arcs, self.events)
    }
}
