use serde::{Deserialize, Serialize};

/// Identifier of a mass holder (vertex or arc) in a material network
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub(crate) String);

impl EntityId {
    /// Create a new entity ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Conventional id for the arc carrying mass from `source` to `destination`
    pub fn arc_between(source: &EntityId, destination: &EntityId) -> Self {
        Self(format!("{}->{}", source.0, destination.0))
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Role of an entity in the network.
///
/// Both kinds are stepped identically; the kind is only used to group
/// series into stocks and flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Storage node accumulating mass
    Vertex,
    /// Transfer channel holding mass in transit
    Arc,
}

/// A mass holder with its initial stock in grams
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub initial_mass: f64,
}

impl Entity {
    pub fn vertex(id: impl Into<EntityId>, initial_mass: f64) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Vertex,
            initial_mass,
        }
    }

    pub fn arc(id: impl Into<EntityId>, initial_mass: f64) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Arc,
            initial_mass,
        }
    }

    pub fn is_arc(&self) -> bool {
        self.kind == EntityKind::Arc
    }
}

/// Endpoints of an arc entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcEndpoints {
    pub arc: EntityId,
    pub source: EntityId,
    pub destination: EntityId,
}
