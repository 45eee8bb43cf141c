pub mod core;
pub mod scenario;

// Re-export commonly used types
pub use crate::core::builder::{NetworkBuilder, Transfer};
pub use crate::core::errors::{ConfigurationError, RangeError, SimulationError};
pub use crate::core::event::Event;
pub use crate::core::execution::{simulate, ConcurrencyMode, SimulationConfig, SimulationEngine};
pub use crate::core::network::Network;
pub use crate::core::trajectory::Trajectories;
pub use crate::core::types::{Entity, EntityId, EntityKind};
