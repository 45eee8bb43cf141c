pub mod config;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::{ConcurrencyMode, SimulationConfig};
pub use simulation_engine::{simulate, SimulationEngine};
