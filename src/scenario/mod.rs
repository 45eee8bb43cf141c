//! Product disassembly scenarios expressed as material networks.

pub mod composition;
pub mod disassembly;

pub use composition::{Part, ProductComposition};
pub use disassembly::{ConfigLoadError, DisassemblyConfig, SortingStream, Timing};
