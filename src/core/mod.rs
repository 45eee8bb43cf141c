pub mod builder;
pub mod errors;
pub mod event;
pub mod event_scheduler;
pub mod execution;
pub mod network;
pub mod trajectory;
pub mod types;
