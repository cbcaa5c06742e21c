pub mod client;
pub mod engine;
pub mod executor;

pub use client::{EngineClient, InspectError};
pub use engine::EngineError;
pub use executor::{EngineExecutor, RealExecutor};
