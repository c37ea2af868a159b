//! Core application primitives (clock, orchestrator, wiring, HTTP surface)

pub mod analysis;
pub mod bootstrap;
pub mod clock;
pub mod http;

pub use analysis::*;
pub use clock::*;
