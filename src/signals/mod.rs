//! Multi-factor signal generation.

pub mod engine;
pub mod factors;
pub mod scoring;

pub use engine::SignalEngine;
pub use factors::*;
pub use scoring::*;
