//! Open-loop replay of a planned key stream.

pub mod engine;

pub use engine::*;
