//! API handlers module

pub mod graph;
pub mod health;
pub mod publications;
pub mod reference;
pub mod stats;
