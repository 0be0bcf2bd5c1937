//! CLI library components for HabitLens.

pub mod logging;
pub mod pipeline;
pub mod types;
