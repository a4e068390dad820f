//! Platform abstraction layer
//!
//! Turns raw host input into the per-tick edges the simulation consumes.

pub mod input;

pub use input::TouchTracker;
