//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Caller-supplied RNG only
//! - Stable iteration order (meteoroids stay in spawn order)
//! - No rendering, audio or telemetry dependencies; side effects are reported as `GameEvent`s

pub mod collision;
pub mod physics;
pub mod preview;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, circles_overlap, resolve_collisions, score_for_distance};
pub use physics::{ATTRACTOR, Attractor, apply_gravity, gravity_acceleration};
pub use spawn::{heading_offset, should_spawn, spawn_meteoroid, spawn_position};
pub use state::{
    Effect, GameEvent, GameMode, GameState, Meteoroid, ORBIT_HISTORY_LEN, OrbitHistory, Rocket,
    Star,
};
pub use tick::{TickInput, tick};
