//! Cosmic Velocity - an orbital arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, spawning, collisions, game state)
//! - `game`: Controller that drives the simulation and notifies audio/telemetry sinks
//! - `audio`: Sound cue sink
//! - `telemetry`: Fire-and-forget gameplay event sink
//! - `platform`: Input edge detection
//! - `settings`: Runtime configuration

pub mod audio;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use game::Game;
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Name reported to the telemetry sink
    pub const GAME_NAME: &str = "cosmic-velocity";

    /// Simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Visible screen area
    pub const SCREEN_WIDTH: f64 = 640.0;
    pub const SCREEN_HEIGHT: f64 = 480.0;
    /// Bodies live inside the screen expanded by this margin on every side
    pub const OFFSCREEN_MARGIN: f64 = 50.0;

    /// Attractor ("Earth") sits at the screen center
    pub const ATTRACTOR_X: f64 = SCREEN_WIDTH / 2.0;
    pub const ATTRACTOR_Y: f64 = SCREEN_HEIGHT / 2.0;
    pub const ATTRACTOR_MASS: f64 = 100.0;
    pub const ATTRACTOR_RADIUS: f64 = 20.0;

    /// Rocket orbits this far above the attractor surface
    pub const ROCKET_ALTITUDE: f64 = 30.0;
    pub const ROCKET_RADIUS: f64 = 10.0;
    pub const ROCKET_MASS: f64 = 1.0;
    /// Velocity gained per tick while thrusting (along current heading)
    pub const THRUST_IMPULSE: f64 = 0.01;

    /// Meteoroid defaults
    pub const METEOROID_RADIUS: f64 = 10.0;
    pub const METEOROID_SPEED: f64 = 0.5;
    /// Ticks between meteoroid spawns
    pub const SPAWN_INTERVAL_TICKS: u64 = 60;

    /// Ticks between "playing" telemetry reports
    pub const PROGRESS_REPORT_INTERVAL_TICKS: u64 = 600;

    /// Score popup lifetime
    pub const EFFECT_LIFETIME_TICKS: u32 = 60;
    pub const EFFECT_PARTICLES: usize = 6;

    /// Decorative background stars
    pub const STAR_COUNT: usize = 100;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Direction of a vector in radians (atan2)
#[inline]
pub fn heading_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_heading_round_trip() {
        let v = polar_to_cartesian(2.0, 0.75);
        assert!((v.length() - 2.0).abs() < 1e-9);
        assert!((heading_of(v) - 0.75).abs() < 1e-9);
    }
}
