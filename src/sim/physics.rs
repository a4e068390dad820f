//! Inverse-square gravity around a single fixed attractor
//!
//! Only the attractor exerts force. Bodies do not attract each other.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::*;

/// The fixed gravitational body at the screen center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attractor {
    pub pos: DVec2,
    pub mass: f64,
    pub radius: f64,
}

/// The process-wide attractor
pub const ATTRACTOR: Attractor = Attractor {
    pos: DVec2::new(ATTRACTOR_X, ATTRACTOR_Y),
    mass: ATTRACTOR_MASS,
    radius: ATTRACTOR_RADIUS,
};

impl Attractor {
    /// Velocity delta for one tick on a body at `body_pos`
    #[inline]
    pub fn velocity_delta(&self, body_pos: DVec2) -> DVec2 {
        gravity_acceleration(self.mass, self.pos, body_pos)
    }

    /// Distance from the attractor center
    #[inline]
    pub fn distance_to(&self, pos: DVec2) -> f64 {
        self.pos.distance(pos)
    }

    /// Speed of a circular orbit at `radius` from the center
    pub fn circular_orbit_speed(&self, radius: f64) -> f64 {
        (self.mass / radius).sqrt()
    }
}

/// Acceleration of a body toward the attractor: `mass / d²`, directed along
/// atan2 of the position delta.
///
/// Distance is not clamped. A body exactly at the attractor center yields a
/// non-finite result; collision with the attractor surface removes bodies long
/// before that point.
pub fn gravity_acceleration(attractor_mass: f64, attractor_pos: DVec2, body_pos: DVec2) -> DVec2 {
    let delta = attractor_pos - body_pos;
    let a = attractor_mass / delta.length_squared();
    let theta = delta.y.atan2(delta.x);
    DVec2::new(a * theta.cos(), a * theta.sin())
}

/// Apply one tick of gravity to the rocket and every meteoroid.
///
/// All deltas are evaluated from current positions; the caller integrates
/// positions afterwards in a separate pass.
pub fn apply_gravity(state: &mut GameState, attractor: &Attractor) {
    let rocket_dv = attractor.velocity_delta(state.rocket.pos);
    state.rocket.vel += rocket_dv;

    for meteoroid in &mut state.meteoroids {
        meteoroid.vel += attractor.velocity_delta(meteoroid.pos);
    }
}
