//! Procedural meteoroid spawning
//!
//! Meteoroids enter from a random point just outside the screen, aimed near
//! (but never straight at) the attractor.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_8, PI};

use glam::DVec2;
use rand::Rng;

use super::physics::Attractor;
use super::state::{GameState, Meteoroid};
use crate::consts::*;
use crate::{heading_of, polar_to_cartesian};

/// Spawning happens once every `SPAWN_INTERVAL_TICKS` of play
#[inline]
pub fn should_spawn(ticks: u64) -> bool {
    ticks.is_multiple_of(SPAWN_INTERVAL_TICKS)
}

/// Uniform point on the perimeter of the screen expanded by the off-screen margin.
///
/// The perimeter is walked top, right, bottom, left.
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    let w = (SCREEN_WIDTH + OFFSCREEN_MARGIN * 2.0) as u64;
    let h = (SCREEN_HEIGHT + OFFSCREEN_MARGIN * 2.0) as u64;
    let p = rng.random_range(0..(w * 2 + h * 2));

    if p < w {
        DVec2::new(p as f64, -OFFSCREEN_MARGIN)
    } else if p < w + h {
        DVec2::new(SCREEN_WIDTH + OFFSCREEN_MARGIN, (p - w) as f64)
    } else if p < w + h + w {
        DVec2::new((p - w - h) as f64, SCREEN_HEIGHT + OFFSCREEN_MARGIN)
    } else {
        DVec2::new(-OFFSCREEN_MARGIN, (p - w - h - w) as f64)
    }
}

/// Heading offset in (-π/2, π/2) with magnitude strictly above π/8.
///
/// Uniform over that band; out-of-band samples are redrawn.
pub fn heading_offset<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let dt = PI * rng.random::<f64>() - FRAC_PI_2;
        if dt.abs() > FRAC_PI_8 && dt.abs() < FRAC_PI_2 {
            return dt;
        }
    }
}

/// Create a new meteoroid on the spawn perimeter
pub fn spawn_meteoroid<R: Rng + ?Sized>(rng: &mut R, attractor: &Attractor) -> Meteoroid {
    let pos = spawn_position(rng);
    let theta = heading_of(attractor.pos - pos) + heading_offset(rng);
    Meteoroid::new(pos, polar_to_cartesian(METEOROID_SPEED, theta))
}

/// Spawner step for the current play tick. Returns true if a meteoroid was added.
pub fn spawn_tick<R: Rng + ?Sized>(
    state: &mut GameState,
    attractor: &Attractor,
    rng: &mut R,
) -> bool {
    if !should_spawn(state.ticks) {
        return false;
    }
    let meteoroid = spawn_meteoroid(rng, attractor);
    log::debug!(
        "Meteoroid spawned at ({:.0}, {:.0}) on tick {}",
        meteoroid.pos.x,
        meteoroid.pos.y,
        state.ticks
    );
    state.meteoroids.push(meteoroid);
    true
}
