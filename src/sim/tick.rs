//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one step per call.

use glam::DVec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::physics::{ATTRACTOR, Attractor, apply_gravity};
use super::spawn::spawn_tick;
use super::state::{GameEvent, GameMode, GameState};
use crate::consts::*;

/// Input edges for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Press started this tick (click/tap/key down)
    pub just_pressed: bool,
    /// Press ended this tick
    pub just_released: bool,
}

/// True once the rocket is beyond the expanded play box
#[inline]
pub fn rocket_out_of_bounds(pos: DVec2) -> bool {
    pos.x < -OFFSCREEN_MARGIN
        || pos.x > SCREEN_WIDTH + OFFSCREEN_MARGIN
        || pos.y < -OFFSCREEN_MARGIN
        || pos.y > SCREEN_HEIGHT + OFFSCREEN_MARGIN
}

/// Meteoroids survive only strictly inside the expanded play box
#[inline]
pub fn meteoroid_in_bounds(pos: DVec2) -> bool {
    pos.x > -OFFSCREEN_MARGIN
        && pos.x < SCREEN_WIDTH + OFFSCREEN_MARGIN
        && pos.y > -OFFSCREEN_MARGIN
        && pos.y < SCREEN_HEIGHT + OFFSCREEN_MARGIN
}

/// Advance the game state by one tick.
///
/// `state.events` is replaced with whatever this tick produced.
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    state.events.clear();
    state.ticks += 1;

    match state.mode {
        GameMode::Title => {
            if input.just_pressed {
                state.enter_mode(GameMode::Playing);
                state.thrust = false;
                state.events.push(GameEvent::Started);
                log::info!("Game started");
            }
        }
        GameMode::Playing => tick_playing(state, input, &ATTRACTOR, rng),
        GameMode::GameOver => {
            if input.just_pressed {
                state.reinitialize(rng);
                log::info!("Returned to title");
            }
        }
    }
}

fn tick_playing<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    attractor: &Attractor,
    rng: &mut R,
) {
    if state.ticks.is_multiple_of(PROGRESS_REPORT_INTERVAL_TICKS) {
        state.events.push(GameEvent::Progress {
            ticks: state.ticks,
            score: state.score,
        });
    }

    if input.just_pressed {
        state.thrust = true;
    }
    if input.just_released {
        state.thrust = false;
    }

    spawn_tick(state, attractor, rng);

    if state.thrust {
        state.rocket.thrust(THRUST_IMPULSE);
    }

    // Gravity from pre-move positions, then move everything
    apply_gravity(state, attractor);

    state.rocket.integrate();
    if rocket_out_of_bounds(state.rocket.pos) {
        log::debug!("Rocket left the play area, relaunching");
        state.relaunch_rocket(attractor);
        state.events.push(GameEvent::RocketPlaced);
    }

    for meteoroid in &mut state.meteoroids {
        meteoroid.integrate();
    }
    state.meteoroids.retain(|m| meteoroid_in_bounds(m.pos));

    // Popups created by this tick's hits start aging next tick
    let existing = state.effects.len();
    resolve_collisions(state, attractor, rng);

    for effect in &mut state.effects[..existing] {
        effect.elapsed += 1;
    }
    state.effects.retain(|e| !e.is_expired());
}
