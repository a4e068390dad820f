//! Circle collision detection and its scoring/elimination rules

use glam::DVec2;
use rand::Rng;

use super::physics::Attractor;
use super::state::{Effect, GameEvent, GameMode, GameState};

/// Strict circle overlap (touching circles do not collide)
#[inline]
pub fn circles_overlap(a: DVec2, ra: f64, b: DVec2, rb: f64) -> bool {
    a.distance_squared(b) < (ra + rb).powi(2)
}

/// Score for intercepting a meteoroid at `distance` from the attractor.
///
/// Closer to the attractor is safer and worth less.
pub fn score_for_distance(distance: f64) -> u32 {
    if distance < 100.0 {
        1
    } else if distance < 150.0 {
        2
    } else {
        3
    }
}

/// What the collision pass did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Points awarded for an interception (if any)
    pub intercepted: Option<u32>,
    /// A meteoroid reached the attractor
    pub meteoroid_impact: bool,
    /// The rocket crashed into the attractor
    pub rocket_impact: bool,
}

impl CollisionOutcome {
    pub fn is_game_over(&self) -> bool {
        self.meteoroid_impact || self.rocket_impact
    }
}

/// Rocket vs meteoroids: the first overlapping meteoroid in spawn order is
/// removed, scored and replaced by an effect; the rocket is relaunched.
/// At most one interception per tick.
pub fn resolve_rocket_hits<R: Rng + ?Sized>(
    state: &mut GameState,
    attractor: &Attractor,
    rng: &mut R,
) -> Option<u32> {
    let rocket = &state.rocket;
    let idx = state
        .meteoroids
        .iter()
        .position(|m| circles_overlap(m.pos, m.radius, rocket.pos, rocket.radius))?;

    let meteoroid = state.meteoroids.remove(idx);
    let plus = score_for_distance(attractor.distance_to(meteoroid.pos));

    state.relaunch_rocket(attractor);
    state.score += u64::from(plus);
    state.effects.push(Effect::new(meteoroid.pos, plus, rng));
    state.events.push(GameEvent::MeteoroidHit { plus });

    Some(plus)
}

/// Meteoroids vs attractor: the first meteoroid to reach the attractor ends
/// the game. Only the struck meteoroid is kept for the final frame.
pub fn resolve_meteoroid_impacts(state: &mut GameState, attractor: &Attractor) -> bool {
    let Some(idx) = state
        .meteoroids
        .iter()
        .position(|m| circles_overlap(m.pos, m.radius, attractor.pos, attractor.radius))
    else {
        return false;
    };

    let struck = state.meteoroids.swap_remove(idx);
    state.meteoroids.clear();
    state.meteoroids.push(struck);
    true
}

/// Rocket vs attractor: clears the meteoroid field
pub fn resolve_rocket_impact(state: &mut GameState, attractor: &Attractor) -> bool {
    let rocket = &state.rocket;
    if !circles_overlap(rocket.pos, rocket.radius, attractor.pos, attractor.radius) {
        return false;
    }
    state.meteoroids.clear();
    true
}

/// Run the full collision pass after integration.
///
/// Enters `GameOver` (emitting a single event) if either attractor rule fires.
pub fn resolve_collisions<R: Rng + ?Sized>(
    state: &mut GameState,
    attractor: &Attractor,
    rng: &mut R,
) -> CollisionOutcome {
    let outcome = CollisionOutcome {
        intercepted: resolve_rocket_hits(state, attractor, rng),
        meteoroid_impact: resolve_meteoroid_impacts(state, attractor),
        rocket_impact: resolve_rocket_impact(state, attractor),
    };

    if outcome.is_game_over() && state.mode != GameMode::GameOver {
        let (ticks, score) = (state.ticks, state.score);
        state.enter_mode(GameMode::GameOver);
        state.events.push(GameEvent::GameOver { ticks, score });
        log::info!("Game over after {ticks} ticks with score {score}");
    }

    outcome
}
