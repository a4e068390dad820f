//! Game state and core simulation types
//!
//! Everything the renderer reads each tick lives here.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::physics::{ATTRACTOR, Attractor};
use super::preview;
use crate::consts::*;
use crate::{heading_of, polar_to_cartesian};

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for a press
    Title,
    /// Active gameplay
    Playing,
    /// Attractor was hit; waiting for a press to return to the title
    GameOver,
}

/// Something that happened during a tick that the outside world should hear about.
///
/// Collected in `GameState::events` and drained by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Title -> Playing
    Started,
    /// Periodic progress report while playing
    Progress { ticks: u64, score: u64 },
    /// The rocket left the play area and was relaunched
    RocketPlaced,
    /// The rocket intercepted a meteoroid
    MeteoroidHit { plus: u32 },
    /// Playing -> GameOver
    GameOver { ticks: u64, score: u64 },
    /// State was reset to the title screen
    Initialized,
}

/// The player's rocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    pub pos: DVec2,
    pub vel: DVec2,
    pub mass: f64,
    pub radius: f64,
}

impl Rocket {
    /// A rocket directly above the attractor on a circular-orbit velocity
    pub fn launch(attractor: &Attractor) -> Self {
        let orbit_radius = attractor.radius + ROCKET_ALTITUDE;
        let speed = attractor.circular_orbit_speed(orbit_radius);
        Self {
            pos: attractor.pos - DVec2::new(0.0, orbit_radius),
            vel: DVec2::new(speed, 0.0),
            mass: ROCKET_MASS,
            radius: ROCKET_RADIUS,
        }
    }

    /// Direction of travel (radians)
    #[inline]
    pub fn heading(&self) -> f64 {
        heading_of(self.vel)
    }

    /// Add one tick of thrust along the current heading
    pub fn thrust(&mut self, impulse: f64) {
        self.vel += polar_to_cartesian(impulse, self.heading());
    }

    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Number of past positions kept per meteoroid
pub const ORBIT_HISTORY_LEN: usize = 300;

/// Fixed-capacity ring buffer of past positions, indexed by `age % capacity`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<DVec2>", into = "Vec<DVec2>")]
pub struct OrbitHistory {
    points: Box<[DVec2]>,
}

impl TryFrom<Vec<DVec2>> for OrbitHistory {
    type Error = String;

    fn try_from(points: Vec<DVec2>) -> Result<Self, Self::Error> {
        if points.len() != ORBIT_HISTORY_LEN {
            return Err(format!(
                "orbit history needs {} points, got {}",
                ORBIT_HISTORY_LEN,
                points.len()
            ));
        }
        Ok(Self {
            points: points.into_boxed_slice(),
        })
    }
}

impl From<OrbitHistory> for Vec<DVec2> {
    fn from(history: OrbitHistory) -> Self {
        history.points.into_vec()
    }
}

impl Default for OrbitHistory {
    fn default() -> Self {
        Self {
            points: vec![DVec2::ZERO; ORBIT_HISTORY_LEN].into_boxed_slice(),
        }
    }
}

impl OrbitHistory {
    #[inline]
    fn slot(age: u64) -> usize {
        (age % ORBIT_HISTORY_LEN as u64) as usize
    }

    /// Store the position for the given age, overwriting the oldest entry
    pub fn record(&mut self, age: u64, pos: DVec2) {
        self.points[Self::slot(age)] = pos;
    }

    pub fn get(&self, age: u64) -> DVec2 {
        self.points[Self::slot(age)]
    }

    pub fn capacity(&self) -> usize {
        self.points.len()
    }

    /// Recorded positions newest first, for a body of the given age
    pub fn trail(&self, age: u64) -> impl Iterator<Item = DVec2> + '_ {
        let len = age.min(ORBIT_HISTORY_LEN as u64);
        (0..len).map(move |i| self.get(age - i))
    }
}

/// An incoming meteoroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meteoroid {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    /// Ticks since spawn
    pub age: u64,
    pub history: OrbitHistory,
}

impl Meteoroid {
    pub fn new(pos: DVec2, vel: DVec2) -> Self {
        Self {
            pos,
            vel,
            radius: METEOROID_RADIUS,
            age: 0,
            history: OrbitHistory::default(),
        }
    }

    /// Age by one tick, record the pre-move position, then move
    pub fn integrate(&mut self) {
        self.age += 1;
        self.history.record(self.age, self.pos);
        self.pos += self.vel;
    }

    /// Positions for the orbit trail, newest first
    pub fn trail(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.history.trail(self.age)
    }

    /// Sprite rotation: one full turn every 180 ticks
    pub fn spin(&self) -> f64 {
        self.age as f64 / 180.0 * std::f64::consts::TAU
    }
}

/// Score popup spawned where a meteoroid was intercepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub pos: DVec2,
    pub elapsed: u32,
    pub angles: [f64; EFFECT_PARTICLES],
    pub plus: u32,
}

impl Effect {
    pub fn new<R: Rng + ?Sized>(pos: DVec2, plus: u32, rng: &mut R) -> Self {
        let angles = std::array::from_fn(|_| std::f64::consts::TAU * rng.random::<f64>());
        Self {
            pos,
            elapsed: 0,
            angles,
            plus,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= EFFECT_LIFETIME_TICKS
    }

    /// Debris particles fly outward at half a unit per tick
    pub fn particle_positions(&self) -> impl Iterator<Item = DVec2> + '_ {
        let d = 0.5 * self.elapsed as f64;
        self.angles
            .iter()
            .map(move |&a| self.pos + polar_to_cartesian(d, a))
    }

    /// Vertical lift of the "+N" text (rises and settles back)
    pub fn popup_lift(&self) -> f64 {
        15.0 * (std::f64::consts::PI * self.elapsed as f64 / EFFECT_LIFETIME_TICKS as f64).sin()
    }
}

/// Decorative background star
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Star {
    pub pos: DVec2,
    pub radius: f64,
}

impl Star {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            pos: DVec2::new(
                SCREEN_WIDTH * rng.random::<f64>(),
                SCREEN_HEIGHT * rng.random::<f64>(),
            ),
            radius: 0.5 + unit_normal(rng),
        }
    }
}

/// Standard normal sample (Box-Muller)
fn unit_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps ln away from zero
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current mode
    pub mode: GameMode,
    /// Ticks since the current mode was entered
    pub ticks: u64,
    /// Thrust held (set on press, cleared on release)
    pub thrust: bool,
    /// The player's rocket
    pub rocket: Rocket,
    /// Live meteoroids in spawn order
    pub meteoroids: Vec<Meteoroid>,
    /// Active score popups
    pub effects: Vec<Effect>,
    /// Background stars
    pub stars: Vec<Star>,
    /// Score for the current session
    pub score: u64,
    /// Demo trajectories shown on the title screen
    pub title_preview: Vec<Meteoroid>,
    /// Events produced by the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh title-screen state
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut state = Self {
            mode: GameMode::Title,
            ticks: 0,
            thrust: false,
            rocket: Rocket::launch(&ATTRACTOR),
            meteoroids: Vec::new(),
            effects: Vec::new(),
            stars: Vec::new(),
            score: 0,
            title_preview: preview::title_meteoroids(&ATTRACTOR).to_vec(),
            events: Vec::new(),
        };
        state.reinitialize(rng);
        state
    }

    /// Reset to the title screen with a new starfield
    pub fn reinitialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.mode = GameMode::Title;
        self.ticks = 0;
        self.thrust = false;
        self.rocket = Rocket::launch(&ATTRACTOR);
        self.meteoroids.clear();
        self.effects.clear();
        self.stars = (0..STAR_COUNT).map(|_| Star::random(rng)).collect();
        self.score = 0;
        self.events.push(GameEvent::Initialized);
    }

    /// Enter a new mode, restarting the mode clock
    pub fn enter_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.ticks = 0;
    }

    /// Replace the rocket with a freshly launched one
    pub fn relaunch_rocket(&mut self, attractor: &Attractor) {
        self.rocket = Rocket::launch(attractor);
    }
}
