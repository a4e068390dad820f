//! Cosmic Velocity entry point
//!
//! Headless native driver: runs the simulation at a fixed tick with a simple
//! autopilot standing in for the player. Rendering and real audio belong to
//! a frontend.

use cosmic_velocity::consts::TICKS_PER_SECOND;
use cosmic_velocity::game::NativeGame;
use cosmic_velocity::platform::TouchTracker;
use cosmic_velocity::sim::GameMode;
use cosmic_velocity::Settings;

/// Environment variable pointing at an optional JSON settings file
const ENV_SETTINGS_FILE: &str = "GAME_SETTINGS";

fn load_settings() -> Settings {
    let Ok(path) = std::env::var(ENV_SETTINGS_FILE) else {
        return Settings::from_env();
    };
    let base = match std::fs::read_to_string(&path) {
        Ok(json) => Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Invalid settings in {path}: {e}; using defaults");
            Settings::default()
        }),
        Err(e) => {
            log::warn!("Cannot read {path}: {e}; using defaults");
            Settings::default()
        }
    };
    base.apply_env(|key| std::env::var(key).ok())
}

/// Hold thrust briefly whenever the rocket drifts below its launch speed
fn autopilot_holds(game: &NativeGame) -> bool {
    let rocket = &game.state().rocket;
    rocket.vel.length() < 1.35
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Cosmic Velocity (headless) starting...");

    let settings = load_settings();
    let mut game = NativeGame::from_settings(&settings);
    let mut touch = TouchTracker::new();

    // Tap to leave the title screen
    game.update(&touch.update(true));
    game.update(&touch.update(false));

    let mut ticks = 0;
    while ticks < settings.max_ticks && game.state().mode == GameMode::Playing {
        let held = autopilot_holds(&game);
        game.update(&touch.update(held));
        ticks += 1;
    }

    let state = game.state();
    log::info!(
        "Session finished after {:.1}s: mode {:?}, score {}",
        ticks as f64 / TICKS_PER_SECOND as f64,
        state.mode,
        state.score
    );
    println!("{}", state.score);
}
