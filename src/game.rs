//! Game controller
//!
//! Owns the simulation state together with its injected collaborators (RNG,
//! telemetry, audio) and turns the `GameEvent`s of each tick into side effects.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::Settings;
use crate::audio::{AudioManager, AudioSink, SoundCue};
use crate::consts::GAME_NAME;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::telemetry::{LogTelemetry, SessionIdentity, TelemetryAction, TelemetrySink};

/// Controller wired to the native sinks
pub type NativeGame = Game<Pcg32, LogTelemetry, AudioManager>;

pub struct Game<R, T, A> {
    state: GameState,
    rng: R,
    telemetry: T,
    audio: A,
    identity: SessionIdentity,
}

impl NativeGame {
    /// Build a controller from settings (seed, identity, telemetry, volumes)
    pub fn from_settings(settings: &Settings) -> Self {
        Game::new(
            settings.rng(),
            LogTelemetry::new(settings.telemetry),
            AudioManager::from_settings(settings),
            settings.session_identity(),
        )
    }
}

impl<R: Rng, T: TelemetrySink, A: AudioSink> Game<R, T, A> {
    /// Create the controller on the title screen.
    ///
    /// This is the first initialization, so an "initialize" event is reported.
    pub fn new(mut rng: R, telemetry: T, audio: A, identity: SessionIdentity) -> Self {
        let state = GameState::new(&mut rng);
        let mut game = Self {
            state,
            rng,
            telemetry,
            audio,
            identity,
        };
        game.dispatch_events();
        game
    }

    /// Advance one tick with this tick's input edges
    pub fn update(&mut self, input: &TickInput) {
        tick(&mut self.state, input, &mut self.rng);
        self.dispatch_events();
    }

    /// Read-only snapshot for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    fn dispatch_events(&mut self) {
        for &event in &self.state.events {
            dispatch(event, &self.identity, &mut self.telemetry, &mut self.audio);
        }
    }
}

fn dispatch<T: TelemetrySink, A: AudioSink>(
    event: GameEvent,
    identity: &SessionIdentity,
    telemetry: &mut T,
    audio: &mut A,
) {
    match event {
        GameEvent::Initialized => {
            telemetry.log_event(GAME_NAME, identity.fields(TelemetryAction::Initialize));
            audio.pause();
        }
        GameEvent::Started => {
            telemetry.log_event(GAME_NAME, identity.fields(TelemetryAction::StartGame));
            audio.play_one_shot(SoundCue::GameStart);
            audio.rewind();
            audio.play_loop();
        }
        GameEvent::Progress { ticks, score } => {
            telemetry.log_event(
                GAME_NAME,
                identity.progress_fields(TelemetryAction::Playing, ticks, score),
            );
        }
        GameEvent::RocketPlaced => audio.play_one_shot(SoundCue::RocketPlaced),
        GameEvent::MeteoroidHit { .. } => audio.play_one_shot(SoundCue::Hit),
        GameEvent::GameOver { ticks, score } => {
            audio.play_one_shot(SoundCue::GameOver);
            telemetry.log_event(
                GAME_NAME,
                identity.progress_fields(TelemetryAction::GameOver, ticks, score),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STAR_COUNT;
    use crate::sim::{ATTRACTOR, GameMode, Meteoroid};
    use glam::DVec2;
    use rand::SeedableRng;
    use serde_json::{Map, Value};

    #[derive(Default)]
    struct RecordingTelemetry {
        events: Vec<(String, Map<String, Value>)>,
    }

    impl RecordingTelemetry {
        fn actions(&self) -> Vec<String> {
            self.events
                .iter()
                .map(|(_, f)| f["action"].as_str().unwrap_or_default().to_string())
                .collect()
        }
    }

    impl TelemetrySink for RecordingTelemetry {
        fn log_event(&mut self, game_name: &str, fields: Map<String, Value>) {
            self.events.push((game_name.to_string(), fields));
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum AudioCall {
        OneShot(SoundCue),
        Loop,
        Pause,
        Rewind,
    }

    #[derive(Default)]
    struct RecordingAudio {
        calls: Vec<AudioCall>,
    }

    impl AudioSink for RecordingAudio {
        fn play_one_shot(&mut self, cue: SoundCue) {
            self.calls.push(AudioCall::OneShot(cue));
        }
        fn play_loop(&mut self) {
            self.calls.push(AudioCall::Loop);
        }
        fn pause(&mut self) {
            self.calls.push(AudioCall::Pause);
        }
        fn rewind(&mut self) {
            self.calls.push(AudioCall::Rewind);
        }
    }

    /// Sinks whose backend is gone: everything is dropped
    struct DeadTelemetry;
    impl TelemetrySink for DeadTelemetry {
        fn log_event(&mut self, _: &str, _: Map<String, Value>) {}
    }
    struct DeadAudio;
    impl AudioSink for DeadAudio {
        fn play_one_shot(&mut self, _: SoundCue) {}
        fn play_loop(&mut self) {}
        fn pause(&mut self) {}
        fn rewind(&mut self) {}
    }

    type TestGame = Game<Pcg32, RecordingTelemetry, RecordingAudio>;

    const PRESS: TickInput = TickInput {
        just_pressed: true,
        just_released: false,
    };
    const IDLE: TickInput = TickInput {
        just_pressed: false,
        just_released: false,
    };

    fn new_game(seed: u64) -> TestGame {
        Game::new(
            Pcg32::seed_from_u64(seed),
            RecordingTelemetry::default(),
            RecordingAudio::default(),
            SessionIdentity::new("player", "play"),
        )
    }

    fn crash_rocket(game: &mut TestGame) {
        game.state.rocket.pos = ATTRACTOR.pos + DVec2::new(0.0, -25.0);
        game.state.rocket.vel = DVec2::ZERO;
        game.update(&IDLE);
    }

    #[test]
    fn test_boot_reports_initialize() {
        let game = new_game(1);
        assert_eq!(game.state().mode, GameMode::Title);
        assert_eq!(game.telemetry().actions(), vec!["initialize"]);
        let (name, fields) = &game.telemetry().events[0];
        assert_eq!(name, GAME_NAME);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["player_id"], "player");
        assert_eq!(fields["play_id"], "play");
    }

    #[test]
    fn test_start_game_side_effects() {
        let mut game = new_game(2);
        game.audio.calls.clear();

        game.update(&PRESS);
        assert_eq!(game.state().mode, GameMode::Playing);
        assert_eq!(game.telemetry().actions(), vec!["initialize", "start_game"]);
        assert_eq!(
            game.audio().calls,
            vec![
                AudioCall::OneShot(SoundCue::GameStart),
                AudioCall::Rewind,
                AudioCall::Loop
            ]
        );
    }

    #[test]
    fn test_full_cycle_resets_session() {
        let mut game = new_game(3);
        game.update(&PRESS);
        for _ in 0..30 {
            game.update(&IDLE);
        }
        game.state.score = 5;
        crash_rocket(&mut game);
        assert_eq!(game.state().mode, GameMode::GameOver);

        let (_, fields) = game.telemetry().events.last().expect("game over event");
        assert_eq!(fields["action"], "game_over");
        assert_eq!(fields["ticks"], 31);
        assert_eq!(fields["score"], 5);
        assert_eq!(
            game.audio().calls.last(),
            Some(&AudioCall::OneShot(SoundCue::GameOver))
        );

        game.update(&PRESS);
        let state = game.state();
        assert_eq!(state.mode, GameMode::Title);
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert!(state.meteoroids.is_empty());
        assert!(state.effects.is_empty());
        assert_eq!(
            game.telemetry().actions(),
            vec!["initialize", "start_game", "game_over", "initialize"]
        );
        assert_eq!(game.audio().calls.last(), Some(&AudioCall::Pause));
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut game = new_game(4);
        game.update(&PRESS);
        // Rocket and a meteoroid strike the attractor on the same tick
        game.state
            .meteoroids
            .push(Meteoroid::new(ATTRACTOR.pos + DVec2::new(25.0, 0.0), DVec2::ZERO));
        crash_rocket(&mut game);
        for _ in 0..10 {
            game.update(&IDLE);
        }

        let game_overs = game
            .telemetry()
            .actions()
            .iter()
            .filter(|a| *a == "game_over")
            .count();
        assert_eq!(game_overs, 1);
        let sounds = game
            .audio()
            .calls
            .iter()
            .filter(|c| **c == AudioCall::OneShot(SoundCue::GameOver))
            .count();
        assert_eq!(sounds, 1);
        assert!(game.state().meteoroids.is_empty());
    }

    #[test]
    fn test_hit_and_relaunch_cues() {
        let mut game = new_game(5);
        game.update(&PRESS);

        let pos = ATTRACTOR.pos + DVec2::new(120.0, 0.0);
        game.state.rocket.pos = pos;
        game.state.rocket.vel = DVec2::ZERO;
        game.state.meteoroids.push(Meteoroid::new(pos, DVec2::ZERO));
        game.update(&IDLE);
        assert_eq!(game.state().score, 2);
        assert_eq!(game.state().effects.len(), 1);
        assert_eq!(game.audio().calls.last(), Some(&AudioCall::OneShot(SoundCue::Hit)));

        game.state.rocket.pos = DVec2::new(700.0, 100.0);
        game.state.rocket.vel = DVec2::new(5.0, 0.0);
        game.update(&IDLE);
        assert_eq!(
            game.audio().calls.last(),
            Some(&AudioCall::OneShot(SoundCue::RocketPlaced))
        );
        assert_eq!(game.state().mode, GameMode::Playing);
    }

    #[test]
    fn test_progress_reported_every_600_ticks() {
        let mut game = new_game(6);
        game.update(&PRESS);
        game.state.ticks = 599;
        game.state.meteoroids.clear();
        game.update(&IDLE);

        let (_, fields) = game.telemetry().events.last().expect("progress event");
        assert_eq!(fields["action"], "playing");
        assert_eq!(fields["ticks"], 600);
        assert_eq!(fields["score"], 0);
    }

    #[test]
    fn test_dead_sinks_do_not_change_simulation() {
        let mut recorded = new_game(7);
        let mut silent = Game::new(
            Pcg32::seed_from_u64(7),
            DeadTelemetry,
            DeadAudio,
            SessionIdentity::new("player", "play"),
        );

        for i in 0..1200 {
            let input = if i % 300 == 0 { PRESS } else { IDLE };
            recorded.update(&input);
            silent.update(&input);
        }

        let a = serde_json::to_string(recorded.state()).expect("serialize");
        let b = serde_json::to_string(silent.state()).expect("serialize");
        assert_eq!(a, b);
    }

    #[test]
    fn test_native_game_from_settings() {
        let settings = Settings {
            seed: Some(8),
            player_id: Some("pilot".into()),
            ..Default::default()
        };
        let mut game = NativeGame::from_settings(&settings);
        assert_eq!(game.identity().player_id, "pilot");
        assert!(!game.telemetry().is_enabled());

        game.update(&PRESS);
        assert_eq!(game.state().mode, GameMode::Playing);
        assert_eq!(
            game.audio().music_state(),
            crate::audio::MusicState::Playing
        );
    }
}
