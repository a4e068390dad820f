//! Audio sink
//!
//! The simulation only names cues; playing them is up to the host. `AudioManager`
//! tracks volume and background-music state and logs what a backend would play.

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Title -> Playing
    GameStart,
    /// Rocket intercepted a meteoroid
    Hit,
    /// Rocket left the play area and was relaunched
    RocketPlaced,
    /// Attractor was struck
    GameOver,
}

impl SoundCue {
    /// Asset name a backend would load for this cue
    pub fn clip_name(&self) -> &'static str {
        match self {
            SoundCue::GameStart => "game-start",
            SoundCue::Hit => "hit",
            SoundCue::RocketPlaced => "rocket-placed",
            SoundCue::GameOver => "game-over",
        }
    }
}

/// Where the controller sends sound.
///
/// Calls are fire-and-forget: implementations must not block and cannot fail
/// the caller.
pub trait AudioSink {
    /// Play a cue once
    fn play_one_shot(&mut self, cue: SoundCue);
    /// Start (or resume) the looping background track
    fn play_loop(&mut self);
    /// Pause the background track
    fn pause(&mut self);
    /// Seek the background track to the start
    fn rewind(&mut self);
}

/// Background track transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: MusicState,
    /// Number of rewinds requested
    rewinds: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music: MusicState::Stopped,
            rewinds: 0,
        }
    }

    /// Build from user settings
    pub fn from_settings(settings: &crate::Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective one-shot volume
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective background-track volume
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn music_state(&self) -> MusicState {
        self.music
    }

    pub fn rewinds(&self) -> u32 {
        self.rewinds
    }
}

impl AudioSink for AudioManager {
    fn play_one_shot(&mut self, cue: SoundCue) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("Playing {} at volume {:.2}", cue.clip_name(), vol);
    }

    fn play_loop(&mut self) {
        self.music = MusicState::Playing;
        log::debug!(
            "Background music playing at volume {:.2}",
            self.effective_music_volume()
        );
    }

    fn pause(&mut self) {
        if self.music == MusicState::Playing {
            self.music = MusicState::Paused;
            log::debug!("Background music paused");
        }
    }

    fn rewind(&mut self) {
        self.rewinds += 1;
    }
}
