//! Runtime configuration
//!
//! Defaults, optionally overridden by a JSON document and then by the
//! `GAME_*` environment variables.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::telemetry::SessionIdentity;

/// Environment variable holding the RNG seed
pub const ENV_SEED: &str = "GAME_RAND_SEED";
/// Environment variable holding the player id
pub const ENV_PLAYER_ID: &str = "GAME_PLAYER_ID";
/// Environment variable enabling telemetry when set to "1"
pub const ENV_TELEMETRY: &str = "GAME_LOGGING";

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (random when unset)
    pub seed: Option<u64>,
    /// Player id (random UUID when unset)
    pub player_id: Option<String>,
    /// Send telemetry events
    pub telemetry: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    /// Headless driver: stop after this many ticks
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            player_id: None,
            telemetry: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            // Two minutes at 60 Hz
            max_ticks: 2 * 60 * 60,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Overlay values from an environment lookup
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SEED) {
            match raw.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring invalid {}: {:?}", ENV_SEED, raw),
            }
        }
        if let Some(player_id) = lookup(ENV_PLAYER_ID).filter(|id| !id.is_empty()) {
            self.player_id = Some(player_id);
        }
        if let Some(flag) = lookup(ENV_TELEMETRY) {
            self.telemetry = flag == "1";
        }
        self
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Seeded simulation RNG
    pub fn rng(&self) -> Pcg32 {
        let seed = self.seed.unwrap_or_else(rand::random);
        log::info!("Using seed {seed}");
        Pcg32::seed_from_u64(seed)
    }

    /// Player identity with a fresh play id
    pub fn session_identity(&self) -> SessionIdentity {
        let player_id = self
            .player_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        SessionIdentity::for_player(player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{"seed": 42, "muted": true}"#).expect("valid json");
        assert_eq!(settings.seed, Some(42));
        assert!(settings.muted);
        assert_eq!(settings.max_ticks, Settings::default().max_ticks);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Settings::from_json("{seed").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(7),
            player_id: Some("pilot".into()),
            ..Default::default()
        };
        let json = settings.to_json().expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_env_overlay() {
        let settings = Settings::default().apply_env(env(&[
            (ENV_SEED, "1234"),
            (ENV_PLAYER_ID, "pilot-7"),
            (ENV_TELEMETRY, "1"),
        ]));
        assert_eq!(settings.seed, Some(1234));
        assert_eq!(settings.player_id.as_deref(), Some("pilot-7"));
        assert!(settings.telemetry);
    }

    #[test]
    fn test_env_invalid_seed_ignored() {
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        }
        .apply_env(env(&[(ENV_SEED, "abc"), (ENV_PLAYER_ID, ""), (ENV_TELEMETRY, "0")]));
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.player_id, None);
        assert!(!settings.telemetry);
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let settings = Settings {
            seed: Some(99),
            ..Default::default()
        };
        let a: u64 = settings.rng().random();
        let b: u64 = settings.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_session_identity_generates_player_id() {
        let identity = Settings::default().session_identity();
        assert!(Uuid::parse_str(&identity.player_id).is_ok());

        let named = Settings {
            player_id: Some("pilot".into()),
            ..Default::default()
        };
        assert_eq!(named.session_identity().player_id, "pilot");
    }
}
