//! Gameplay telemetry
//!
//! Events are flat JSON objects keyed by `player_id`, `play_id` and `action`,
//! plus `ticks`/`score` where they apply. Delivery is fire-and-forget.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Telemetry actions reported by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryAction {
    Initialize,
    StartGame,
    Playing,
    GameOver,
}

impl TelemetryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetryAction::Initialize => "initialize",
            TelemetryAction::StartGame => "start_game",
            TelemetryAction::Playing => "playing",
            TelemetryAction::GameOver => "game_over",
        }
    }
}

/// Who is playing: stable player id and a per-process play id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub player_id: String,
    pub play_id: String,
}

impl SessionIdentity {
    pub fn new(player_id: impl Into<String>, play_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            play_id: play_id.into(),
        }
    }

    /// Identity with a fresh random play id
    pub fn for_player(player_id: impl Into<String>) -> Self {
        Self::new(player_id, Uuid::new_v4().to_string())
    }

    /// Base fields shared by every event
    pub fn fields(&self, action: TelemetryAction) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("player_id".into(), json!(self.player_id));
        fields.insert("play_id".into(), json!(self.play_id));
        fields.insert("action".into(), json!(action.as_str()));
        fields
    }

    /// Fields for events that carry progress
    pub fn progress_fields(
        &self,
        action: TelemetryAction,
        ticks: u64,
        score: u64,
    ) -> Map<String, Value> {
        let mut fields = self.fields(action);
        fields.insert("ticks".into(), json!(ticks));
        fields.insert("score".into(), json!(score));
        fields
    }
}

/// Destination for telemetry events.
///
/// Implementations must not block the simulation and swallow their own
/// failures.
pub trait TelemetrySink {
    fn log_event(&mut self, game_name: &str, fields: Map<String, Value>);
}

/// Writes events as JSON lines through the `telemetry` log target
#[derive(Debug, Clone, Default)]
pub struct LogTelemetry {
    enabled: bool,
}

impl LogTelemetry {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl TelemetrySink for LogTelemetry {
    fn log_event(&mut self, game_name: &str, fields: Map<String, Value>) {
        if !self.enabled {
            return;
        }
        let mut record = Map::new();
        record.insert("game".into(), json!(game_name));
        record.extend(fields);
        log::info!(target: "telemetry", "{}", Value::Object(record));
    }
}
