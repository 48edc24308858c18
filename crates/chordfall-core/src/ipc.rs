use crate::game::Phase;
use chordfall_domain_eval::Target;
use chordfall_ports::settings::GameSettings;
use chordfall_ports::types::{RemovalReason, TargetKind, TimeMs};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    StartGame,
    StopGame,
    /// Takes effect at the next `StartGame`.
    UpdateSettings { settings: GameSettings },
    Input { notes: Vec<String>, chords: Vec<String> },
    Advance { elapsed_ms: TimeMs },
}

/// What a renderer needs to draw one falling target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: u64,
    pub kind: TargetKind,
    pub key: String,
    pub root: String,
    pub qualifier: String,
    pub label: String,
    pub notes: Vec<String>,
    pub intervals: Vec<String>,
    pub pitch_classes: Vec<u8>,
    pub time_to_live_ms: TimeMs,
    pub remaining_ms: TimeMs,
}

impl From<&Target> for TargetView {
    fn from(target: &Target) -> Self {
        Self {
            id: target.id.0,
            kind: target.kind(),
            key: target.key.to_string(),
            root: target.key.root.to_string(),
            qualifier: target.key.qualifier.clone(),
            label: target.label.clone(),
            notes: target.note_names(),
            intervals: target.intervals.clone(),
            pitch_classes: target.pitch_classes.to_vec(),
            time_to_live_ms: target.time_to_live_ms,
            remaining_ms: target.countdown.remaining_ms(),
        }
    }
}

/// Shown on the game-over screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSummary {
    pub label: String,
    pub notes: Vec<String>,
    pub intervals: Vec<String>,
}

impl From<&Target> for TargetSummary {
    fn from(target: &Target) -> Self {
        Self {
            label: target.label.clone(),
            notes: target.note_names(),
            intervals: target.intervals.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    PhaseChanged { phase: Phase },
    TargetCreated { target: TargetView },
    TargetRemoved { target: TargetView, reason: RemovalReason },
    TargetProgress { target_id: u64, accumulated: Vec<u8>, missing: Vec<u8> },
    ScoreChanged { score: i64 },
    LevelChanged { level: u32 },
    HeartsChanged { hearts: u32 },
    LevelUp { level: u32, spawn_interval_ms: TimeMs },
    Miss,
    GameOver { final_score: i64, last_target: Option<TargetSummary> },
    CurrentChord { name: String },
    InstrumentCycle { count: u32 },
    SpawnStalled { kind: TargetKind },
}
