use serde::{Deserialize, Serialize};
use std::fmt;

pub type TimeMs = u64; // elapsed game time, monotonic while a run is active

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Chord,
    Arpeggio,
    Scale,
}

impl TargetKind {
    /// Chord and arpeggio targets are identified by chord symbol and can be hit by name.
    pub fn matches_by_name(self) -> bool {
        matches!(self, TargetKind::Chord | TargetKind::Arpeggio)
    }

    /// Arpeggio and scale targets are completed by accumulating played notes.
    pub fn matches_by_notes(self) -> bool {
        matches!(self, TargetKind::Arpeggio | TargetKind::Scale)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::Chord => "chord",
            TargetKind::Arpeggio => "arpeggio",
            TargetKind::Scale => "scale",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Simple,
    Intermediate,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetState {
    Active,
    Hit,
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    Hit,
    Expired,
    /// Removed by a bulk clear on game over or stop.
    Cleared,
}
