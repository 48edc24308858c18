use chordfall_domain_theory::{Chord, NoteName, PitchClassSet, Scale};
use chordfall_ports::types::{TargetKind, TargetState, TimeMs};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

/// Structured identity of a target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetKey {
    pub kind: TargetKind,
    pub root: NoteName,
    /// Canonical chord alias (`"M"`, `"m7"`) or scale type name (`"major"`).
    pub qualifier: String,
}

impl TargetKey {
    /// Keys conflict when one input could satisfy both: same root pitch class
    /// and qualifier within the chord/arpeggio family, or the same scale.
    /// Enharmonic roots (`C#`, `Db`) conflict.
    pub fn conflicts_with(&self, other: &TargetKey) -> bool {
        if self.root.chroma() != other.root.chroma() || self.qualifier != other.qualifier {
            return false;
        }
        self.kind.matches_by_name() == other.kind.matches_by_name()
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TargetKind::Chord | TargetKind::Arpeggio => write!(f, "{}{}", self.root, self.qualifier),
            TargetKind::Scale => write!(f, "{} {}", self.root, self.qualifier),
        }
    }
}

/// A validated target description produced by the factory.
#[derive(Clone, Debug, PartialEq)]
pub struct Proposal {
    pub key: TargetKey,
    pub label: String,
    pub notes: Vec<NoteName>,
    pub intervals: Vec<String>,
    pub pitch_classes: PitchClassSet,
}

impl Proposal {
    pub fn from_chord(kind: TargetKind, chord: Chord) -> Self {
        Self {
            key: TargetKey {
                kind,
                root: chord.root,
                qualifier: chord.chord_type.symbol().to_string(),
            },
            label: chord.label(),
            notes: chord.notes(),
            intervals: chord.interval_names(),
            pitch_classes: chord.pitch_classes(),
        }
    }

    pub fn from_scale(scale: Scale) -> Self {
        Self {
            key: TargetKey {
                kind: TargetKind::Scale,
                root: scale.root,
                qualifier: scale.scale_type.name.to_string(),
            },
            label: scale.name(),
            notes: scale.notes(),
            intervals: scale.interval_names(),
            pitch_classes: scale.pitch_classes(),
        }
    }
}

/// Time left before a target reaches the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining_ms: TimeMs,
    cancelled: bool,
}

impl Countdown {
    pub fn new(ttl_ms: TimeMs) -> Self {
        Self {
            remaining_ms: ttl_ms,
            cancelled: false,
        }
    }

    pub fn remaining_ms(&self) -> TimeMs {
        self.remaining_ms
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_elapsed(&self) -> bool {
        !self.cancelled && self.remaining_ms == 0
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Returns true when this call ran the countdown out.
    pub fn advance(&mut self, elapsed_ms: TimeMs) -> bool {
        if self.cancelled || self.remaining_ms == 0 {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }
}

/// Identifies one countdown; stale after its target is removed or the registry
/// is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub target_id: TargetId,
    pub generation: u64,
}

#[derive(Clone, Debug)]
pub struct Target {
    pub id: TargetId,
    pub key: TargetKey,
    pub label: String,
    pub notes: Vec<NoteName>,
    pub intervals: Vec<String>,
    pub pitch_classes: PitchClassSet,
    pub accumulated_hits: PitchClassSet,
    pub time_to_live_ms: TimeMs,
    pub countdown: Countdown,
    pub state: TargetState,
    pub generation: u64,
}

impl Target {
    pub fn new(id: TargetId, proposal: Proposal, ttl_ms: TimeMs, generation: u64) -> Self {
        Self {
            id,
            key: proposal.key,
            label: proposal.label,
            notes: proposal.notes,
            intervals: proposal.intervals,
            pitch_classes: proposal.pitch_classes,
            accumulated_hits: PitchClassSet::EMPTY,
            time_to_live_ms: ttl_ms,
            countdown: Countdown::new(ttl_ms),
            state: TargetState::Active,
            generation,
        }
    }

    pub fn kind(&self) -> TargetKind {
        self.key.kind
    }

    pub fn is_active(&self) -> bool {
        self.state == TargetState::Active
    }

    pub fn timer_handle(&self) -> TimerHandle {
        TimerHandle {
            target_id: self.id,
            generation: self.generation,
        }
    }

    /// Pitch classes still to be played for arpeggio/scale completion.
    pub fn missing_pitch_classes(&self) -> PitchClassSet {
        self.pitch_classes.difference(self.accumulated_hits)
    }

    pub fn note_names(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.to_string()).collect()
    }
}
