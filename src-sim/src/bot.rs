use chordfall_domain_eval::Target;
use chordfall_ports::input::InputChange;
use chordfall_ports::random::RandomSource;
use chordfall_ports::types::{TargetKind, TimeMs};

const PLAYED_OCTAVE: i32 = 4;
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

#[derive(Clone, Copy, Debug)]
pub struct BotConfig {
    /// Probability of playing the right thing, 0.0..=1.0.
    pub accuracy: f64,
    /// How long a target must have been falling before the bot reacts.
    pub reaction_ms: TimeMs,
    /// Minimum time between two inputs.
    pub input_gap_ms: TimeMs,
    /// Play chord targets from the bass note up, reported as a slash chord.
    pub play_inversions: bool,
}

/// Scripted player: answers the oldest target it has noticed, one input per
/// gap. Chords are played whole, arpeggios and scales one note at a time.
pub struct Bot {
    config: BotConfig,
    rng: Box<dyn RandomSource>,
    next_input_ms: TimeMs,
}

impl Bot {
    pub fn new(config: BotConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            rng,
            next_input_ms: 0,
        }
    }

    pub fn act(&mut self, now_ms: TimeMs, targets: &[Target]) -> Option<InputChange> {
        if now_ms < self.next_input_ms {
            return None;
        }
        let target = targets.iter().find(|t| {
            t.time_to_live_ms.saturating_sub(t.countdown.remaining_ms()) >= self.config.reaction_ms
        })?;
        self.next_input_ms = now_ms + self.config.input_gap_ms;

        if !self.roll_hit() {
            return Some(self.wrong_note(target));
        }
        Some(match target.kind() {
            TargetKind::Chord => self.chord(target),
            TargetKind::Arpeggio | TargetKind::Scale => next_missing_note(target),
        })
    }

    fn roll_hit(&mut self) -> bool {
        let draw = self.rng.pick(1_000) as f64 / 1_000.0;
        draw < self.config.accuracy
    }

    fn chord(&mut self, target: &Target) -> InputChange {
        let mut notes: Vec<String> = target
            .notes
            .iter()
            .map(|n| format!("{n}{PLAYED_OCTAVE}"))
            .collect();
        let mut name = target.key.to_string();

        if self.config.play_inversions && target.notes.len() > 1 {
            let bass_index = self.rng.pick(target.notes.len());
            if bass_index > 0 {
                notes.rotate_left(bass_index);
                name = format!("{name}/{}", target.notes[bass_index]);
            }
        }
        InputChange { notes, chords: vec![name] }
    }

    fn wrong_note(&mut self, target: &Target) -> InputChange {
        let start = self.rng.pick(SHARP_NAMES.len());
        let chroma = (0..SHARP_NAMES.len())
            .map(|offset| (start + offset) % SHARP_NAMES.len())
            .find(|&c| !target.pitch_classes.contains(c as u8))
            .unwrap_or(start);
        InputChange::new([format!("{}{PLAYED_OCTAVE}", SHARP_NAMES[chroma])], Vec::<String>::new())
    }
}

fn next_missing_note(target: &Target) -> InputChange {
    let note = target
        .notes
        .iter()
        .find(|n| !target.accumulated_hits.contains(n.chroma()))
        .or(target.notes.first());
    let notes: Vec<String> = note.map(|n| format!("{n}{PLAYED_OCTAVE}")).into_iter().collect();
    InputChange::new(notes, Vec::<String>::new())
}
