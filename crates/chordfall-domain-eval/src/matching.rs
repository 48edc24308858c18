use crate::target::TargetKey;
use chordfall_domain_theory::{is_note_name, Chord, Pitch, PitchClassSet};

/// Strips a `/BASS` suffix when `BASS` is a real note name: `"C/E"` gives `"C"`,
/// while `"C/add9"` and `"C6/9"` are left alone.
pub fn strip_inversion(name: &str) -> Option<&str> {
    let (base, bass) = name.rsplit_once('/')?;
    if base.is_empty() || !is_note_name(bass) {
        return None;
    }
    Some(base)
}

/// Names to try for one detected chord, in order.
pub fn name_candidates(name: &str, inversions: bool) -> Vec<&str> {
    let mut candidates = vec![name];
    if inversions {
        if let Some(base) = strip_inversion(name) {
            candidates.push(base);
        }
    }
    candidates
}

/// Voicing and octave never matter: the root is compared by chroma and the type
/// by canonical alias.
pub fn chord_matches_key(chord: &Chord, key: &TargetKey) -> bool {
    key.kind.matches_by_name()
        && key.root.chroma() == chord.root.chroma()
        && key.qualifier == chord.chord_type.symbol()
}

pub fn is_covered(accumulated: PitchClassSet, target: PitchClassSet) -> bool {
    accumulated.is_superset(target)
}

/// Pitch classes of the given note names, plus the names that failed to parse.
pub fn pitch_classes_of<S: AsRef<str>>(notes: &[S]) -> (PitchClassSet, Vec<String>) {
    let mut set = PitchClassSet::EMPTY;
    let mut unknown = Vec::new();
    for note in notes {
        match Pitch::parse(note.as_ref()) {
            Ok(pitch) => set.insert(pitch.note.chroma()),
            Err(_) => unknown.push(note.as_ref().to_string()),
        }
    }
    (set, unknown)
}
