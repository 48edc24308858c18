use chordfall_domain_theory::{
    all_chord_types, all_scale_types, chord_type, is_note_name, scale_type, Chord, ChordQuality,
    Interval, NoteName, Pitch, PitchClassSet, Scale, TheoryError,
};
use pretty_assertions::assert_eq;

fn names(notes: Vec<NoteName>) -> Vec<String> {
    notes.into_iter().map(|n| n.to_string()).collect()
}

#[test]
fn enharmonic_spellings_share_chroma() {
    let pairs = [("C#", "Db"), ("D#", "Eb"), ("B#", "C"), ("Cb", "B"), ("Fx", "G"), ("Ebb", "D")];
    for (a, b) in pairs {
        let a = NoteName::parse(a).expect("valid note");
        let b = NoteName::parse(b).expect("valid note");
        assert_eq!(a.chroma(), b.chroma());
    }
}

#[test]
fn strict_note_names_reject_extension_tokens() {
    assert!(is_note_name("E"));
    assert!(is_note_name("Bb"));
    assert!(is_note_name("F##"));
    assert!(!is_note_name("add9"));
    assert!(!is_note_name("9"));
    assert!(!is_note_name("b9"));
    assert!(!is_note_name("E4"));
    assert!(!is_note_name("Eb#b#"));
    assert_eq!(
        NoteName::parse("H"),
        Err(TheoryError::InvalidNote("H".to_string()))
    );
}

#[test]
fn input_pitches_accept_octaves_and_lowercase() {
    let pitch = Pitch::parse("C#4").expect("valid pitch");
    assert_eq!(pitch.note.chroma(), 1);
    assert_eq!(pitch.octave, Some(4));

    let pitch = Pitch::parse("eb").expect("valid pitch");
    assert_eq!(pitch.note.chroma(), 3);
    assert_eq!(pitch.octave, None);

    let pitch = Pitch::parse("Bb-1").expect("valid pitch");
    assert_eq!(pitch.octave, Some(-1));

    assert!(Pitch::parse("X4").is_err());
}

#[test]
fn interval_semitones() {
    let cases = [("1P", 0), ("3m", 3), ("3M", 4), ("5d", 6), ("5A", 8), ("7d", 9), ("9M", 14), ("11A", 18), ("13M", 21)];
    for (name, semitones) in cases {
        let interval = Interval::parse(name).expect("valid interval");
        assert_eq!(interval.semitones(), semitones, "{name}");
        assert_eq!(interval.to_string(), name);
    }
    assert!(Interval::parse("5M").is_err());
    assert!(Interval::parse("3P").is_err());
    assert!(Interval::parse("0P").is_err());
}

#[test]
fn catalog_intervals_all_parse() {
    for t in all_chord_types() {
        assert_eq!(t.parsed_intervals().count(), t.intervals.len(), "{}", t.symbol());
    }
    for s in all_scale_types() {
        assert_eq!(s.parsed_intervals().count(), s.intervals.len(), "{}", s.name);
    }
}

#[test]
fn chord_aliases_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for t in all_chord_types() {
        for alias in t.aliases {
            assert!(seen.insert(*alias), "duplicate alias {alias:?}");
        }
    }
}

#[test]
fn catalog_covers_altered_and_extended_types() {
    let types = all_chord_types();
    assert_eq!(types.len(), 106);
    assert_eq!(types.iter().filter(|t| t.has_name()).count(), 36);

    for alias in ["m7#5", "7b5", "9#11", "7b13", "13b9", "7#5#9", "mb6b9"] {
        let t = chord_type(alias).expect(alias);
        assert!(!t.has_name(), "{alias}");
    }
    let lydian = chord_type("maj9#11").expect("maj9#11");
    assert_eq!(lydian.name, "major sharp eleventh (lydian)");
    assert_eq!(chord_type("m+").map(|t| t.name), Some("minor augmented"));

    let chord = Chord::get("C", "7b5").expect("valid chord");
    assert_eq!(names(chord.notes()), vec!["C", "E", "Gb", "Bb"]);
    let chord = Chord::get("G", "7#5#9").expect("valid chord");
    assert_eq!(names(chord.notes()), vec!["G", "B", "D#", "F", "A#"]);
}

#[test]
fn chord_quality_follows_intervals() {
    assert_eq!(chord_type("M").map(|t| t.quality()), Some(ChordQuality::Major));
    assert_eq!(chord_type("m7").map(|t| t.quality()), Some(ChordQuality::Minor));
    assert_eq!(chord_type("dim").map(|t| t.quality()), Some(ChordQuality::Diminished));
    assert_eq!(chord_type("m#5").map(|t| t.quality()), Some(ChordQuality::Augmented));
    assert_eq!(chord_type("sus4").map(|t| t.quality()), Some(ChordQuality::Unknown));
}

#[test]
fn chord_spelling_and_pitch_classes() {
    let chord = Chord::get("Eb", "m7").expect("valid chord");
    assert_eq!(names(chord.notes()), vec!["Eb", "Gb", "Bb", "Db"]);
    assert_eq!(chord.pitch_classes().to_vec(), vec![1, 3, 6, 10]);
    assert_eq!(chord.symbol(), "Ebm7");
    assert_eq!(chord.label(), "Ebm7");

    let chord = Chord::get("F#", "M").expect("valid chord");
    assert_eq!(names(chord.notes()), vec!["F#", "A#", "C#"]);
    assert_eq!(chord.label(), "F#");

    let chord = Chord::get("C", "dim7").expect("valid chord");
    assert_eq!(names(chord.notes()), vec!["C", "Eb", "Gb", "Bbb"]);
}

#[test]
fn chord_symbols_resolve_aliases() {
    for symbol in ["C", "CM", "Cmaj", "C^"] {
        let chord = Chord::parse(symbol).expect("major triad");
        assert_eq!(chord.symbol(), "CM", "{symbol}");
    }

    let chord = Chord::parse("Bbm7").expect("valid chord");
    assert_eq!(chord.root.to_string(), "Bb");
    assert_eq!(chord.chord_type.symbol(), "m7");

    let chord = Chord::parse("C6/9").expect("slash alias");
    assert_eq!(chord.chord_type.symbol(), "6add9");

    assert!(Chord::parse("C/E").is_none());
    assert!(Chord::parse("Cxyz").is_none());
    assert!(Chord::parse("").is_none());
}

#[test]
fn scales_by_name_and_alias() {
    let scale = Scale::get("D", "dorian").expect("valid scale");
    assert_eq!(names(scale.notes()), vec!["D", "E", "F", "G", "A", "B", "C"]);
    assert_eq!(scale.name(), "D dorian");

    assert_eq!(scale_type("Ionian").map(|s| s.name), Some("major"));
    assert_eq!(scale_type("pentatonic").map(|s| s.name), Some("major pentatonic"));
    assert!(scale_type("klingon").is_none());

    let major = Scale::get("C", "major").expect("valid scale");
    let triad = Chord::get("A", "m").expect("valid chord");
    assert!(triad.pitch_classes().is_subset(major.pitch_classes()));
}

#[test]
fn pitch_class_set_operations() {
    let a: PitchClassSet = [0u8, 4, 7].into_iter().collect();
    let b: PitchClassSet = [4u8, 16].into_iter().collect();

    assert_eq!(b.to_vec(), vec![4]);
    assert!(b.is_subset(a));
    assert!(a.is_superset(b));
    assert_eq!(a.difference(b).to_vec(), vec![0, 7]);
    assert_eq!(a.len(), 3);
    assert!(!a.contains(12));
    assert_eq!(a.to_string(), "{0,4,7}");
}
