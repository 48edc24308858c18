use crate::chord_type::{chord_type, ChordType};
use crate::note::{Letter, NoteName};
use crate::pitch::PitchClassSet;
use crate::scale_type::{scale_type, ScaleType};
use crate::TheoryError;

#[derive(Clone, Copy, Debug)]
pub struct Chord {
    pub root: NoteName,
    pub chord_type: &'static ChordType,
}

impl Chord {
    pub fn new(root: NoteName, chord_type: &'static ChordType) -> Self {
        Self { root, chord_type }
    }

    pub fn get(root: &str, alias: &str) -> Result<Self, TheoryError> {
        let root = NoteName::parse(root)?;
        let chord_type =
            chord_type(alias).ok_or_else(|| TheoryError::UnknownChordType(alias.to_string()))?;
        Ok(Self { root, chord_type })
    }

    /// Splits a chord symbol into root and type, e.g. `"Ebm7"`, `"C"`, `"F#dim"`.
    /// A slash suffix is only accepted when it is part of a type alias (`"C6/9"`),
    /// never as a bass note.
    pub fn parse(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        let first = symbol.chars().next()?;
        Letter::from_char(first)?;
        let rest = &symbol[1..];
        let max_accidentals = rest
            .chars()
            .take_while(|c| matches!(c, '#' | 'b' | 'x'))
            .count();

        // Prefer the longest root spelling, but fall back when the accidental
        // belongs to the type alias.
        (0..=max_accidentals).rev().find_map(|count| {
            let root = NoteName::parse(&symbol[..1 + count]).ok()?;
            let chord_type = chord_type(&symbol[1 + count..])?;
            Some(Self { root, chord_type })
        })
    }

    pub fn notes(&self) -> Vec<NoteName> {
        self.chord_type
            .parsed_intervals()
            .map(|i| self.root.transpose(i))
            .collect()
    }

    pub fn pitch_classes(&self) -> PitchClassSet {
        self.notes().into_iter().map(NoteName::chroma).collect()
    }

    pub fn interval_names(&self) -> Vec<String> {
        self.chord_type.intervals.iter().map(|i| i.to_string()).collect()
    }

    /// Root followed by the canonical alias: `"CM"`, `"Ebm7"`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.root, self.chord_type.symbol())
    }

    /// Display form; the major triad shows the root alone.
    pub fn label(&self) -> String {
        let symbol = self.chord_type.symbol();
        if symbol == "M" {
            self.root.to_string()
        } else {
            format!("{}{}", self.root, symbol)
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Scale {
    pub root: NoteName,
    pub scale_type: &'static ScaleType,
}

impl Scale {
    pub fn new(root: NoteName, scale_type: &'static ScaleType) -> Self {
        Self { root, scale_type }
    }

    pub fn get(root: &str, name: &str) -> Result<Self, TheoryError> {
        let root = NoteName::parse(root)?;
        let scale_type =
            scale_type(name).ok_or_else(|| TheoryError::UnknownScale(name.to_string()))?;
        Ok(Self { root, scale_type })
    }

    pub fn notes(&self) -> Vec<NoteName> {
        self.scale_type
            .parsed_intervals()
            .map(|i| self.root.transpose(i))
            .collect()
    }

    pub fn pitch_classes(&self) -> PitchClassSet {
        self.notes().into_iter().map(NoteName::chroma).collect()
    }

    pub fn interval_names(&self) -> Vec<String> {
        self.scale_type.intervals.iter().map(|i| i.to_string()).collect()
    }

    /// Full name: `"C major"`, `"F# minor pentatonic"`.
    pub fn name(&self) -> String {
        format!("{} {}", self.root, self.scale_type.name)
    }
}
