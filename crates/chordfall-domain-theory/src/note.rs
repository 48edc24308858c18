use crate::interval::Interval;
use crate::TheoryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_ALTERATION: i8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn natural_chroma(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn step(self, steps: usize) -> Letter {
        Self::ALL[(self.index() + steps) % 7]
    }

    fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// A spelled pitch class: letter plus accidentals, no octave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteName {
    pub letter: Letter,
    pub alteration: i8,
}

/// A note as reported by an input device, octave optional.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pitch {
    pub note: NoteName,
    pub octave: Option<i32>,
}

impl NoteName {
    pub fn new(letter: Letter, alteration: i8) -> Self {
        Self { letter, alteration }
    }

    /// Strict spelling: uppercase letter followed by `#`, `b` or `x` accidentals.
    /// Anything else, including an octave number, is rejected.
    pub fn parse(s: &str) -> Result<Self, TheoryError> {
        let invalid = || TheoryError::InvalidNote(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(invalid)?;
        let alteration = parse_accidentals(chars.as_str()).ok_or_else(invalid)?;
        Ok(Self { letter, alteration })
    }

    /// Pitch class in 0..12; enharmonic spellings share a chroma.
    pub fn chroma(self) -> u8 {
        (self.letter.natural_chroma() as i16 + self.alteration as i16).rem_euclid(12) as u8
    }

    pub fn transpose(self, interval: Interval) -> NoteName {
        let letter = self.letter.step(interval.steps());
        let target = self.chroma() as i16 + interval.semitones() as i16;
        let diff = (target - letter.natural_chroma() as i16).rem_euclid(12);
        let alteration = if diff > 6 { diff - 12 } else { diff };
        NoteName {
            letter,
            alteration: alteration as i8,
        }
    }
}

impl Pitch {
    /// Lenient input parsing: letter in either case, accidentals, optional
    /// (possibly negative) octave. `"C#4"`, `"eb"`, `"Bb-1"`.
    pub fn parse(s: &str) -> Result<Self, TheoryError> {
        let invalid = || TheoryError::InvalidNote(s.to_string());
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .and_then(Letter::from_char)
            .ok_or_else(invalid)?;
        let rest = chars.as_str();
        let split = rest
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .unwrap_or(rest.len());
        let (accidentals, octave) = rest.split_at(split);
        let alteration = parse_accidentals(accidentals).ok_or_else(invalid)?;
        let octave = if octave.is_empty() {
            None
        } else {
            Some(octave.parse::<i32>().map_err(|_| invalid())?)
        };
        Ok(Self {
            note: NoteName { letter, alteration },
            octave,
        })
    }
}

fn parse_accidentals(s: &str) -> Option<i8> {
    match s {
        "" => Some(0),
        "#" => Some(1),
        "##" | "x" => Some(MAX_ALTERATION),
        "b" => Some(-1),
        "bb" => Some(-MAX_ALTERATION),
        _ => None,
    }
}

/// True when `s` is a strictly spelled note name, e.g. the bass of `C/E`.
pub fn is_note_name(s: &str) -> bool {
    NoteName::parse(s).is_ok()
}

impl FromStr for NoteName {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteName::parse(s)
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        let accidental = if self.alteration > 0 { "#" } else { "b" };
        for _ in 0..self.alteration.unsigned_abs() {
            f.write_str(accidental)?;
        }
        Ok(())
    }
}
