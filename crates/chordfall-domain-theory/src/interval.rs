use crate::TheoryError;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntervalQuality {
    Perfect,
    Major,
    Minor,
    Augmented,
    Diminished,
}

/// Interval in `number + quality` notation: `"1P"`, `"3m"`, `"5d"`, `"11A"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    number: u8,
    quality: IntervalQuality,
}

const DIATONIC_SEMITONES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

impl Interval {
    pub fn parse(s: &str) -> Result<Self, TheoryError> {
        let invalid = || TheoryError::InvalidInterval(s.to_string());
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (digits, quality) = s.split_at(split);
        let number: u8 = digits.parse().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }
        let quality = match quality {
            "P" => IntervalQuality::Perfect,
            "M" => IntervalQuality::Major,
            "m" => IntervalQuality::Minor,
            "A" => IntervalQuality::Augmented,
            "d" => IntervalQuality::Diminished,
            _ => return Err(invalid()),
        };
        let interval = Self { number, quality };
        let perfect_class = interval.is_perfect_class();
        let consistent = match quality {
            IntervalQuality::Perfect => perfect_class,
            IntervalQuality::Major | IntervalQuality::Minor => !perfect_class,
            IntervalQuality::Augmented | IntervalQuality::Diminished => true,
        };
        if !consistent {
            return Err(invalid());
        }
        Ok(interval)
    }

    pub fn number(self) -> u8 {
        self.number
    }

    pub fn quality(self) -> IntervalQuality {
        self.quality
    }

    /// Letter steps above the root, octave reduced.
    pub fn steps(self) -> usize {
        (self.number as usize - 1) % 7
    }

    pub fn semitones(self) -> i32 {
        let octaves = (self.number as i32 - 1) / 7;
        let base = DIATONIC_SEMITONES[self.steps()] as i32;
        let offset = match (self.quality, self.is_perfect_class()) {
            (IntervalQuality::Perfect | IntervalQuality::Major, _) => 0,
            (IntervalQuality::Minor, _) => -1,
            (IntervalQuality::Augmented, _) => 1,
            (IntervalQuality::Diminished, true) => -1,
            (IntervalQuality::Diminished, false) => -2,
        };
        octaves * 12 + base + offset
    }

    pub fn chroma(self) -> u8 {
        self.semitones().rem_euclid(12) as u8
    }

    fn is_perfect_class(self) -> bool {
        matches!(self.steps(), 0 | 3 | 4)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quality = match self.quality {
            IntervalQuality::Perfect => 'P',
            IntervalQuality::Major => 'M',
            IntervalQuality::Minor => 'm',
            IntervalQuality::Augmented => 'A',
            IntervalQuality::Diminished => 'd',
        };
        write!(f, "{}{}", self.number, quality)
    }
}
