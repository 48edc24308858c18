use serde::{Deserialize, Serialize};
use std::fmt;

/// Octave-independent set of pitch classes 0..12, one bit per chroma.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchClassSet(u16);

const MASK: u16 = 0x0FFF;

impl PitchClassSet {
    pub const EMPTY: PitchClassSet = PitchClassSet(0);

    pub fn from_bits(bits: u16) -> Self {
        Self(bits & MASK)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    /// Inserts `chroma % 12`.
    pub fn insert(&mut self, chroma: u8) {
        self.0 |= 1 << (chroma % 12);
    }

    pub fn contains(self, chroma: u8) -> bool {
        chroma < 12 && self.0 & (1 << chroma) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: PitchClassSet) -> PitchClassSet {
        PitchClassSet(self.0 | other.0)
    }

    pub fn intersection(self, other: PitchClassSet) -> PitchClassSet {
        PitchClassSet(self.0 & other.0)
    }

    pub fn difference(self, other: PitchClassSet) -> PitchClassSet {
        PitchClassSet(self.0 & !other.0)
    }

    pub fn is_subset(self, other: PitchClassSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_superset(self, other: PitchClassSet) -> bool {
        other.is_subset(self)
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..12u8).filter(move |c| self.contains(*c))
    }

    pub fn to_vec(self) -> Vec<u8> {
        self.iter().collect()
    }
}

impl FromIterator<u8> for PitchClassSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = PitchClassSet::EMPTY;
        for chroma in iter {
            set.insert(chroma);
        }
        set
    }
}

impl fmt::Display for PitchClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}}", items.join(","))
    }
}
