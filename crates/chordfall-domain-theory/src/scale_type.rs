use crate::interval::Interval;
use crate::pitch::PitchClassSet;
use serde::{Deserialize, Serialize};

/// How familiar a scale is to a typical student.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScaleTier {
    Basic,
    Modal,
    Extended,
}

#[derive(Debug)]
pub struct ScaleType {
    pub name: &'static str,
    pub intervals: &'static [&'static str],
    pub aliases: &'static [&'static str],
    pub tier: ScaleTier,
}

static SCALE_TYPES: &[ScaleType] = &[
    ScaleType {
        name: "major",
        intervals: &["1P", "2M", "3M", "4P", "5P", "6M", "7M"],
        aliases: &["ionian"],
        tier: ScaleTier::Basic,
    },
    ScaleType {
        name: "minor",
        intervals: &["1P", "2M", "3m", "4P", "5P", "6m", "7m"],
        aliases: &["aeolian", "natural minor"],
        tier: ScaleTier::Basic,
    },
    ScaleType {
        name: "dorian",
        intervals: &["1P", "2M", "3m", "4P", "5P", "6M", "7m"],
        aliases: &[],
        tier: ScaleTier::Modal,
    },
    ScaleType {
        name: "phrygian",
        intervals: &["1P", "2m", "3m", "4P", "5P", "6m", "7m"],
        aliases: &[],
        tier: ScaleTier::Modal,
    },
    ScaleType {
        name: "lydian",
        intervals: &["1P", "2M", "3M", "4A", "5P", "6M", "7M"],
        aliases: &[],
        tier: ScaleTier::Modal,
    },
    ScaleType {
        name: "mixolydian",
        intervals: &["1P", "2M", "3M", "4P", "5P", "6M", "7m"],
        aliases: &["dominant"],
        tier: ScaleTier::Modal,
    },
    ScaleType {
        name: "locrian",
        intervals: &["1P", "2m", "3m", "4P", "5d", "6m", "7m"],
        aliases: &[],
        tier: ScaleTier::Modal,
    },
    ScaleType {
        name: "major pentatonic",
        intervals: &["1P", "2M", "3M", "5P", "6M"],
        aliases: &["pentatonic"],
        tier: ScaleTier::Modal,
    },
    ScaleType {
        name: "minor pentatonic",
        intervals: &["1P", "3m", "4P", "5P", "7m"],
        aliases: &[],
        tier: ScaleTier::Modal,
    },
    ScaleType {
        name: "harmonic minor",
        intervals: &["1P", "2M", "3m", "4P", "5P", "6m", "7M"],
        aliases: &[],
        tier: ScaleTier::Extended,
    },
    ScaleType {
        name: "melodic minor",
        intervals: &["1P", "2M", "3m", "4P", "5P", "6M", "7M"],
        aliases: &[],
        tier: ScaleTier::Extended,
    },
    ScaleType {
        name: "harmonic major",
        intervals: &["1P", "2M", "3M", "4P", "5P", "6m", "7M"],
        aliases: &[],
        tier: ScaleTier::Extended,
    },
    ScaleType {
        name: "blues",
        intervals: &["1P", "3m", "4P", "5d", "5P", "7m"],
        aliases: &["minor blues"],
        tier: ScaleTier::Extended,
    },
    ScaleType {
        name: "whole tone",
        intervals: &["1P", "2M", "3M", "4A", "5A", "7m"],
        aliases: &[],
        tier: ScaleTier::Extended,
    },
    ScaleType {
        name: "diminished",
        intervals: &["1P", "2M", "3m", "4P", "5d", "6m", "6M", "7M"],
        aliases: &["whole-half diminished"],
        tier: ScaleTier::Extended,
    },
    ScaleType {
        name: "chromatic",
        intervals: &[
            "1P", "2m", "2M", "3m", "3M", "4P", "5d", "5P", "6m", "6M", "7m", "7M",
        ],
        aliases: &[],
        tier: ScaleTier::Extended,
    },
];

impl ScaleType {
    pub fn parsed_intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.intervals.iter().filter_map(|i| Interval::parse(i).ok())
    }

    pub fn chroma_set(&self) -> PitchClassSet {
        self.parsed_intervals().map(Interval::chroma).collect()
    }
}

pub fn all_scale_types() -> &'static [ScaleType] {
    SCALE_TYPES
}

pub fn scale_type(name: &str) -> Option<&'static ScaleType> {
    let name = name.trim();
    SCALE_TYPES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .or_else(|| {
            SCALE_TYPES
                .iter()
                .find(|s| s.aliases.iter().any(|a| a.eq_ignore_ascii_case(name)))
        })
}
