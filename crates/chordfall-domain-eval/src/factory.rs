use crate::target::Proposal;
use chordfall_domain_theory::{
    all_chord_types, all_scale_types, scale_type, Chord, ChordQuality, ChordType, NoteName, Scale,
    ScaleTier, ScaleType, TheoryError,
};
use chordfall_ports::random::RandomSource;
use chordfall_ports::settings::GameSettings;
use chordfall_ports::types::{Complexity, TargetKind};
use tracing::debug;

/// Spellings never offered as targets: ambiguous without context or not
/// reasonably playable as a falling target.
pub const BLACKLIST: &[&str] = &["5", "4", "sus24", "alt7", "M7b6", "chromatic"];

#[derive(thiserror::Error, Debug)]
pub enum FactoryError {
    #[error("invalid root {root:?}: {source}")]
    InvalidRoot { root: String, source: TheoryError },
    #[error("invalid mode key {key:?}: {source}")]
    InvalidModeKey { key: String, source: TheoryError },
    #[error("unknown mode scale: {0}")]
    UnknownModeScale(String),
}

pub fn chord_complexity_filter(complexity: Complexity, chord_type: &ChordType) -> bool {
    match complexity {
        Complexity::Simple => {
            matches!(chord_type.quality(), ChordQuality::Major | ChordQuality::Minor)
                && chord_type.has_name()
        }
        Complexity::Intermediate => chord_type.has_name(),
        Complexity::Hard => true,
    }
}

pub fn scale_complexity_filter(complexity: Complexity, scale_type: &ScaleType) -> bool {
    match complexity {
        Complexity::Simple => scale_type.tier == ScaleTier::Basic,
        Complexity::Intermediate => scale_type.tier <= ScaleTier::Modal,
        Complexity::Hard => true,
    }
}

#[derive(Clone, Debug)]
pub struct FactoryConfig {
    pub complexity: Complexity,
    pub chord_length: usize,
    pub roots: Vec<NoteName>,
    /// Key/mode restriction, when enabled.
    pub mode: Option<Scale>,
}

impl FactoryConfig {
    pub fn from_settings(settings: &GameSettings) -> Result<Self, FactoryError> {
        let roots = settings
            .chord_roots
            .iter()
            .map(|root| {
                NoteName::parse(root.trim()).map_err(|source| FactoryError::InvalidRoot {
                    root: root.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mode = if settings.key_constrained_mode {
            let key = NoteName::parse(settings.mode_key.trim()).map_err(|source| {
                FactoryError::InvalidModeKey {
                    key: settings.mode_key.clone(),
                    source,
                }
            })?;
            let scale_type = scale_type(&settings.mode_scale_name)
                .ok_or_else(|| FactoryError::UnknownModeScale(settings.mode_scale_name.clone()))?;
            Some(Scale::new(key, scale_type))
        } else {
            None
        };

        Ok(Self {
            complexity: settings.chord_complexity,
            chord_length: settings.chord_length,
            roots,
            mode,
        })
    }
}

/// Draws random targets from the filtered catalogs. Candidate pools are fixed
/// at construction since settings do not change during a run.
#[derive(Debug)]
pub struct TargetFactory {
    config: FactoryConfig,
    chord_pool: Vec<&'static ChordType>,
    scale_pool: Vec<&'static ScaleType>,
    /// Key-constrained chord candidates grouped by scale-degree root; groups are
    /// never empty.
    degree_chords: Vec<(NoteName, Vec<&'static ChordType>)>,
}

impl TargetFactory {
    pub fn new(config: FactoryConfig) -> Self {
        let chord_pool: Vec<&'static ChordType> = all_chord_types()
            .iter()
            .filter(|t| chord_complexity_filter(config.complexity, t))
            .filter(|t| t.interval_count() <= config.chord_length)
            .filter(|t| !BLACKLIST.contains(&t.symbol()))
            .collect();

        let mut scale_pool: Vec<&'static ScaleType> = all_scale_types()
            .iter()
            .filter(|s| scale_complexity_filter(config.complexity, s))
            .filter(|s| !BLACKLIST.contains(&s.name))
            .collect();

        let mut degree_chords = Vec::new();
        if let Some(mode) = config.mode {
            let allowed = mode.pitch_classes();
            for degree in mode.notes() {
                let fitting: Vec<&'static ChordType> = chord_pool
                    .iter()
                    .copied()
                    .filter(|t| Chord::new(degree, *t).pitch_classes().is_subset(allowed))
                    .collect();
                if !fitting.is_empty() {
                    degree_chords.push((degree, fitting));
                }
            }
            scale_pool.retain(|s| Scale::new(mode.root, *s).pitch_classes().is_subset(allowed));
        }

        debug!(
            chords = chord_pool.len(),
            scales = scale_pool.len(),
            degrees = degree_chords.len(),
            "target factory candidate pools built"
        );

        Self {
            config,
            chord_pool,
            scale_pool,
            degree_chords,
        }
    }

    pub fn from_settings(settings: &GameSettings) -> Result<Self, FactoryError> {
        Ok(Self::new(FactoryConfig::from_settings(settings)?))
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn chord_candidates(&self) -> &[&'static ChordType] {
        &self.chord_pool
    }

    pub fn scale_candidates(&self) -> &[&'static ScaleType] {
        &self.scale_pool
    }

    /// One random proposal of `kind`, or `None` when the constraints leave no
    /// candidate.
    pub fn propose(&self, kind: TargetKind, rng: &mut dyn RandomSource) -> Option<Proposal> {
        match kind {
            TargetKind::Chord | TargetKind::Arpeggio => self
                .propose_chord(rng)
                .map(|chord| Proposal::from_chord(kind, chord)),
            TargetKind::Scale => self.propose_scale(rng).map(Proposal::from_scale),
        }
    }

    fn propose_chord(&self, rng: &mut dyn RandomSource) -> Option<Chord> {
        if self.config.mode.is_some() {
            let (root, types) = pick(&self.degree_chords, rng)?;
            let chord_type = pick(types, rng)?;
            return Some(Chord::new(*root, *chord_type));
        }
        let root = pick(&self.config.roots, rng)?;
        let chord_type = pick(&self.chord_pool, rng)?;
        Some(Chord::new(*root, *chord_type))
    }

    fn propose_scale(&self, rng: &mut dyn RandomSource) -> Option<Scale> {
        let root = match self.config.mode {
            Some(mode) => mode.root,
            None => *pick(&self.config.roots, rng)?,
        };
        let scale_type = pick(&self.scale_pool, rng)?;
        Some(Scale::new(root, *scale_type))
    }
}

fn pick<'a, T>(items: &'a [T], rng: &mut dyn RandomSource) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.pick(items.len()).min(items.len() - 1);
    items.get(index)
}
