use crate::matching::{chord_matches_key, is_covered, name_candidates};
use crate::target::{Proposal, Target, TargetId, TimerHandle};
use chordfall_domain_theory::{Chord, PitchClassSet};
use chordfall_ports::types::{TargetState, TimeMs};
use tracing::debug;

#[derive(Clone, Debug)]
pub enum NotesMatch {
    /// No active arpeggio or scale target.
    NoTarget,
    /// The played notes share nothing with the oldest accumulating target.
    Unrelated { target_id: TargetId },
    Progress {
        target_id: TargetId,
        accumulated: PitchClassSet,
        missing: PitchClassSet,
    },
    Completed(Target),
}

impl NotesMatch {
    pub fn is_hit(&self) -> bool {
        matches!(self, NotesMatch::Completed(_))
    }
}

/// Active targets in creation order. Every stored target is Active; hits and
/// expiries are removed and handed back to the caller.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    next_id: u64,
    generation: u64,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when an active target with a conflicting key exists.
    pub fn create(&mut self, proposal: Proposal, ttl_ms: TimeMs) -> Option<Target> {
        if self
            .targets
            .iter()
            .any(|t| t.key.conflicts_with(&proposal.key))
        {
            debug!(key = %proposal.key, "duplicate target proposal skipped");
            return None;
        }

        self.next_id += 1;
        let target = Target::new(
            TargetId(self.next_id),
            proposal,
            ttl_ms.max(1),
            self.generation,
        );
        debug!(id = target.id.0, key = %target.key, ttl_ms = target.time_to_live_ms, "target created");
        self.targets.push(target.clone());
        Some(target)
    }

    /// Hits the oldest chord/arpeggio target named by `name` (or by its
    /// inversion base when `inversions` is set).
    pub fn match_by_name(&mut self, name: &str, inversions: bool) -> Option<Target> {
        for candidate in name_candidates(name, inversions) {
            let Some(chord) = Chord::parse(candidate) else {
                continue;
            };
            let found = self
                .targets
                .iter()
                .position(|t| chord_matches_key(&chord, &t.key));
            if let Some(index) = found {
                let target = self.take_hit(index);
                debug!(id = target.id.0, name, candidate, "target hit by name");
                return Some(target);
            }
        }
        None
    }

    /// Accumulates `observed` into the oldest arpeggio/scale target only.
    pub fn match_by_notes(&mut self, observed: PitchClassSet) -> NotesMatch {
        let Some(index) = self
            .targets
            .iter()
            .position(|t| t.kind().matches_by_notes())
        else {
            return NotesMatch::NoTarget;
        };

        let target = &mut self.targets[index];
        let target_id = target.id;
        let related = !observed.intersection(target.pitch_classes).is_empty();
        target.accumulated_hits = target.accumulated_hits.union(observed);

        if is_covered(target.accumulated_hits, target.pitch_classes) {
            let target = self.take_hit(index);
            debug!(id = target.id.0, key = %target.key, "target completed by notes");
            return NotesMatch::Completed(target);
        }

        if related {
            NotesMatch::Progress {
                target_id,
                accumulated: target.accumulated_hits,
                missing: target.missing_pitch_classes(),
            }
        } else {
            NotesMatch::Unrelated { target_id }
        }
    }

    /// Advances every running countdown and returns the handles that ran out,
    /// oldest target first.
    pub fn tick_countdowns(&mut self, elapsed_ms: TimeMs) -> Vec<TimerHandle> {
        self.targets
            .iter_mut()
            .filter_map(|t| t.countdown.advance(elapsed_ms).then(|| t.timer_handle()))
            .collect()
    }

    /// Expires the target behind `handle`. Stale handles (cleared generation,
    /// removed or cancelled target) are ignored.
    pub fn expire(&mut self, handle: TimerHandle) -> Option<Target> {
        if handle.generation != self.generation {
            debug!(id = handle.target_id.0, "stale countdown ignored");
            return None;
        }
        let index = self.targets.iter().position(|t| {
            t.id == handle.target_id && t.is_active() && !t.countdown.is_cancelled()
        })?;
        let mut target = self.targets.remove(index);
        target.state = TargetState::Expired;
        debug!(id = target.id.0, key = %target.key, "target expired");
        Some(target)
    }

    /// Cancels every countdown and removes every target. Handles issued before
    /// the clear become stale.
    pub fn clear_all(&mut self) -> Vec<Target> {
        self.generation += 1;
        let mut cleared: Vec<Target> = self.targets.drain(..).collect();
        for target in &mut cleared {
            target.countdown.cancel();
        }
        cleared
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn take_hit(&mut self, index: usize) -> Target {
        self.targets[index].countdown.cancel();
        let mut target = self.targets.remove(index);
        target.state = TargetState::Hit;
        target
    }
}
