use crate::game::Phase;
use crate::ipc::{Event, TargetSummary, TargetView};
use chordfall_ports::types::{RemovalReason, TargetKind, TimeMs};

/// Hook-style view of the event stream for render and audio collaborators.
/// Every hook defaults to a no-op.
pub trait GameObserver {
    fn on_phase_changed(&mut self, _phase: Phase) {}
    fn on_target_created(&mut self, _target: &TargetView) {}
    fn on_target_removed(&mut self, _target: &TargetView, _reason: RemovalReason) {}
    fn on_target_progress(&mut self, _target_id: u64, _accumulated: &[u8], _missing: &[u8]) {}
    fn on_score_changed(&mut self, _score: i64) {}
    fn on_level_changed(&mut self, _level: u32) {}
    fn on_hearts_changed(&mut self, _hearts: u32) {}
    fn on_level_up(&mut self, _level: u32, _spawn_interval_ms: TimeMs) {}
    fn on_miss(&mut self) {}
    fn on_game_over(&mut self, _final_score: i64, _last_target: Option<&TargetSummary>) {}
    fn on_current_chord(&mut self, _name: &str) {}
    fn on_instrument_cycle(&mut self, _count: u32) {}
    fn on_spawn_stalled(&mut self, _kind: TargetKind) {}
}

pub fn dispatch(event: &Event, observer: &mut dyn GameObserver) {
    match event {
        Event::PhaseChanged { phase } => observer.on_phase_changed(*phase),
        Event::TargetCreated { target } => observer.on_target_created(target),
        Event::TargetRemoved { target, reason } => observer.on_target_removed(target, *reason),
        Event::TargetProgress {
            target_id,
            accumulated,
            missing,
        } => observer.on_target_progress(*target_id, accumulated, missing),
        Event::ScoreChanged { score } => observer.on_score_changed(*score),
        Event::LevelChanged { level } => observer.on_level_changed(*level),
        Event::HeartsChanged { hearts } => observer.on_hearts_changed(*hearts),
        Event::LevelUp {
            level,
            spawn_interval_ms,
        } => observer.on_level_up(*level, *spawn_interval_ms),
        Event::Miss => observer.on_miss(),
        Event::GameOver {
            final_score,
            last_target,
        } => observer.on_game_over(*final_score, last_target.as_ref()),
        Event::CurrentChord { name } => observer.on_current_chord(name),
        Event::InstrumentCycle { count } => observer.on_instrument_cycle(*count),
        Event::SpawnStalled { kind } => observer.on_spawn_stalled(*kind),
    }
}
