use anyhow::{Context, Result};
use chordfall_core::{Event, GameObserver, Phase, TargetSummary, TargetView};
use chordfall_ports::types::{RemovalReason, TargetKind, TimeMs};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Logs the session and keeps per-run tallies.
#[derive(Debug, Default)]
pub struct SessionLog {
    pub games: u32,
    pub hits: u32,
    pub misses: u32,
    pub expired: u32,
    pub best_score: i64,
    pub best_level: u32,
    level: u32,
}

impl GameObserver for SessionLog {
    fn on_phase_changed(&mut self, phase: Phase) {
        debug!(?phase, "phase");
        if phase == Phase::Running {
            self.games += 1;
        }
    }

    fn on_target_created(&mut self, target: &TargetView) {
        debug!(id = target.id, kind = %target.kind, label = %target.label, notes = ?target.notes, "target falling");
    }

    fn on_target_removed(&mut self, target: &TargetView, reason: RemovalReason) {
        match reason {
            RemovalReason::Hit => self.hits += 1,
            RemovalReason::Expired => self.expired += 1,
            RemovalReason::Cleared => {}
        }
        debug!(id = target.id, label = %target.label, ?reason, "target removed");
    }

    fn on_miss(&mut self) {
        self.misses += 1;
    }

    fn on_level_changed(&mut self, level: u32) {
        self.level = level;
        self.best_level = self.best_level.max(level);
    }

    fn on_level_up(&mut self, level: u32, spawn_interval_ms: TimeMs) {
        info!(level, spawn_interval_ms, "level up");
    }

    fn on_game_over(&mut self, final_score: i64, last_target: Option<&TargetSummary>) {
        self.best_score = self.best_score.max(final_score);
        match last_target {
            Some(target) => info!(
                final_score,
                level = self.level,
                chord = %target.label,
                notes = %target.notes.join(" "),
                intervals = %target.intervals.join(" "),
                "game over"
            ),
            None => info!(final_score, level = self.level, "game over"),
        }
    }

    fn on_instrument_cycle(&mut self, count: u32) {
        debug!(count, "instrument change");
    }

    fn on_spawn_stalled(&mut self, kind: TargetKind) {
        warn!(%kind, "settings leave nothing to spawn");
    }
}

/// Optional JSON-lines dump of every core event.
pub struct EventSink {
    writer: Option<BufWriter<File>>,
}

impl EventSink {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let writer = match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("creating event log {}", path.display()))?;
                Some(BufWriter::new(file))
            }
            None => None,
        };
        Ok(Self { writer })
    }

    pub fn record(&mut self, at_ms: TimeMs, event: &Event) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let line = serde_json::json!({ "at_ms": at_ms, "event": event });
        serde_json::to_writer(&mut *writer, &line)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}
