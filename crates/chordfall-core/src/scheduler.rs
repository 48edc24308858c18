use chordfall_domain_eval::{TargetRegistry, TimerHandle};
use chordfall_ports::types::TimeMs;

#[derive(Clone, Copy, Debug)]
pub struct SchedulerConfig {
    pub spawn_interval_ms: TimeMs,
}

/// Spawn cadence plus countdown driving for the active targets.
#[derive(Debug)]
pub struct SpawnScheduler {
    config: SchedulerConfig,
    since_spawn_ms: TimeMs,
    running: bool,
}

impl SpawnScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            since_spawn_ms: 0,
            running: false,
        }
    }

    /// Starts the spawn timer; the caller performs the first spawn itself.
    pub fn start(&mut self, spawn_interval_ms: TimeMs) {
        self.config.spawn_interval_ms = spawn_interval_ms.max(1);
        self.since_spawn_ms = 0;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.since_spawn_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> TimeMs {
        self.config.spawn_interval_ms
    }

    /// Takes effect from the next due spawn; time already accumulated is kept.
    pub fn set_interval(&mut self, spawn_interval_ms: TimeMs) {
        self.config.spawn_interval_ms = spawn_interval_ms.max(1);
    }

    /// Number of spawns that fell due during `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: TimeMs) -> u32 {
        if !self.running {
            return 0;
        }
        self.since_spawn_ms = self.since_spawn_ms.saturating_add(elapsed_ms);
        let mut due = 0;
        while self.since_spawn_ms >= self.config.spawn_interval_ms {
            self.since_spawn_ms -= self.config.spawn_interval_ms;
            due += 1;
        }
        due
    }

    pub fn advance_countdowns(
        &self,
        registry: &mut TargetRegistry,
        elapsed_ms: TimeMs,
    ) -> Vec<TimerHandle> {
        if !self.running {
            return Vec::new();
        }
        registry.tick_countdowns(elapsed_ms)
    }
}
