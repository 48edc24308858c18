use chordfall_ports::settings::{GameSettings, MIN_SPAWN_INTERVAL_MS};
use chordfall_ports::types::TimeMs;
use serde::{Deserialize, Serialize};

/// Every this many points the level rises and spawning speeds up.
const POINTS_PER_LEVEL: i64 = 10;
const LEVEL_SPEEDUP: f64 = 0.95;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: i64,
    pub level: u32,
    pub hearts: u32,
    pub spawn_interval_ms: TimeMs,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameRules {
    pub initial_spawn_interval_ms: TimeMs,
    pub min_spawn_interval_ms: TimeMs,
    pub max_hearts: u32,
    pub use_hearts: bool,
}

impl GameRules {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            initial_spawn_interval_ms: settings.spawn_interval_ms,
            max_hearts: settings.max_hearts,
            use_hearts: settings.use_hearts,
            ..Self::default()
        }
    }

    fn initial_state(&self) -> GameState {
        GameState {
            score: 0,
            level: 1,
            hearts: self.max_hearts,
            spawn_interval_ms: self.initial_spawn_interval_ms.max(self.min_spawn_interval_ms),
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            initial_spawn_interval_ms: 5_000,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            max_hearts: 3,
            use_hearts: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    PhaseChanged(Phase),
    ScoreChanged(i64),
    LevelChanged(u32),
    HeartsChanged(u32),
    LevelUp { level: u32, spawn_interval_ms: TimeMs },
    Missed,
    GameOver,
}

/// Score, hearts, level and spawn interval. Every mutation goes through a
/// transition function that reports what changed.
#[derive(Debug)]
pub struct GameMachine {
    rules: GameRules,
    phase: Phase,
    state: GameState,
}

impl GameMachine {
    pub fn new(rules: GameRules) -> Self {
        Self {
            state: rules.initial_state(),
            rules,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Idle → Running with fresh state. Ignored in any other phase.
    pub fn start(&mut self, rules: GameRules) -> Vec<Transition> {
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        self.rules = rules;
        self.state = rules.initial_state();
        self.phase = Phase::Running;
        let mut transitions = self.state_snapshot();
        transitions.push(Transition::PhaseChanged(Phase::Running));
        transitions
    }

    pub fn on_hit(&mut self) -> Vec<Transition> {
        if self.phase != Phase::Running {
            return Vec::new();
        }
        self.state.score += 1;
        let mut transitions = vec![Transition::ScoreChanged(self.state.score)];

        let score = self.state.score;
        if score > 0
            && score % POINTS_PER_LEVEL == 0
            && self.state.spawn_interval_ms > self.rules.min_spawn_interval_ms
        {
            self.level_up(&mut transitions);
        }
        transitions
    }

    /// Input was played but matched nothing.
    pub fn on_miss(&mut self) -> Vec<Transition> {
        if self.phase != Phase::Running {
            return Vec::new();
        }
        let mut transitions = vec![Transition::Missed];
        if self.rules.use_hearts {
            self.state.hearts = self.state.hearts.saturating_sub(1);
            transitions.push(Transition::HeartsChanged(self.state.hearts));
            if self.state.hearts == 0 {
                self.phase = Phase::GameOver;
                transitions.push(Transition::PhaseChanged(Phase::GameOver));
                transitions.push(Transition::GameOver);
            }
        } else if self.state.score > 0 {
            self.state.score -= 1;
            transitions.push(Transition::ScoreChanged(self.state.score));
        }
        transitions
    }

    /// A target reached the bottom: the run is over regardless of hearts.
    pub fn on_expiry(&mut self) -> Vec<Transition> {
        if self.phase != Phase::Running {
            return Vec::new();
        }
        self.phase = Phase::GameOver;
        vec![
            Transition::PhaseChanged(Phase::GameOver),
            Transition::GameOver,
        ]
    }

    /// GameOver → Idle, restoring initial values.
    pub fn finish_game_over(&mut self) -> Vec<Transition> {
        if self.phase != Phase::GameOver {
            return Vec::new();
        }
        self.reset_to_idle()
    }

    /// Running → Idle without a game-over.
    pub fn stop(&mut self) -> Vec<Transition> {
        if self.phase != Phase::Running {
            return Vec::new();
        }
        self.reset_to_idle()
    }

    fn level_up(&mut self, transitions: &mut Vec<Transition>) {
        let scaled = (self.state.spawn_interval_ms as f64 * LEVEL_SPEEDUP).round() as TimeMs;
        self.state.spawn_interval_ms = scaled.max(self.rules.min_spawn_interval_ms);
        self.state.level += 1;
        self.state.hearts = self.rules.max_hearts;
        transitions.push(Transition::LevelChanged(self.state.level));
        transitions.push(Transition::HeartsChanged(self.state.hearts));
        transitions.push(Transition::LevelUp {
            level: self.state.level,
            spawn_interval_ms: self.state.spawn_interval_ms,
        });
    }

    fn reset_to_idle(&mut self) -> Vec<Transition> {
        self.state = self.rules.initial_state();
        self.phase = Phase::Idle;
        let mut transitions = self.state_snapshot();
        transitions.push(Transition::PhaseChanged(Phase::Idle));
        transitions
    }

    fn state_snapshot(&self) -> Vec<Transition> {
        vec![
            Transition::ScoreChanged(self.state.score),
            Transition::LevelChanged(self.state.level),
            Transition::HeartsChanged(self.state.hearts),
        ]
    }
}
