use crate::game::{GameMachine, GameRules, GameState, Phase, Transition};
use crate::ipc::{Command, Event, TargetSummary, TargetView};
use crate::observer::{dispatch, GameObserver};
use crate::scheduler::{SchedulerConfig, SpawnScheduler};
use chordfall_domain_eval::{
    pitch_classes_of, FactoryError, NotesMatch, Target, TargetFactory, TargetRegistry,
};
use chordfall_ports::input::{InputChange, InputError, InputPort, InputStream};
use chordfall_ports::random::RandomSource;
use chordfall_ports::settings::{GameSettings, SettingsError, SettingsPort};
use chordfall_ports::types::{RemovalReason, TargetKind, TimeMs};
use parking_lot::Mutex;
use rtrb::{Consumer, RingBuffer};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

const INPUT_QUEUE_CAPACITY: usize = 256;
const INSTRUMENT_CYCLE_INPUTS: u32 = 7;

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("factory error: {0}")]
    Factory(#[from] FactoryError),
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("a game is already running")]
    AlreadyRunning,
}

pub struct GameCore {
    /// Applied at the next start.
    settings: GameSettings,
    /// Snapshot taken at start; fixed for the run.
    active_settings: GameSettings,
    factory: Option<TargetFactory>,
    registry: TargetRegistry,
    scheduler: SpawnScheduler,
    machine: GameMachine,
    rng: Box<dyn RandomSource>,
    events: VecDeque<Event>,
    input_stream: Option<Box<dyn InputStream>>,
    input_queue_rx: Option<Consumer<InputChange>>,
    last_target: Option<TargetSummary>,
    stall_reported: bool,
    input_count: u32,
}

impl GameCore {
    pub fn new(settings: GameSettings, rng: Box<dyn RandomSource>) -> Self {
        let rules = GameRules::from_settings(&settings);
        Self {
            active_settings: settings.clone(),
            settings,
            factory: None,
            registry: TargetRegistry::new(),
            scheduler: SpawnScheduler::new(SchedulerConfig {
                spawn_interval_ms: rules.initial_spawn_interval_ms,
            }),
            machine: GameMachine::new(rules),
            rng,
            events: VecDeque::new(),
            input_stream: None,
            input_queue_rx: None,
            last_target: None,
            stall_reported: false,
            input_count: 0,
        }
    }

    pub fn from_settings_port(
        port: &dyn SettingsPort,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, CoreError> {
        let settings = port.load_settings()?;
        Ok(Self::new(settings, rng))
    }

    pub fn handle_command(&mut self, cmd: Command) -> Result<(), CoreError> {
        match cmd {
            Command::StartGame => self.start()?,
            Command::StopGame => self.stop(),
            Command::UpdateSettings { settings } => {
                debug!("settings updated, applied at next start");
                self.settings = settings;
            }
            Command::Input { notes, chords } => {
                self.on_input_change(InputChange { notes, chords });
            }
            Command::Advance { elapsed_ms } => self.tick(elapsed_ms),
        }
        Ok(())
    }

    /// Idle → Running. Settings are validated and snapshotted here, then the
    /// first target spawns immediately.
    pub fn start(&mut self) -> Result<(), CoreError> {
        if self.machine.phase() != Phase::Idle {
            return Err(CoreError::AlreadyRunning);
        }
        self.settings.validate()?;
        let factory = TargetFactory::from_settings(&self.settings)?;

        self.active_settings = self.settings.clone();
        self.factory = Some(factory);
        self.registry.clear_all();
        self.last_target = None;
        self.stall_reported = false;

        let transitions = self
            .machine
            .start(GameRules::from_settings(&self.active_settings));
        self.apply_transitions(transitions);
        self.scheduler.start(self.machine.state().spawn_interval_ms);
        info!(
            modes = ?self.active_settings.game_modes,
            spawn_interval_ms = self.scheduler.interval_ms(),
            "game started"
        );

        self.spawn_target();
        Ok(())
    }

    /// Player-initiated teardown; no game-over summary.
    pub fn stop(&mut self) {
        if self.machine.phase() != Phase::Running {
            return;
        }
        self.scheduler.cancel();
        self.clear_targets();
        let transitions = self.machine.stop();
        self.apply_transitions(transitions);
        info!("game stopped");
    }

    pub fn on_input_change(&mut self, change: InputChange) {
        let current = change
            .chords
            .first()
            .map(|name| name.strip_suffix('M').unwrap_or(name.as_str()))
            .unwrap_or_default()
            .to_string();
        self.events.push_back(Event::CurrentChord { name: current });

        if change.is_empty() {
            return;
        }
        self.input_count = self.input_count.wrapping_add(1);
        if self.input_count % INSTRUMENT_CYCLE_INPUTS == 0 {
            self.events.push_back(Event::InstrumentCycle {
                count: self.input_count,
            });
        }

        if self.machine.phase() != Phase::Running {
            return;
        }

        let inversions = self.active_settings.inversions_enabled;
        for name in &change.chords {
            if let Some(target) = self.registry.match_by_name(name, inversions) {
                self.on_target_hit(target);
                return;
            }
        }

        let (observed, unknown) = pitch_classes_of(change.notes.as_slice());
        for note in &unknown {
            warn!(note = %note, "ignoring unparsable input note");
        }
        if !observed.is_empty() {
            match self.registry.match_by_notes(observed) {
                NotesMatch::Completed(target) => {
                    self.on_target_hit(target);
                    return;
                }
                NotesMatch::Progress {
                    target_id,
                    accumulated,
                    missing,
                } => {
                    self.events.push_back(Event::TargetProgress {
                        target_id: target_id.0,
                        accumulated: accumulated.to_vec(),
                        missing: missing.to_vec(),
                    });
                    return;
                }
                NotesMatch::Unrelated { .. } | NotesMatch::NoTarget => {}
            }
        }

        debug!(notes = ?change.notes, chords = ?change.chords, "input matched nothing");
        let transitions = self.machine.on_miss();
        if self.apply_transitions(transitions) {
            self.game_over(None);
        }
    }

    /// Drains queued input, then runs countdowns, then due spawns.
    pub fn tick(&mut self, elapsed_ms: TimeMs) {
        self.process_queued_inputs();
        if self.machine.phase() != Phase::Running {
            return;
        }

        let due = self
            .scheduler
            .advance_countdowns(&mut self.registry, elapsed_ms);
        for handle in due {
            let Some(target) = self.registry.expire(handle) else {
                continue;
            };
            self.events.push_back(Event::TargetRemoved {
                target: TargetView::from(&target),
                reason: RemovalReason::Expired,
            });
            let transitions = self.machine.on_expiry();
            if self.apply_transitions(transitions) {
                self.game_over(Some(target));
            }
            // the clear on game over made every remaining handle stale
            return;
        }

        for _ in 0..self.scheduler.advance(elapsed_ms) {
            self.spawn_target();
        }
    }

    pub fn attach_input(&mut self, port: &dyn InputPort) -> Result<(), CoreError> {
        self.detach_input();

        let (producer, consumer) = RingBuffer::new(INPUT_QUEUE_CAPACITY);
        let producer = Arc::new(Mutex::new(producer));
        let cb = Arc::new(move |change: InputChange| {
            if let Some(mut guard) = producer.try_lock() {
                let _ = guard.push(change);
            }
        });

        let stream = port.open(cb)?;
        self.input_stream = Some(stream);
        self.input_queue_rx = Some(consumer);
        debug!("input attached");
        Ok(())
    }

    pub fn detach_input(&mut self) {
        if let Some(stream) = self.input_stream.take() {
            stream.close();
        }
        self.input_queue_rx = None;
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    pub fn dispatch_events(&mut self, observer: &mut dyn GameObserver) {
        for event in self.drain_events() {
            dispatch(&event, observer);
        }
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    pub fn targets(&self) -> &[Target] {
        self.registry.targets()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn last_target(&self) -> Option<&TargetSummary> {
        self.last_target.as_ref()
    }

    fn process_queued_inputs(&mut self) {
        let Some(mut consumer) = self.input_queue_rx.take() else {
            return;
        };

        let mut pending = Vec::new();
        while let Ok(change) = consumer.pop() {
            pending.push(change);
        }
        self.input_queue_rx = Some(consumer);

        for change in pending {
            self.on_input_change(change);
        }
    }

    fn spawn_target(&mut self) {
        let Some(factory) = self.factory.as_ref() else {
            return;
        };
        let kind = pick_kind(&self.active_settings.game_modes, self.rng.as_mut());

        let Some(proposal) = factory.propose(kind, self.rng.as_mut()) else {
            if !self.stall_reported {
                warn!(%kind, "no target satisfies the current settings, spawn skipped");
                self.stall_reported = true;
                self.events.push_back(Event::SpawnStalled { kind });
            }
            return;
        };

        let ttl_ms = self.active_settings.spawn_speed_ms;
        if let Some(target) = self.registry.create(proposal, ttl_ms) {
            self.events.push_back(Event::TargetCreated {
                target: TargetView::from(&target),
            });
        }
    }

    fn on_target_hit(&mut self, target: Target) {
        self.events.push_back(Event::TargetRemoved {
            target: TargetView::from(&target),
            reason: RemovalReason::Hit,
        });
        let transitions = self.machine.on_hit();
        self.apply_transitions(transitions);
    }

    fn game_over(&mut self, expired: Option<Target>) {
        self.scheduler.cancel();
        let cleared = self.clear_targets();

        let last_target = expired
            .as_ref()
            .or(cleared.first())
            .map(TargetSummary::from);
        let final_score = self.machine.state().score;
        info!(
            final_score,
            last_target = ?last_target.as_ref().map(|t| t.label.as_str()),
            "game over"
        );
        self.last_target = last_target.clone();
        self.events.push_back(Event::GameOver {
            final_score,
            last_target,
        });

        let transitions = self.machine.finish_game_over();
        self.apply_transitions(transitions);
    }

    fn clear_targets(&mut self) -> Vec<Target> {
        let cleared = self.registry.clear_all();
        for target in &cleared {
            self.events.push_back(Event::TargetRemoved {
                target: TargetView::from(target),
                reason: RemovalReason::Cleared,
            });
        }
        cleared
    }

    /// Returns true when the transitions ended the run.
    fn apply_transitions(&mut self, transitions: Vec<Transition>) -> bool {
        let mut game_over = false;
        for transition in transitions {
            let event = match transition {
                Transition::PhaseChanged(phase) => {
                    info!(?phase, "phase changed");
                    Event::PhaseChanged { phase }
                }
                Transition::ScoreChanged(score) => Event::ScoreChanged { score },
                Transition::LevelChanged(level) => Event::LevelChanged { level },
                Transition::HeartsChanged(hearts) => Event::HeartsChanged { hearts },
                Transition::LevelUp {
                    level,
                    spawn_interval_ms,
                } => {
                    info!(level, spawn_interval_ms, "level up");
                    self.scheduler.set_interval(spawn_interval_ms);
                    Event::LevelUp {
                        level,
                        spawn_interval_ms,
                    }
                }
                Transition::Missed => Event::Miss,
                Transition::GameOver => {
                    game_over = true;
                    continue;
                }
            };
            self.events.push_back(event);
        }
        game_over
    }
}

impl Drop for GameCore {
    fn drop(&mut self) {
        self.detach_input();
    }
}

fn pick_kind(modes: &BTreeSet<TargetKind>, rng: &mut dyn RandomSource) -> TargetKind {
    let modes: Vec<TargetKind> = modes.iter().copied().collect();
    match modes.len() {
        0 => TargetKind::Chord,
        1 => modes[0],
        len => modes[rng.pick(len).min(len - 1)],
    }
}
