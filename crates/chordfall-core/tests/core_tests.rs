use chordfall_core::{
    Command, CoreError, Event, GameCore, GameObserver, Phase, TargetSummary, TargetView,
};
use chordfall_ports::{
    Complexity, GameSettings, InputChange, InputChangeCallback, InputError, InputPort,
    InputStream, RemovalReason, SequenceRandom, TargetKind,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

fn settings() -> GameSettings {
    GameSettings {
        chord_roots: vec!["C".to_string()],
        chord_complexity: Complexity::Simple,
        chord_length: 3,
        inversions_enabled: true,
        ..GameSettings::default()
    }
}

fn game_core(settings: GameSettings, draws: &[usize]) -> GameCore {
    GameCore::new(settings, Box::new(SequenceRandom::new(draws.to_vec())))
}

fn started(settings: GameSettings, draws: &[usize]) -> GameCore {
    let mut core = game_core(settings, draws);
    core.start().expect("valid settings");
    core.drain_events();
    core
}

fn input(notes: &[&str], chords: &[&str]) -> InputChange {
    InputChange::new(notes.iter().copied(), chords.iter().copied())
}

fn removals(events: &[Event]) -> Vec<(String, RemovalReason)> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::TargetRemoved { target, reason } => Some((target.key.clone(), *reason)),
            _ => None,
        })
        .collect()
}

fn game_overs(events: &[Event]) -> Vec<(i64, Option<TargetSummary>)> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::GameOver {
                final_score,
                last_target,
            } => Some((*final_score, last_target.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn start_spawns_first_target_immediately() {
    let mut core = game_core(settings(), &[]);

    core.start().expect("valid settings");
    let events = core.drain_events();

    assert_eq!(
        events[..4].to_vec(),
        vec![
            Event::ScoreChanged { score: 0 },
            Event::LevelChanged { level: 1 },
            Event::HeartsChanged { hearts: 3 },
            Event::PhaseChanged {
                phase: Phase::Running
            },
        ]
    );
    match &events[4] {
        Event::TargetCreated { target } => {
            assert_eq!(target.key, "CM");
            assert_eq!(target.label, "C");
            assert_eq!(target.kind, TargetKind::Chord);
            assert_eq!(target.notes, vec!["C", "E", "G"]);
            assert_eq!(target.intervals, vec!["1P", "3M", "5P"]);
            assert_eq!(target.pitch_classes, vec![0, 4, 7]);
            assert_eq!(target.time_to_live_ms, 10_000);
        }
        other => panic!("expected a created target, got {other:?}"),
    }
    assert_eq!(core.phase(), Phase::Running);
    assert_eq!(core.targets().len(), 1);
}

#[test]
fn inverted_chord_name_hits_root_position_target() {
    let mut core = started(settings(), &[]);

    core.on_input_change(input(&["E3", "G3", "C4"], &["C/E"]));
    let events = core.drain_events();

    assert_eq!(events.len(), 3);
    assert_eq!(
        events[0],
        Event::CurrentChord {
            name: "C/E".to_string()
        }
    );
    assert_eq!(events[2], Event::ScoreChanged { score: 1 });
    assert_eq!(removals(&events), vec![("CM".to_string(), RemovalReason::Hit)]);
    assert!(core.targets().is_empty());
}

#[test]
fn inversion_is_a_miss_when_disabled() {
    let mut s = settings();
    s.inversions_enabled = false;
    let mut core = started(s, &[]);

    core.on_input_change(input(&["E3", "G3", "C4"], &["C/E"]));
    let events = core.drain_events();

    assert!(events.contains(&Event::Miss));
    assert_eq!(core.targets().len(), 1);
}

#[test]
fn expiry_ends_the_game_exactly_once() {
    let mut s = settings();
    s.spawn_speed_ms = 1_000;
    let mut core = started(s, &[]);

    core.tick(999);
    assert!(core.drain_events().is_empty());

    core.tick(1);
    let events = core.drain_events();

    assert_eq!(removals(&events), vec![("CM".to_string(), RemovalReason::Expired)]);
    assert_eq!(
        game_overs(&events),
        vec![(
            0,
            Some(TargetSummary {
                label: "C".to_string(),
                notes: vec!["C".to_string(), "E".to_string(), "G".to_string()],
                intervals: vec!["1P".to_string(), "3M".to_string(), "5P".to_string()],
            })
        )]
    );
    assert_eq!(
        events.last(),
        Some(&Event::PhaseChanged { phase: Phase::Idle })
    );
    assert_eq!(core.phase(), Phase::Idle);
    assert!(core.targets().is_empty());
    assert_eq!(core.last_target().map(|t| t.label.as_str()), Some("C"));

    core.tick(60_000);
    assert!(core.drain_events().is_empty());
}

#[test]
fn simultaneous_expiries_report_one_game_over() {
    let mut s = settings();
    s.spawn_speed_ms = 1_000;
    s.spawn_interval_ms = 100;
    // CM at start, Cm at the first due spawn
    let mut core = started(s, &[0, 0, 0, 1]);

    core.tick(100);
    assert_eq!(core.targets().len(), 2);
    core.drain_events();

    core.tick(1_000);
    let events = core.drain_events();

    assert_eq!(
        removals(&events),
        vec![
            ("CM".to_string(), RemovalReason::Expired),
            ("Cm".to_string(), RemovalReason::Cleared),
        ]
    );
    assert_eq!(game_overs(&events).len(), 1);
    assert!(core.targets().is_empty());
}

#[test]
fn misses_without_hearts_floor_the_score() {
    let mut core = started(settings(), &[]);

    core.on_input_change(input(&["F#4"], &["F#"]));
    let events = core.drain_events();
    assert!(events.contains(&Event::Miss));
    assert!(!events
        .iter()
        .any(|e| matches!(e, Event::ScoreChanged { .. })));
    assert_eq!(core.state().score, 0);

    core.on_input_change(input(&["C4", "E4", "G4"], &["CM"]));
    assert_eq!(core.state().score, 1);

    core.on_input_change(input(&["F#4"], &["F#"]));
    assert!(core
        .drain_events()
        .contains(&Event::ScoreChanged { score: 0 }));
    assert_eq!(core.phase(), Phase::Running);
}

#[test]
fn losing_all_hearts_ends_the_game() {
    let mut s = settings();
    s.use_hearts = true;
    s.max_hearts = 2;
    let mut core = started(s, &[]);

    core.on_input_change(input(&["F#4"], &[]));
    assert_eq!(core.state().hearts, 1);
    core.on_input_change(input(&["F#4"], &[]));
    let events = core.drain_events();

    assert!(events.contains(&Event::HeartsChanged { hearts: 0 }));
    assert!(events.contains(&Event::PhaseChanged {
        phase: Phase::GameOver
    }));
    assert_eq!(removals(&events), vec![("CM".to_string(), RemovalReason::Cleared)]);
    let overs = game_overs(&events);
    assert_eq!(overs.len(), 1);
    assert_eq!(overs[0].1.as_ref().map(|t| t.label.as_str()), Some("C"));
    assert_eq!(core.phase(), Phase::Idle);
    assert_eq!(core.state().hearts, 2);
}

#[test]
fn ten_hits_speed_up_spawning() {
    let mut core = started(settings(), &[]);

    let mut events = Vec::new();
    for round in 0..10 {
        core.on_input_change(input(&["C4", "E4", "G4"], &["C"]));
        if round < 9 {
            core.tick(core.state().spawn_interval_ms);
        }
        events.extend(core.drain_events());
    }

    let level_ups: Vec<&Event> = events
        .iter()
        .filter(|e| matches!(e, Event::LevelUp { .. }))
        .collect();
    assert_eq!(
        level_ups,
        vec![&Event::LevelUp {
            level: 2,
            spawn_interval_ms: 4_750
        }]
    );
    assert_eq!(core.state().score, 10);
    assert_eq!(core.state().level, 2);

    // the next spawn follows the shorter interval
    core.tick(4_749);
    assert!(core.targets().is_empty());
    core.tick(1);
    assert_eq!(core.targets().len(), 1);
}

#[test]
fn arpeggio_accumulates_across_inputs() {
    let mut s = settings();
    s.game_modes = BTreeSet::from([TargetKind::Arpeggio]);
    let mut core = started(s, &[]);

    let target_id = core.targets()[0].id.0;
    core.on_input_change(input(&["C4"], &[]));
    assert_eq!(
        core.drain_events(),
        vec![
            Event::CurrentChord {
                name: String::new()
            },
            Event::TargetProgress {
                target_id,
                accumulated: vec![0],
                missing: vec![4, 7],
            },
        ]
    );

    core.on_input_change(input(&["F#4"], &[]));
    assert!(core.drain_events().contains(&Event::Miss));
    assert_eq!(core.targets().len(), 1);

    core.on_input_change(input(&["E5", "G2"], &[]));
    let events = core.drain_events();
    assert_eq!(removals(&events), vec![("CM".to_string(), RemovalReason::Hit)]);
    assert_eq!(core.state().score, 1);
}

#[test]
fn empty_candidate_pool_is_reported_once() {
    let mut s = settings();
    s.chord_length = 2;
    let mut core = game_core(s, &[]);

    core.start().expect("structurally valid settings");
    core.tick(5_000);
    core.tick(5_000);
    core.tick(5_000);
    let events = core.drain_events();

    let stalls = events
        .iter()
        .filter(|e| matches!(e, Event::SpawnStalled { .. }))
        .count();
    assert_eq!(stalls, 1);
    assert!(events.contains(&Event::SpawnStalled {
        kind: TargetKind::Chord
    }));
    assert_eq!(core.phase(), Phase::Running);
    assert!(core.targets().is_empty());
}

#[test]
fn current_chord_and_instrument_cycle() {
    let mut core = game_core(settings(), &[]);

    for _ in 0..14 {
        core.on_input_change(input(&["C4", "E4", "G4"], &["CM", "Em#5"]));
        // releases do not count toward the cycle
        core.on_input_change(input(&[], &[]));
    }
    let events = core.drain_events();

    let cycles: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            Event::InstrumentCycle { count } => Some(*count),
            _ => None,
        })
        .collect();
    assert_eq!(cycles, vec![7, 14]);
    assert_eq!(
        events[0],
        Event::CurrentChord {
            name: "C".to_string()
        }
    );
    // idle inputs never score or miss
    assert!(!events.contains(&Event::Miss));
}

#[test]
fn stop_clears_targets_without_game_over() {
    let mut core = started(settings(), &[]);

    core.handle_command(Command::StopGame).expect("stop");
    let events = core.drain_events();

    assert_eq!(removals(&events), vec![("CM".to_string(), RemovalReason::Cleared)]);
    assert!(game_overs(&events).is_empty());
    assert_eq!(core.phase(), Phase::Idle);

    core.tick(20_000);
    assert!(core.drain_events().is_empty());
}

#[test]
fn start_rejects_running_and_invalid_settings() {
    let mut core = started(settings(), &[]);
    assert!(matches!(core.start(), Err(CoreError::AlreadyRunning)));

    let mut bad_root = settings();
    bad_root.chord_roots = vec!["H".to_string()];
    let mut core = game_core(bad_root, &[]);
    assert!(matches!(core.start(), Err(CoreError::Factory(_))));
    assert_eq!(core.phase(), Phase::Idle);

    let mut no_modes = settings();
    no_modes.game_modes.clear();
    let mut core = game_core(no_modes, &[]);
    assert!(matches!(core.start(), Err(CoreError::Settings(_))));
}

#[test]
fn settings_update_applies_at_next_start() {
    let mut core = started(settings(), &[]);
    let mut next = settings();
    next.chord_roots = vec!["D".to_string()];

    core.handle_command(Command::UpdateSettings { settings: next })
        .expect("update");
    assert_eq!(core.targets()[0].key.to_string(), "CM");

    core.handle_command(Command::StopGame).expect("stop");
    core.handle_command(Command::StartGame).expect("start");
    assert_eq!(core.targets()[0].key.to_string(), "DM");
}

struct FakeInput {
    callback: Arc<Mutex<Option<InputChangeCallback>>>,
    closed: Arc<AtomicBool>,
}

struct FakeStream {
    closed: Arc<AtomicBool>,
}

impl InputStream for FakeStream {
    fn close(self: Box<Self>) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl InputPort for FakeInput {
    fn open(&self, cb: InputChangeCallback) -> Result<Box<dyn InputStream>, InputError> {
        *self.callback.lock().expect("lock") = Some(cb);
        Ok(Box::new(FakeStream {
            closed: self.closed.clone(),
        }))
    }
}

#[test]
fn queued_input_is_processed_on_tick() {
    let port = FakeInput {
        callback: Arc::new(Mutex::new(None)),
        closed: Arc::new(AtomicBool::new(false)),
    };
    let mut core = started(settings(), &[]);
    core.attach_input(&port).expect("attach");

    let cb = port
        .callback
        .lock()
        .expect("lock")
        .clone()
        .expect("callback registered");
    cb(input(&["G3", "C4", "E4"], &["C/G"]));
    assert_eq!(core.targets().len(), 1);

    core.tick(0);
    assert!(core.targets().is_empty());
    assert_eq!(core.state().score, 1);

    core.detach_input();
    assert!(port.closed.load(Ordering::SeqCst));
}

#[derive(Default)]
struct Recorder {
    created: Vec<String>,
    removed: Vec<(String, RemovalReason)>,
    game_over: Option<(i64, Option<String>)>,
    phases: Vec<Phase>,
}

impl GameObserver for Recorder {
    fn on_phase_changed(&mut self, phase: Phase) {
        self.phases.push(phase);
    }

    fn on_target_created(&mut self, target: &TargetView) {
        self.created.push(target.key.clone());
    }

    fn on_target_removed(&mut self, target: &TargetView, reason: RemovalReason) {
        self.removed.push((target.key.clone(), reason));
    }

    fn on_game_over(&mut self, final_score: i64, last_target: Option<&TargetSummary>) {
        self.game_over = Some((final_score, last_target.map(|t| t.label.clone())));
    }
}

#[test]
fn observer_receives_hooks_in_order() {
    let mut s = settings();
    s.spawn_speed_ms = 500;
    let mut core = game_core(s, &[]);
    let mut recorder = Recorder::default();

    core.start().expect("start");
    core.tick(500);
    core.dispatch_events(&mut recorder);

    assert_eq!(recorder.created, vec!["CM".to_string()]);
    assert_eq!(
        recorder.removed,
        vec![("CM".to_string(), RemovalReason::Expired)]
    );
    assert_eq!(recorder.game_over, Some((0, Some("C".to_string()))));
    assert_eq!(
        recorder.phases,
        vec![Phase::Running, Phase::GameOver, Phase::Idle]
    );
    assert!(core.drain_events().is_empty());
}

#[test]
fn commands_and_events_use_tagged_json() {
    let cmd: Command =
        serde_json::from_str(r#"{"type":"Advance","payload":{"elapsed_ms":16}}"#).expect("parse");
    assert!(matches!(cmd, Command::Advance { elapsed_ms: 16 }));

    let cmd: Command = serde_json::from_str(r#"{"type":"StartGame"}"#).expect("parse");
    assert!(matches!(cmd, Command::StartGame));

    let cmd: Command = serde_json::from_str(
        r#"{"type":"UpdateSettings","payload":{"settings":{"chord_roots":["D","F#"]}}}"#,
    )
    .expect("parse");
    match cmd {
        Command::UpdateSettings { settings } => {
            assert_eq!(settings.chord_roots, vec!["D", "F#"]);
            assert_eq!(settings.spawn_speed_ms, 10_000);
        }
        other => panic!("unexpected command {other:?}"),
    }

    let json = serde_json::to_value(Event::LevelUp {
        level: 3,
        spawn_interval_ms: 4_513,
    })
    .expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({"type": "LevelUp", "payload": {"level": 3, "spawn_interval_ms": 4513}})
    );

    let json = serde_json::to_value(Event::TargetRemoved {
        target: TargetView {
            id: 1,
            kind: TargetKind::Scale,
            key: "A minor".to_string(),
            root: "A".to_string(),
            qualifier: "minor".to_string(),
            label: "A minor".to_string(),
            notes: Vec::new(),
            intervals: Vec::new(),
            pitch_classes: Vec::new(),
            time_to_live_ms: 10_000,
            remaining_ms: 0,
        },
        reason: RemovalReason::Expired,
    })
    .expect("serialize");
    assert_eq!(json["payload"]["reason"], "Expired");
    assert_eq!(json["payload"]["target"]["kind"], "scale");
}
