//! Headless host for the game core: loads settings, drives the clock and lets
//! a scripted player answer the falling targets.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chordfall_core::{dispatch, Command, GameCore, Phase};
use chordfall_infra_rand::RandRandom;
use chordfall_infra_settings_fs::FsSettings;
use chordfall_ports::input::InputChange;
use chordfall_ports::random::RandomSource;
use chordfall_ports::settings::SettingsPort;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod report;

use bot::{Bot, BotConfig};
use report::{EventSink, SessionLog};

#[derive(Parser, Debug)]
#[command(name = "chordfall-sim")]
#[command(about = "Plays chordfall sessions with a scripted player")]
#[command(version)]
struct Args {
    /// Settings file (defaults to settings.json in the user config dir)
    #[arg(short, long, env = "CHORDFALL_SETTINGS")]
    settings: Option<PathBuf>,

    /// Seed for target generation and the player; random when omitted
    #[arg(long, env = "CHORDFALL_SEED")]
    seed: Option<u64>,

    /// Number of games to play
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Upper bound on simulated time per game (ms)
    #[arg(long, default_value = "600000")]
    max_game_ms: u64,

    /// Clock step (ms)
    #[arg(long, default_value = "16")]
    tick_ms: u64,

    /// Probability that the player answers correctly
    #[arg(short, long, default_value = "0.9")]
    accuracy: f64,

    /// Time a target falls before the player reacts (ms)
    #[arg(long, default_value = "1200")]
    reaction_ms: u64,

    /// Minimum time between two player inputs (ms)
    #[arg(long, default_value = "250")]
    input_gap_ms: u64,

    /// Sleep between ticks instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Write every core event as JSON lines to this file
    #[arg(long, value_name = "FILE")]
    events: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chordfall=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.tick_ms > 0, "--tick-ms must be positive");
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.accuracy),
        "--accuracy must be within 0.0..=1.0"
    );

    let storage = match args.settings.clone() {
        Some(path) => FsSettings::from_file(path),
        None => FsSettings::default(),
    };
    let settings = storage
        .load_settings()
        .with_context(|| format!("loading settings from {}", storage.path().display()))?;
    info!(path = %storage.path().display(), modes = ?settings.game_modes, "settings loaded");

    let (core_rng, bot_rng) = random_sources(args.seed);
    let mut core = GameCore::new(settings.clone(), core_rng);
    let mut bot = Bot::new(
        BotConfig {
            accuracy: args.accuracy,
            reaction_ms: args.reaction_ms,
            input_gap_ms: args.input_gap_ms,
            play_inversions: settings.inversions_enabled,
        },
        bot_rng,
    );
    let mut log = SessionLog::default();
    let mut sink = EventSink::open(args.events.as_deref())?;
    let mut clock_ms = 0;

    for game in 1..=args.games {
        core.handle_command(Command::StartGame)
            .context("starting game")?;
        let game_end_ms = clock_ms + args.max_game_ms;

        while core.phase() == Phase::Running && clock_ms < game_end_ms {
            if let Some(change) = bot.act(clock_ms, core.targets()) {
                send_input(&mut core, change)?;
                send_input(&mut core, InputChange::default())?;
            }
            core.handle_command(Command::Advance {
                elapsed_ms: args.tick_ms,
            })?;
            clock_ms += args.tick_ms;

            for event in core.drain_events() {
                sink.record(clock_ms, &event)?;
                dispatch(&event, &mut log);
            }
            if args.realtime {
                std::thread::sleep(Duration::from_millis(args.tick_ms));
            }
        }

        if core.phase() == Phase::Running {
            info!(game, "time limit reached, stopping");
            core.handle_command(Command::StopGame)?;
            for event in core.drain_events() {
                sink.record(clock_ms, &event)?;
                dispatch(&event, &mut log);
            }
        }
    }

    sink.finish()?;
    info!(
        games = log.games,
        hits = log.hits,
        misses = log.misses,
        expired = log.expired,
        best_score = log.best_score,
        best_level = log.best_level,
        simulated_ms = clock_ms,
        "session finished"
    );
    Ok(())
}

fn send_input(core: &mut GameCore, change: InputChange) -> Result<()> {
    core.handle_command(Command::Input {
        notes: change.notes,
        chords: change.chords,
    })?;
    Ok(())
}

fn random_sources(seed: Option<u64>) -> (Box<dyn RandomSource>, Box<dyn RandomSource>) {
    match seed {
        Some(seed) => (
            Box::new(RandRandom::seeded(seed)),
            Box::new(RandRandom::seeded(seed.wrapping_add(1))),
        ),
        None => (
            Box::new(RandRandom::from_entropy()),
            Box::new(RandRandom::from_entropy()),
        ),
    }
}
