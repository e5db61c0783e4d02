//! Headless Starfire runner
//!
//! Plays a scripted round without a window: the autopilot starts a game,
//! circles the arena firing continuously and logs what happened. Useful for
//! soak-testing the pools and for checking a config file.
//!
//! Usage: `starfire [config.toml|config.ron] [seconds]`

use starfire::constants;
use starfire::{GameState, StateStack};
use starfire_engine::foundation::logging;
use starfire_engine::foundation::time::Clock;
use starfire_engine::host::{InputSnapshot, SoundSink, SpriteDraw};
use std::collections::BTreeMap;

const DEFAULT_CONFIG_PATH: &str = "starfire.toml";
const DEFAULT_SECONDS: f32 = 60.0;
const FRAME_DELTA: f32 = 1.0 / 60.0;

/// Sound sink that counts cues
#[derive(Default)]
struct CueCounter {
    counts: BTreeMap<&'static str, u32>,
}

impl SoundSink for CueCounter {
    fn play(&mut self, cue: &'static str) {
        *self.counts.entry(cue).or_default() += 1;
    }
}

fn autopilot(total: f32, state: GameState) -> InputSnapshot {
    let angle = total * 0.8;
    InputSnapshot {
        move_x: angle.cos(),
        move_y: angle.sin(),
        fire: true,
        pause: false,
        confirm: state == GameState::Menu,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let seconds = match args.next() {
        Some(value) => value.parse::<f32>()?,
        None => DEFAULT_SECONDS,
    };

    log::info!("Starting Starfire headless run ({} s, config {})", seconds, config_path);
    constants::table().load(&config_path)?;

    let mut states = StateStack::from_constants();
    let mut clock = Clock::new();
    let mut sounds = CueCounter::default();
    let mut draws: Vec<SpriteDraw> = Vec::new();
    let mut state = states.current();

    while clock.total_time() < seconds {
        let time = clock.advance(FRAME_DELTA);
        let input = autopilot(time.total, state);
        state = states.tick(&input, &time, &mut sounds);

        draws.clear();
        states.draw(&mut draws);

        if state == GameState::GameOver {
            break;
        }
    }

    let score = states
        .final_score()
        .or_else(|| states.session().map(|session| session.score()))
        .unwrap_or(0);
    log::info!(
        "Run finished after {} frames ({:.1} s) in state {:?}",
        clock.frame_count(),
        clock.total_time(),
        state
    );
    log::info!("Score {}, last frame drew {} sprites", score, draws.len());
    if let Some(session) = states.session() {
        log::info!(
            "Waves {}, kills {}, lives {}, objects in use {}",
            session.waves_spawned(),
            session.kills(),
            session.lives(),
            session.object_count()
        );
    }
    for (cue, count) in &sounds.counts {
        log::info!("Sound {:<12} x{}", cue, count);
    }

    Ok(())
}
