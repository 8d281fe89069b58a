//! Nutty entry point
//!
//! Runs a headless autoplay session: `nutty [LEVEL_JSON] [TUNING_JSON] [SEED]`.
//! Without a level the built-in one is used.

#[cfg(not(target_arch = "wasm32"))]
use nutty::consts::SIM_DT;
#[cfg(not(target_arch = "wasm32"))]
use nutty::level::LevelMap;
#[cfg(not(target_arch = "wasm32"))]
use nutty::sim::{Autoplay, GameState, StepClock, tick};
#[cfg(not(target_arch = "wasm32"))]
use nutty::Tuning;

/// Seed used when none is given
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SEED: u64 = 12345;
/// Give up after this much simulated time (seconds)
#[cfg(not(target_arch = "wasm32"))]
const SESSION_SECONDS: f32 = 120.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Nutty (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> nutty::Result<()> {
    let mut args = std::env::args().skip(1);

    let map = match args.next() {
        Some(path) => LevelMap::load(path)?,
        None => LevelMap::default_level()?,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = match args.next() {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid seed '{}'", raw);
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    };

    let mut state = GameState::new(tuning, &map)?;
    let mut autoplay = Autoplay::new(seed);
    let mut clock = StepClock::new();
    log::info!(
        "Session with seed {}: {} enemies to clear",
        seed,
        state.enemies_left()
    );

    // Frames arrive at display rate; the clock converts them into fixed steps
    let frame_dt = 1.0 / 60.0;
    let mut elapsed = 0.0;
    while elapsed < SESSION_SECONDS && !state.is_cleared() {
        for _ in 0..clock.advance(frame_dt) {
            let input = autoplay.next_input(&state);
            tick(&mut state, &input, SIM_DT);
        }
        elapsed += frame_dt;
    }

    if state.is_cleared() {
        log::info!(
            "Level cleared in {:.1}s with {} shots",
            state.time_ticks as f32 * SIM_DT,
            state.shots_fired
        );
    } else {
        log::info!(
            "Time up: {} of {} enemies destroyed with {} shots",
            state.enemies_removed,
            state.level.birds.len(),
            state.shots_fired
        );
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web front end; the library is the product on wasm
}
