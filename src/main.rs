//! Disastrous headless runner
//!
//! Plays one demo session with the idle controller at a fixed timestep and
//! logs how it went. Usage: `disastrous [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use disastrous::Settings;
    use disastrous::consts::SIM_DT;
    use disastrous::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Disastrous (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Quality {}, particles {}",
        settings.quality.as_str(),
        if settings.particles { "on" } else { "off" }
    );

    let mut state = GameState::with_settings(&settings, seed);
    let max_ticks = (settings.run_seconds.max(0.0) / SIM_DT) as u64;

    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        let input = TickInput::idle(&state);
        tick(&mut state, &input, SIM_DT);

        // Once a second
        if state.time_ticks % 60 == 0 {
            log::debug!(
                "t={}s health={} hazards={} next wave in {}s",
                state.time_ticks / 60,
                state.player.health(),
                state.waves.active_count(),
                state.waves.seconds_remaining()
            );
        }
    }

    let outcome = match state.phase {
        GamePhase::Dead => "died",
        GamePhase::Playing => "survived",
    };
    log::info!(
        "Run {} ({}): {:.1}s, {} waves completed, level {}, health {}, last hazard {:?}",
        seed,
        outcome,
        state.time_ticks as f32 * SIM_DT,
        state.waves.waves_completed(),
        state.waves.level(),
        state.player.health(),
        state.waves.current_name()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the product on wasm
}
