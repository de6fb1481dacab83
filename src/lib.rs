//! Disastrous - a top-down disaster survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile map, movement, hazards, waves)
//! - `settings`: JSON-backed run configuration

pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for the headless runner (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Map defaults, in tiles and pixels per tile
    pub const MAP_WIDTH: u32 = 40;
    pub const MAP_HEIGHT: u32 = 40;
    pub const TILE_SIZE: u32 = 16;

    /// Terrain generation: sine period per tile and the two value thresholds
    pub const TERRAIN_PERIOD: f32 = 0.2;
    pub const GRASS_THRESHOLD: f32 = 0.33;
    pub const DIRT_THRESHOLD: f32 = 0.66;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 75.0;
    pub const PLAYER_SIZE: f32 = 16.0;
    pub const PLAYER_HEALTH: i32 = 20;
    /// Interval between hazardous-tile damage checks (seconds)
    pub const STEP_DAMAGE_COOLDOWN: f32 = 0.25;

    /// Wave rotation
    pub const WAVE_DURATION: f32 = 10.0;
    /// Completed waves per difficulty level
    pub const LEVEL_THRESHOLD: u32 = 3;
    pub const BASE_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 4;

    /// Falling anvils
    pub const ANVIL_COUNT: usize = 20;
    pub const ANVIL_SIZE: f32 = 16.0;
    pub const ANVIL_DAMAGE: i32 = 10;
    /// Shadow scale at spawn; shrinks by `ANVIL_SHRINK_RATE` per second
    pub const ANVIL_START_SCALE: f32 = 2.0;
    pub const ANVIL_SHRINK_RATE: f32 = 1.0;
    /// Anvils land once the shadow scale drops below this
    pub const ANVIL_IMPACT_SCALE: f32 = 0.25;

    /// Lava
    pub const LAVA_DAMAGE: i32 = 1;
    pub const LAVA_SPREAD_TIME: f32 = 1.0;
    pub const LAVA_MAX_TILES: usize = 36;

    /// Tornadoes
    pub const TORNADO_COUNT: usize = 10;
    pub const TORNADO_SIZE: f32 = 24.0;
    pub const TORNADO_SPEED: f32 = 125.0;
    /// Spin rate (radians/sec)
    pub const TORNADO_SPIN_SPEED: f32 = 16.0;
    pub const TORNADO_DAMAGE: i32 = 2;
    pub const TORNADO_ATTACK_COOLDOWN: f32 = 0.25;

    /// Zombies
    pub const ZOMBIE_COUNT: usize = 10;
    pub const ZOMBIE_SIZE: f32 = 16.0;
    pub const ZOMBIE_SPEED: f32 = 50.0;
    pub const ZOMBIE_DAMAGE: i32 = 1;
    pub const ZOMBIE_ATTACK_COOLDOWN: f32 = 0.5;
    /// Center distance at which a zombie stops walking and attacks
    pub const ZOMBIE_MELEE_RANGE: f32 = 16.0;
    /// Per-axis ease gained per second while unobstructed
    pub const ZOMBIE_EASE_RATE: f32 = 1.0;
    pub const ZOMBIE_MAX_EASE: f32 = 1.0;

    /// Feedback particles
    pub const PARTICLE_MIN_SCALE: f32 = 0.05;
    pub const PARTICLE_SHRINK_RATE: f32 = 1.0;
    /// Despawn bursts spin (radians/sec)
    pub const PARTICLE_SPIN_SPEED: f32 = 4.0;
}

/// Proximity test used for every hazard hit.
///
/// Compares center distance against the mean of both sizes rather than a true
/// circle overlap; hazard balance depends on this exact approximation.
#[inline]
pub fn within_reach(a_center: Vec2, a_size: f32, b_center: Vec2, b_size: f32) -> bool {
    a_center.distance(b_center) < (a_size + b_size) * 0.5
}
