//! Game session state
//!
//! Everything one run needs lives here: the seeded RNG that every hazard
//! draws from, the map, the player and the wave scheduler.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, AgentIds};
use super::feedback::Particles;
use super::player::Player;
use super::tilemap::TileMap;
use super::waves::WaveScheduler;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player alive, hazards rotating
    Playing,
    /// Health reached zero; only a respawn advances the game
    Dead,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single random source shared by terrain, hazards and the scheduler
    pub(crate) rng: Pcg32,
    pub map: TileMap,
    pub player: Player,
    pub waves: WaveScheduler,
    /// Visual bursts (not gameplay-affecting)
    pub particles: Particles,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) ids: AgentIds,
    settings: Settings,
}

impl GameState {
    /// Create a session on the default map with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_settings(&Settings::default(), seed)
    }

    pub fn with_settings(settings: &Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut map = TileMap::new(settings.map_width, settings.map_height, settings.tile_size);
        map.generate(&mut rng);

        let mut ids = AgentIds::new();
        // Top-left corner at the map center, as the player always started
        let player = Player::new(ids.allocate(), map.pixel_size() * 0.5);

        log::info!(
            "New game: seed {}, map {}x{} tiles of {} px",
            seed,
            map.width(),
            map.height(),
            map.tile_size()
        );

        Self {
            seed,
            rng,
            map,
            player,
            waves: WaveScheduler::new(),
            particles: Particles::new(settings.max_particles()),
            phase: GamePhase::Playing,
            time_ticks: 0,
            ids,
            settings: settings.clone(),
        }
    }

    /// Start over on a fresh map, seeded from the current RNG
    pub fn respawn(&mut self) {
        let seed = self.rng.random::<u64>();
        *self = Self::with_settings(&self.settings, seed);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Every agent of every active hazard, oldest hazard first
    pub fn hazard_agents(&self) -> impl Iterator<Item = &Agent> {
        self.waves.hazards().flat_map(|h| h.agents())
    }

    /// Nearest hazard agent to `point`, with its distance
    pub fn nearest_hazard_agent(&self, point: Vec2) -> Option<(&Agent, f32)> {
        self.hazard_agents()
            .map(|a| (a, a.center().distance(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::agent::AgentId;

    #[test]
    fn test_new_session() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health(), PLAYER_HEALTH);
        assert_eq!(state.player.agent.id, AgentId(0));
        assert_eq!(state.player.agent.pos, Vec2::new(320.0, 320.0));
        assert_eq!(state.waves.active_count(), 0);
        assert_eq!(state.waves.current_name(), "");
        assert_eq!(state.map.width(), MAP_WIDTH);
    }

    #[test]
    fn test_same_seed_same_map() {
        assert_eq!(GameState::new(123).map, GameState::new(123).map);
        assert_ne!(GameState::new(123).map, GameState::new(124).map);
    }

    #[test]
    fn test_settings_shape_the_session() {
        let settings = Settings {
            map_width: 10,
            map_height: 12,
            particles: false,
            ..Default::default()
        };
        let state = GameState::with_settings(&settings, 1);
        assert_eq!(state.map.pixel_size(), Vec2::new(160.0, 192.0));
        assert_eq!(state.player.agent.pos, Vec2::new(80.0, 96.0));
        assert_eq!(state.particles.capacity(), 0);
    }

    #[test]
    fn test_respawn_resets() {
        let mut state = GameState::new(5);
        state.player.take_damage(PLAYER_HEALTH);
        state.phase = GamePhase::Dead;
        state.time_ticks = 99;
        let old_seed = state.seed;

        state.respawn();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health(), PLAYER_HEALTH);
        assert_eq!(state.time_ticks, 0);
        assert_ne!(state.seed, old_seed);
    }

    #[test]
    fn test_nearest_hazard_agent_empty_without_hazards() {
        let state = GameState::new(5);
        assert!(state.nearest_hazard_agent(state.player.center()).is_none());
    }
}
