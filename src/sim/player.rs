//! The player: a moving agent with health and a hazardous-terrain damage tick

use glam::Vec2;

use super::agent::{Agent, AgentId};
use super::collision::{MoveResult, move_agent};
use super::tilemap::TileMap;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Player {
    pub agent: Agent,
    health: i32,
    /// Counts down to the next hazardous-tile check
    step_damage_timer: f32,
}

impl Player {
    /// Create a player with its top-left corner at `pos`
    pub fn new(id: AgentId, pos: Vec2) -> Self {
        Self {
            agent: Agent::square(id, pos, PLAYER_SIZE),
            health: PLAYER_HEALTH,
            step_damage_timer: STEP_DAMAGE_COOLDOWN,
        }
    }

    /// Current health. Not clamped; may go below zero.
    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.agent.center()
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.agent.size()
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    /// Run the terrain damage tick.
    ///
    /// Every `STEP_DAMAGE_COOLDOWN` seconds the tile under the player's
    /// center is checked; standing on lava at that instant costs
    /// `LAVA_DAMAGE`. Returns whether damage was taken.
    pub fn update(&mut self, map: &TileMap, dt: f32) -> bool {
        self.step_damage_timer -= dt;
        if self.step_damage_timer >= 0.0 {
            return false;
        }
        self.step_damage_timer = STEP_DAMAGE_COOLDOWN;

        if map.tile_at_pos(self.center()).is_hazard() {
            self.take_damage(LAVA_DAMAGE);
            log::debug!("Player burned on lava, health {}", self.health);
            return true;
        }
        false
    }

    /// Walk along the two input axes (-1, 0 or 1 each)
    pub fn move_by(&mut self, map: &TileMap, dir_x: i8, dir_y: i8, dt: f32) -> MoveResult {
        let direction = Vec2::new(dir_x as f32, dir_y as f32);
        move_agent(
            &mut self.agent,
            map.pixel_size(),
            direction,
            PLAYER_SPEED,
            dt,
            &[],
        )
    }
}
