//! Positioned, sized entities shared by the player and every hazard

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identity of an agent within one game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Hands out unique agent IDs
#[derive(Debug, Clone, Default)]
pub struct AgentIds {
    next: u32,
}

impl AgentIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> AgentId {
        let id = AgentId(self.next);
        self.next += 1;
        id
    }
}

/// A movable box. `pos` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Draw rotation (radians)
    pub rotation: f32,
    /// Draw scale (1.0 = natural size)
    pub scale: f32,
}

impl Agent {
    pub fn new(id: AgentId, pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            id,
            pos,
            width,
            height,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn square(id: AgentId, pos: Vec2, size: f32) -> Self {
        Self::new(id, pos, size, size)
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.half_extent()
    }

    /// Mean of width and height, used by proximity checks
    #[inline]
    pub fn size(&self) -> f32 {
        (self.width + self.height) * 0.5
    }

    /// Face a world point
    pub fn look_at(&mut self, target: Vec2) {
        let delta = target - self.center();
        self.rotation = delta.y.atan2(delta.x);
    }

    /// Whether another box (given by center and size) is close enough to touch this one
    #[inline]
    pub fn reaches(&self, other_center: Vec2, other_size: f32) -> bool {
        crate::within_reach(self.center(), self.size(), other_center, other_size)
    }
}
