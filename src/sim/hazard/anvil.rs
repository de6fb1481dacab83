//! Falling anvils: shadows shrink, then land once with a single area check

use rand::Rng;

use super::random_position;
use crate::consts::*;
use crate::sim::agent::{Agent, AgentIds};
use crate::sim::feedback::{FeedbackKind, VisualFeedback};
use crate::sim::player::Player;
use crate::sim::tilemap::TileMap;

#[derive(Debug, Clone)]
pub struct AnvilDrop {
    /// Warning markers still in the air
    shadows: Vec<Agent>,
    /// Markers converted to landed anvils
    anvils: Vec<Agent>,
    /// Shared shadow scale, shrinking toward impact
    scale: f32,
    /// True until the impact check has run
    primed: bool,
}

impl AnvilDrop {
    pub fn spawn<R: Rng>(
        rng: &mut R,
        map: &TileMap,
        ids: &mut AgentIds,
        feedback: &mut dyn VisualFeedback,
    ) -> Self {
        Self::spawn_n(ANVIL_COUNT, rng, map, ids, feedback)
    }

    pub fn spawn_n<R: Rng>(
        count: usize,
        rng: &mut R,
        map: &TileMap,
        ids: &mut AgentIds,
        feedback: &mut dyn VisualFeedback,
    ) -> Self {
        let shadows: Vec<Agent> = (0..count)
            .map(|_| {
                let pos = random_position(rng, map, ANVIL_SIZE);
                let mut shadow = Agent::square(ids.allocate(), pos, ANVIL_SIZE);
                shadow.scale = ANVIL_START_SCALE;
                feedback.emit(shadow.center(), FeedbackKind::Spawn);
                shadow
            })
            .collect();

        Self {
            shadows,
            anvils: Vec::new(),
            scale: ANVIL_START_SCALE,
            primed: true,
        }
    }

    pub fn shadows(&self) -> &[Agent] {
        &self.shadows
    }

    #[cfg(test)]
    pub(crate) fn shadows_mut(&mut self) -> &mut [Agent] {
        &mut self.shadows
    }

    pub fn anvils(&self) -> &[Agent] {
        &self.anvils
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Shrink the shadows; on the tick the scale first crosses the impact
    /// threshold, every shadow covering the player deals damage once and all
    /// shadows turn into landed anvils.
    pub fn update(&mut self, player: &mut Player, dt: f32) {
        self.scale -= ANVIL_SHRINK_RATE * dt;
        for shadow in self.shadows.iter_mut() {
            shadow.scale = self.scale;
        }

        if !self.primed || self.scale >= ANVIL_IMPACT_SCALE {
            return;
        }
        self.primed = false;

        let target = player.center();
        let target_size = player.size();
        let hits = self
            .shadows
            .iter()
            .filter(|s| s.reaches(target, target_size))
            .count();
        for _ in 0..hits {
            player.take_damage(ANVIL_DAMAGE);
        }
        if hits > 0 {
            log::debug!("{} anvil(s) hit the player", hits);
        }

        self.anvils = self
            .shadows
            .drain(..)
            .map(|mut anvil| {
                anvil.scale = 1.0;
                anvil
            })
            .collect();
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.shadows.iter().chain(self.anvils.iter())
    }

    pub fn vanish(self, feedback: &mut dyn VisualFeedback) {
        for agent in self.shadows.iter().chain(self.anvils.iter()) {
            feedback.emit(agent.center(), FeedbackKind::Despawn);
        }
    }
}
