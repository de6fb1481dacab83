//! Tornadoes: spinning agents on fixed headings that bounce off the map edges

use glam::Vec2;
use rand::Rng;

use super::random_position;
use crate::consts::*;
use crate::sim::agent::{Agent, AgentIds};
use crate::sim::collision::move_agent;
use crate::sim::feedback::{FeedbackKind, VisualFeedback};
use crate::sim::player::Player;
use crate::sim::tilemap::TileMap;

#[derive(Debug, Clone)]
pub struct Twister {
    pub agent: Agent,
    /// Set on the first update, toward wherever the player stood then
    pub heading: Option<Vec2>,
    pub attack_cooldown: f32,
}

#[derive(Debug, Clone)]
pub struct Tornadoes {
    twisters: Vec<Twister>,
}

impl Tornadoes {
    pub fn spawn<R: Rng>(
        rng: &mut R,
        map: &TileMap,
        ids: &mut AgentIds,
        feedback: &mut dyn VisualFeedback,
    ) -> Self {
        Self::spawn_n(TORNADO_COUNT, rng, map, ids, feedback)
    }

    pub fn spawn_n<R: Rng>(
        count: usize,
        rng: &mut R,
        map: &TileMap,
        ids: &mut AgentIds,
        feedback: &mut dyn VisualFeedback,
    ) -> Self {
        let twisters = (0..count)
            .map(|_| {
                let pos = random_position(rng, map, TORNADO_SIZE);
                let agent = Agent::square(ids.allocate(), pos, TORNADO_SIZE);
                feedback.emit(agent.center(), FeedbackKind::Spawn);
                Twister {
                    agent,
                    heading: None,
                    attack_cooldown: 0.0,
                }
            })
            .collect();
        Self { twisters }
    }

    pub fn twisters(&self) -> &[Twister] {
        &self.twisters
    }

    #[cfg(test)]
    pub(crate) fn twisters_mut(&mut self) -> &mut [Twister] {
        &mut self.twisters
    }

    pub fn update(&mut self, player: &mut Player, map: &TileMap, dt: f32) {
        let target = player.center();
        let bounds = map.pixel_size();

        for twister in self.twisters.iter_mut() {
            twister.attack_cooldown -= dt;
            twister.agent.rotation += TORNADO_SPIN_SPEED * dt;

            let start = twister.agent.center();
            let mut heading = *twister.heading.get_or_insert(target - start);
            let result = move_agent(&mut twister.agent, bounds, heading, TORNADO_SPEED, dt, &[]);
            if result.x_collision {
                heading.x = -heading.x;
            }
            if result.y_collision {
                heading.y = -heading.y;
            }
            twister.heading = Some(heading);

            if twister.attack_cooldown < 0.0 && twister.agent.reaches(target, player.size()) {
                player.take_damage(TORNADO_DAMAGE);
                twister.attack_cooldown = TORNADO_ATTACK_COOLDOWN;
            }
        }
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.twisters.iter().map(|t| &t.agent)
    }

    pub fn vanish(self, feedback: &mut dyn VisualFeedback) {
        for twister in &self.twisters {
            feedback.emit(twister.agent.center(), FeedbackKind::Despawn);
        }
    }
}
