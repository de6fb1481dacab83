//! Zombies: chase the player, shove each other apart, and bite in melee range

use glam::Vec2;
use rand::Rng;

use super::random_position;
use crate::consts::*;
use crate::sim::agent::{Agent, AgentIds};
use crate::sim::collision::{BlockingSet, move_agent};
use crate::sim::feedback::{FeedbackKind, VisualFeedback};
use crate::sim::player::Player;
use crate::sim::tilemap::TileMap;

#[derive(Debug, Clone)]
pub struct ZombieHorde {
    /// Kept separate from per-zombie state so the blocking set can borrow a slice
    agents: Vec<Agent>,
    /// Per-axis ease toward full speed, reset on collision
    ease: Vec<Vec2>,
    attack_cooldowns: Vec<f32>,
}

impl ZombieHorde {
    pub fn spawn<R: Rng>(
        rng: &mut R,
        map: &TileMap,
        ids: &mut AgentIds,
        feedback: &mut dyn VisualFeedback,
    ) -> Self {
        Self::spawn_n(ZOMBIE_COUNT, rng, map, ids, feedback)
    }

    pub fn spawn_n<R: Rng>(
        count: usize,
        rng: &mut R,
        map: &TileMap,
        ids: &mut AgentIds,
        feedback: &mut dyn VisualFeedback,
    ) -> Self {
        let positions: Vec<Vec2> = (0..count)
            .map(|_| random_position(rng, map, ZOMBIE_SIZE))
            .collect();
        Self::spawn_at(&positions, ids, feedback)
    }

    /// Place one zombie at each top-left position
    pub fn spawn_at(positions: &[Vec2], ids: &mut AgentIds, feedback: &mut dyn VisualFeedback) -> Self {
        let agents: Vec<Agent> = positions
            .iter()
            .map(|&pos| {
                let agent = Agent::square(ids.allocate(), pos, ZOMBIE_SIZE);
                feedback.emit(agent.center(), FeedbackKind::Spawn);
                agent
            })
            .collect();

        Self {
            ease: vec![Vec2::ZERO; agents.len()],
            attack_cooldowns: vec![0.0; agents.len()],
            agents,
        }
    }

    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[cfg(test)]
    pub(crate) fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn ease(&self) -> &[Vec2] {
        &self.ease
    }

    /// Walk each zombie toward the player, treating every agent in
    /// `blockers` (other than itself) as solid. Zombies already within
    /// `ZOMBIE_MELEE_RANGE` stand still and attack on cooldown instead.
    pub fn update(&mut self, player: &mut Player, map: &TileMap, blockers: &mut BlockingSet, dt: f32) {
        let target = player.center();
        let bounds = map.pixel_size();

        for ((agent, ease), cooldown) in self
            .agents
            .iter_mut()
            .zip(self.ease.iter_mut())
            .zip(self.attack_cooldowns.iter_mut())
        {
            *cooldown -= dt;
            agent.look_at(target);

            let center = agent.center();
            if center.distance(target) > ZOMBIE_MELEE_RANGE {
                *ease = (*ease + Vec2::splat(ZOMBIE_EASE_RATE * dt)).min(Vec2::splat(ZOMBIE_MAX_EASE));
                let direction = (target - center) * *ease;
                let result = move_agent(agent, bounds, direction, ZOMBIE_SPEED, dt, blockers.agents());
                blockers.refresh(agent);

                if result.x_collision {
                    ease.x = 0.0;
                }
                if result.y_collision {
                    ease.y = 0.0;
                }
            } else if *cooldown < 0.0 {
                player.take_damage(ZOMBIE_DAMAGE);
                *cooldown = ZOMBIE_ATTACK_COOLDOWN;
            }
        }
    }

    pub fn vanish(self, feedback: &mut dyn VisualFeedback) {
        for agent in &self.agents {
            feedback.emit(agent.center(), FeedbackKind::Despawn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::feedback::Feedback;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn setup(count: usize) -> (ZombieHorde, Player, TileMap) {
        let map = TileMap::new(40, 40, 16);
        let mut rng = Pcg32::seed_from_u64(31);
        let mut ids = AgentIds::new();
        let player = Player::new(ids.allocate(), Vec2::new(300.0, 300.0));
        let horde = ZombieHorde::spawn_n(count, &mut rng, &map, &mut ids, &mut Vec::<Feedback>::new());
        (horde, player, map)
    }

    fn blocking(horde: &ZombieHorde) -> BlockingSet {
        let mut set = BlockingSet::new();
        set.extend(horde.agents());
        set
    }

    #[test]
    fn test_ease_ramps_and_caps() {
        let (mut horde, mut player, map) = setup(1);
        horde.agents_mut()[0].pos = Vec2::new(100.0, 100.0);
        let mut set = blocking(&horde);

        horde.update(&mut player, &map, &mut set, 0.25);
        assert_eq!(horde.ease()[0], Vec2::splat(0.25));
        for _ in 0..10 {
            horde.update(&mut player, &map, &mut set, 0.25);
        }
        assert_eq!(horde.ease()[0], Vec2::splat(ZOMBIE_MAX_EASE));
    }

    #[test]
    fn test_collision_resets_axis_ease() {
        let (mut horde, mut player, map) = setup(2);
        // Player straight to the right; the second zombie stands just in the way
        player.agent.pos = Vec2::new(400.0, 100.0);
        horde.agents_mut()[0].pos = Vec2::new(100.0, 100.0);
        horde.agents_mut()[1].pos = Vec2::new(116.5, 100.0);
        let mut set = blocking(&horde);

        horde.update(&mut player, &map, &mut set, DT);
        assert_eq!(horde.agents()[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(horde.ease()[0].x, 0.0);
        assert_eq!(horde.ease()[0].y, ZOMBIE_EASE_RATE * DT);
    }

    #[test]
    fn test_zombies_keep_apart() {
        let (mut horde, mut player, map) = setup(2);
        // Two zombies in a line heading right toward the player
        player.agent.pos = Vec2::new(400.0, 100.0);
        horde.agents_mut()[0].pos = Vec2::new(100.0, 100.0);
        horde.agents_mut()[1].pos = Vec2::new(117.0, 100.0);
        let mut set = blocking(&horde);

        for _ in 0..120 {
            horde.update(&mut player, &map, &mut set, DT);
            let gap = horde.agents()[0].center().distance(horde.agents()[1].center());
            assert!(gap >= ZOMBIE_SIZE - 1e-3, "zombies overlapped: {gap}");
        }
    }

    #[test]
    fn test_spawn_at_given_positions() {
        let mut ids = AgentIds::new();
        let mut events: Vec<Feedback> = Vec::new();
        let spots = [Vec2::new(10.0, 20.0), Vec2::new(200.0, 40.0)];
        let horde = ZombieHorde::spawn_at(&spots, &mut ids, &mut events);

        let placed: Vec<_> = horde.agents().iter().map(|a| a.pos).collect();
        assert_eq!(placed, spots.to_vec());
        assert_eq!(horde.ease(), &[Vec2::ZERO, Vec2::ZERO]);
        assert_eq!(events.len(), 2);
        assert_ne!(horde.agents()[0].id, horde.agents()[1].id);
    }

    #[test]
    fn test_set_sees_latest_positions() {
        let (mut horde, mut player, map) = setup(2);
        let mut set = blocking(&horde);
        horde.update(&mut player, &map, &mut set, DT);
        for (live, snapshot) in horde.agents().iter().zip(set.agents()) {
            assert_eq!(live.pos, snapshot.pos);
        }
    }
}
