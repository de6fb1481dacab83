//! Movement resolution shared by the player and every hazard agent
//!
//! Motion is resolved per axis: the X-only and Y-only candidates are tested
//! independently, so an agent blocked on one axis still slides along the
//! other. After obstruction checks the position is clamped to the map, and a
//! clamp counts as a collision on that axis.

use glam::Vec2;

use super::agent::Agent;

/// Which axes were stopped during a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub x_collision: bool,
    pub y_collision: bool,
}

impl MoveResult {
    #[inline]
    pub fn any(&self) -> bool {
        self.x_collision || self.y_collision
    }
}

/// Agents that act as solid obstacles for one tick.
///
/// Built once per tick from every blocking hazard. Movers call [`refresh`]
/// after they move so agents resolved later in the same tick see the new
/// position.
///
/// [`refresh`]: BlockingSet::refresh
#[derive(Debug, Clone, Default)]
pub struct BlockingSet {
    agents: Vec<Agent>,
}

impl BlockingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<'a>(&mut self, agents: impl IntoIterator<Item = &'a Agent>) {
        self.agents.extend(agents.into_iter().cloned());
    }

    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Copy a moved agent's position back into the set
    pub fn refresh(&mut self, agent: &Agent) {
        if let Some(entry) = self.agents.iter_mut().find(|a| a.id == agent.id) {
            entry.pos = agent.pos;
        }
    }
}

/// Move an agent by `speed * dt` along `direction`, resolving against
/// `obstacles` and the map bounds.
///
/// `direction` need not be normalized; a zero vector means no motion.
/// `obstacles` may contain the agent itself, which is skipped by ID. An
/// obstacle blocks an axis when the agent's center after that axis's move
/// would be closer to the obstacle's center than the mean of their extents
/// on that axis.
pub fn move_agent(
    agent: &mut Agent,
    bounds: Vec2,
    direction: Vec2,
    speed: f32,
    dt: f32,
    obstacles: &[Agent],
) -> MoveResult {
    let step = direction.normalize_or_zero() * speed * dt;
    let half = agent.half_extent();

    let moved_x = Vec2::new(agent.pos.x + step.x, agent.pos.y);
    let moved_y = Vec2::new(agent.pos.x, agent.pos.y + step.y);
    let mut can_move_x = true;
    let mut can_move_y = true;

    for other in obstacles {
        if other.id == agent.id {
            continue;
        }
        let other_center = other.center();
        let min_x_dist = (other.width + agent.width) * 0.5;
        let min_y_dist = (other.height + agent.height) * 0.5;

        if (moved_x + half).distance(other_center) < min_x_dist {
            can_move_x = false;
        }
        if (moved_y + half).distance(other_center) < min_y_dist {
            can_move_y = false;
        }
        if !can_move_x && !can_move_y {
            break;
        }
    }

    if can_move_x {
        agent.pos.x = moved_x.x;
    }
    if can_move_y {
        agent.pos.y = moved_y.y;
    }

    let max = bounds - Vec2::new(agent.width, agent.height);
    if agent.pos.x < 0.0 {
        agent.pos.x = 0.0;
        can_move_x = false;
    }
    if agent.pos.x > max.x {
        agent.pos.x = max.x;
        can_move_x = false;
    }
    if agent.pos.y < 0.0 {
        agent.pos.y = 0.0;
        can_move_y = false;
    }
    if agent.pos.y > max.y {
        agent.pos.y = max.y;
        can_move_y = false;
    }

    MoveResult {
        x_collision: !can_move_x,
        y_collision: !can_move_y,
    }
}
