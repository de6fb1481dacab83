//! The four hazard kinds and their shared lifecycle
//!
//! Every hazard is spawned with the shared RNG, the tile map and a feedback
//! sink, updated once per tick, and vanished when the scheduler retires it.
//! The kind set is closed: dispatch is a plain `match` over [`Hazard`].

pub mod anvil;
pub mod lava;
pub mod tornado;
pub mod zombie;

pub use anvil::AnvilDrop;
pub use lava::LavaFlow;
pub use tornado::{Tornadoes, Twister};
pub use zombie::ZombieHorde;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, AgentIds};
use super::collision::BlockingSet;
use super::feedback::VisualFeedback;
use super::player::Player;
use super::tilemap::TileMap;

/// Random top-left position that keeps an agent of `size` fully on the map
pub(crate) fn random_position<R: Rng>(rng: &mut R, map: &TileMap, size: f32) -> Vec2 {
    let span = map.pixel_size() - Vec2::splat(size);
    let x = rng.random::<f32>() * span.x.max(0.0);
    let y = rng.random::<f32>() * span.y.max(0.0);
    Vec2::new(x, y)
}

/// Kind of hazard, indexed in the order the scheduler rolls them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Zombies,
    Tornadoes,
    FallingAnvils,
    Lava,
}

impl HazardKind {
    pub const ALL: [HazardKind; 4] = [
        HazardKind::Zombies,
        HazardKind::Tornadoes,
        HazardKind::FallingAnvils,
        HazardKind::Lava,
    ];

    /// Map a rolled index to its kind.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not one of the four known kinds.
    pub fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(kind) => *kind,
            None => panic!("no hazard corresponds to an index of {index}"),
        }
    }

    /// Uniform pick among the four kinds
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_index(rng.random_range(0..Self::ALL.len()))
    }

    pub fn name(self) -> &'static str {
        match self {
            HazardKind::Zombies => "Zombies",
            HazardKind::Tornadoes => "Tornadoes",
            HazardKind::FallingAnvils => "Falling Anvils",
            HazardKind::Lava => "Lava",
        }
    }

    /// Whether this kind's agents act as solid bodies for other blockers
    pub fn blocks_movement(self) -> bool {
        matches!(self, HazardKind::Zombies)
    }
}

/// One active hazard instance, owning all of its agents
#[derive(Debug, Clone)]
pub enum Hazard {
    Zombies(ZombieHorde),
    Tornadoes(Tornadoes),
    FallingAnvils(AnvilDrop),
    Lava(LavaFlow),
}

impl Hazard {
    /// Spawn a hazard of `kind`, emitting one spawn event per placed agent
    pub fn spawn<R: Rng>(
        kind: HazardKind,
        rng: &mut R,
        map: &mut TileMap,
        ids: &mut AgentIds,
        feedback: &mut dyn VisualFeedback,
    ) -> Self {
        let hazard = match kind {
            HazardKind::Zombies => Hazard::Zombies(ZombieHorde::spawn(rng, map, ids, feedback)),
            HazardKind::Tornadoes => Hazard::Tornadoes(Tornadoes::spawn(rng, map, ids, feedback)),
            HazardKind::FallingAnvils => {
                Hazard::FallingAnvils(AnvilDrop::spawn(rng, map, ids, feedback))
            }
            HazardKind::Lava => Hazard::Lava(LavaFlow::spawn(rng, map, feedback)),
        };
        log::debug!("Spawned {} with {} agent(s)", kind.name(), hazard.agents().count());
        hazard
    }

    pub fn kind(&self) -> HazardKind {
        match self {
            Hazard::Zombies(_) => HazardKind::Zombies,
            Hazard::Tornadoes(_) => HazardKind::Tornadoes,
            Hazard::FallingAnvils(_) => HazardKind::FallingAnvils,
            Hazard::Lava(_) => HazardKind::Lava,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    #[inline]
    pub fn blocks_movement(&self) -> bool {
        self.kind().blocks_movement()
    }

    /// Every agent this hazard owns, for drawing and proximity queries.
    /// Lava has none; its presence lives in the tile map.
    pub fn agents(&self) -> Box<dyn Iterator<Item = &Agent> + '_> {
        match self {
            Hazard::Zombies(horde) => Box::new(horde.agents().iter()),
            Hazard::Tornadoes(tornadoes) => Box::new(tornadoes.agents()),
            Hazard::FallingAnvils(drop) => Box::new(drop.agents()),
            Hazard::Lava(_) => Box::new(std::iter::empty()),
        }
    }

    /// This hazard's agents if it blocks movement, otherwise nothing
    pub fn blocking_agents(&self) -> Box<dyn Iterator<Item = &Agent> + '_> {
        if self.blocks_movement() {
            self.agents()
        } else {
            Box::new(std::iter::empty())
        }
    }

    pub fn update(&mut self, player: &mut Player, map: &mut TileMap, blockers: &mut BlockingSet, dt: f32) {
        match self {
            Hazard::Zombies(horde) => horde.update(player, map, blockers, dt),
            Hazard::Tornadoes(tornadoes) => tornadoes.update(player, map, dt),
            Hazard::FallingAnvils(drop) => drop.update(player, dt),
            Hazard::Lava(lava) => lava.update(map, dt),
        }
    }

    /// Release every agent and undo any terrain edits
    pub fn vanish(self, map: &mut TileMap, feedback: &mut dyn VisualFeedback) {
        match self {
            Hazard::Zombies(horde) => horde.vanish(feedback),
            Hazard::Tornadoes(tornadoes) => tornadoes.vanish(feedback),
            Hazard::FallingAnvils(drop) => drop.vanish(feedback),
            Hazard::Lava(lava) => lava.vanish(map, feedback),
        }
    }
}
