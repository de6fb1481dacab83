//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - One seeded RNG, passed explicitly to whatever needs it
//! - Stable iteration order (hazards oldest first, agents in spawn order)
//! - No rendering or platform dependencies

pub mod agent;
pub mod collision;
pub mod feedback;
pub mod hazard;
pub mod player;
pub mod state;
pub mod tick;
pub mod tilemap;
pub mod waves;

pub use agent::{Agent, AgentId, AgentIds};
pub use collision::{BlockingSet, MoveResult, move_agent};
pub use feedback::{Feedback, FeedbackKind, Particle, Particles, VisualFeedback};
pub use hazard::{AnvilDrop, Hazard, HazardKind, LavaFlow, Tornadoes, ZombieHorde};
pub use player::Player;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use tilemap::{StoredTile, SubTile, Tile, TileMap};
pub use waves::{WaveScheduler, level_for};
