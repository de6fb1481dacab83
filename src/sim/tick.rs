//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::state::{GamePhase, GameState};

/// Hazard agents closer than this make the idle controller run
const IDLE_FLEE_RADIUS: f32 = 96.0;
/// Distance from the map center the idle controller is happy to drift
const IDLE_HOME_SLACK: f32 = 24.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal intent: -1 left, 0 none, 1 right
    pub move_x: i8,
    /// Vertical intent: -1 up, 0 none, 1 down
    pub move_y: i8,
    /// Point the player faces (mouse position in world space)
    pub aim: Option<Vec2>,
    /// Start a new run (only honored while dead)
    pub respawn: bool,
}

impl TickInput {
    /// Demo controller: run from the nearest hazard agent, otherwise drift
    /// back toward the middle of the map. Respawns immediately on death.
    pub fn idle(state: &GameState) -> Self {
        if state.phase == GamePhase::Dead {
            return Self {
                respawn: true,
                ..Default::default()
            };
        }

        let here = state.player.center();
        let (steer, aim) = match state.nearest_hazard_agent(here) {
            Some((agent, dist)) if dist < IDLE_FLEE_RADIUS => (here - agent.center(), Some(agent.center())),
            _ => {
                let home = state.map.pixel_size() * 0.5;
                let offset = home - here;
                let steer = if offset.length() > IDLE_HOME_SLACK { offset } else { Vec2::ZERO };
                (steer, None)
            }
        };

        Self {
            move_x: axis_intent(steer.x),
            move_y: axis_intent(steer.y),
            aim,
            respawn: false,
        }
    }
}

fn axis_intent(v: f32) -> i8 {
    if v > 1.0 {
        1
    } else if v < -1.0 {
        -1
    } else {
        0
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::Dead {
        if input.respawn {
            state.respawn();
        }
        return;
    }

    state.time_ticks += 1;

    state.player.update(&state.map, dt);
    state
        .player
        .move_by(&state.map, input.move_x.clamp(-1, 1), input.move_y.clamp(-1, 1), dt);
    if let Some(aim) = input.aim {
        state.player.agent.look_at(aim);
    }

    state.waves.update(
        &mut state.rng,
        &mut state.map,
        &mut state.player,
        &mut state.ids,
        &mut state.particles,
        dt,
    );

    state.particles.update(dt);

    if state.player.is_dead() {
        state.phase = GamePhase::Dead;
        log::info!(
            "Player died after {} waves ({:.1}s survived)",
            state.waves.waves_completed(),
            state.time_ticks as f32 * dt
        );
    }
}
