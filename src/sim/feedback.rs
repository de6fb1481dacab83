//! Visual feedback sink and the particle bursts that implement it
//!
//! The simulation only ever emits into a [`VisualFeedback`]; it never reads
//! anything back, so particles cannot influence gameplay.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    Spawn,
    Despawn,
}

/// One recorded emission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedback {
    pub pos: Vec2,
    pub kind: FeedbackKind,
}

/// Fire-and-forget receiver for spawn/despawn effects
pub trait VisualFeedback {
    fn emit(&mut self, pos: Vec2, kind: FeedbackKind);
}

/// Recording sink, handy for headless runs and tests
impl VisualFeedback for Vec<Feedback> {
    fn emit(&mut self, pos: Vec2, kind: FeedbackKind) {
        self.push(Feedback { pos, kind });
    }
}

/// A shrinking burst centered on `pos`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub kind: FeedbackKind,
    /// 1.0 at emission, removed below `PARTICLE_MIN_SCALE`
    pub scale: f32,
    pub rotation: f32,
}

/// Bounded particle pool
#[derive(Debug, Clone, Default)]
pub struct Particles {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl Particles {
    /// A pool holding at most `capacity` bursts (0 disables emission)
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            if particle.kind == FeedbackKind::Despawn {
                particle.rotation += PARTICLE_SPIN_SPEED * dt;
            }
            particle.scale -= PARTICLE_SHRINK_RATE * dt;
        }
        self.particles.retain(|p| p.scale >= PARTICLE_MIN_SCALE);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl VisualFeedback for Particles {
    fn emit(&mut self, pos: Vec2, kind: FeedbackKind) {
        if self.capacity == 0 {
            return;
        }
        if self.particles.len() >= self.capacity {
            self.particles.pop_front();
        }
        self.particles.push_back(Particle {
            pos,
            kind,
            scale: 1.0,
            rotation: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_expire() {
        let mut particles = Particles::new(8);
        particles.emit(Vec2::ZERO, FeedbackKind::Spawn);
        particles.emit(Vec2::ONE, FeedbackKind::Despawn);

        particles.update(0.5);
        assert_eq!(particles.len(), 2);
        let despawn = particles.iter().find(|p| p.kind == FeedbackKind::Despawn).unwrap();
        assert!(despawn.rotation > 0.0);
        let spawn = particles.iter().find(|p| p.kind == FeedbackKind::Spawn).unwrap();
        assert_eq!(spawn.rotation, 0.0);

        particles.update(0.5);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut particles = Particles::new(2);
        for i in 0..3 {
            particles.emit(Vec2::splat(i as f32), FeedbackKind::Spawn);
        }
        let positions: Vec<_> = particles.iter().map(|p| p.pos.x).collect();
        assert_eq!(positions, vec![1.0, 2.0]);

        // A long burst never grows the pool past its cap
        for i in 0..100 {
            particles.emit(Vec2::splat(i as f32), FeedbackKind::Despawn);
        }
        let positions: Vec<_> = particles.iter().map(|p| p.pos.x).collect();
        assert_eq!(positions, vec![98.0, 99.0]);

        let mut disabled = Particles::new(0);
        disabled.emit(Vec2::ZERO, FeedbackKind::Spawn);
        assert!(disabled.is_empty());
    }
}
