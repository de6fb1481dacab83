//! Wave scheduler: one timer that rotates hazards in and out
//!
//! Every `WAVE_DURATION` seconds the oldest hazard may be retired and exactly
//! one new, randomly chosen hazard joins the active queue. Difficulty (the
//! number of hazards allowed at once) grows with the completed-wave count.

use std::collections::VecDeque;

use rand::Rng;

use super::agent::AgentIds;
use super::collision::BlockingSet;
use super::feedback::VisualFeedback;
use super::hazard::{Hazard, HazardKind};
use super::player::Player;
use super::tilemap::TileMap;
use crate::consts::*;

/// Difficulty level after `waves` completed waves
pub fn level_for(waves: u32) -> u32 {
    (BASE_LEVEL + waves / LEVEL_THRESHOLD).min(MAX_LEVEL)
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    /// Oldest at the front
    active: VecDeque<Hazard>,
    timer: f32,
    waves_completed: u32,
    level: u32,
    current_name: &'static str,
}

impl Default for WaveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveScheduler {
    pub fn new() -> Self {
        Self {
            active: VecDeque::new(),
            timer: WAVE_DURATION,
            waves_completed: 0,
            level: BASE_LEVEL,
            current_name: "",
        }
    }

    pub fn hazards(&self) -> impl Iterator<Item = &Hazard> {
        self.active.iter()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn waves_completed(&self) -> u32 {
        self.waves_completed
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Whole seconds until the next rotation, rounded up for the HUD
    pub fn seconds_remaining(&self) -> u32 {
        self.timer.max(0.0).ceil() as u32
    }

    /// Name of the most recently added hazard, empty before the first
    #[inline]
    pub fn current_name(&self) -> &'static str {
        self.current_name
    }

    /// Snapshot every blocking agent across all active hazards
    pub fn blocking_set(&self) -> BlockingSet {
        let mut set = BlockingSet::new();
        for hazard in &self.active {
            set.extend(hazard.blocking_agents());
        }
        set
    }

    /// Update every active hazard, then count down to the next rotation
    pub fn update<R: Rng>(
        &mut self,
        rng: &mut R,
        map: &mut TileMap,
        player: &mut Player,
        ids: &mut AgentIds,
        feedback: &mut dyn VisualFeedback,
        dt: f32,
    ) {
        let mut blockers = self.blocking_set();
        for hazard in self.active.iter_mut() {
            hazard.update(player, map, &mut blockers, dt);
        }

        self.timer -= dt;
        if self.timer < 0.0 {
            self.timer = WAVE_DURATION;
            self.rotate(rng, map, ids, feedback);
        }
    }

    /// Retire the oldest hazard if the queue is full, then add a new one.
    /// Returns the kind that was added.
    pub fn rotate<R: Rng>(
        &mut self,
        rng: &mut R,
        map: &mut TileMap,
        ids: &mut AgentIds,
        feedback: &mut dyn VisualFeedback,
    ) -> HazardKind {
        if !self.active.is_empty() {
            // The incoming hazard counts toward the limit
            if self.active.len() >= self.level as usize {
                if let Some(oldest) = self.active.pop_front() {
                    log::info!("Retiring {}", oldest.name());
                    oldest.vanish(map, feedback);
                }
            }
            self.waves_completed += 1;

            let level = level_for(self.waves_completed);
            if level != self.level {
                log::info!("Difficulty level {} -> {}", self.level, level);
                self.level = level;
            }
        }

        let kind = HazardKind::random(rng);
        let hazard = Hazard::spawn(kind, rng, map, ids, feedback);
        self.current_name = hazard.name();
        self.active.push_back(hazard);

        log::info!(
            "Wave {}: {} ({} active, level {})",
            self.waves_completed,
            self.current_name,
            self.active.len(),
            self.level
        );
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::agent::AgentId;
    use crate::sim::feedback::Feedback;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        rng: Pcg32,
        map: TileMap,
        ids: AgentIds,
        events: Vec<Feedback>,
    }

    impl Fixture {
        fn new(seed: u64) -> Self {
            let mut map = TileMap::default();
            map.generate_seeded(seed);
            let mut ids = AgentIds::new();
            // Reserve the player's id
            ids.allocate();
            Self {
                rng: Pcg32::seed_from_u64(seed),
                map,
                ids,
                events: Vec::new(),
            }
        }

        fn rotate(&mut self, waves: &mut WaveScheduler) -> HazardKind {
            waves.rotate(&mut self.rng, &mut self.map, &mut self.ids, &mut self.events)
        }
    }

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), BASE_LEVEL);
        assert_eq!(level_for(LEVEL_THRESHOLD - 1), BASE_LEVEL);
        assert_eq!(level_for(LEVEL_THRESHOLD), BASE_LEVEL + 1);
        assert_eq!(level_for(LEVEL_THRESHOLD * 2), BASE_LEVEL + 2);
        assert_eq!(level_for(1000), MAX_LEVEL);
    }

    #[test]
    fn test_first_rotation_is_not_a_wave() {
        let mut fx = Fixture::new(1);
        let mut waves = WaveScheduler::new();
        assert_eq!(waves.current_name(), "");

        let kind = fx.rotate(&mut waves);
        assert_eq!(waves.waves_completed(), 0);
        assert_eq!(waves.active_count(), 1);
        assert_eq!(waves.current_name(), kind.name());
    }

    #[test]
    fn test_escalation_after_threshold_waves() {
        let mut fx = Fixture::new(2);
        let mut waves = WaveScheduler::new();
        fx.rotate(&mut waves);

        for _ in 0..LEVEL_THRESHOLD {
            assert_eq!(waves.level(), BASE_LEVEL);
            fx.rotate(&mut waves);
        }
        assert_eq!(waves.waves_completed(), LEVEL_THRESHOLD);
        assert_eq!(waves.level(), BASE_LEVEL + 1);
    }

    #[test]
    fn test_active_count_never_exceeds_level() {
        let mut fx = Fixture::new(3);
        let mut waves = WaveScheduler::new();
        for _ in 0..30 {
            let before = waves.active_count();
            fx.rotate(&mut waves);
            assert!(waves.active_count() <= waves.level() as usize);
            // At most one retired and one added per rotation
            assert!(waves.active_count() + 1 >= before);
            assert!(waves.active_count() <= before + 1);
        }
        assert_eq!(waves.level(), MAX_LEVEL);
        assert_eq!(waves.active_count(), MAX_LEVEL as usize);
    }

    #[test]
    fn test_oldest_retired_first() {
        let mut fx = Fixture::new(4);
        let mut waves = WaveScheduler::new();
        fx.rotate(&mut waves);
        let second = fx.rotate(&mut waves);
        // Level 1 holds one hazard: the first was retired for the second
        assert_eq!(waves.active_count(), 1);
        assert_eq!(waves.hazards().next().map(|h| h.kind()), Some(second));
    }

    #[test]
    fn test_timer_drives_rotation() {
        let mut fx = Fixture::new(5);
        let mut waves = WaveScheduler::new();
        let mut player = Player::new(AgentId(0), Vec2::new(320.0, 320.0));
        let dt = 1.0 / 60.0;

        let mut ticks = 0;
        while waves.active_count() == 0 {
            waves.update(&mut fx.rng, &mut fx.map, &mut player, &mut fx.ids, &mut fx.events, dt);
            ticks += 1;
            assert!(ticks < 10_000, "no rotation happened");
        }
        // 10 s at 60 Hz, give or take a tick of float drift
        assert!((600..=602).contains(&ticks), "ticks = {ticks}");
        assert_eq!(waves.seconds_remaining(), WAVE_DURATION.ceil() as u32);
        assert!(!waves.current_name().is_empty());
    }

    #[test]
    fn test_blocking_set_only_holds_zombies() {
        let mut fx = Fixture::new(6);
        let mut waves = WaveScheduler::new();
        for _ in 0..12 {
            fx.rotate(&mut waves);
        }
        let expected: usize = waves
            .hazards()
            .filter(|h| h.kind() == HazardKind::Zombies)
            .map(|h| h.agents().count())
            .sum();
        assert_eq!(waves.blocking_set().len(), expected);
    }
}
