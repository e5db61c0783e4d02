//! Enemy wave spawner
//!
//! Waves arrive on a timer. Wave `n` (counting from zero) brings
//! `base + n * growth` enemies, each entering from a random screen edge.

use crate::actors::EnemyKind;
use crate::config::EnemyConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use starfire_engine::foundation::math::{Bounds, Vec2};
use starfire_engine::foundation::time::Countdown;

/// One enemy to place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    /// Variety
    pub kind: EnemyKind,
    /// Entry position, just outside the viewport
    pub position: Vec2,
}

/// A wave ready to be placed
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    /// Zero-based wave index
    pub index: u32,
    /// Enemies in this wave
    pub spawns: Vec<SpawnPoint>,
}

/// Timer-driven wave generator
#[derive(Debug)]
pub struct WaveSpawner {
    timer: Countdown,
    next_wave: u32,
    base_count: u32,
    growth: u32,
    interval: f32,
    elite_wave: u32,
    rng: StdRng,
}

impl WaveSpawner {
    /// Create a spawner whose first wave arrives after `first_wave_delay`
    pub fn new(config: &EnemyConfig, seed: u64) -> Self {
        Self {
            timer: Countdown::new(config.first_wave_delay),
            next_wave: 0,
            base_count: config.base_count,
            growth: config.growth_per_wave,
            interval: config.wave_interval,
            elite_wave: config.elite_wave,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of enemies in wave `index`
    pub fn wave_size(&self, index: u32) -> u32 {
        self.base_count.saturating_add(index.saturating_mul(self.growth))
    }

    /// Index of the next wave to arrive
    pub fn next_wave(&self) -> u32 {
        self.next_wave
    }

    /// Seconds until the next wave
    pub fn time_to_next_wave(&self) -> f32 {
        self.timer.remaining()
    }

    /// Advance the timer; returns a wave when one is due
    ///
    /// Enemies are placed `margin` units outside a random edge of `viewport`.
    pub fn tick(&mut self, delta: f32, viewport: &Bounds, margin: f32) -> Option<Wave> {
        self.timer.tick(delta);
        if !self.timer.is_done() {
            return None;
        }
        self.timer.reset(self.interval);

        let index = self.next_wave;
        self.next_wave += 1;
        let spawns = (0..self.wave_size(index))
            .map(|_| SpawnPoint {
                kind: self.pick_kind(index),
                position: self.edge_position(viewport, margin),
            })
            .collect();

        log::debug!("Wave {} due with {} enemies", index, self.wave_size(index));
        Some(Wave { index, spawns })
    }

    fn pick_kind(&mut self, index: u32) -> EnemyKind {
        if index < self.elite_wave {
            return EnemyKind::Drone;
        }
        match self.rng.gen_range(0..6) {
            0 => EnemyKind::Brute,
            1 => EnemyKind::Gunner,
            _ => EnemyKind::Drone,
        }
    }

    fn edge_position(&mut self, viewport: &Bounds, margin: f32) -> Vec2 {
        let along_x = viewport.left() + self.rng.gen::<f32>() * viewport.width;
        let along_y = viewport.top() + self.rng.gen::<f32>() * viewport.height;
        match self.rng.gen_range(0..4) {
            0 => Vec2::new(along_x, viewport.top() - margin),
            1 => Vec2::new(along_x, viewport.bottom() + margin),
            2 => Vec2::new(viewport.left() - margin, along_y),
            _ => Vec2::new(viewport.right() + margin, along_y),
        }
    }
}
