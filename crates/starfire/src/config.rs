//! Game configuration
//!
//! Every tunable the session reads. Files may be partial: missing sections and
//! fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use starfire_engine::config::{Config, ConfigError};
use starfire_engine::foundation::math::Bounds;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Player and weapon settings
    pub gameplay: GameplayConfig,

    /// Arena settings
    pub world: WorldConfig,

    /// Enemy and wave settings
    pub enemies: EnemyConfig,

    /// Particle settings
    pub effects: EffectsConfig,
}

/// Player and weapon settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Starting lives
    pub starting_lives: u32,

    /// Hit points per life
    pub player_health: u32,

    /// Ship speed in units per second
    pub player_speed: f32,

    /// Ship collision radius
    pub player_radius: f32,

    /// Seconds between shots
    pub fire_cooldown: f32,

    /// Bullet speed
    pub bullet_speed: f32,

    /// Bullet collision radius
    pub bullet_radius: f32,

    /// Damage per player bullet
    pub bullet_damage: u32,

    /// Seconds of invulnerability after losing a life
    pub invulnerability_time: f32,
}

/// Arena settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Visible width
    pub width: f32,

    /// Visible height
    pub height: f32,

    /// Space beyond each screen edge before objects wrap around
    pub offscreen_margin: f32,

    /// Seed for wave generation
    pub seed: u64,
}

/// Enemy and wave settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Enemies in the first wave
    pub base_count: u32,

    /// Extra enemies per wave
    pub growth_per_wave: u32,

    /// Seconds before the first wave
    pub first_wave_delay: f32,

    /// Seconds between waves
    pub wave_interval: f32,

    /// Drone speed; other kinds scale from it
    pub speed: f32,

    /// Drone hit points; other kinds scale from it
    pub health: u32,

    /// Drone collision radius
    pub radius: f32,

    /// Points for destroying a drone
    pub score_value: u32,

    /// Damage dealt to the player on contact
    pub contact_damage: u32,

    /// Seconds between gunner shots
    pub gunner_fire_interval: f32,

    /// Gunner bullet speed
    pub bullet_speed: f32,

    /// Wave index from which brutes and gunners appear
    pub elite_wave: u32,
}

/// Particle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Frames in the explosion sheet
    pub explosion_frames: u32,

    /// Explosion frames per second
    pub explosion_frame_rate: f32,

    /// Explosion sprite scale
    pub explosion_scale: f32,

    /// Debris sparks per explosion
    pub debris_count: u32,

    /// Debris spark speed
    pub debris_speed: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            player_health: 3,
            player_speed: 240.0,
            player_radius: 14.0,
            fire_cooldown: 0.2,
            bullet_speed: 600.0,
            bullet_radius: 3.0,
            bullet_damage: 1,
            invulnerability_time: 2.0,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            offscreen_margin: 64.0,
            seed: 0x5747_4152,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            base_count: 4,
            growth_per_wave: 2,
            first_wave_delay: 1.0,
            wave_interval: 8.0,
            speed: 80.0,
            health: 1,
            radius: 12.0,
            score_value: 100,
            contact_damage: 1,
            gunner_fire_interval: 2.5,
            bullet_speed: 220.0,
            elite_wave: 2,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            explosion_frames: 8,
            explosion_frame_rate: 16.0,
            explosion_scale: 1.0,
            debris_count: 6,
            debris_speed: 90.0,
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// The visible screen rectangle
    pub fn viewport(&self) -> Bounds {
        Bounds::from_size(self.world.width, self.world.height)
    }

    /// The wrap rectangle: the viewport grown by the off-screen margin
    pub fn world_bounds(&self) -> Bounds {
        self.viewport().expanded(self.world.offscreen_margin)
    }

    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("gameplay.player_radius", self.gameplay.player_radius)?;
        positive("gameplay.bullet_radius", self.gameplay.bullet_radius)?;
        positive("gameplay.bullet_speed", self.gameplay.bullet_speed)?;
        positive("enemies.radius", self.enemies.radius)?;
        positive("enemies.wave_interval", self.enemies.wave_interval)?;

        if !(self.world.offscreen_margin.is_finite() && self.world.offscreen_margin >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "world.offscreen_margin",
                reason: "must be zero or positive".to_string(),
            });
        }
        if self.gameplay.starting_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "gameplay.starting_lives",
                reason: "at least one life is required".to_string(),
            });
        }
        if self.gameplay.player_health == 0 {
            return Err(ConfigError::Invalid {
                field: "gameplay.player_health",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
