//! Game actors
//!
//! Every actor is backed by exactly one pooled moving object. The pooled
//! object carries the physics; the actor carries the game rules.

use crate::assets::sprites;
use crate::config::GameConfig;
use starfire_engine::foundation::math::Vec2;
use starfire_engine::foundation::time::Countdown;
use starfire_engine::pool::ObjectHandle;

slotmap::new_key_type! {
    /// Key of an actor in the session's actor map
    pub struct ActorId;
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    /// The player ship
    Player,
    /// Any enemy
    Enemy,
}

/// Enemy varieties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Fast, fragile chaser
    Drone,
    /// Slow chaser that takes several hits
    Brute,
    /// Keeps chasing and shoots at the player
    Gunner,
}

impl EnemyKind {
    /// Sprite for this kind
    pub fn sprite(self) -> &'static str {
        match self {
            Self::Drone => sprites::DRONE,
            Self::Brute => sprites::BRUTE,
            Self::Gunner => sprites::GUNNER,
        }
    }

    /// Speed relative to the configured drone speed
    pub fn speed_factor(self) -> f32 {
        match self {
            Self::Drone => 1.0,
            Self::Brute => 0.6,
            Self::Gunner => 0.8,
        }
    }

    /// Health relative to the configured drone health
    pub fn health_factor(self) -> u32 {
        match self {
            Self::Drone => 1,
            Self::Brute => 3,
            Self::Gunner => 2,
        }
    }

    /// Score relative to the configured drone score
    pub fn score_factor(self) -> u32 {
        match self {
            Self::Drone => 1,
            Self::Brute => 3,
            Self::Gunner => 2,
        }
    }

    /// Radius relative to the configured drone radius
    pub fn radius_factor(self) -> f32 {
        match self {
            Self::Drone => 1.0,
            Self::Brute => 1.6,
            Self::Gunner => 1.2,
        }
    }
}

/// What a hit did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Ignored while invulnerable
    Absorbed,
    /// Health went down
    Damaged,
    /// A life was lost; the ship respawns
    LifeLost,
    /// The last life was lost
    Dead,
}

/// Player ship state
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Current hit points
    pub health: u32,
    /// Hit points per life
    pub max_health: u32,
    /// Remaining lives including the current one
    pub lives: u32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    /// Unit vector the ship points along
    pub facing: Vec2,
    /// Seconds of invulnerability left
    pub invulnerability: f32,
}

impl PlayerState {
    /// Fresh ship from the configuration
    pub fn new(config: &GameConfig) -> Self {
        Self {
            health: config.gameplay.player_health,
            max_health: config.gameplay.player_health,
            lives: config.gameplay.starting_lives,
            fire_cooldown: 0.0,
            facing: Vec2::new(0.0, -1.0),
            invulnerability: 0.0,
        }
    }

    /// Count timers down
    pub fn tick(&mut self, delta: f32) {
        self.fire_cooldown = (self.fire_cooldown - delta).max(0.0);
        self.invulnerability = (self.invulnerability - delta).max(0.0);
    }

    /// Whether the weapon is ready
    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    /// Whether hits are currently ignored
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability > 0.0
    }

    /// Whether every life is gone
    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    /// Apply `damage`, losing a life when health runs out
    ///
    /// Losing a life that is not the last restores health and grants
    /// `invulnerability` seconds of protection.
    pub fn take_hit(&mut self, damage: u32, invulnerability: f32) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Dead;
        }
        if self.is_invulnerable() || damage == 0 {
            return HitOutcome::Absorbed;
        }

        self.health = self.health.saturating_sub(damage);
        if self.health > 0 {
            return HitOutcome::Damaged;
        }

        self.lives -= 1;
        if self.lives == 0 {
            HitOutcome::Dead
        } else {
            self.health = self.max_health;
            self.invulnerability = invulnerability;
            HitOutcome::LifeLost
        }
    }
}

/// Enemy state
#[derive(Debug, Clone)]
pub struct EnemyState {
    /// Variety
    pub kind: EnemyKind,
    /// Hit points left
    pub health: u32,
    /// Points awarded when destroyed
    pub score_value: u32,
    /// Chase speed
    pub speed: f32,
    /// Shot timer, only for kinds that shoot
    pub weapon: Option<Countdown>,
}

impl EnemyState {
    /// Enemy of `kind` scaled from the configured drone values
    pub fn new(kind: EnemyKind, config: &GameConfig) -> Self {
        let enemies = &config.enemies;
        Self {
            kind,
            health: (enemies.health * kind.health_factor()).max(1),
            score_value: enemies.score_value * kind.score_factor(),
            speed: enemies.speed * kind.speed_factor(),
            weapon: (kind == EnemyKind::Gunner)
                .then(|| Countdown::new(enemies.gunner_fire_interval)),
        }
    }

    /// Apply `damage`; returns `true` when the enemy is destroyed
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.health = self.health.saturating_sub(damage);
        self.health == 0
    }
}

/// Bullet state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletState {
    /// Who fired it
    pub faction: Faction,
    /// Damage on impact
    pub damage: u32,
}

/// Game-specific role of an actor
#[derive(Debug, Clone)]
pub enum Role {
    /// The player ship
    Player(PlayerState),
    /// An enemy
    Enemy(EnemyState),
    /// A projectile
    Bullet(BulletState),
}

/// An actor and the pooled object that carries it
#[derive(Debug, Clone)]
pub struct Actor {
    /// Pooled object handle
    pub body: ObjectHandle,
    /// Game rules
    pub role: Role,
}

impl Actor {
    /// Player state, if this is the player
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.role {
            Role::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Enemy state, if this is an enemy
    pub fn as_enemy_mut(&mut self) -> Option<&mut EnemyState> {
        match &mut self.role {
            Role::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(&GameConfig::default())
    }

    #[test]
    fn test_player_loses_life_when_health_runs_out() {
        let mut ship = player();
        assert_eq!(ship.take_hit(1, 2.0), HitOutcome::Damaged);
        assert_eq!(ship.take_hit(1, 2.0), HitOutcome::Damaged);
        assert_eq!(ship.take_hit(1, 2.0), HitOutcome::LifeLost);
        assert_eq!(ship.lives, 2);
        assert_eq!(ship.health, ship.max_health);
        assert!(ship.is_invulnerable());
    }

    #[test]
    fn test_invulnerable_player_absorbs_hits() {
        let mut ship = player();
        ship.invulnerability = 1.0;
        assert_eq!(ship.take_hit(5, 2.0), HitOutcome::Absorbed);
        assert_eq!(ship.health, ship.max_health);

        ship.tick(1.0);
        assert!(!ship.is_invulnerable());
        assert_eq!(ship.take_hit(1, 2.0), HitOutcome::Damaged);
    }

    #[test]
    fn test_last_life_is_fatal() {
        let mut ship = player();
        ship.lives = 1;
        assert_eq!(ship.take_hit(100, 2.0), HitOutcome::Dead);
        assert!(ship.is_dead());
        assert_eq!(ship.take_hit(1, 2.0), HitOutcome::Dead);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut ship = player();
        assert!(ship.can_fire());
        ship.fire_cooldown = 0.2;
        ship.tick(0.1);
        assert!(!ship.can_fire());
        ship.tick(0.15);
        assert!(ship.can_fire());
    }

    #[test]
    fn test_enemy_kinds_scale_from_config() {
        let config = GameConfig::default();
        let brute = EnemyState::new(EnemyKind::Brute, &config);
        assert_eq!(brute.health, config.enemies.health * 3);
        assert!(brute.weapon.is_none());

        let mut gunner = EnemyState::new(EnemyKind::Gunner, &config);
        assert!(gunner.weapon.is_some());
        assert!(!gunner.take_damage(1));
        assert!(gunner.take_damage(1));
    }
}
