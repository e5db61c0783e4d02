//! One round of play
//!
//! A [`PlaySession`] owns the object factory, the actors riding on it and the
//! effect managers. Each tick runs in a fixed order: player input, enemy
//! weapons, the factory update (callbacks, movement, collision sweep), combat
//! resolution, bullet and particle recycling, then wave spawning.

use crate::actors::{
    Actor, ActorId, BulletState, EnemyKind, EnemyState, Faction, HitOutcome, PlayerState, Role,
};
use crate::assets::{sounds, sprites};
use crate::config::GameConfig;
use crate::events::{CombatEvent, EventQueue};
use crate::spawner::WaveSpawner;
use slotmap::SlotMap;
use starfire_engine::effects::{BulletManager, FrameLayout, ParticleEmitter, ParticleSpawn};
use starfire_engine::foundation::math::{constants::TAU, utils, Bounds, Vec2};
use starfire_engine::foundation::time::GameTime;
use starfire_engine::host::{DrawSink, InputSnapshot, SoundSink, SpriteDraw, Tint};
use starfire_engine::physics::CollisionLayers;
use starfire_engine::pool::{
    CollisionCallback, DrawCallback, MovingObject, MovingObjectFactory, ObjectCallbacks,
    ObjectHandle, ObjectSpawn, UpdateCallback,
};
use std::cell::Cell;
use std::rc::Rc;

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Play continues
    Running,
    /// The player has no lives left
    PlayerDead,
}

/// Player state the object callbacks read
#[derive(Debug, Default)]
struct SharedView {
    target: Cell<Option<Vec2>>,
    heading: Cell<f32>,
    flashing: Cell<bool>,
}

/// Callback sets, built once per session and shared by every object of a kind
struct CallbackSets {
    player: ObjectCallbacks<ActorId>,
    player_bullet: ObjectCallbacks<ActorId>,
    enemy_bullet: ObjectCallbacks<ActorId>,
    drone: ObjectCallbacks<ActorId>,
    brute: ObjectCallbacks<ActorId>,
    gunner: ObjectCallbacks<ActorId>,
}

impl CallbackSets {
    fn new(events: &EventQueue, view: &Rc<SharedView>) -> Self {
        let enemy = |kind: EnemyKind| ObjectCallbacks {
            on_update: Some(chaser(Rc::clone(view))),
            on_collision: None,
            on_draw: Some(sprite_drawer(kind.sprite())),
        };
        Self {
            player: ObjectCallbacks {
                on_update: None,
                on_collision: Some(contact_recorder(events.clone())),
                on_draw: Some(player_drawer(Rc::clone(view))),
            },
            player_bullet: ObjectCallbacks {
                on_update: None,
                on_collision: Some(contact_recorder(events.clone())),
                on_draw: Some(sprite_drawer(sprites::PLAYER_LASER)),
            },
            enemy_bullet: ObjectCallbacks {
                on_update: None,
                on_collision: Some(contact_recorder(events.clone())),
                on_draw: Some(sprite_drawer(sprites::ENEMY_LASER)),
            },
            drone: enemy(EnemyKind::Drone),
            brute: enemy(EnemyKind::Brute),
            gunner: enemy(EnemyKind::Gunner),
        }
    }

    fn enemy(&self, kind: EnemyKind) -> ObjectCallbacks<ActorId> {
        match kind {
            EnemyKind::Drone => self.drone.clone(),
            EnemyKind::Brute => self.brute.clone(),
            EnemyKind::Gunner => self.gunner.clone(),
        }
    }
}

fn contact_recorder(events: EventQueue) -> CollisionCallback<ActorId> {
    Rc::new(
        move |factory: &mut MovingObjectFactory<ActorId>,
              me: ObjectHandle,
              other: ObjectHandle,
              _time: &GameTime| {
            if let (Some(me), Some(other)) = (factory.owner(me), factory.owner(other)) {
                events.push(CombatEvent::Contact { me, other });
            }
        },
    )
}

// Steers toward the last known player position, keeping the current speed.
fn chaser(view: Rc<SharedView>) -> UpdateCallback<ActorId> {
    Rc::new(
        move |factory: &mut MovingObjectFactory<ActorId>, me: ObjectHandle, _time: &GameTime| {
            let Some(target) = view.target.get() else {
                return;
            };
            if let Some(object) = factory.get_mut(me) {
                let speed = object.velocity().norm();
                if let Some(direction) = utils::direction(target - object.position()) {
                    object.set_velocity(direction * speed);
                }
            }
        },
    )
}

fn sprite_drawer(sprite: &'static str) -> DrawCallback<ActorId> {
    Rc::new(
        move |object: &MovingObject<ActorId>, sink: &mut dyn DrawSink, _time: &GameTime| {
            sink.draw_sprite(
                SpriteDraw::new(sprite, object.position()).with_rotation(object.rotation()),
            );
        },
    )
}

fn player_drawer(view: Rc<SharedView>) -> DrawCallback<ActorId> {
    Rc::new(
        move |object: &MovingObject<ActorId>, sink: &mut dyn DrawSink, _time: &GameTime| {
            let tint = if view.flashing.get() {
                Tint::WHITE.with_alpha(0.4)
            } else {
                Tint::WHITE
            };
            sink.draw_sprite(
                SpriteDraw::new(sprites::PLAYER, object.position())
                    .with_rotation(view.heading.get())
                    .with_tint(tint),
            );
        },
    )
}

// Clamp `value` so a body of `radius` stays within `[low, high)`.
// A span too narrow for the body pins it to the middle.
fn keep_inside(value: f32, low: f32, high: f32, radius: f32) -> f32 {
    let (min, max) = (low + radius, high - radius);
    if min < max {
        value.clamp(min, max)
    } else {
        low + (high - low) * 0.5
    }
}

enum Contact {
    BulletHitEnemy {
        bullet: ActorId,
        enemy: ActorId,
        damage: u32,
    },
    BulletHitPlayer {
        bullet: ActorId,
        damage: u32,
    },
    EnemyRammedPlayer {
        enemy: ActorId,
    },
}

/// A running game round
pub struct PlaySession {
    config: GameConfig,
    viewport: Bounds,
    factory: MovingObjectFactory<ActorId>,
    actors: SlotMap<ActorId, Actor>,
    player: ActorId,
    player_bullets: BulletManager,
    enemy_bullets: BulletManager,
    particles: ParticleEmitter,
    spawner: WaveSpawner,
    events: EventQueue,
    view: Rc<SharedView>,
    callbacks: CallbackSets,
    score: u32,
    kills: u32,
    last_time: GameTime,
}

impl PlaySession {
    /// Start a round with the player in the middle of the screen
    pub fn new(config: &GameConfig) -> Self {
        let viewport = config.viewport();
        let mut factory: MovingObjectFactory<ActorId> =
            MovingObjectFactory::new(config.world_bounds());
        let events = EventQueue::new();
        let view = Rc::new(SharedView::default());
        let callbacks = CallbackSets::new(&events, &view);

        let mut actors: SlotMap<ActorId, Actor> = SlotMap::with_key();
        let player = actors.insert_with_key(|id| Actor {
            body: factory.create(
                ObjectSpawn::new(
                    id,
                    config.gameplay.player_radius,
                    viewport.center(),
                    Vec2::zeros(),
                )
                .with_layers(
                        CollisionLayers::PLAYER,
                        CollisionLayers::ENEMY | CollisionLayers::ENEMY_PROJECTILE,
                    )
                    .with_callbacks(callbacks.player.clone()),
            ),
            role: Role::Player(PlayerState::new(config)),
        });

        log::info!("Play session started");
        Self {
            config: config.clone(),
            viewport,
            factory,
            actors,
            player,
            player_bullets: BulletManager::new(),
            enemy_bullets: BulletManager::new(),
            particles: ParticleEmitter::new(),
            spawner: WaveSpawner::new(&config.enemies, config.world.seed),
            events,
            view,
            callbacks,
            score: 0,
            kills: 0,
            last_time: GameTime::default(),
        }
    }

    /// Advance the round by one frame
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        time: &GameTime,
        sound: &mut dyn SoundSink,
    ) -> SessionStatus {
        self.last_time = *time;
        if self.is_player_dead() {
            return SessionStatus::PlayerDead;
        }

        self.steer_player(input, time.delta, sound);
        self.fire_enemy_weapons(time.delta, sound);
        self.factory.update_all(time);
        self.resolve_events(sound);

        self.player_bullets.update(&mut self.factory, &self.viewport);
        self.enemy_bullets.update(&mut self.factory, &self.viewport);
        self.forget_recycled_actors();
        self.particles.update(time, &self.viewport);

        let margin = self.config.world.offscreen_margin * 0.5;
        if let Some(wave) = self.spawner.tick(time.delta, &self.viewport, margin) {
            log::info!("Wave {} incoming ({} enemies)", wave.index + 1, wave.spawns.len());
            for spawn in wave.spawns {
                self.spawn_enemy(spawn.kind, spawn.position);
            }
            sound.play(sounds::WAVE);
        }

        if self.is_player_dead() {
            SessionStatus::PlayerDead
        } else {
            SessionStatus::Running
        }
    }

    /// Queue sprites for every visible object and particle
    pub fn draw(&self, sink: &mut dyn DrawSink) {
        self.factory.draw_visible(sink, &self.last_time);
        self.particles.draw(sink);
    }

    /// Place an enemy heading for the player
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec2) -> ActorId {
        let state = EnemyState::new(kind, &self.config);
        let radius = self.config.enemies.radius * kind.radius_factor();
        let target = self.view.target.get().unwrap_or_else(|| self.viewport.center());
        let heading = utils::direction(target - position).unwrap_or_else(|| Vec2::new(1.0, 0.0));
        let velocity = heading * state.speed;
        let callbacks = self.callbacks.enemy(kind);

        let factory = &mut self.factory;
        self.actors.insert_with_key(|id| Actor {
            body: factory.create(
                ObjectSpawn::new(id, radius, position, velocity)
                    .with_layers(
                        CollisionLayers::ENEMY,
                        CollisionLayers::PLAYER | CollisionLayers::PLAYER_PROJECTILE,
                    )
                    .with_callbacks(callbacks),
            ),
            role: Role::Enemy(state),
        })
    }

    fn steer_player(&mut self, input: &InputSnapshot, delta: f32, sound: &mut dyn SoundSink) {
        let Some(actor) = self.actors.get_mut(self.player) else {
            return;
        };
        let body = actor.body;
        let Some(player) = actor.as_player_mut() else {
            return;
        };

        player.tick(delta);
        let movement = input.movement();
        if let Some(direction) = utils::direction(movement) {
            player.facing = direction;
        }
        let facing = player.facing;
        let fire = input.fire && player.can_fire();
        if fire {
            player.fire_cooldown = self.config.gameplay.fire_cooldown;
        }
        self.view.heading.set(utils::heading(facing));
        self.view.flashing.set(player.is_invulnerable());

        let Some(position) = self.factory.get(body).map(MovingObject::position) else {
            return;
        };
        self.view.target.set(Some(position));

        // Keep the whole ship on screen by limiting this frame's step
        let mut velocity = movement * self.config.gameplay.player_speed;
        if delta > 0.0 {
            let next = position + velocity * delta;
            let radius = self.config.gameplay.player_radius;
            let viewport = &self.viewport;
            let clamped = Vec2::new(
                keep_inside(next.x, viewport.left(), viewport.right(), radius),
                keep_inside(next.y, viewport.top(), viewport.bottom(), radius),
            );
            velocity = (clamped - position) / delta;
        }
        self.factory.set_velocity(body, velocity);

        if fire {
            let gameplay = &self.config.gameplay;
            let muzzle = position + facing * (gameplay.player_radius + gameplay.bullet_radius);
            let velocity = facing * gameplay.bullet_speed;
            let damage = gameplay.bullet_damage;
            self.spawn_bullet(Faction::Player, muzzle, velocity, damage);
            sound.play(sounds::LASER);
        }
    }

    fn fire_enemy_weapons(&mut self, delta: f32, sound: &mut dyn SoundSink) {
        let Some(target) = self.view.target.get() else {
            return;
        };
        let enemies = &self.config.enemies;

        let mut shots = Vec::new();
        for (_, actor) in &mut self.actors {
            let body = actor.body;
            let Some(weapon) = actor.as_enemy_mut().and_then(|enemy| enemy.weapon.as_mut()) else {
                continue;
            };
            if !weapon.tick(delta) {
                continue;
            }
            weapon.reset(enemies.gunner_fire_interval);

            let Some(object) = self.factory.get(body) else {
                continue;
            };
            let position = object.position();
            if !self.viewport.contains(position) {
                continue;
            }
            if let Some(direction) = utils::direction(target - position) {
                let offset = object.radius() + self.config.gameplay.bullet_radius;
                let muzzle = position + direction * offset;
                shots.push((muzzle, direction * enemies.bullet_speed));
            }
        }

        let damage = self.config.enemies.contact_damage;
        for (muzzle, velocity) in shots {
            self.spawn_bullet(Faction::Enemy, muzzle, velocity, damage);
            sound.play(sounds::ENEMY_LASER);
        }
    }

    fn spawn_bullet(
        &mut self,
        faction: Faction,
        position: Vec2,
        velocity: Vec2,
        damage: u32,
    ) -> ActorId {
        let radius = self.config.gameplay.bullet_radius;
        let (bullets, callbacks, layer, mask) = match faction {
            Faction::Player => (
                &mut self.player_bullets,
                self.callbacks.player_bullet.clone(),
                CollisionLayers::PLAYER_PROJECTILE,
                CollisionLayers::ENEMY,
            ),
            Faction::Enemy => (
                &mut self.enemy_bullets,
                self.callbacks.enemy_bullet.clone(),
                CollisionLayers::ENEMY_PROJECTILE,
                CollisionLayers::PLAYER,
            ),
        };

        let factory = &mut self.factory;
        self.actors.insert_with_key(|id| Actor {
            body: bullets.fire(
                factory,
                ObjectSpawn::new(id, radius, position, velocity)
                    .with_layers(layer, mask)
                    .with_callbacks(callbacks),
            ),
            role: Role::Bullet(BulletState { faction, damage }),
        })
    }

    fn resolve_events(&mut self, sound: &mut dyn SoundSink) {
        for event in self.events.drain() {
            let CombatEvent::Contact { me, other } = event;
            match self.classify(me, other) {
                Some(Contact::BulletHitEnemy {
                    bullet,
                    enemy,
                    damage,
                }) => {
                    self.despawn(bullet);
                    self.damage_enemy(enemy, damage, sound);
                }
                Some(Contact::BulletHitPlayer { bullet, damage }) => {
                    self.despawn(bullet);
                    self.hit_player(damage, sound);
                }
                Some(Contact::EnemyRammedPlayer { enemy }) => {
                    let damage = self.config.enemies.contact_damage;
                    if self.hit_player(damage, sound) != HitOutcome::Absorbed {
                        self.explode(enemy);
                        sound.play(sounds::EXPLOSION);
                    }
                }
                None => {}
            }
        }
    }

    // Contacts are reported from the bullet's side and the player's side only.
    fn classify(&self, me: ActorId, other: ActorId) -> Option<Contact> {
        let me_role = &self.actors.get(me)?.role;
        let other_role = &self.actors.get(other)?.role;
        match (me_role, other_role) {
            (Role::Bullet(bullet), Role::Enemy(_)) if bullet.faction == Faction::Player => {
                Some(Contact::BulletHitEnemy {
                    bullet: me,
                    enemy: other,
                    damage: bullet.damage,
                })
            }
            (Role::Bullet(bullet), Role::Player(_)) if bullet.faction == Faction::Enemy => {
                Some(Contact::BulletHitPlayer {
                    bullet: me,
                    damage: bullet.damage,
                })
            }
            (Role::Player(_), Role::Enemy(_)) => Some(Contact::EnemyRammedPlayer { enemy: other }),
            _ => None,
        }
    }

    fn damage_enemy(&mut self, id: ActorId, damage: u32, sound: &mut dyn SoundSink) {
        let Some(enemy) = self.actors.get_mut(id).and_then(Actor::as_enemy_mut) else {
            return;
        };
        if !enemy.take_damage(damage) {
            sound.play(sounds::IMPACT);
            return;
        }

        self.score += enemy.score_value;
        self.kills += 1;
        log::debug!("Enemy destroyed, score {}", self.score);
        self.explode(id);
        sound.play(sounds::EXPLOSION);
    }

    fn hit_player(&mut self, damage: u32, sound: &mut dyn SoundSink) -> HitOutcome {
        let invulnerability = self.config.gameplay.invulnerability_time;
        let Some(actor) = self.actors.get_mut(self.player) else {
            return HitOutcome::Absorbed;
        };
        let body = actor.body;
        let Some(player) = actor.as_player_mut() else {
            return HitOutcome::Absorbed;
        };

        let outcome = player.take_hit(damage, invulnerability);
        let lives = player.lives;
        match outcome {
            HitOutcome::Absorbed => {}
            HitOutcome::Damaged => sound.play(sounds::PLAYER_HIT),
            HitOutcome::LifeLost => {
                log::info!("Player lost a life, {} left", lives);
                sound.play(sounds::PLAYER_DOWN);
                self.explode_at_body(body);
                self.factory.set_position(body, self.viewport.center());
            }
            HitOutcome::Dead => {
                log::info!("Player destroyed");
                sound.play(sounds::PLAYER_DOWN);
                self.explode_at_body(body);
                self.factory.set_moving(body, false);
                self.factory.set_visible(body, false);
                self.view.target.set(None);
            }
        }
        outcome
    }

    fn explode(&mut self, id: ActorId) {
        if let Some(actor) = self.actors.get(id) {
            self.explode_at_body(actor.body);
        }
        self.despawn(id);
    }

    fn explode_at_body(&mut self, body: ObjectHandle) {
        let Some(position) = self.factory.get(body).map(MovingObject::position) else {
            return;
        };
        let effects = &self.config.effects;
        self.particles.emit(
            ParticleSpawn::new(sprites::EXPLOSION, position)
                .with_animation(
                    FrameLayout::strip(effects.explosion_frames),
                    effects.explosion_frame_rate,
                    false,
                )
                .with_scale(effects.explosion_scale),
        );
        for i in 0..effects.debris_count {
            let angle = TAU * i as f32 / effects.debris_count as f32;
            let direction = Vec2::new(angle.cos(), angle.sin());
            self.particles.emit(
                ParticleSpawn::new(sprites::SPARK, position)
                    .with_velocity(direction * effects.debris_speed)
                    .with_rotation(angle)
                    .with_animation(FrameLayout::strip(4), 8.0, false),
            );
        }
    }

    fn despawn(&mut self, id: ActorId) {
        if id == self.player {
            return;
        }
        if let Some(actor) = self.actors.remove(id) {
            self.factory.recycle(actor.body);
        }
    }

    // Bullet managers recycle objects on their own; drop the actors they carried.
    fn forget_recycled_actors(&mut self) {
        let factory = &self.factory;
        self.actors.retain(|_, actor| factory.in_use(actor.body));
    }

    fn player_state(&self) -> Option<&PlayerState> {
        match &self.actors.get(self.player)?.role {
            Role::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Whether the player has no lives left
    pub fn is_player_dead(&self) -> bool {
        self.player_state().map_or(true, PlayerState::is_dead)
    }

    /// Remaining lives
    pub fn lives(&self) -> u32 {
        self.player_state().map_or(0, |player| player.lives)
    }

    /// Current health
    pub fn health(&self) -> u32 {
        self.player_state().map_or(0, |player| player.health)
    }

    /// Whether the player is currently invulnerable
    pub fn is_player_invulnerable(&self) -> bool {
        self.player_state().is_some_and(PlayerState::is_invulnerable)
    }

    /// Player ship position
    pub fn player_position(&self) -> Option<Vec2> {
        let body = self.actors.get(self.player)?.body;
        self.factory.get(body).map(MovingObject::position)
    }

    /// Points scored this round
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Enemies destroyed this round
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Number of waves spawned so far
    pub fn waves_spawned(&self) -> u32 {
        self.spawner.next_wave()
    }

    /// Enemies alive
    pub fn enemy_count(&self) -> usize {
        self.actors
            .values()
            .filter(|actor| matches!(actor.role, Role::Enemy(_)))
            .count()
    }

    /// Bullets in flight for `faction`
    pub fn bullet_count(&self, faction: Faction) -> usize {
        match faction {
            Faction::Player => self.player_bullets.active_count(),
            Faction::Enemy => self.enemy_bullets.active_count(),
        }
    }

    /// Live particles
    pub fn particle_count(&self) -> usize {
        self.particles.active_count()
    }

    /// Objects in use in the factory
    pub fn object_count(&self) -> usize {
        self.factory.active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FRAME: f32 = 1.0 / 60.0;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.enemies.first_wave_delay = 1000.0;
        config
    }

    fn run(
        session: &mut PlaySession,
        input: &InputSnapshot,
        frames: usize,
        sounds: &mut Vec<&'static str>,
    ) -> SessionStatus {
        let mut status = SessionStatus::Running;
        for _ in 0..frames {
            status = session.tick(input, &GameTime::from_delta(FRAME), sounds);
        }
        status
    }

    fn center(session: &PlaySession) -> Vec2 {
        session.player_position().unwrap()
    }

    #[test]
    fn test_new_session_has_only_the_player() {
        let session = PlaySession::new(&quiet_config());
        assert_eq!(session.player_position(), Some(Vec2::new(400.0, 300.0)));
        assert_eq!(session.enemy_count(), 0);
        assert_eq!(session.object_count(), 1);
        assert_eq!(session.lives(), 3);
        assert!(!session.is_player_dead());
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut session = PlaySession::new(&quiet_config());
        let mut sounds = Vec::new();
        let fire = InputSnapshot {
            fire: true,
            ..Default::default()
        };

        run(&mut session, &fire, 1, &mut sounds);
        run(&mut session, &fire, 1, &mut sounds);
        assert_eq!(session.bullet_count(Faction::Player), 1);
        assert_eq!(sounds, vec![sounds::LASER]);
    }

    #[test]
    fn test_bullet_destroys_enemy() {
        let mut session = PlaySession::new(&quiet_config());
        let mut sounds = Vec::new();
        let target = center(&session) + Vec2::new(0.0, -60.0);
        session.spawn_enemy(EnemyKind::Drone, target);

        let fire = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        run(&mut session, &fire, 1, &mut sounds);
        run(&mut session, &InputSnapshot::default(), 10, &mut sounds);

        assert_eq!(session.enemy_count(), 0);
        assert_eq!(session.kills(), 1);
        assert_eq!(session.score(), 100);
        assert_eq!(session.bullet_count(Faction::Player), 0);
        assert!(sounds.contains(&sounds::EXPLOSION));
        assert!(session.particle_count() > 0);
    }

    #[test]
    fn test_enemy_ram_hurts_player() {
        let mut session = PlaySession::new(&quiet_config());
        let mut sounds = Vec::new();
        let beside = center(&session) + Vec2::new(5.0, 0.0);
        session.spawn_enemy(EnemyKind::Drone, beside);

        let status = run(&mut session, &InputSnapshot::default(), 1, &mut sounds);
        assert_eq!(status, SessionStatus::Running);
        assert_eq!(session.health(), 2);
        assert_eq!(session.enemy_count(), 0);
        assert_eq!(session.score(), 0);
        assert!(sounds.contains(&sounds::PLAYER_HIT));
    }

    #[test]
    fn test_life_lost_grants_invulnerability() {
        let mut config = quiet_config();
        config.gameplay.player_health = 1;
        config.gameplay.starting_lives = 2;
        let mut session = PlaySession::new(&config);
        let mut sounds = Vec::new();

        let beside = center(&session) + Vec2::new(5.0, 0.0);
        session.spawn_enemy(EnemyKind::Drone, beside);
        run(&mut session, &InputSnapshot::default(), 1, &mut sounds);
        assert_eq!(session.lives(), 1);
        assert!(session.is_player_invulnerable());

        let beside = center(&session) + Vec2::new(5.0, 0.0);
        session.spawn_enemy(EnemyKind::Drone, beside);
        let status = run(&mut session, &InputSnapshot::default(), 1, &mut sounds);
        assert_eq!(status, SessionStatus::Running);
        assert_eq!(session.lives(), 1);
        assert_eq!(session.enemy_count(), 1);
    }

    #[test]
    fn test_last_life_ends_session() {
        let mut config = quiet_config();
        config.gameplay.player_health = 1;
        config.gameplay.starting_lives = 1;
        let mut session = PlaySession::new(&config);
        let mut sounds = Vec::new();

        let beside = center(&session) + Vec2::new(5.0, 0.0);
        session.spawn_enemy(EnemyKind::Drone, beside);
        let status = run(&mut session, &InputSnapshot::default(), 1, &mut sounds);
        assert_eq!(status, SessionStatus::PlayerDead);
        assert!(session.is_player_dead());
        assert!(sounds.contains(&sounds::PLAYER_DOWN));
    }

    #[test]
    fn test_first_wave_spawns() {
        let mut config = GameConfig::default();
        config.enemies.first_wave_delay = 0.01;
        let mut session = PlaySession::new(&config);
        let mut sounds = Vec::new();

        run(&mut session, &InputSnapshot::default(), 1, &mut sounds);
        assert_eq!(session.waves_spawned(), 1);
        assert_eq!(session.enemy_count(), config.enemies.base_count as usize);
        assert!(sounds.contains(&sounds::WAVE));
    }

    #[test]
    fn test_gunner_shoots_at_player() {
        let mut config = quiet_config();
        config.enemies.gunner_fire_interval = 0.01;
        let mut session = PlaySession::new(&config);
        let mut sounds = Vec::new();

        session.spawn_enemy(EnemyKind::Gunner, Vec2::new(100.0, 100.0));
        run(&mut session, &InputSnapshot::default(), 2, &mut sounds);
        assert!(session.bullet_count(Faction::Enemy) >= 1);
        assert!(sounds.contains(&sounds::ENEMY_LASER));
    }

    #[test]
    fn test_offscreen_bullets_are_recycled() {
        let mut session = PlaySession::new(&quiet_config());
        let mut sounds = Vec::new();
        let fire = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        run(&mut session, &fire, 1, &mut sounds);
        assert_eq!(session.object_count(), 2);

        // 600 units per second clears the 300 units above the ship well within a second
        run(&mut session, &InputSnapshot::default(), 60, &mut sounds);
        assert_eq!(session.bullet_count(Faction::Player), 0);
        assert_eq!(session.object_count(), 1);
    }

    #[test]
    fn test_player_stays_on_screen() {
        let mut session = PlaySession::new(&quiet_config());
        let mut sounds = Vec::new();
        let left = InputSnapshot {
            move_x: -1.0,
            ..Default::default()
        };
        run(&mut session, &left, 240, &mut sounds);
        let position = center(&session);
        assert_relative_eq!(position.x, 14.0, epsilon = 1e-3);
        assert!(session.viewport.contains(position));
    }

    #[test]
    fn test_player_stops_short_of_far_edges() {
        let mut session = PlaySession::new(&quiet_config());
        let mut sounds = Vec::new();
        let down_right = InputSnapshot {
            move_x: 1.0,
            move_y: 1.0,
            ..Default::default()
        };
        run(&mut session, &down_right, 300, &mut sounds);
        let position = center(&session);
        assert_relative_eq!(position.x, 800.0 - 14.0, epsilon = 1e-3);
        assert_relative_eq!(position.y, 600.0 - 14.0, epsilon = 1e-3);
        assert!(session.viewport.contains(position));
    }

    #[test]
    fn test_keep_inside_narrow_span_uses_middle() {
        assert_eq!(keep_inside(3.0, 0.0, 10.0, 8.0), 5.0);
        assert_eq!(keep_inside(-4.0, 0.0, 100.0, 2.0), 2.0);
        assert_eq!(keep_inside(40.0, 0.0, 100.0, 2.0), 40.0);
    }

    #[test]
    fn test_draw_includes_player() {
        let session = PlaySession::new(&quiet_config());
        let mut draws: Vec<SpriteDraw> = Vec::new();
        session.draw(&mut draws);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].sprite, sprites::PLAYER);
    }
}
