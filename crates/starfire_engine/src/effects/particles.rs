//! Particle emitter
//!
//! Explosions, sparks and trails. Particles never collide; they drift, animate
//! and are recycled by the emitter that owns them.

use super::animation::{FrameLayout, SpriteAnimation};
use super::should_auto_recycle;
use crate::foundation::collections::{RecyclingArena, SlotKey};
use crate::foundation::math::{Bounds, Vec2};
use crate::foundation::time::GameTime;
use crate::host::{DrawSink, SpriteDraw, Tint};
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_EMITTER_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one emitter instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmitterId(u32);

/// Handle to a particle in a specific emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    emitter: EmitterId,
    key: SlotKey,
}

impl ParticleHandle {
    /// Emitter that owns the particle
    pub fn emitter(&self) -> EmitterId {
        self.emitter
    }
}

/// Parameters for a new particle
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSpawn {
    /// Sprite sheet name
    pub sprite: &'static str,
    /// Initial position
    pub position: Vec2,
    /// Drift velocity
    pub velocity: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Uniform scale
    pub scale: f32,
    /// Color multiplier
    pub tint: Tint,
    /// Frame layout of the sheet
    pub layout: FrameLayout,
    /// Frames per second
    pub frame_rate: f32,
    /// Whether the animation cycles
    pub looping: bool,
    /// Suppress automatic recycling
    pub explicit_recycle: bool,
}

impl ParticleSpawn {
    /// A still, untinted particle at `position`
    pub fn new(sprite: &'static str, position: Vec2) -> Self {
        Self {
            sprite,
            position,
            velocity: Vec2::zeros(),
            rotation: 0.0,
            scale: 1.0,
            tint: Tint::WHITE,
            layout: FrameLayout::single(),
            frame_rate: 0.0,
            looping: true,
            explicit_recycle: false,
        }
    }

    /// Set the drift velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Animate over `layout` at `frame_rate` frames per second
    pub fn with_animation(mut self, layout: FrameLayout, frame_rate: f32, looping: bool) -> Self {
        self.layout = layout;
        self.frame_rate = frame_rate;
        self.looping = looping;
        self
    }

    /// Set the rotation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the tint
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    /// Keep the particle until it is recycled by hand
    pub fn requiring_explicit_recycle(mut self) -> Self {
        self.explicit_recycle = true;
        self
    }
}

/// A live particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    sprite: &'static str,
    position: Vec2,
    velocity: Vec2,
    rotation: f32,
    scale: f32,
    tint: Tint,
    animation: SpriteAnimation,
    visible: bool,
    explicit_recycle: bool,
}

impl Particle {
    fn from_spawn(spawn: ParticleSpawn) -> Self {
        Self {
            sprite: spawn.sprite,
            position: spawn.position,
            velocity: spawn.velocity,
            rotation: spawn.rotation,
            scale: spawn.scale,
            tint: spawn.tint,
            animation: SpriteAnimation::new(spawn.layout, spawn.frame_rate, spawn.looping),
            visible: true,
            explicit_recycle: spawn.explicit_recycle,
        }
    }

    fn step(&mut self, delta: f32) {
        self.position += self.velocity * delta;
        self.animation.advance(delta);
        if self.animation.is_finished() {
            self.visible = false;
        }
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current animation state
    pub fn animation(&self) -> &SpriteAnimation {
        &self.animation
    }

    /// Whether the particle is drawn
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether automatic recycling is suppressed
    pub fn requires_explicit_recycle(&self) -> bool {
        self.explicit_recycle
    }

    fn sprite_draw(&self) -> SpriteDraw {
        SpriteDraw::new(self.sprite, self.position)
            .with_frame(self.animation.frame())
            .with_rotation(self.rotation)
            .with_scale(self.scale)
            .with_tint(self.tint)
    }
}

/// Owner of a recycling set of particles
#[derive(Debug)]
pub struct ParticleEmitter {
    id: EmitterId,
    particles: RecyclingArena<Particle>,
}

impl ParticleEmitter {
    /// Create an empty emitter
    pub fn new() -> Self {
        Self {
            id: EmitterId(NEXT_EMITTER_ID.fetch_add(1, Ordering::Relaxed)),
            particles: RecyclingArena::new(),
        }
    }

    /// Identity of this emitter
    pub fn id(&self) -> EmitterId {
        self.id
    }

    /// Start a particle, reusing a recycled slot when available
    pub fn emit(&mut self, spawn: ParticleSpawn) -> ParticleHandle {
        let (key, reused) = self.particles.acquire(Particle::from_spawn(spawn));
        if !reused {
            log::debug!(
                "ParticleEmitter {:?} grew to {} particles",
                self.id,
                self.particles.capacity()
            );
        }
        ParticleHandle { emitter: self.id, key }
    }

    /// Advance every particle, then recycle the ones the policy lets go
    ///
    /// Particles move by `velocity * delta` and advance their animation; a
    /// finished one-shot animation hides its particle. Afterwards every
    /// particle that does not require explicit recycling is recycled if it is
    /// invisible or its position is outside `viewport`. Returns how many were
    /// recycled.
    pub fn update(&mut self, time: &GameTime, viewport: &Bounds) -> usize {
        for (_, particle) in self.particles.iter_mut() {
            particle.step(time.delta);
        }

        let expired: Vec<SlotKey> = self
            .particles
            .iter()
            .filter(|(_, particle)| {
                should_auto_recycle(
                    particle.explicit_recycle,
                    particle.visible,
                    viewport.contains(particle.position),
                )
            })
            .map(|(key, _)| key)
            .collect();

        expired
            .into_iter()
            .filter(|key| self.particles.release(*key))
            .count()
    }

    /// Recycle a particle by hand; stale or foreign handles are ignored
    pub fn recycle(&mut self, handle: ParticleHandle) -> bool {
        handle.emitter == self.id && self.particles.release(handle.key)
    }

    /// Recycle every particle, returning how many were active
    pub fn clear(&mut self) -> usize {
        self.particles
            .live_keys()
            .into_iter()
            .filter(|key| self.particles.release(*key))
            .count()
    }

    /// Set whether the particle must be recycled by hand
    ///
    /// Only active particles are affected; returns `false` otherwise.
    pub fn set_explicit_recycling_required(
        &mut self,
        handle: ParticleHandle,
        required: bool,
    ) -> bool {
        match self.get_mut(handle) {
            Some(particle) => {
                particle.explicit_recycle = required;
                true
            }
            None => false,
        }
    }

    /// Show or hide a particle; returns `false` for inactive handles
    pub fn set_visible(&mut self, handle: ParticleHandle, visible: bool) -> bool {
        match self.get_mut(handle) {
            Some(particle) => {
                particle.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Borrow an active particle
    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        if handle.emitter != self.id {
            return None;
        }
        self.particles.get(handle.key)
    }

    fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        if handle.emitter != self.id {
            return None;
        }
        self.particles.get_mut(handle.key)
    }

    /// Whether the handle refers to an active particle of this emitter
    pub fn is_active(&self, handle: ParticleHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Queue a sprite for every visible particle
    pub fn draw(&self, sink: &mut dyn DrawSink) {
        for (_, particle) in self.particles.iter() {
            if particle.visible {
                sink.draw_sprite(particle.sprite_draw());
            }
        }
    }

    /// Number of active particles
    pub fn active_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of particles waiting for reuse
    pub fn recycled_count(&self) -> usize {
        self.particles.recycled_len()
    }
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self::new()
    }
}
