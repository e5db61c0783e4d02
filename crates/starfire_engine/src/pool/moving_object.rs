//! Pooled moving objects and their spawn parameters

use super::factory::{MovingObjectFactory, ObjectHandle};
use crate::foundation::math::{utils, Vec2};
use crate::foundation::time::GameTime;
use crate::host::DrawSink;
use crate::physics::{CircleBoundary, CollisionLayers};
use bitflags::bitflags;
use std::rc::Rc;

/// Called once per frame for every in-use object
pub type UpdateCallback<O> = Rc<dyn Fn(&mut MovingObjectFactory<O>, ObjectHandle, &GameTime)>;

/// Called for each side of an overlapping pair: `(factory, me, other, time)`
pub type CollisionCallback<O> =
    Rc<dyn Fn(&mut MovingObjectFactory<O>, ObjectHandle, ObjectHandle, &GameTime)>;

/// Called for every visible object during a draw pass
pub type DrawCallback<O> = Rc<dyn Fn(&MovingObject<O>, &mut dyn DrawSink, &GameTime)>;

bitflags! {
    /// Set memberships an in-use object can hold independently
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct Membership: u8 {
        /// Integrated and swept for collisions each update
        const MOVING = 1 << 0;
        /// Drawn by draw passes
        const VISIBLE = 1 << 1;
    }
}

/// Callback slots of a pooled object
///
/// Cloning is cheap: each slot is a reference-counted closure, so one set can
/// be shared by every object of a kind.
pub struct ObjectCallbacks<O> {
    /// Per-frame update
    pub on_update: Option<UpdateCallback<O>>,
    /// Collision notification
    pub on_collision: Option<CollisionCallback<O>>,
    /// Draw request
    pub on_draw: Option<DrawCallback<O>>,
}

impl<O> Default for ObjectCallbacks<O> {
    fn default() -> Self {
        Self {
            on_update: None,
            on_collision: None,
            on_draw: None,
        }
    }
}

impl<O> Clone for ObjectCallbacks<O> {
    fn clone(&self) -> Self {
        Self {
            on_update: self.on_update.clone(),
            on_collision: self.on_collision.clone(),
            on_draw: self.on_draw.clone(),
        }
    }
}

impl<O> std::fmt::Debug for ObjectCallbacks<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectCallbacks")
            .field("on_update", &self.on_update.is_some())
            .field("on_collision", &self.on_collision.is_some())
            .field("on_draw", &self.on_draw.is_some())
            .finish()
    }
}

/// A transient object owned by a [`MovingObjectFactory`]
///
/// The collision boundary is a circle of `radius` around `position`.
#[derive(Debug)]
pub struct MovingObject<O> {
    owner: O,
    radius: f32,
    position: Vec2,
    velocity: Vec2,
    layer: CollisionLayers,
    mask: CollisionLayers,
    pub(crate) membership: Membership,
    pub(crate) callbacks: ObjectCallbacks<O>,
}

impl<O: Copy> MovingObject<O> {
    pub(crate) fn from_spawn(spawn: ObjectSpawn<O>) -> Self {
        let mut membership = Membership::empty();
        membership.set(Membership::MOVING, spawn.moving);
        membership.set(Membership::VISIBLE, spawn.visible);
        Self {
            owner: spawn.owner,
            radius: spawn.radius.abs(),
            position: spawn.position,
            velocity: spawn.velocity,
            layer: spawn.layer,
            mask: spawn.mask,
            membership,
            callbacks: spawn.callbacks,
        }
    }

    /// Game entity using this slot
    pub fn owner(&self) -> O {
        self.owner
    }
}

impl<O> MovingObject<O> {
    /// Collision radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Set the collision radius (stored as its absolute value)
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.abs();
    }

    /// World-space position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport the object
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Velocity in units per second
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Heading of the velocity in radians, 0 along +X
    pub fn rotation(&self) -> f32 {
        utils::heading(self.velocity)
    }

    /// Unit direction of travel, `None` when at rest
    pub fn direction(&self) -> Option<Vec2> {
        utils::direction(self.velocity)
    }

    /// Layer this object sits on
    pub fn layer(&self) -> CollisionLayers {
        self.layer
    }

    /// Layers this object collides with
    pub fn mask(&self) -> CollisionLayers {
        self.mask
    }

    /// Circular collision boundary at the current position
    pub fn boundary(&self) -> CircleBoundary {
        CircleBoundary::new(self.position, self.radius)
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.membership.contains(Membership::MOVING)
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.membership.contains(Membership::VISIBLE)
    }

    pub(crate) fn should_collide_with(&self, other: &Self) -> bool {
        CollisionLayers::should_collide(self.layer, self.mask, other.layer, other.mask)
            && self.boundary().intersects(&other.boundary())
    }
}

/// Parameters for acquiring an object from a factory
///
/// Objects are moving and visible by default, on every collision layer.
pub struct ObjectSpawn<O> {
    /// Game entity using the slot
    pub owner: O,
    /// Collision radius
    pub radius: f32,
    /// Initial position
    pub position: Vec2,
    /// Initial velocity
    pub velocity: Vec2,
    /// Join the moving set
    pub moving: bool,
    /// Join the visible set
    pub visible: bool,
    /// Collision layer
    pub layer: CollisionLayers,
    /// Collision mask
    pub mask: CollisionLayers,
    /// Callback slots
    pub callbacks: ObjectCallbacks<O>,
}

impl<O> ObjectSpawn<O> {
    /// Create spawn parameters for a moving, visible object without callbacks
    pub fn new(owner: O, radius: f32, position: Vec2, velocity: Vec2) -> Self {
        Self {
            owner,
            radius,
            position,
            velocity,
            moving: true,
            visible: true,
            layer: CollisionLayers::all(),
            mask: CollisionLayers::all(),
            callbacks: ObjectCallbacks::default(),
        }
    }

    /// Keep the object out of the moving set
    pub fn stationary(mut self) -> Self {
        self.moving = false;
        self
    }

    /// Keep the object out of the visible set
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Set the collision layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Use a shared callback set
    pub fn with_callbacks(mut self, callbacks: ObjectCallbacks<O>) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Bind the update callback
    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut MovingObjectFactory<O>, ObjectHandle, &GameTime) + 'static,
    {
        self.callbacks.on_update = Some(Rc::new(callback));
        self
    }

    /// Bind the collision callback
    pub fn on_collision<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut MovingObjectFactory<O>, ObjectHandle, ObjectHandle, &GameTime) + 'static,
    {
        self.callbacks.on_collision = Some(Rc::new(callback));
        self
    }

    /// Bind the draw callback
    pub fn on_draw<F>(mut self, callback: F) -> Self
    where
        F: Fn(&MovingObject<O>, &mut dyn DrawSink, &GameTime) + 'static,
    {
        self.callbacks.on_draw = Some(Rc::new(callback));
        self
    }
}
