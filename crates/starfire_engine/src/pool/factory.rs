//! Recycling factory for moving objects
//!
//! The factory owns every [`MovingObject`] it ever handed out. Game code holds
//! [`ObjectHandle`]s; a handle goes stale when its object is recycled, so a
//! lingering handle can never reach the slot's next occupant.

use super::moving_object::{Membership, MovingObject, ObjectSpawn};
use crate::foundation::collections::{RecyclingArena, SlotKey};
use crate::foundation::math::{Bounds, Vec2};
use crate::foundation::time::GameTime;
use crate::host::DrawSink;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one factory instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(u32);

impl PoolId {
    fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an object in a specific factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    pool: PoolId,
    key: SlotKey,
}

impl ObjectHandle {
    /// Factory that issued this handle
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    /// Slot index, stable across reuse of the same slot
    pub fn index(&self) -> u32 {
        self.key.index
    }
}

/// Pool of reusable moving objects with per-frame update and collision sweep
///
/// Objects travel inside a wrap-around world: leaving one edge re-enters at
/// the opposite edge. Recycled objects are kept and handed out again before
/// any new object is allocated.
#[derive(Debug)]
pub struct MovingObjectFactory<O> {
    id: PoolId,
    bounds: Bounds,
    objects: RecyclingArena<MovingObject<O>>,
}

impl<O: Copy> MovingObjectFactory<O> {
    /// Create an empty factory wrapping positions into `bounds`
    pub fn new(bounds: Bounds) -> Self {
        let id = PoolId::next();
        log::info!("Created MovingObjectFactory {:?} with world bounds {:?}", id, bounds);
        Self {
            id,
            bounds,
            objects: RecyclingArena::new(),
        }
    }

    /// Identity of this factory
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// World rectangle positions wrap into
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Acquire an object, reusing a recycled one when available
    ///
    /// The object joins the in-use set, plus the moving and visible sets as
    /// requested by `spawn`.
    pub fn create(&mut self, spawn: ObjectSpawn<O>) -> ObjectHandle {
        let (key, reused) = self.objects.acquire(MovingObject::from_spawn(spawn));
        if !reused {
            log::debug!(
                "MovingObjectFactory {:?} grew to {} objects",
                self.id,
                self.objects.capacity()
            );
        }
        let handle = ObjectHandle { pool: self.id, key };
        log::trace!("Created moving object {:?}", handle);
        handle
    }

    /// Return an object to the recycle buffer
    ///
    /// Removes it from the in-use, moving and visible sets and drops its
    /// callbacks. Recycling a stale or foreign handle is a no-op returning
    /// `false`.
    pub fn recycle(&mut self, handle: ObjectHandle) -> bool {
        if handle.pool != self.id {
            return false;
        }
        let Some(object) = self.objects.get_mut(handle.key) else {
            return false;
        };
        object.membership = Membership::empty();
        object.callbacks = Default::default();
        let released = self.objects.release(handle.key);
        if released {
            log::trace!("Recycled moving object {:?}", handle);
        }
        released
    }

    /// Recycle every in-use object, returning how many were recycled
    pub fn recall_all(&mut self) -> usize {
        let handles = self.in_use_handles();
        let count = handles.iter().filter(|handle| self.recycle(**handle)).count();
        if count > 0 {
            log::debug!("MovingObjectFactory {:?} recalled {} objects", self.id, count);
        }
        count
    }

    /// Run one frame: update callbacks, integration, then the collision sweep
    ///
    /// 1. Every object in use at the start of the frame gets its update
    ///    callback. Callbacks may create or recycle objects.
    /// 2. Every moving object advances by `velocity * delta` and wraps.
    /// 3. Every unordered pair of moving objects whose circles overlap (and
    ///    whose collision layers match) notifies both sides, first then second.
    ///    A side recycled by an earlier notification is skipped.
    pub fn update_all(&mut self, time: &GameTime) {
        for handle in self.in_use_handles() {
            let callback = self
                .get(handle)
                .and_then(|object| object.callbacks.on_update.clone());
            if let Some(callback) = callback {
                callback(self, handle, time);
            }
        }

        let bounds = self.bounds;
        for (_, object) in self.objects.iter_mut() {
            if object.is_moving() {
                let next = object.position() + object.velocity() * time.delta;
                object.set_position(bounds.wrap(next));
            }
        }

        self.sweep_collisions(time);
    }

    fn sweep_collisions(&mut self, time: &GameTime) {
        let moving = self.moving_handles();
        for (i, &first) in moving.iter().enumerate() {
            for &second in &moving[i + 1..] {
                let touching = match (self.get(first), self.get(second)) {
                    (Some(a), Some(b)) if a.is_moving() && b.is_moving() => {
                        a.should_collide_with(b)
                    }
                    _ => false,
                };
                if touching {
                    self.notify_collision(first, second, time);
                    self.notify_collision(second, first, time);
                }
            }
        }
    }

    fn notify_collision(&mut self, me: ObjectHandle, other: ObjectHandle, time: &GameTime) {
        let callback = self
            .get(me)
            .and_then(|object| object.callbacks.on_collision.clone());
        if let Some(callback) = callback {
            callback(self, me, other, time);
        }
    }

    /// Invoke the draw callback of every visible object
    ///
    /// Objects without a draw callback are skipped.
    pub fn draw_visible(&self, sink: &mut dyn DrawSink, time: &GameTime) {
        for (_, object) in self.objects.iter() {
            if !object.is_visible() {
                continue;
            }
            if let Some(draw) = &object.callbacks.on_draw {
                draw(object, &mut *sink, time);
            }
        }
    }

    /// Borrow an in-use object
    pub fn get(&self, handle: ObjectHandle) -> Option<&MovingObject<O>> {
        if handle.pool != self.id {
            return None;
        }
        self.objects.get(handle.key)
    }

    /// Mutably borrow an in-use object
    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut MovingObject<O>> {
        if handle.pool != self.id {
            return None;
        }
        self.objects.get_mut(handle.key)
    }

    /// Owner of an in-use object
    pub fn owner(&self, handle: ObjectHandle) -> Option<O> {
        self.get(handle).map(MovingObject::owner)
    }

    /// Whether the handle refers to an object currently in use here
    pub fn in_use(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Whether the object is in the moving set
    pub fn is_moving(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some_and(MovingObject::is_moving)
    }

    /// Whether the object is in the visible set
    pub fn is_visible(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some_and(MovingObject::is_visible)
    }

    /// Add or remove the object from the moving set
    ///
    /// Returns `false` when the handle is not in use.
    pub fn set_moving(&mut self, handle: ObjectHandle, moving: bool) -> bool {
        self.set_membership(handle, Membership::MOVING, moving)
    }

    /// Add or remove the object from the visible set
    ///
    /// Returns `false` when the handle is not in use.
    pub fn set_visible(&mut self, handle: ObjectHandle, visible: bool) -> bool {
        self.set_membership(handle, Membership::VISIBLE, visible)
    }

    fn set_membership(&mut self, handle: ObjectHandle, flag: Membership, value: bool) -> bool {
        match self.get_mut(handle) {
            Some(object) => {
                object.membership.set(flag, value);
                true
            }
            None => false,
        }
    }

    /// Move an in-use object; returns `false` for stale handles
    pub fn set_position(&mut self, handle: ObjectHandle, position: Vec2) -> bool {
        self.get_mut(handle)
            .map(|object| object.set_position(position))
            .is_some()
    }

    /// Change the velocity of an in-use object; returns `false` for stale handles
    pub fn set_velocity(&mut self, handle: ObjectHandle, velocity: Vec2) -> bool {
        self.get_mut(handle)
            .map(|object| object.set_velocity(velocity))
            .is_some()
    }

    /// Handles of every in-use object, in slot order
    pub fn in_use_handles(&self) -> Vec<ObjectHandle> {
        self.objects
            .live_keys()
            .into_iter()
            .map(|key| ObjectHandle { pool: self.id, key })
            .collect()
    }

    /// Handles of every object in the moving set, in slot order
    pub fn moving_handles(&self) -> Vec<ObjectHandle> {
        self.objects
            .iter()
            .filter(|(_, object)| object.is_moving())
            .map(|(key, _)| ObjectHandle { pool: self.id, key })
            .collect()
    }

    /// Number of objects in use
    pub fn active_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of objects waiting in the recycle buffer
    pub fn recycled_count(&self) -> usize {
        self.objects.recycled_len()
    }

    /// Total objects ever allocated (in use plus recycled)
    pub fn capacity(&self) -> usize {
        self.objects.capacity()
    }
}
