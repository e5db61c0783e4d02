//! Bullet bookkeeping on top of a shared moving-object factory

use super::should_auto_recycle;
use crate::foundation::math::Bounds;
use crate::pool::{MovingObject, MovingObjectFactory, ObjectHandle, ObjectSpawn};

/// Parameters for firing one bullet
pub struct BulletSpawn<O> {
    /// The pooled object backing the bullet
    pub object: ObjectSpawn<O>,
    /// Suppress automatic recycling
    pub explicit_recycle: bool,
}

impl<O> BulletSpawn<O> {
    /// Fire `object` under the automatic recycle policy
    pub fn new(object: ObjectSpawn<O>) -> Self {
        Self {
            object,
            explicit_recycle: false,
        }
    }

    /// Keep the bullet until it is recycled by hand
    pub fn requiring_explicit_recycle(mut self) -> Self {
        self.explicit_recycle = true;
        self
    }
}

impl<O> From<ObjectSpawn<O>> for BulletSpawn<O> {
    fn from(object: ObjectSpawn<O>) -> Self {
        Self::new(object)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrackedBullet {
    handle: ObjectHandle,
    explicit_recycle: bool,
}

/// Tracks the bullets one shooter has fired
///
/// The bullets themselves live in the factory handed to [`fire`](Self::fire),
/// so they move and collide with everything else. Bullets recycled elsewhere
/// (by a collision callback, say) are dropped from tracking on the next
/// [`update`](Self::update).
#[derive(Debug, Default)]
pub struct BulletManager {
    active: Vec<TrackedBullet>,
}

impl BulletManager {
    /// Create a manager tracking nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bullet in `factory` and start tracking it
    pub fn fire<O: Copy>(
        &mut self,
        factory: &mut MovingObjectFactory<O>,
        spawn: impl Into<BulletSpawn<O>>,
    ) -> ObjectHandle {
        let spawn = spawn.into();
        let handle = factory.create(spawn.object);
        self.active.push(TrackedBullet {
            handle,
            explicit_recycle: spawn.explicit_recycle,
        });
        handle
    }

    /// Forget bullets recycled elsewhere, then recycle the ones the policy lets go
    ///
    /// A bullet that does not require explicit recycling is recycled when it
    /// is invisible or its position is outside `viewport`. Returns how many
    /// bullets this call recycled.
    pub fn update<O: Copy>(
        &mut self,
        factory: &mut MovingObjectFactory<O>,
        viewport: &Bounds,
    ) -> usize {
        let mut recycled = 0;
        self.active.retain(|bullet| {
            let Some(object) = factory.get(bullet.handle) else {
                return false;
            };
            let expired = should_auto_recycle(
                bullet.explicit_recycle,
                factory.is_visible(bullet.handle),
                viewport.contains(object.position()),
            );
            if expired {
                factory.recycle(bullet.handle);
                recycled += 1;
            }
            !expired
        });
        recycled
    }

    /// Set whether a tracked bullet must be recycled by hand
    ///
    /// Returns `false` when the bullet is not tracked.
    pub fn set_explicit_recycling_required(
        &mut self,
        handle: ObjectHandle,
        required: bool,
    ) -> bool {
        match self.active.iter_mut().find(|bullet| bullet.handle == handle) {
            Some(bullet) => {
                bullet.explicit_recycle = required;
                true
            }
            None => false,
        }
    }

    /// Recycle one tracked bullet; untracked handles are ignored
    pub fn recycle<O: Copy>(
        &mut self,
        factory: &mut MovingObjectFactory<O>,
        handle: ObjectHandle,
    ) -> bool {
        let Some(position) = self.active.iter().position(|bullet| bullet.handle == handle) else {
            return false;
        };
        self.active.swap_remove(position);
        factory.recycle(handle)
    }

    /// Recycle every tracked bullet, returning how many were still in use
    pub fn recall_all<O: Copy>(&mut self, factory: &mut MovingObjectFactory<O>) -> usize {
        self.active
            .drain(..)
            .filter(|bullet| factory.recycle(bullet.handle))
            .count()
    }

    /// Whether a handle is tracked by this manager
    pub fn is_tracked(&self, handle: ObjectHandle) -> bool {
        self.active.iter().any(|bullet| bullet.handle == handle)
    }

    /// Handles of tracked bullets, oldest first
    pub fn handles(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.active.iter().map(|bullet| bullet.handle)
    }

    /// Tracked bullets that are still in use in `factory`
    pub fn live<'a, O: Copy>(
        &'a self,
        factory: &'a MovingObjectFactory<O>,
    ) -> impl Iterator<Item = &'a MovingObject<O>> + 'a {
        self.active.iter().filter_map(move |bullet| factory.get(bullet.handle))
    }

    /// Number of tracked bullets
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
