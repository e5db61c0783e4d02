//! Short-lived visual and combat effects
//!
//! Particles live in their own [`ParticleEmitter`]. Bullets live in a shared
//! [`MovingObjectFactory`](crate::pool::MovingObjectFactory) so they take part
//! in the collision sweep; a [`BulletManager`] only tracks which of them it
//! fired.
//!
//! Both apply the same recycle policy: an instance marked as requiring
//! explicit recycling is never recycled automatically. Any other instance is
//! recycled once it is invisible or leaves the viewport.

mod animation;
mod bullets;
mod particles;

pub use animation::{FrameLayout, SpriteAnimation};
pub use bullets::{BulletManager, BulletSpawn};
pub use particles::{EmitterId, Particle, ParticleEmitter, ParticleHandle, ParticleSpawn};

pub(crate) fn should_auto_recycle(explicit: bool, visible: bool, on_screen: bool) -> bool {
    !explicit && (!visible || !on_screen)
}

#[cfg(test)]
mod tests {
    use super::should_auto_recycle;

    #[test]
    fn test_auto_recycle_policy() {
        assert!(!should_auto_recycle(false, true, true));
        assert!(should_auto_recycle(false, false, true));
        assert!(should_auto_recycle(false, true, false));
        assert!(!should_auto_recycle(true, false, false));
    }
}
