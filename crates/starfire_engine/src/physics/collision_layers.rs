//! Collision layer system for filtering collision detection
//!
//! Every pooled object sits on one or more layers and carries a mask of the
//! layers it wants to hear about. A pair is only tested when each side's layer
//! is in the other side's mask.

use bitflags::bitflags;

bitflags! {
    /// Collision layer definitions using bitflags for efficient filtering
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;

        /// Enemy character layer
        const ENEMY = 1 << 1;

        /// Projectiles fired by the player
        const PLAYER_PROJECTILE = 1 << 2;

        /// Projectiles fired by enemies
        const ENEMY_PROJECTILE = 1 << 3;
    }
}

impl CollisionLayers {
    /// Check if two objects should collide based on their layers and masks
    ///
    /// # Arguments
    /// * `layer_a` - Object A's collision layer
    /// * `mask_a` - Object A's collision mask (what it collides with)
    /// * `layer_b` - Object B's collision layer
    /// * `mask_b` - Object B's collision mask (what it collides with)
    ///
    /// # Example
    /// ```
    /// use starfire_engine::physics::CollisionLayers;
    ///
    /// let player_layer = CollisionLayers::PLAYER;
    /// let player_mask = CollisionLayers::ENEMY | CollisionLayers::ENEMY_PROJECTILE;
    ///
    /// let enemy_layer = CollisionLayers::ENEMY;
    /// let enemy_mask = CollisionLayers::PLAYER | CollisionLayers::PLAYER_PROJECTILE;
    ///
    /// assert!(CollisionLayers::should_collide(
    ///     player_layer, player_mask,
    ///     enemy_layer, enemy_mask,
    /// ));
    /// ```
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        // A's layer must be in B's mask AND B's layer must be in A's mask
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_collide_mutual() {
        assert!(CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PLAYER,
        ));
    }

    #[test]
    fn test_should_not_collide_one_way() {
        // Player wants to hit the enemy, but the enemy only listens for projectiles
        assert!(!CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PLAYER_PROJECTILE,
        ));
    }

    #[test]
    fn test_default_collides_with_everything() {
        let everything = CollisionLayers::default();
        assert!(CollisionLayers::should_collide(
            everything,
            everything,
            CollisionLayers::ENEMY_PROJECTILE,
            CollisionLayers::ENEMY_PROJECTILE,
        ));
    }
}
