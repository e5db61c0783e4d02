//! Object pooling for transient moving entities
//!
//! Bullets, enemies and debris come and go every few frames. A
//! [`MovingObjectFactory`] keeps their storage alive across lifetimes and
//! drives the per-frame update, integration and collision sweep.

mod factory;
mod moving_object;

pub use factory::{MovingObjectFactory, ObjectHandle, PoolId};
pub use moving_object::{
    CollisionCallback, DrawCallback, MovingObject, ObjectCallbacks, ObjectSpawn, UpdateCallback,
};
