//! Physics module for collision detection
//!
//! Provides the shape colliders, the kind-pair collision registry and the
//! layer masks used to filter the pool's pairwise sweep.

pub mod collision;
pub mod collision_layers;

pub use collision::{
    Boundary,
    CircleBoundary,
    CollisionRegistry,
    RectangleBoundary,
    RotatedRectangle,
    ShapeKind,
};
pub use collision_layers::CollisionLayers;
