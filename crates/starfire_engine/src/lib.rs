//! # Starfire Engine
//!
//! Entity lifecycle and collision core for 2D arcade shooters.
//!
//! ## Features
//!
//! - **Object Pooling**: Generational-handle factory for transient moving objects
//! - **Collision Dispatch**: Registry keyed on shape-kind pairs with specificity resolution
//! - **Shape Colliders**: Circles, axis-aligned boxes and rotated boxes (SAT)
//! - **Effects**: Particle emitter and bullet manager with recycle policies
//! - **Host Interfaces**: Opaque draw/sound sinks and input snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use starfire_engine::prelude::*;
//!
//! let mut factory: MovingObjectFactory<u32> =
//!     MovingObjectFactory::new(Bounds::new(0.0, 0.0, 800.0, 600.0));
//!
//! let ship = factory.create(ObjectSpawn::new(
//!     1,
//!     5.0,
//!     Vec2::new(790.0, 300.0),
//!     Vec2::new(20.0, 0.0),
//! ));
//!
//! factory.update_all(&GameTime::from_delta(1.0));
//! let position = factory.get(ship).map(|object| object.position());
//! assert_eq!(position, Some(Vec2::new(10.0, 300.0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod effects;
pub mod foundation;
pub mod host;
pub mod physics;
pub mod pool;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        effects::{
            BulletManager, BulletSpawn, FrameLayout, ParticleEmitter, ParticleHandle,
            ParticleSpawn, SpriteAnimation,
        },
        foundation::{
            math::{Bounds, Vec2},
            time::{Clock, GameTime},
        },
        host::{DrawSink, InputSnapshot, SoundSink, SpriteDraw, Tint},
        physics::{
            collision::{
                Boundary, CircleBoundary, CollisionRegistry, Projection, RectangleBoundary,
                RotatedRectangle, ShapeKind, TestId,
            },
            CollisionLayers,
        },
        pool::{MovingObject, MovingObjectFactory, ObjectHandle, ObjectSpawn},
    };
}
