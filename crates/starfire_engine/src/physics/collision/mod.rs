//! Collision detection for 2D boundaries
//!
//! # Module Organization
//!
//! - [`primitives`] - Circle, axis-aligned box and rotated box geometry
//! - [`shape`] - Kind hierarchy and the [`Boundary`] enum
//! - [`registry`] - Kind-pair dispatch with specificity resolution
//!
//! # Key Types
//!
//! - [`Boundary`] - A concrete world-space boundary of some [`ShapeKind`]
//! - [`CollisionRegistry`] - Maps kind pairs to collision tests
//! - [`Projection`] - Precision mode of the rotated-box SAT test

pub mod primitives;
pub mod registry;
pub mod shape;

// Re-export commonly used types
pub use primitives::{CircleBoundary, Projection, RectangleBoundary, RotatedRectangle};
pub use registry::{CollisionRegistry, CollisionTestFn, ResolvedTest, TestId};
pub use shape::{Boundary, ShapeKind};
