//! Primitive collision shapes and intersection algorithms
//!
//! Provides the 2D boundaries used by the collision registry: circles,
//! axis-aligned boxes, and boxes rotated about a pivot. Sizes are always
//! stored as absolute values.

use crate::foundation::math::{utils, Bounds, Vec2};

/// Precision used when projecting corners onto a separating axis
///
/// `Exact` compares the float projections with strict inequalities, which
/// agrees with [`RectangleBoundary::intersects`] when both rotations are zero.
/// `Truncated` truncates every projection to an integer and accepts touching
/// intervals, reproducing the legacy behaviour bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Float projections, strict overlap
    #[default]
    Exact,
    /// Integer-truncated projections, inclusive overlap
    Truncated,
}

/// A circular collision boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleBoundary {
    /// The center position of the circle in world space
    pub center: Vec2,
    radius: f32,
}

impl CircleBoundary {
    /// Creates a new circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// The radius of the circle
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Set the radius (stored as its absolute value)
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.abs();
    }

    /// Check if this circle intersects with another
    ///
    /// Touching circles do not collide.
    pub fn intersects(&self, other: &Self) -> bool {
        let distance_squared = (self.center - other.center).norm_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared < radius_sum * radius_sum
    }

    /// Check if this circle overlaps a box, rotated or not
    pub fn intersects_box(&self, rect: &RotatedRectangle) -> bool {
        // Move the circle into the box's unrotated frame, then clamp.
        let local = utils::rotate_about(self.center, rect.pivot(), -rect.rotation);
        let bounds = rect.unrotated_bounds();
        let closest = Vec2::new(
            local.x.clamp(bounds.left(), bounds.right()),
            local.y.clamp(bounds.top(), bounds.bottom()),
        );
        (local - closest).norm_squared() < self.radius * self.radius
    }

    /// Axis-aligned bounding rectangle
    pub fn bounding_rect(&self) -> Bounds {
        Bounds::from_center(self.center, self.radius * 2.0, self.radius * 2.0)
    }
}

/// An axis-aligned box boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleBoundary {
    /// The center position of the box in world space
    pub center: Vec2,
    width: f32,
    height: f32,
}

impl RectangleBoundary {
    /// Creates a new box with the given center and size
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width: width.abs(),
            height: height.abs(),
        }
    }

    /// Box width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Box height
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Set the size (stored as absolute values)
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.abs();
        self.height = height.abs();
    }

    /// World-space rectangle covered by the box
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center, self.width, self.height)
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let bounds = self.bounds();
        [
            Vec2::new(bounds.left(), bounds.top()),
            Vec2::new(bounds.right(), bounds.top()),
            Vec2::new(bounds.right(), bounds.bottom()),
            Vec2::new(bounds.left(), bounds.bottom()),
        ]
    }

    /// Half-open overlap on both axes; shared edges do not collide
    pub fn intersects(&self, other: &Self) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

/// A box rotated about a pivot point
///
/// The pivot is `center + origin`; with the default zero origin the box turns
/// about its own center.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedRectangle {
    /// The center of the unrotated box in world space
    pub center: Vec2,
    /// Rotation in radians, counter-clockwise
    pub rotation: f32,
    /// Pivot offset from the center
    pub origin: Vec2,
    width: f32,
    height: f32,
}

impl RotatedRectangle {
    /// Creates a box rotated about its own center
    pub fn new(center: Vec2, width: f32, height: f32, rotation: f32) -> Self {
        Self {
            center,
            rotation,
            origin: Vec2::zeros(),
            width: width.abs(),
            height: height.abs(),
        }
    }

    /// Rotate about `center + origin` instead of the center
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Box width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Box height
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Set the size (stored as absolute values)
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.abs();
        self.height = height.abs();
    }

    /// World-space pivot of the rotation
    pub fn pivot(&self) -> Vec2 {
        self.center + self.origin
    }

    /// Rectangle covered before rotation
    pub fn unrotated_bounds(&self) -> Bounds {
        Bounds::from_center(self.center, self.width, self.height)
    }

    /// Rotated corners in order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let bounds = self.unrotated_bounds();
        let pivot = self.pivot();
        [
            Vec2::new(bounds.left(), bounds.top()),
            Vec2::new(bounds.right(), bounds.top()),
            Vec2::new(bounds.right(), bounds.bottom()),
            Vec2::new(bounds.left(), bounds.bottom()),
        ]
        .map(|corner| utils::rotate_about(corner, pivot, self.rotation))
    }

    /// Axis-aligned rectangle containing all rotated corners
    pub fn bounding_rect(&self) -> Bounds {
        let corners = self.corners();
        let (mut min, mut max) = (corners[0], corners[0]);
        for corner in &corners[1..] {
            min = min.inf(corner);
            max = max.sup(corner);
        }
        Bounds::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Separating Axis Theorem test with exact projections
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersects_with(other, Projection::Exact)
    }

    /// Separating Axis Theorem test
    ///
    /// Rectangles have parallel edge pairs, so two axes per box are enough:
    /// the top edge and the left edge of each. The boxes are disjoint as soon
    /// as one axis separates their projected intervals.
    pub fn intersects_with(&self, other: &Self, projection: Projection) -> bool {
        let ours = self.corners();
        let theirs = other.corners();

        let axes = [
            ours[1] - ours[0],
            ours[0] - ours[3],
            theirs[1] - theirs[0],
            theirs[0] - theirs[3],
        ];

        axes.iter().all(|axis| {
            let (a_min, a_max) = project(&ours, axis, projection);
            let (b_min, b_max) = project(&theirs, axis, projection);
            match projection {
                Projection::Exact => b_min < a_max && a_min < b_max,
                Projection::Truncated => b_min <= a_max && a_min <= b_max,
            }
        })
    }
}

impl From<&RectangleBoundary> for RotatedRectangle {
    fn from(rect: &RectangleBoundary) -> Self {
        Self::new(rect.center, rect.width, rect.height, 0.0)
    }
}

/// Project corners onto an (unnormalized) axis and return the interval
fn project(corners: &[Vec2; 4], axis: &Vec2, projection: Projection) -> (f32, f32) {
    corners
        .iter()
        .map(|corner| {
            let scalar = corner.dot(axis);
            match projection {
                Projection::Exact => scalar,
                Projection::Truncated => scalar.trunc(),
            }
        })
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        })
}
