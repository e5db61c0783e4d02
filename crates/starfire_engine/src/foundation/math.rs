//! Math utilities and types
//!
//! Provides the 2D math types used by the shapes, the pool and the game layer.

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Axis-aligned rectangle in world space
///
/// `x`/`y` name the minimum corner. Width and height are stored as absolute
/// values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum X coordinate
    pub x: f32,
    /// Minimum Y coordinate
    pub y: f32,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl Bounds {
    /// Create a new rectangle from its minimum corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.abs(),
            height: height.abs(),
        }
    }

    /// Create a rectangle anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Create a rectangle from its center point and size
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        let width = width.abs();
        let height = height.abs();
        Self::new(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }

    /// Minimum X
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Maximum X (exclusive)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Minimum Y
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Maximum Y (exclusive)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// Half-open containment test: `[left, right) x [top, bottom)`
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Half-open overlap test between two rectangles
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Wrap a point into the rectangle on both axes (modulo, not clamp)
    ///
    /// An axis with zero extent is left untouched.
    pub fn wrap(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            utils::wrap(point.x, self.left(), self.width),
            utils::wrap(point.y, self.top(), self.height),
        )
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Math utility functions
pub mod utils {
    use super::{Rotation2, Vec2};

    /// Wrap `value` into `[origin, origin + extent)`
    pub fn wrap(value: f32, origin: f32, extent: f32) -> f32 {
        if extent <= 0.0 || !value.is_finite() {
            return value;
        }
        let end = origin + extent;
        let wrapped = origin + (value - origin).rem_euclid(extent);
        // Tiny negative offsets round up to the excluded end.
        if wrapped >= end {
            origin
        } else {
            wrapped
        }
    }

    /// Rotate `point` about `pivot` by `angle` radians (counter-clockwise)
    pub fn rotate_about(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
        if angle == 0.0 {
            return point;
        }
        pivot + Rotation2::new(angle) * (point - pivot)
    }

    /// Heading of a vector in radians, 0 along +X
    pub fn heading(vector: Vec2) -> f32 {
        vector.y.atan2(vector.x)
    }

    /// Normalized copy of `vector`, or `None` for a zero-length vector
    pub fn direction(vector: Vec2) -> Option<Vec2> {
        vector.try_normalize(f32::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_past_right_edge() {
        let bounds = Bounds::from_size(100.0, 100.0);
        let wrapped = bounds.wrap(Vec2::new(105.0, 50.0));
        assert_relative_eq!(wrapped.x, 5.0);
        assert_relative_eq!(wrapped.y, 50.0);
    }

    #[test]
    fn test_wrap_negative_coordinates() {
        let bounds = Bounds::new(-50.0, 0.0, 100.0, 100.0);
        let wrapped = bounds.wrap(Vec2::new(-60.0, -10.0));
        assert_relative_eq!(wrapped.x, 40.0);
        assert_relative_eq!(wrapped.y, 90.0);
    }

    #[test]
    fn test_wrap_degenerate_axis_is_untouched() {
        let bounds = Bounds::new(0.0, 0.0, 0.0, 10.0);
        let wrapped = bounds.wrap(Vec2::new(123.0, 12.0));
        assert_relative_eq!(wrapped.x, 123.0);
        assert_relative_eq!(wrapped.y, 2.0);
    }

    #[test]
    fn test_wrap_tiny_negative_offset_stays_inside() {
        let bounds = Bounds::from_size(100.0, 100.0);
        let wrapped = bounds.wrap(Vec2::new(-1e-8, 50.0));
        assert!(bounds.contains(wrapped));
        assert_eq!(wrapped.x, 0.0);

        let shifted = Bounds::new(-50.0, 0.0, 100.0, 100.0);
        assert_eq!(utils::wrap(-50.0 - 1e-7, -50.0, 100.0), -50.0);
        assert!(shifted.contains(shifted.wrap(Vec2::new(-50.0 - 1e-7, 10.0))));
    }

    #[test]
    fn test_bounds_store_absolute_size() {
        let bounds = Bounds::new(0.0, 0.0, -10.0, -20.0);
        assert_eq!(bounds.width, 10.0);
        assert_eq!(bounds.height, 20.0);
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let touching = Bounds::new(10.0, 0.0, 10.0, 10.0);
        let inside = Bounds::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let rotated = utils::rotate_about(
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            constants::HALF_PI,
        );
        assert_relative_eq!(rotated, Vec2::new(1.0, 2.0), epsilon = 1e-5);
    }
}
