//! Shape kinds and the boundary enum
//!
//! Collision tests are registered against [`ShapeKind`] pairs. Kinds form a
//! small single-inheritance hierarchy rooted at the abstract
//! [`ShapeKind::Boundary`]:
//!
//! ```text
//! Boundary
//!   ├── Circle
//!   └── Rectangle
//!         └── RotatedRectangle
//! ```
//!
//! The hierarchy lives in a const table, so "is-a" checks and specificity
//! (depth) are lookups rather than runtime type inspection.

use super::primitives::{CircleBoundary, RectangleBoundary, RotatedRectangle};
use crate::foundation::math::{Bounds, Vec2};

/// Kind tag identifying which geometric tests apply to a boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    /// Abstract root kind; matches every boundary
    Boundary,
    /// Circle with a radius
    Circle,
    /// Axis-aligned box
    Rectangle,
    /// Box rotated about a pivot
    RotatedRectangle,
}

#[derive(Clone, Copy)]
struct KindInfo {
    parent: Option<ShapeKind>,
    depth: u8,
    name: &'static str,
}

// Indexed by `ShapeKind as usize`.
const KIND_TABLE: [KindInfo; 4] = [
    KindInfo {
        parent: None,
        depth: 0,
        name: "Boundary",
    },
    KindInfo {
        parent: Some(ShapeKind::Boundary),
        depth: 1,
        name: "Circle",
    },
    KindInfo {
        parent: Some(ShapeKind::Boundary),
        depth: 1,
        name: "Rectangle",
    },
    KindInfo {
        parent: Some(ShapeKind::Rectangle),
        depth: 2,
        name: "RotatedRectangle",
    },
];

impl ShapeKind {
    /// Every kind, root first
    pub const ALL: [Self; 4] = [
        Self::Boundary,
        Self::Circle,
        Self::Rectangle,
        Self::RotatedRectangle,
    ];

    const fn info(self) -> KindInfo {
        KIND_TABLE[self as usize]
    }

    /// Direct parent kind, `None` for the root
    pub const fn parent(self) -> Option<Self> {
        self.info().parent
    }

    /// Distance from the root; larger means more specific
    pub const fn depth(self) -> u8 {
        self.info().depth
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        self.info().name
    }

    /// Whether `self` equals `ancestor` or descends from it
    pub fn is_a(self, ancestor: Self) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete collision boundary in world space
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Circle boundary
    Circle(CircleBoundary),
    /// Axis-aligned box boundary
    Rectangle(RectangleBoundary),
    /// Rotated box boundary
    Rotated(RotatedRectangle),
}

impl Boundary {
    /// Dynamic kind of this boundary
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle(_) => ShapeKind::Circle,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Rotated(_) => ShapeKind::RotatedRectangle,
        }
    }

    /// World-space center
    pub fn center(&self) -> Vec2 {
        match self {
            Self::Circle(circle) => circle.center,
            Self::Rectangle(rect) => rect.center,
            Self::Rotated(rotated) => rotated.center,
        }
    }

    /// Move the boundary so its center sits at `center`
    pub fn set_center(&mut self, center: Vec2) {
        match self {
            Self::Circle(circle) => circle.center = center,
            Self::Rectangle(rect) => rect.center = center,
            Self::Rotated(rotated) => rotated.center = center,
        }
    }

    /// Smallest axis-aligned rectangle containing the boundary
    pub fn bounding_rect(&self) -> Bounds {
        match self {
            Self::Circle(circle) => circle.bounding_rect(),
            Self::Rectangle(rect) => rect.bounds(),
            Self::Rotated(rotated) => rotated.bounding_rect(),
        }
    }

    /// View any box kind as a rotated rectangle (zero rotation for plain boxes)
    pub fn as_rotated(&self) -> Option<RotatedRectangle> {
        match self {
            Self::Circle(_) => None,
            Self::Rectangle(rect) => Some(RotatedRectangle::from(rect)),
            Self::Rotated(rotated) => Some(rotated.clone()),
        }
    }
}

impl From<CircleBoundary> for Boundary {
    fn from(circle: CircleBoundary) -> Self {
        Self::Circle(circle)
    }
}

impl From<RectangleBoundary> for Boundary {
    fn from(rect: RectangleBoundary) -> Self {
        Self::Rectangle(rect)
    }
}

impl From<RotatedRectangle> for Boundary {
    fn from(rotated: RotatedRectangle) -> Self {
        Self::Rotated(rotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_is_a() {
        assert!(ShapeKind::RotatedRectangle.is_a(ShapeKind::Rectangle));
        assert!(ShapeKind::RotatedRectangle.is_a(ShapeKind::Boundary));
        assert!(ShapeKind::Circle.is_a(ShapeKind::Circle));
        assert!(!ShapeKind::Circle.is_a(ShapeKind::Rectangle));
        assert!(!ShapeKind::Rectangle.is_a(ShapeKind::RotatedRectangle));
    }

    #[test]
    fn test_depth_matches_parent_chain() {
        for kind in ShapeKind::ALL {
            let expected = kind.parent().map_or(0, |parent| parent.depth() + 1);
            assert_eq!(kind.depth(), expected, "{kind}");
        }
    }

    #[test]
    fn test_boundary_kind_and_center() {
        let mut boundary = Boundary::from(CircleBoundary::new(Vec2::new(1.0, 2.0), 3.0));
        assert_eq!(boundary.kind(), ShapeKind::Circle);
        boundary.set_center(Vec2::new(4.0, 5.0));
        assert_eq!(boundary.center(), Vec2::new(4.0, 5.0));
        assert!(boundary.as_rotated().is_none());
    }
}
