//! Collision test registry with specificity resolution
//!
//! Tests are registered against an ordered pair of [`ShapeKind`]s and matched
//! against the dynamic kinds of two boundaries. When the exact pair has no
//! registration, the most specific registered pair whose kinds are ancestors
//! of the query kinds wins. A new shape kind therefore only needs to register
//! against the kinds it knows how to test; descendants it has never heard of
//! still find a test through their ancestors.
//!
//! Several tests may accumulate on one pair. They run in registration order
//! and the first `true` wins.

use super::primitives::{CircleBoundary, RotatedRectangle};
use super::shape::{Boundary, ShapeKind};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Signature of a collision test
pub type CollisionTestFn = dyn Fn(&Boundary, &Boundary) -> bool + Send + Sync;

/// Identifies one registered test, for later deregistration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestId(u64);

#[derive(Clone)]
struct RegisteredTest {
    id: TestId,
    test: Arc<CollisionTestFn>,
}

/// Outcome of resolving a kind pair
///
/// Holds the tests of the winning registration, or nothing when no compatible
/// registration exists, in which case [`ResolvedTest::test`] never reports a
/// collision.
#[derive(Clone)]
pub struct ResolvedTest<'a> {
    pair: Option<(ShapeKind, ShapeKind)>,
    tests: &'a [RegisteredTest],
}

impl ResolvedTest<'_> {
    /// The registered pair that matched, `None` for the never-collide fallback
    pub fn pair(&self) -> Option<(ShapeKind, ShapeKind)> {
        self.pair
    }

    /// Number of tests accumulated on the matched pair
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether this is the never-collide fallback
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Run the tests in registration order, stopping at the first hit
    pub fn test(&self, a: &Boundary, b: &Boundary) -> bool {
        self.tests.iter().any(|registered| (registered.test)(a, b))
    }
}

/// Maps ordered kind pairs to collision tests
#[derive(Clone, Default)]
pub struct CollisionRegistry {
    entries: HashMap<(ShapeKind, ShapeKind), Vec<RegisteredTest>>,
    next_id: u64,
}

impl std::fmt::Debug for CollisionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pairs: Vec<_> = self
            .entries
            .iter()
            .map(|(pair, tests)| (*pair, tests.len()))
            .collect();
        pairs.sort();
        f.debug_struct("CollisionRegistry").field("pairs", &pairs).finish()
    }
}

impl CollisionRegistry {
    /// Create an empty registry; every query falls back to never-collide
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the engine's standard tests
    ///
    /// - `(Circle, Circle)`: distance against radius sum
    /// - `(Rectangle, Rectangle)`: AABB overlap, SAT when either box is rotated
    /// - `(RotatedRectangle, RotatedRectangle)`: SAT
    /// - `(Circle, Rectangle)`: closest point, in the box frame when rotated
    pub fn with_builtin_tests() -> Self {
        let mut registry = Self::new();
        registry.register(ShapeKind::Circle, ShapeKind::Circle, circle_circle);
        registry.register(ShapeKind::Rectangle, ShapeKind::Rectangle, box_box);
        registry.register(ShapeKind::RotatedRectangle, ShapeKind::RotatedRectangle, box_box);
        registry.register(ShapeKind::Circle, ShapeKind::Rectangle, circle_box);
        registry
    }

    /// Append `test` to the entry for `(kind_a, kind_b)`
    pub fn register<F>(&mut self, kind_a: ShapeKind, kind_b: ShapeKind, test: F) -> TestId
    where
        F: Fn(&Boundary, &Boundary) -> bool + Send + Sync + 'static,
    {
        let id = TestId(self.next_id);
        self.next_id += 1;
        self.entries.entry((kind_a, kind_b)).or_default().push(RegisteredTest {
            id,
            test: Arc::new(test),
        });
        log::debug!("Registered collision test {:?} for ({kind_a}, {kind_b})", id);
        id
    }

    /// Remove one test from a pair; drops the pair once its list is empty
    ///
    /// Returns `false` when the test was not registered on that pair.
    pub fn deregister(&mut self, kind_a: ShapeKind, kind_b: ShapeKind, id: TestId) -> bool {
        let key = (kind_a, kind_b);
        let Some(tests) = self.entries.get_mut(&key) else {
            return false;
        };
        let Some(position) = tests.iter().position(|registered| registered.id == id) else {
            return false;
        };
        tests.remove(position);
        if tests.is_empty() {
            self.entries.remove(&key);
        }
        log::debug!("Deregistered collision test {:?} from ({kind_a}, {kind_b})", id);
        true
    }

    /// Whether any test is registered on exactly this pair
    pub fn is_registered(&self, kind_a: ShapeKind, kind_b: ShapeKind) -> bool {
        self.entries.contains_key(&(kind_a, kind_b))
    }

    /// Find the tests that apply to a dynamic kind pair
    ///
    /// Exact pair first. Otherwise every registered `(p1, p2)` with
    /// `kind_a.is_a(p1)` and `kind_b.is_a(p2)` is a candidate, and the one
    /// with the deepest `p1` wins, ties going to the deepest `p2`.
    pub fn resolve(&self, kind_a: ShapeKind, kind_b: ShapeKind) -> ResolvedTest<'_> {
        if let Some(tests) = self.entries.get(&(kind_a, kind_b)) {
            return ResolvedTest {
                pair: Some((kind_a, kind_b)),
                tests,
            };
        }

        let best = self
            .entries
            .iter()
            .filter(|((p1, p2), _)| kind_a.is_a(*p1) && kind_b.is_a(*p2))
            .max_by_key(|((p1, p2), _)| (p1.depth(), p2.depth()));

        match best {
            Some((pair, tests)) => ResolvedTest {
                pair: Some(*pair),
                tests,
            },
            None => ResolvedTest { pair: None, tests: &[] },
        }
    }

    /// One-directional check: does `a` detect a collision with `b`
    ///
    /// Absent inputs never collide.
    pub fn collides_with(&self, a: Option<&Boundary>, b: Option<&Boundary>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.resolve(a.kind(), b.kind()).test(a, b),
            _ => false,
        }
    }

    /// Two-directional check: `a` detects `b` or `b` detects `a`
    ///
    /// A registration on one ordering is enough for both.
    pub fn collide(&self, a: Option<&Boundary>, b: Option<&Boundary>) -> bool {
        self.collides_with(a, b) || self.collides_with(b, a)
    }
}

fn circle_circle(a: &Boundary, b: &Boundary) -> bool {
    match (a, b) {
        (Boundary::Circle(a), Boundary::Circle(b)) => a.intersects(b),
        _ => false,
    }
}

fn box_box(a: &Boundary, b: &Boundary) -> bool {
    match (a, b) {
        (Boundary::Rectangle(a), Boundary::Rectangle(b)) => a.intersects(b),
        _ => match (a.as_rotated(), b.as_rotated()) {
            (Some(a), Some(b)) => a.intersects(&b),
            _ => false,
        },
    }
}

fn circle_box(a: &Boundary, b: &Boundary) -> bool {
    let circle: &CircleBoundary = match a {
        Boundary::Circle(circle) => circle,
        _ => return false,
    };
    let rect: Option<RotatedRectangle> = b.as_rotated();
    rect.is_some_and(|rect| circle.intersects_box(&rect))
}

static GLOBAL: OnceLock<RwLock<CollisionRegistry>> = OnceLock::new();

/// The process-wide registry
///
/// Populated with [`CollisionRegistry::with_builtin_tests`] on first use and
/// kept for the lifetime of the process.
pub fn global() -> &'static RwLock<CollisionRegistry> {
    GLOBAL.get_or_init(|| RwLock::new(CollisionRegistry::with_builtin_tests()))
}

/// One-directional check against the process-wide registry
pub fn collides_with(a: Option<&Boundary>, b: Option<&Boundary>) -> bool {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .collides_with(a, b)
}

/// Two-directional check against the process-wide registry
pub fn collide(a: Option<&Boundary>, b: Option<&Boundary>) -> bool {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .collide(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::physics::collision::primitives::RectangleBoundary;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn circle_at(x: f32) -> Boundary {
        CircleBoundary::new(Vec2::new(x, 0.0), 1.0).into()
    }

    fn rect_at(x: f32) -> Boundary {
        RectangleBoundary::new(Vec2::new(x, 0.0), 2.0, 2.0).into()
    }

    #[test]
    fn test_specific_pair_beats_base_pair() {
        let base_calls = Arc::new(AtomicUsize::new(0));
        let circle_calls = Arc::new(AtomicUsize::new(0));

        let mut registry = CollisionRegistry::new();
        let counter = Arc::clone(&base_calls);
        registry.register(ShapeKind::Boundary, ShapeKind::Boundary, move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        });
        let counter = Arc::clone(&circle_calls);
        registry.register(ShapeKind::Circle, ShapeKind::Circle, move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        assert!(registry.collides_with(Some(&circle_at(0.0)), Some(&circle_at(50.0))));
        assert_eq!(circle_calls.load(Ordering::SeqCst), 1);
        assert_eq!(base_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resolution_falls_back_to_ancestor_pair() {
        let mut registry = CollisionRegistry::new();
        registry.register(ShapeKind::Boundary, ShapeKind::Boundary, |_, _| true);
        registry.register(ShapeKind::Rectangle, ShapeKind::Boundary, |_, _| true);

        let resolved = registry.resolve(ShapeKind::RotatedRectangle, ShapeKind::Circle);
        assert_eq!(resolved.pair(), Some((ShapeKind::Rectangle, ShapeKind::Boundary)));

        let resolved = registry.resolve(ShapeKind::Circle, ShapeKind::Circle);
        assert_eq!(resolved.pair(), Some((ShapeKind::Boundary, ShapeKind::Boundary)));
    }

    #[test]
    fn test_tie_break_prefers_specific_first_kind() {
        let mut registry = CollisionRegistry::new();
        registry.register(ShapeKind::Boundary, ShapeKind::RotatedRectangle, |_, _| true);
        registry.register(ShapeKind::Rectangle, ShapeKind::Boundary, |_, _| true);
        registry.register(ShapeKind::Rectangle, ShapeKind::Rectangle, |_, _| true);

        let resolved = registry.resolve(ShapeKind::RotatedRectangle, ShapeKind::RotatedRectangle);
        assert_eq!(resolved.pair(), Some((ShapeKind::Rectangle, ShapeKind::Rectangle)));
    }

    #[test]
    fn test_unregistered_kind_never_collides() {
        let mut registry = CollisionRegistry::new();
        registry.register(ShapeKind::Circle, ShapeKind::Circle, circle_circle);

        let resolved = registry.resolve(ShapeKind::Circle, ShapeKind::Rectangle);
        assert!(resolved.pair().is_none());
        assert!(resolved.is_empty());
        assert!(!registry.collide(Some(&circle_at(0.0)), Some(&rect_at(0.0))));
    }

    #[test]
    fn test_absent_input_never_collides() {
        let registry = CollisionRegistry::with_builtin_tests();
        assert!(!registry.collide(None, Some(&circle_at(0.0))));
        assert!(!registry.collides_with(Some(&circle_at(0.0)), None));
    }

    #[test]
    fn test_accumulated_tests_short_circuit() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let mut registry = CollisionRegistry::new();
        registry.register(ShapeKind::Circle, ShapeKind::Circle, |_, _| true);
        let counter = Arc::clone(&later_calls);
        registry.register(ShapeKind::Circle, ShapeKind::Circle, move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        assert_eq!(registry.resolve(ShapeKind::Circle, ShapeKind::Circle).len(), 2);
        assert!(registry.collides_with(Some(&circle_at(0.0)), Some(&circle_at(99.0))));
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_deregister_removes_empty_pair() {
        let mut registry = CollisionRegistry::new();
        let first = registry.register(ShapeKind::Circle, ShapeKind::Circle, |_, _| false);
        let second = registry.register(ShapeKind::Circle, ShapeKind::Circle, |_, _| true);

        assert!(registry.deregister(ShapeKind::Circle, ShapeKind::Circle, second));
        assert!(registry.is_registered(ShapeKind::Circle, ShapeKind::Circle));
        assert!(!registry.deregister(ShapeKind::Circle, ShapeKind::Circle, second));

        assert!(registry.deregister(ShapeKind::Circle, ShapeKind::Circle, first));
        assert!(!registry.is_registered(ShapeKind::Circle, ShapeKind::Circle));
    }

    #[test]
    fn test_one_directional_registration_collides_both_ways() {
        let registry = CollisionRegistry::with_builtin_tests();
        let circle = circle_at(0.0);
        let rect = rect_at(1.5);

        assert!(registry.collides_with(Some(&circle), Some(&rect)));
        assert!(!registry.collides_with(Some(&rect), Some(&circle)));
        assert!(registry.collide(Some(&rect), Some(&circle)));
    }

    #[test]
    fn test_builtin_box_tests_handle_rotation() {
        let registry = CollisionRegistry::with_builtin_tests();
        let plain = rect_at(0.0);
        let quarter = std::f32::consts::FRAC_PI_4;
        let rotated: Boundary =
            RotatedRectangle::new(Vec2::new(2.2, 0.0), 2.0, 2.0, quarter).into();

        // The diamond's left tip reaches x = 2.2 - sqrt(2) < 1.
        assert!(registry.collide(Some(&plain), Some(&rotated)));
        assert!(registry.collide(Some(&rotated), Some(&plain)));
    }

    #[test]
    fn test_global_registry_has_builtins() {
        assert!(collide(Some(&circle_at(0.0)), Some(&circle_at(1.0))));
        assert!(!collide(Some(&circle_at(0.0)), Some(&circle_at(5.0))));
    }
}
