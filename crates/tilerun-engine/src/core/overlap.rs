//! Entity-vs-entity overlap tests.
//!
//! Box overlap finds candidates; circle overlap confirms a gameplay hit.
//! An entity never overlaps itself, and degenerate shapes never overlap.

use crate::components::geometry::Collidable;

/// Axis-aligned rectangle intersection. Symmetric in its arguments.
pub fn box_overlap<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    if a.id() == b.id() {
        return false;
    }
    let (fa, fb) = (a.footprint(), b.footprint());
    if fa.is_degenerate() || fb.is_degenerate() {
        return false;
    }
    fa.pos.x < fb.right() && fb.pos.x < fa.right() && fa.pos.y < fb.bottom() && fb.pos.y < fa.bottom()
}

/// Bounding-circle intersection around each footprint's centre.
pub fn circle_overlap<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    if a.id() == b.id() {
        return false;
    }
    let (fa, fb) = (a.footprint(), b.footprint());
    if !(fa.radius > 0.0 && fb.radius > 0.0) {
        return false;
    }
    let reach = fa.radius + fb.radius;
    fa.center().distance_squared(fb.center()) < reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EntityId, EntityKind};
    use crate::components::body::Body;
    use crate::components::pickup::{Pickup, PickupKind};
    use glam::Vec2;

    fn body(id: u32, x: f32, y: f32) -> Body {
        Body::new(EntityId(id), EntityKind::Enemy, Vec2::new(x, y), Vec2::splat(32.0))
    }

    #[test]
    fn a_body_never_overlaps_itself() {
        let a = body(1, 0.0, 0.0);
        assert!(!box_overlap(&a, &a));
        assert!(!circle_overlap(&a, &a));
    }

    #[test]
    fn box_overlap_is_symmetric() {
        let cases = [
            (body(1, 0.0, 0.0), body(2, 16.0, 16.0)),
            (body(1, 0.0, 0.0), body(2, 32.0, 0.0)),
            (body(1, 10.0, 5.0), body(2, -20.0, 30.0)),
            (body(1, 0.0, 0.0), body(2, 100.0, 100.0)),
        ];
        for (a, b) in &cases {
            assert_eq!(box_overlap(a, b), box_overlap(b, a));
        }
        assert!(box_overlap(&cases[0].0, &cases[0].1));
        assert!(!box_overlap(&cases[1].0, &cases[1].1));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = body(1, 0.0, 0.0);
        let b = body(2, 0.0, 32.0);
        assert!(!box_overlap(&a, &b));
    }

    #[test]
    fn degenerate_bodies_never_overlap() {
        let a = body(1, 0.0, 0.0);
        let flat = Body::new(EntityId(2), EntityKind::Enemy, Vec2::new(4.0, 4.0), Vec2::new(10.0, 0.0));
        assert!(!box_overlap(&a, &flat));
        let pointless = body(3, 4.0, 4.0).with_radius(0.0);
        assert!(!circle_overlap(&a, &pointless));
    }

    #[test]
    fn box_overlap_without_circle_hit_at_corners() {
        // Corners overlap by a sliver; centres are far apart.
        let a = body(1, 0.0, 0.0).with_radius(10.0);
        let b = body(2, 30.0, 30.0).with_radius(10.0);
        assert!(box_overlap(&a, &b));
        assert!(!circle_overlap(&a, &b));
    }

    #[test]
    fn works_across_entity_kinds() {
        let player = body(1, 0.0, 0.0);
        let crystal = Pickup::new(EntityId(9), PickupKind::Crystal, Vec2::new(8.0, 8.0), Vec2::splat(16.0));
        assert!(box_overlap(&player, &crystal));
        assert!(circle_overlap(&crystal, &player));
    }
}
