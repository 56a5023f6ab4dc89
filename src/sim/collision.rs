//! Pixel-accurate collision detection
//!
//! Two entities collide when an opaque pixel of one image lands on an opaque
//! pixel of the other, with both images placed at their current rects.
//! Bounding boxes only bound the search.

use glam::IVec2;

use crate::entity::{Drawable, Entity};
use crate::sprite::Mask;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionResult {
    /// Whether any opaque pixels coincide
    pub hit: bool,
    /// First coincident pixel in screen coordinates (if hit)
    pub point: IVec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: IVec2::ZERO,
        }
    }

    pub fn hit(point: IVec2) -> Self {
        Self { hit: true, point }
    }
}

/// Overlap test between two masks placed at screen positions
pub fn mask_overlap(a: &Mask, a_pos: IVec2, b: &Mask, b_pos: IVec2) -> CollisionResult {
    match a.overlap(b, b_pos - a_pos) {
        Some(local) => CollisionResult::hit(a_pos + local),
        None => CollisionResult::miss(),
    }
}

/// Check two entities using their current images
pub fn entities_collide(a: &Entity, b: &Entity) -> CollisionResult {
    // Cheap reject before touching any pixels
    if a.right() <= b.x() || b.right() <= a.x() || a.bottom() <= b.y() || b.bottom() <= a.y() {
        return CollisionResult::miss();
    }
    mask_overlap(a.image().mask(), a.pos(), b.image().mask(), b.pos())
}

/// Index of the first item in `others` that `subject` touches
pub fn first_collision<'a, T, I>(subject: &Entity, others: I) -> Option<usize>
where
    T: Drawable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    others
        .into_iter()
        .position(|other| entities_collide(subject, other.entity()).hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Image;
    use crate::sprite::{Color, Sprite};
    use proptest::prelude::*;
    use std::rc::Rc;

    fn block(w: i32, h: i32) -> Image {
        Rc::new(Sprite::solid("block", w, h, Color::rgb(0, 0, 0)))
    }

    /// Hollow square: only the 1px border is opaque
    fn ring(size: i32) -> Image {
        Rc::new(Sprite::from_fn("ring", size, size, |x, y| {
            if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                Color::rgb(0, 0, 0)
            } else {
                Color::TRANSPARENT
            }
        }))
    }

    #[test]
    fn test_solid_rects_overlapping() {
        let a = Entity::top_left(0, 0, block(10, 10));
        let b = Entity::top_left(9, 9, block(10, 10));
        let result = entities_collide(&a, &b);
        assert!(result.hit);
        assert_eq!(result.point, IVec2::new(9, 9));
    }

    #[test]
    fn test_solid_rects_touching_edges_miss() {
        let a = Entity::top_left(0, 0, block(10, 10));
        let b = Entity::top_left(10, 0, block(10, 10));
        assert!(!entities_collide(&a, &b).hit);
        let c = Entity::top_left(0, 10, block(10, 10));
        assert!(!entities_collide(&a, &c).hit);
    }

    #[test]
    fn test_boxes_overlap_but_pixels_do_not() {
        // A small block sitting in the hole of a ring
        let outer = Entity::top_left(100, 100, ring(20));
        let inner = Entity::top_left(105, 105, block(5, 5));
        assert!(!entities_collide(&outer, &inner).hit);

        let touching = Entity::top_left(118, 105, block(5, 5));
        assert!(entities_collide(&outer, &touching).hit);
    }

    #[test]
    fn test_first_collision_index() {
        let player = Entity::top_left(0, 0, block(10, 10));
        let others = vec![
            Entity::top_left(50, 0, block(5, 5)),
            Entity::top_left(5, 5, block(5, 5)),
            Entity::top_left(6, 6, block(5, 5)),
        ];
        assert_eq!(first_collision(&player, &others), Some(1));
        assert_eq!(first_collision(&player, &others[..1]), None);
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -30i32..30, ay in -30i32..30,
            bx in -30i32..30, by in -30i32..30,
            aw in 1i32..20, ah in 1i32..20,
            bw in 1i32..20, bh in 1i32..20,
        ) {
            let a = Entity::top_left(ax, ay, block(aw, ah));
            let b = Entity::top_left(bx, by, block(bw, bh));
            let ab = entities_collide(&a, &b).hit;
            prop_assert_eq!(ab, entities_collide(&b, &a).hit);

            // Solid rects: pixel overlap equals box overlap
            let boxes = ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah;
            prop_assert_eq!(ab, boxes);
        }
    }
}
