//! Collision and screen geometry
//!
//! Everything on screen is an axis-aligned rectangle in pixel space with the
//! origin at the top-left corner and y growing downward.

use glam::Vec2;

use crate::design_scale;

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of the given size centered on a point
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Overlap test; rectangles that only share an edge do not collide
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Point containment, inclusive of every edge
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// True if this rectangle lies fully inside `outer`
    pub fn within(&self, outer: &Rect) -> bool {
        let eps = 1e-3;
        self.min().x >= outer.min().x - eps
            && self.min().y >= outer.min().y - eps
            && self.max().x <= outer.max().x + eps
            && self.max().y <= outer.max().y + eps
    }
}

/// Current screen dimensions and the derived scale factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::consts::BASE_WIDTH, crate::consts::BASE_HEIGHT)
    }
}

impl Viewport {
    /// Degenerate sizes are clamped to 1x1
    pub fn new(width: f32, height: f32) -> Self {
        let width = if width.is_finite() { width.max(1.0) } else { 1.0 };
        let height = if height.is_finite() { height.max(1.0) } else { 1.0 };
        Self {
            width,
            height,
            scale: design_scale(width, height),
        }
    }

    /// Scale a base-resolution length
    #[inline]
    pub fn px(&self, base: f32) -> f32 {
        base * self.scale
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Clamp one axis so `[v - half, v + half]` stays inside `[0, extent]`.
///
/// When the extent is too small to hold the span, the span is centered.
#[inline]
pub fn clamp_axis(v: f32, half: f32, extent: f32) -> f32 {
    if extent <= 2.0 * half {
        extent / 2.0
    } else {
        v.clamp(half, extent - half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Rect::new(2.0, 2.0, 2.0, 2.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 5.0, 5.0)));
        // Shared edge only
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 30.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 40.0)));
        assert!(!r.contains(Vec2::new(30.1, 20.0)));
    }

    #[test]
    fn test_rect_centered() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.pos, Vec2::new(40.0, 45.0));
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_viewport_clamps_degenerate() {
        let v = Viewport::new(0.0, -5.0);
        assert_eq!(v.width, 1.0);
        assert_eq!(v.height, 1.0);
        assert!(v.scale > 0.0);
    }

    #[test]
    fn test_clamp_axis_degenerate_extent() {
        assert_eq!(clamp_axis(3.0, 10.0, 15.0), 7.5);
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            aw in 0.0f32..50.0, ah in 0.0f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            bw in 0.0f32..50.0, bh in 0.0f32..50.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_clamp_axis_in_range(v in -1000.0f32..1000.0, half in 0.0f32..50.0, extent in 1.0f32..2000.0) {
            let c = clamp_axis(v, half, extent);
            if extent > 2.0 * half {
                prop_assert!(c >= half && c <= extent - half);
            } else {
                prop_assert_eq!(c, extent / 2.0);
            }
        }
    }
}
