//! Player aim

use glam::Vec2;

use super::collision::{Rect, Viewport, clamp_axis};
use crate::consts::{CROSSHAIR_MIN_SPEED, CROSSHAIR_SIZE, CROSSHAIR_SPEED};

/// Held directional input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Directions {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// The aiming reticle
#[derive(Debug, Clone, PartialEq)]
pub struct Crosshair {
    /// Center position
    pub pos: Vec2,
    /// Half-extent of the drawn reticle
    pub size: f32,
    /// Pixels moved per tick per held direction
    pub speed: f32,
    viewport: Viewport,
}

impl Crosshair {
    /// Centered on screen
    pub fn new(viewport: Viewport) -> Self {
        let mut crosshair = Self {
            pos: viewport.center(),
            size: 0.0,
            speed: 0.0,
            viewport,
        };
        crosshair.resize(viewport);
        crosshair
    }

    /// Move by `speed` for each held direction, staying on screen
    pub fn update(&mut self, held: Directions) {
        let mut delta = Vec2::ZERO;
        if held.left {
            delta.x -= self.speed;
        }
        if held.right {
            delta.x += self.speed;
        }
        if held.up {
            delta.y -= self.speed;
        }
        if held.down {
            delta.y += self.speed;
        }
        self.pos += delta;
        self.clamp();
    }

    /// Rescale size and speed for a new screen and pull back inside it
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.size = viewport.px(CROSSHAIR_SIZE);
        self.speed = viewport.px(CROSSHAIR_SPEED).round().max(CROSSHAIR_MIN_SPEED);
        self.clamp();
    }

    fn clamp(&mut self) {
        self.pos.x = clamp_axis(self.pos.x, self.size, self.viewport.width);
        self.pos.y = clamp_axis(self.pos.y, self.size, self.viewport.height);
    }

    /// Full drawn extent
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(self.size * 2.0))
    }

    /// Area a shot covers: the inner square of side `size`
    pub fn hit_rect(&self) -> Rect {
        Self::hit_rect_at(self.pos, self.size)
    }

    /// Shot area for an arbitrary aim point, e.g. a pointer click
    pub fn hit_rect_at(point: Vec2, size: f32) -> Rect {
        Rect::centered(point, Vec2::splat(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn held(left: bool, right: bool, up: bool, down: bool) -> Directions {
        Directions { left, right, up, down }
    }

    #[test]
    fn test_new_is_centered_and_scaled() {
        let c = Crosshair::new(Viewport::new(800.0, 600.0));
        assert_eq!(c.pos, Vec2::new(400.0, 300.0));
        assert_eq!(c.size, 20.0);
        assert_eq!(c.speed, 5.0);
    }

    #[test]
    fn test_min_speed_on_small_screen() {
        let c = Crosshair::new(Viewport::new(200.0, 150.0));
        assert_eq!(c.speed, 3.0);
        assert_eq!(c.size, 5.0);
    }

    #[test]
    fn test_speed_rounds() {
        // scale 1.5 -> 7.5 rounds to 8
        let c = Crosshair::new(Viewport::new(1200.0, 900.0));
        assert_eq!(c.speed, 8.0);
    }

    #[test]
    fn test_diagonal_move() {
        let mut c = Crosshair::new(Viewport::new(800.0, 600.0));
        c.update(held(false, true, true, false));
        assert_eq!(c.pos, Vec2::new(405.0, 295.0));
    }

    #[test]
    fn test_clamps_at_edges() {
        let mut c = Crosshair::new(Viewport::new(800.0, 600.0));
        c.pos = Vec2::new(22.0, 578.0);
        c.update(held(true, false, false, true));
        assert_eq!(c.pos, Vec2::new(20.0, 580.0));
    }

    #[test]
    fn test_resize_reclamps() {
        let mut c = Crosshair::new(Viewport::new(800.0, 600.0));
        c.pos = Vec2::new(780.0, 580.0);
        c.resize(Viewport::new(400.0, 300.0));
        assert_eq!(c.size, 10.0);
        assert_eq!(c.pos, Vec2::new(390.0, 290.0));
        assert!(c.bounds().within(&Viewport::new(400.0, 300.0).bounds()));
    }

    proptest! {
        #[test]
        fn prop_stays_on_screen(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 0..300),
            w in 100.0f32..2000.0,
            h in 100.0f32..2000.0,
        ) {
            let viewport = Viewport::new(w, h);
            let mut c = Crosshair::new(viewport);
            for (l, r, u, d) in moves {
                c.update(held(l, r, u, d));
                prop_assert!(c.bounds().within(&viewport.bounds()));
            }
        }
    }
}
