//! Card pack targets
//!
//! Packs sit in two "five" die-face groups, one per half of the screen, and
//! sway horizontally around their anchor until shot.

use glam::Vec2;
use rand::Rng;

use super::collision::{Rect, Viewport};
use crate::assets::{AssetLibrary, Image};
use crate::consts::*;

/// A destructible target
#[derive(Debug, Clone, PartialEq)]
pub struct CardPack {
    /// Top-left corner
    pub pos: Vec2,
    /// Anchor x the pack oscillates around
    pub initial_x: f32,
    /// Maximum horizontal distance from the anchor
    pub move_range: f32,
    /// Pixels per tick
    pub speed: f32,
    /// +1 right, -1 left
    pub direction: f32,
    pub size: Vec2,
    pub destroyed: bool,
    /// Pack artwork; `None` draws the placeholder
    pub image: Option<Image>,
    /// Unscaled speed and range, kept so a resize can rescale them
    base_speed: f32,
    base_range: f32,
}

impl CardPack {
    pub fn new(image: Option<Image>, base_speed: f32, base_range: f32, direction: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            initial_x: 0.0,
            move_range: 0.0,
            speed: 0.0,
            direction: direction.signum(),
            size: Vec2::ZERO,
            destroyed: false,
            image,
            base_speed,
            base_range,
        }
    }

    /// Roll a pack's motion parameters
    pub fn random(image: Option<Image>, rng: &mut impl Rng) -> Self {
        let base_speed = rng.random_range(PACK_MIN_SPEED..PACK_MAX_SPEED);
        let base_range = rng.random_range(PACK_MIN_RANGE..=PACK_MAX_RANGE).round();
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self::new(image, base_speed, base_range, direction)
    }

    /// Place the pack's top-left at `anchor` for the given screen.
    ///
    /// The current oscillation phase survives, and the move range shrinks if
    /// the full sway would leave the screen.
    pub fn place(&mut self, anchor: Vec2, viewport: Viewport) {
        let phase = if self.move_range > 0.0 {
            (self.pos.x - self.initial_x) / self.move_range
        } else {
            0.0
        };

        let height = viewport.px(PACK_HEIGHT);
        let width = match &self.image {
            Some(image) => height * image.aspect_ratio(),
            None => viewport.px(PACK_WIDTH),
        };
        self.size = Vec2::new(width, height);

        let max_x = (viewport.width - width).max(0.0);
        let max_y = (viewport.height - height).max(0.0);
        self.initial_x = anchor.x.clamp(0.0, max_x);
        self.pos.y = anchor.y.clamp(0.0, max_y);

        let margin = self.initial_x.min(max_x - self.initial_x).max(0.0);
        self.move_range = viewport.px(self.base_range).min(margin);
        self.speed = viewport.px(self.base_speed);
        self.pos.x = self.initial_x + phase.clamp(-1.0, 1.0) * self.move_range;
    }

    /// Advance one tick of sway
    pub fn update(&mut self) {
        if self.destroyed {
            return;
        }
        self.pos.x += self.speed * self.direction;

        let offset = self.pos.x - self.initial_x;
        if offset.abs() > self.move_range {
            self.pos.x = self.initial_x + self.move_range * offset.signum();
            self.direction = -self.direction;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Destroyed packs never collide
    pub fn collides_with(&self, rect: &Rect) -> bool {
        !self.destroyed && self.rect().intersects(rect)
    }

    /// One-way; returns true only on the call that destroyed the pack
    pub fn destroy(&mut self) -> bool {
        let was_intact = !self.destroyed;
        self.destroyed = true;
        was_intact
    }
}

/// Top-left anchors of the two die-face groups
pub fn layout_anchors(viewport: Viewport) -> [Vec2; TARGET_COUNT] {
    let center_y = viewport.height / 2.0;
    let dx = viewport.px(LAYOUT_OFFSET_X);
    let dy = viewport.px(LAYOUT_OFFSET_Y);
    let centers_x = [viewport.width / 4.0, viewport.width * 3.0 / 4.0];

    let mut anchors = [Vec2::ZERO; TARGET_COUNT];
    for (group, cx) in centers_x.into_iter().enumerate() {
        let face = [
            Vec2::new(cx - dx, center_y - dy),
            Vec2::new(cx + dx, center_y - dy),
            Vec2::new(cx, center_y),
            Vec2::new(cx - dx, center_y + dy),
            Vec2::new(cx + dx, center_y + dy),
        ];
        anchors[group * 5..group * 5 + 5].copy_from_slice(&face);
    }
    anchors
}

/// Build a fresh set of targets with random motion and artwork
pub fn spawn_packs(viewport: Viewport, assets: &AssetLibrary, rng: &mut impl Rng) -> Vec<CardPack> {
    layout_anchors(viewport)
        .into_iter()
        .map(|anchor| {
            let image = assets.random_pack_image(rng);
            let mut pack = CardPack::random(image, rng);
            pack.place(anchor, viewport);
            pack
        })
        .collect()
}

/// Re-anchor existing targets after a resize
pub fn relayout_packs(packs: &mut [CardPack], viewport: Viewport) {
    for (pack, anchor) in packs.iter_mut().zip(layout_anchors(viewport)) {
        pack.place(anchor, viewport);
    }
}
