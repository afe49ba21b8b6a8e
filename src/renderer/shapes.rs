//! Composite shapes shared by the screens

use glam::Vec2;

use super::colors::{self, BLUE, RED, WHITE, YELLOW};
use super::{Align, Color, Surface};
use crate::assets::Image;
use crate::sim::{Card, CardFace, Crosshair, Rect};

/// Red cross with a ring around it
pub fn crosshair(surface: &mut impl Surface, crosshair: &Crosshair) {
    let p = crosshair.pos;
    let s = crosshair.size;
    surface.line(p - Vec2::new(s, 0.0), p + Vec2::new(s, 0.0), 3.0, RED);
    surface.line(p - Vec2::new(0.0, s), p + Vec2::new(0.0, s), 3.0, RED);
    surface.circle(p, s, 2.0, RED);
}

/// Pack art, or a blue framed box with a star when there is none
pub fn pack(surface: &mut impl Surface, image: Option<&Image>, rect: Rect, scale: f32) {
    match image {
        Some(image) => surface.blit(image, rect),
        None => {
            surface.fill_rect(rect, BLUE);
            surface.stroke_rect(rect, (3.0 * scale).max(1.0), WHITE);
            let star_size = rect.height() * 0.5;
            surface.text("★", rect.center(), star_size, Align::Center, YELLOW);
        }
    }
}

/// Shared card back
pub fn card_back(surface: &mut impl Surface, back: Option<&Image>, rect: Rect) {
    match back {
        Some(image) => surface.blit(image, rect),
        None => {
            surface.fill_rect(rect, BLUE);
            surface.stroke_rect(rect, 3.0, WHITE);
        }
    }
}

/// Card face art: the image, or a colored card with its name and rarity
pub fn card_face(surface: &mut impl Surface, card: &Card, rect: Rect) {
    match &card.face {
        CardFace::Image(image) => surface.blit(image, rect),
        CardFace::Placeholder { color, rarity } => {
            surface.fill_rect(rect, colors::from_rgb(*color));
            surface.stroke_rect(rect, 3.0, WHITE);

            let size = (rect.width() / 8.0).max(6.0);
            let text_color = contrast(*color);
            surface.text(card.label(), rect.center(), size, Align::Center, text_color);
            if let Some(rarity) = rarity {
                let below = rect.center() + Vec2::new(0.0, size * 1.5);
                surface.text(rarity.as_str(), below, size * 0.8, Align::Center, text_color);
            }
        }
    }
}

/// Outlined bar filled left to right by `fraction`
pub fn progress_bar(surface: &mut impl Surface, rect: Rect, fraction: f32, scale: f32) {
    surface.stroke_rect(rect, (2.0 * scale).max(1.0), WHITE);
    let filled = Rect {
        pos: rect.pos,
        size: Vec2::new(rect.width() * fraction.clamp(0.0, 1.0), rect.height()),
    };
    if filled.width() > 0.0 {
        surface.fill_rect(filled, colors::GREEN);
    }
}

/// Black text on light cards, white on dark ones
fn contrast(rgb: [u8; 3]) -> Color {
    let luma = 0.299 * rgb[0] as f32 + 0.587 * rgb[1] as f32 + 0.114 * rgb[2] as f32;
    if luma > 150.0 { colors::BLACK } else { WHITE }
}
