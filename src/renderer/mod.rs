//! Rendering module
//!
//! Screens draw through the [`Surface`] trait; backends decide how
//! rectangles, lines, images and text reach the display.

pub mod draw_list;
pub mod scene;
pub mod shapes;
pub mod terminal;

use std::io;

use glam::Vec2;

use crate::assets::Image;
use crate::sim::Rect;

pub use draw_list::{DrawCommand, DrawList};
pub use scene::render;
pub use terminal::TerminalSurface;

/// Linear RGBA, each channel in 0..=1
pub type Color = [f32; 4];

pub mod colors {
    use super::Color;
    use crate::sim::card::Rgb;

    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
    pub const BLUE: Color = [0.0, 100.0 / 255.0, 1.0, 1.0];
    pub const GREY: Color = [0.5, 0.5, 0.5, 1.0];

    pub fn from_rgb(rgb: Rgb) -> Color {
        [
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
            1.0,
        ]
    }

    pub fn with_alpha(color: Color, alpha: u8) -> Color {
        [color[0], color[1], color[2], alpha as f32 / 255.0]
    }
}

/// Horizontal placement of text relative to its anchor point.
/// The anchor's y is always the text's vertical center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A frame being drawn. Coordinates are screen pixels, origin top-left.
pub trait Surface {
    /// Current drawable size in pixels
    fn size(&self) -> Vec2;

    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    fn circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    /// Draw `image` stretched into `dest`
    fn blit(&mut self, image: &Image, dest: Rect);
    fn text(&mut self, text: &str, pos: Vec2, size: f32, align: Align, color: Color);

    /// Show the finished frame
    fn present(&mut self) -> io::Result<()>;
}
