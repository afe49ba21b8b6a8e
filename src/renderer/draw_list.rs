//! Recording surface for headless runs and tests

use std::io;

use glam::Vec2;

use super::{Align, Color, Surface};
use crate::assets::{AssetHandle, Image};
use crate::sim::Rect;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, width: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    Circle { center: Vec2, radius: f32, width: f32, color: Color },
    Blit { image: AssetHandle, dest: Rect },
    Text { text: String, pos: Vec2, size: f32, align: Align, color: Color },
}

/// Records every call since the last `clear`
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: Vec2,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Default::default()
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames presented
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Any text command containing `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn blits(&self) -> impl Iterator<Item = (&AssetHandle, &Rect)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Blit { image, dest } => Some((image, dest)),
            _ => None,
        })
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        self.push(DrawCommand::StrokeRect { rect, width, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(DrawCommand::Line { from, to, width, color });
    }

    fn circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            width,
            color,
        });
    }

    fn blit(&mut self, image: &Image, dest: Rect) {
        self.push(DrawCommand::Blit {
            image: image.handle.clone(),
            dest,
        });
    }

    fn text(&mut self, text: &str, pos: Vec2, size: f32, align: Align, color: Color) {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            align,
            color,
        });
    }

    fn present(&mut self) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }
}
