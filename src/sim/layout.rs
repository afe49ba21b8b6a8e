//! Grid layout for the card collection screen
//!
//! Cards keep a 2:3 aspect ratio. The column count that yields the tallest
//! cards is found by trying every count; the width bound shrinks and the
//! height bound grows with more columns, and the row count steps with
//! `ceil(n / columns)`, so there is no closed form.

use glam::Vec2;

use super::collision::Rect;
use crate::consts::CARD_ASPECT;

/// Result of [`layout_collection`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    pub card_width: f32,
    pub card_height: f32,
    pub spacing: f32,
    /// Top-left of the first card
    pub origin: Vec2,
}

impl GridLayout {
    /// Total grid size
    pub fn footprint(&self) -> Vec2 {
        let cols = self.columns as f32;
        let rows = self.rows as f32;
        Vec2::new(
            cols * self.card_width + (cols - 1.0) * self.spacing,
            rows * self.card_height + (rows - 1.0) * self.spacing,
        )
    }

    /// Screen rectangle of the `index`-th card, row-major
    pub fn slot(&self, index: usize) -> Rect {
        let row = (index / self.columns) as f32;
        let col = (index % self.columns) as f32;
        Rect {
            pos: self.origin
                + Vec2::new(
                    col * (self.card_width + self.spacing),
                    row * (self.card_height + self.spacing),
                ),
            size: Vec2::new(self.card_width, self.card_height),
        }
    }
}

/// Lay out `card_count` cards inside `area`, centered.
///
/// Card height never drops below `min_height`; when the best fit is smaller
/// than that, the floor wins and the grid may overflow `area`.
/// Returns `None` when there is nothing to lay out.
pub fn layout_collection(
    card_count: usize,
    area: Rect,
    spacing: f32,
    min_height: f32,
) -> Option<GridLayout> {
    if card_count == 0 {
        return None;
    }
    let available = area.size.max(Vec2::ONE);

    let mut best_height = 0.0f32;
    let mut best_columns = 1;
    for columns in 1..=card_count {
        let rows = card_count.div_ceil(columns);
        let width_per_card = (available.x - spacing * (columns - 1) as f32) / columns as f32;
        let height_from_width = width_per_card / CARD_ASPECT;
        let height_per_card = (available.y - spacing * (rows - 1) as f32) / rows as f32;
        let card_height = height_from_width.min(height_per_card);

        if card_height > best_height {
            best_height = card_height;
            best_columns = columns;
        }
    }

    let mut card_height = best_height.floor();
    if card_height < min_height {
        card_height = min_height;
    }
    let card_width = (card_height * CARD_ASPECT).floor();

    let columns = best_columns;
    let rows = card_count.div_ceil(columns);
    let mut layout = GridLayout {
        columns,
        rows,
        card_width,
        card_height,
        spacing,
        origin: Vec2::ZERO,
    };
    layout.origin = area.pos + (available - layout.footprint()) / 2.0;
    Some(layout)
}
