//! Pack opening mini-game
//!
//! One session per destroyed pack, played in sequence. Each pack is torn
//! open by holding a direction, then its five cards are flipped one by one
//! with the pointer. Confirm moves on once every card is face up.

use glam::Vec2;
use rand::Rng;

use super::card::{Card, generate_cards};
use super::collision::{Rect, Viewport};
use super::crosshair::Directions;
use crate::assets::{AssetLibrary, Image};
use crate::consts::*;

/// Outcome of a request to leave the current pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Pack not fully resolved yet; nothing changed
    Rejected,
    /// Moved on to the next pack
    NextPack,
    /// That was the last pack
    Complete,
}

/// Screen pieces of a partially torn pack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tear {
    /// Remaining body, below the cut
    pub body: Rect,
    /// Offset into the pack art where the body starts
    pub cut: f32,
    /// Lifted top strip, absent once fully open
    pub flap: Option<Rect>,
}

#[derive(Debug, Clone)]
pub struct PackOpeningSession {
    /// 0-based index of the pack being opened
    pub pack_index: usize,
    /// Number of packs destroyed in the run
    pub total_packs: usize,
    /// Tear-open progress in 0..=100
    pub progress: f32,
    pub is_opened: bool,
    pub current_cards: Vec<Card>,
    /// Every card from every opened pack, in order
    pub collected: Vec<Card>,
    pub pack_image: Option<Image>,
    open_step: f32,
    viewport: Viewport,
}

impl PackOpeningSession {
    pub fn new(
        total_packs: usize,
        viewport: Viewport,
        open_step: f32,
        assets: &AssetLibrary,
        rng: &mut impl Rng,
    ) -> Self {
        log::info!("Opening {} packs", total_packs);
        Self {
            pack_index: 0,
            total_packs,
            progress: 0.0,
            is_opened: false,
            current_cards: generate_cards(assets, rng),
            collected: Vec::new(),
            pack_image: assets.random_pack_image(rng),
            open_step,
            viewport,
        }
    }

    /// Tear a little further while any direction is held.
    ///
    /// Returns true on the tick the pack comes fully open.
    pub fn handle_open_input(&mut self, held: Directions) -> bool {
        if self.is_opened || !held.any() {
            return false;
        }
        self.progress = (self.progress + self.open_step).min(OPEN_COMPLETE);
        if self.progress >= OPEN_COMPLETE {
            self.is_opened = true;
            self.collected.extend(self.current_cards.iter().cloned());
            log::debug!("Pack {}/{} opened", self.pack_index + 1, self.total_packs);
            return true;
        }
        false
    }

    /// Flip the face-down card under the pointer, if any
    pub fn handle_reveal(&mut self, point: Vec2) -> Option<usize> {
        if !self.is_opened {
            return None;
        }
        let index = self
            .card_slots()
            .iter()
            .zip(&self.current_cards)
            .position(|(slot, card)| !card.is_flipped() && slot.contains(point))?;

        self.current_cards[index].flip();
        // The collection holds this pack's cards at its tail
        let base = self.collected.len() - self.current_cards.len();
        self.collected[base + index].flip();
        Some(index)
    }

    pub fn all_flipped(&self) -> bool {
        self.current_cards.iter().all(Card::is_flipped)
    }

    /// Current pack is open and every card is face up
    pub fn is_resolved(&self) -> bool {
        self.is_opened && self.all_flipped()
    }

    pub fn is_last(&self) -> bool {
        self.pack_index + 1 >= self.total_packs
    }

    /// Move on once the current pack is resolved
    pub fn advance(&mut self, assets: &AssetLibrary, rng: &mut impl Rng) -> Advance {
        if !self.is_resolved() {
            return Advance::Rejected;
        }
        if self.is_last() {
            return Advance::Complete;
        }
        self.pack_index += 1;
        self.progress = 0.0;
        self.is_opened = false;
        self.current_cards = generate_cards(assets, rng);
        self.pack_image = assets.random_pack_image(rng);
        log::debug!("Next pack {}/{}", self.pack_index + 1, self.total_packs);
        Advance::NextPack
    }

    /// Adopt a new screen size; the pack art is re-rolled like a fresh pack
    pub fn resize(&mut self, viewport: Viewport, assets: &AssetLibrary, rng: &mut impl Rng) {
        self.viewport = viewport;
        self.pack_image = assets.random_pack_image(rng);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The closed pack, centered on screen
    pub fn pack_rect(&self) -> Rect {
        let v = self.viewport;
        Rect::centered(
            v.center(),
            Vec2::new(v.px(OPENING_PACK_WIDTH), v.px(OPENING_PACK_HEIGHT)),
        )
    }

    /// Tear animation for the current progress
    pub fn tear(&self) -> Tear {
        let pack = self.pack_rect();
        let t = self.progress / OPEN_COMPLETE;
        let flap_full = pack.height() * TEAR_FRACTION;
        let cut = flap_full * t;

        let body = Rect::new(pack.pos.x, pack.pos.y + cut, pack.width(), pack.height() - cut);
        let flap_height = flap_full * (1.0 - t);
        let flap = (self.progress < OPEN_COMPLETE && flap_height > 0.0).then(|| {
            Rect::new(
                pack.pos.x,
                pack.pos.y - (flap_full - flap_height),
                pack.width(),
                flap_height,
            )
        });
        Tear { body, cut, flap }
    }

    /// Size of an opened card: 35% of screen height at 2:3, narrowed to fit
    pub fn card_size(&self) -> Vec2 {
        let v = self.viewport;
        let spacing = v.px(OPENED_CARD_SPACING);
        let count = CARDS_PER_PACK as f32;

        let mut height = v.height * OPENED_CARD_HEIGHT_RATIO;
        let mut width = height * CARD_ASPECT;
        let max_width = (v.width - spacing * (count + 1.0)) / count;
        if width > max_width {
            width = max_width.max(1.0);
            height = width / CARD_ASPECT;
        }
        Vec2::new(width, height)
    }

    /// Screen rectangles of the current cards, one centered row
    pub fn card_slots(&self) -> Vec<Rect> {
        let v = self.viewport;
        let size = self.card_size();
        let spacing = v.px(OPENED_CARD_SPACING);
        let n = self.current_cards.len() as f32;
        let total = size.x * n + spacing * (n - 1.0).max(0.0);
        let start = Vec2::new(v.width / 2.0 - total / 2.0, v.height / 2.0 - size.y / 2.0);

        (0..self.current_cards.len())
            .map(|i| Rect {
                pos: start + Vec2::new(i as f32 * (size.x + spacing), 0.0),
                size,
            })
            .collect()
    }
}
