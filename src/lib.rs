//! Pack Shooter - a card pack shooting gallery
//!
//! Core modules:
//! - `sim`: Game state machine, entities, collision, pack opening
//! - `renderer`: Render surface abstraction and per-screen drawing
//! - `assets`: Image asset discovery and loading with placeholder fallback
//! - `settings`: Load-time configuration

pub mod assets;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetLibrary, AssetProvider, DirectoryAssets, NoAssets};
pub use settings::Settings;
pub use sim::{Game, GameState, InputEvent, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Base design resolution; every pixel constant below is at this size
    pub const BASE_WIDTH: f32 = 800.0;
    pub const BASE_HEIGHT: f32 = 600.0;

    /// Target frame rate and the fixed timestep derived from it
    pub const FPS: u32 = 60;
    pub const SIM_DT: f32 = 1.0 / FPS as f32;

    /// Run defaults
    pub const INITIAL_AMMO: u32 = 10;
    pub const TARGET_COUNT: usize = 10;
    pub const CARDS_PER_PACK: usize = 5;
    pub const TIME_LIMIT: f32 = 45.0;

    /// Crosshair
    pub const CROSSHAIR_SIZE: f32 = 20.0;
    pub const CROSSHAIR_SPEED: f32 = 5.0;
    pub const CROSSHAIR_MIN_SPEED: f32 = 3.0;

    /// Card pack targets
    pub const PACK_WIDTH: f32 = 60.0;
    pub const PACK_HEIGHT: f32 = 80.0;
    pub const PACK_MIN_SPEED: f32 = 1.0;
    pub const PACK_MAX_SPEED: f32 = 3.0;
    pub const PACK_MIN_RANGE: f32 = 30.0;
    pub const PACK_MAX_RANGE: f32 = 80.0;
    /// Die-face layout offsets from each group's center
    pub const LAYOUT_OFFSET_X: f32 = 120.0;
    pub const LAYOUT_OFFSET_Y: f32 = 180.0;

    /// Hit effect
    pub const EFFECT_LIFETIME: u32 = 60;
    pub const EFFECT_DRIFT: f32 = 2.0;
    pub const EFFECT_FONT_SIZE: f32 = 48.0;

    /// Pack opening
    pub const OPEN_STEP: f32 = 2.0;
    pub const OPEN_COMPLETE: f32 = 100.0;
    pub const TEAR_FRACTION: f32 = 0.3;
    pub const OPENING_PACK_WIDTH: f32 = 200.0;
    pub const OPENING_PACK_HEIGHT: f32 = 280.0;
    pub const OPENED_CARD_HEIGHT_RATIO: f32 = 0.35;
    pub const OPENED_CARD_SPACING: f32 = 20.0;

    /// Collection grid
    pub const CARD_ASPECT: f32 = 2.0 / 3.0;
    pub const COLLECTION_HEADER: f32 = 90.0;
    pub const COLLECTION_FOOTER: f32 = 50.0;
    pub const COLLECTION_MARGIN: f32 = 30.0;
    pub const COLLECTION_SPACING: f32 = 10.0;
    pub const COLLECTION_MIN_CARD_HEIGHT: f32 = 60.0;
}

/// Scale factor from the base design resolution to the given screen size.
///
/// Degenerate dimensions are clamped to 1 so the result is always positive.
#[inline]
pub fn design_scale(width: f32, height: f32) -> f32 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    (w / consts::BASE_WIDTH).min(h / consts::BASE_HEIGHT)
}
