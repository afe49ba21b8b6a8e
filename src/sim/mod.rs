//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (packs in layout order)
//! - No rendering or platform dependencies

pub mod card;
pub mod collision;
pub mod crosshair;
pub mod effect;
pub mod layout;
pub mod opening;
pub mod state;
pub mod target;
pub mod tick;

pub use card::{CATALOG, Card, CardFace, Rarity, generate_cards};
pub use collision::{Rect, Viewport};
pub use crosshair::{Crosshair, Directions};
pub use effect::{HIT_TEXT, HitEffect};
pub use layout::{GridLayout, layout_collection};
pub use opening::{Advance, PackOpeningSession, Tear};
pub use state::{Game, GameContext, GameState, InputEvent, RunTotals, TickInput};
pub use target::CardPack;
pub use tick::tick;
