//! Cards and the built-in card catalog

use rand::Rng;
use rand::seq::index;

use crate::assets::{AssetHandle, AssetLibrary, Image};
use crate::consts::CARDS_PER_PACK;

/// RGB color, 0-255 per channel
pub type Rgb = [u8; 3];

/// Rarity tiers of catalog cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Rare,
    SuperRare,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::SuperRare => "Super Rare",
        }
    }
}

/// One row of the built-in catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: &'static str,
    pub color: Rgb,
    pub rarity: Rarity,
}

const WHITE: Rgb = [255, 255, 255];
const RED: Rgb = [255, 0, 0];
const BLUE: Rgb = [0, 100, 255];
const GREEN: Rgb = [0, 255, 0];
const YELLOW: Rgb = [255, 255, 0];
const PURPLE: Rgb = [200, 0, 200];
const ORANGE: Rgb = [255, 165, 0];

/// Fill color for cards whose image failed to load
pub const MISSING_ART: Rgb = [100, 100, 100];

const fn entry(id: u32, name: &'static str, color: Rgb, rarity: Rarity) -> CatalogEntry {
    CatalogEntry { id, name, color, rarity }
}

/// Cards dealt when there are not enough card images
pub const CATALOG: [CatalogEntry; 20] = [
    entry(1, "Fire Dragon", RED, Rarity::SuperRare),
    entry(2, "Water Spirit", BLUE, Rarity::Rare),
    entry(3, "Earth Golem", GREEN, Rarity::Common),
    entry(4, "Thunder Bird", YELLOW, Rarity::Rare),
    entry(5, "Dark Knight", PURPLE, Rarity::SuperRare),
    entry(6, "Light Angel", WHITE, Rarity::SuperRare),
    entry(7, "Ice Phoenix", BLUE, Rarity::Rare),
    entry(8, "Forest Elf", GREEN, Rarity::Common),
    entry(9, "Flame Wizard", ORANGE, Rarity::Rare),
    entry(10, "Wind Fairy", [173, 216, 230], Rarity::Common),
    entry(11, "Rock Giant", [139, 69, 19], Rarity::Common),
    entry(12, "Storm Dragon", YELLOW, Rarity::SuperRare),
    entry(13, "Shadow Assassin", [64, 64, 64], Rarity::Rare),
    entry(14, "Crystal Guardian", [147, 112, 219], Rarity::Rare),
    entry(15, "Magma Titan", ORANGE, Rarity::SuperRare),
    entry(16, "Ocean Leviathan", BLUE, Rarity::SuperRare),
    entry(17, "Sky Pegasus", [135, 206, 250], Rarity::Common),
    entry(18, "Jungle Tiger", GREEN, Rarity::Common),
    entry(19, "Desert Sphinx", [210, 180, 140], Rarity::Rare),
    entry(20, "Mystic Unicorn", PURPLE, Rarity::Rare),
];

/// What a revealed card shows
#[derive(Debug, Clone, PartialEq)]
pub enum CardFace {
    /// Artwork from an image asset
    Image(Image),
    /// Synthesized art: solid color with the card name
    Placeholder { color: Rgb, rarity: Option<Rarity> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: u32,
    pub name: String,
    /// Asset the card was dealt from, if any
    pub source: Option<AssetHandle>,
    pub face: CardFace,
    flipped: bool,
}

impl Card {
    pub fn from_catalog(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.to_string(),
            source: None,
            face: CardFace::Placeholder {
                color: entry.color,
                rarity: Some(entry.rarity),
            },
            flipped: false,
        }
    }

    /// Card for the `index`-th image asset; a failed load gets "?" art
    pub fn from_asset(index: usize, handle: &AssetHandle, assets: &AssetLibrary) -> Self {
        let face = match assets.load_or_placeholder(handle) {
            Some(image) => CardFace::Image(image),
            None => CardFace::Placeholder {
                color: MISSING_ART,
                rarity: None,
            },
        };
        Self {
            id: index as u32 + 1,
            name: handle.stem(),
            source: Some(handle.clone()),
            face,
            flipped: false,
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Reveal the face. There is no way back.
    pub fn flip(&mut self) {
        self.flipped = true;
    }

    /// Label drawn on placeholder art
    pub fn label(&self) -> &str {
        match &self.face {
            CardFace::Placeholder { rarity: None, .. } => "?",
            _ => self.name.as_str(),
        }
    }
}

/// Deal one pack: distinct cards, all face down.
///
/// Image assets are used when there are enough of them for a full pack;
/// otherwise the deal comes from the catalog.
pub fn generate_cards(assets: &AssetLibrary, rng: &mut impl Rng) -> Vec<Card> {
    let images = assets.card_images();
    if images.len() >= CARDS_PER_PACK {
        index::sample(rng, images.len(), CARDS_PER_PACK)
            .into_iter()
            .map(|i| Card::from_asset(i, &images[i], assets))
            .collect()
    } else {
        if !images.is_empty() {
            log::debug!(
                "Only {} card images for a {}-card pack, dealing from the catalog",
                images.len(),
                CARDS_PER_PACK
            );
        }
        index::sample(rng, CATALOG.len(), CARDS_PER_PACK.min(CATALOG.len()))
            .into_iter()
            .map(|i| Card::from_catalog(&CATALOG[i]))
            .collect()
    }
}
