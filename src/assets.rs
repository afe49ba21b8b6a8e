//! Image assets
//!
//! Images are decoded once on load and kept as a small RGBA copy, which is
//! all a cell-based renderer can show. Anything that fails to load is
//! replaced by synthesized placeholder art at draw time, so nothing here is
//! ever fatal.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{ImageReader, Rgba, RgbaImage, imageops};
use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

/// Longest edge kept in memory after decoding
pub const MAX_STORED_EDGE: u32 = 128;

/// Opaque reference to an image asset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHandle(PathBuf);

impl AssetHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name without extension, used as a display name
    pub fn stem(&self) -> String {
        self.0
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A decoded image: source, original dimensions and a downsampled RGBA copy
#[derive(Clone, PartialEq)]
pub struct Image {
    pub handle: AssetHandle,
    width: u32,
    height: u32,
    pixels: Arc<RgbaImage>,
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("handle", &self.handle)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stored", &self.pixels.dimensions())
            .finish()
    }
}

impl Image {
    /// Wrap decoded pixels, shrinking them to at most `MAX_STORED_EDGE`
    pub fn from_rgba(handle: AssetHandle, pixels: RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        let longest = width.max(height);
        let pixels = if longest > MAX_STORED_EDGE {
            let shrink =
                |edge: u32| ((edge as u64 * MAX_STORED_EDGE as u64) / longest as u64).max(1) as u32;
            imageops::thumbnail(&pixels, shrink(width), shrink(height))
        } else {
            pixels
        };
        Self {
            handle,
            width,
            height,
            pixels: Arc::new(pixels),
        }
    }

    /// Single-color image, for in-memory providers
    pub fn solid(handle: AssetHandle, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_rgba(handle, RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    /// Width of the source image in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the source image in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Color at normalized coordinates, nearest neighbour. `None` when empty.
    pub fn sample(&self, u: f32, v: f32) -> Option<[u8; 4]> {
        let (w, h) = self.pixels.dimensions();
        if w == 0 || h == 0 {
            return None;
        }
        let x = ((u.clamp(0.0, 1.0) * w as f32) as u32).min(w - 1);
        let y = ((v.clamp(0.0, 1.0) * h as f32) as u32).min(h - 1);
        Some(self.pixels.get_pixel(x, y).0)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    Unsupported(String),

    #[error("Corrupt image: {0}")]
    Corrupt(String),
}

/// Source of card and pack artwork
pub trait AssetProvider {
    /// Card face images, in a stable order
    fn card_images(&self) -> Vec<AssetHandle>;

    /// Pack artwork, in a stable order
    fn pack_images(&self) -> Vec<AssetHandle>;

    /// Shared card back, if one exists
    fn card_back(&self) -> Option<AssetHandle> {
        None
    }

    fn load_image(&self, handle: &AssetHandle) -> Result<Image, LoadError>;
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];
const CARD_PREFIX: &str = "rare_card_";

/// Assets discovered on disk
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    pub card_dir: PathBuf,
    pub pack_dir: PathBuf,
    pub card_back: Option<PathBuf>,
}

impl DirectoryAssets {
    pub fn new(card_dir: impl Into<PathBuf>, pack_dir: impl Into<PathBuf>) -> Self {
        Self {
            card_dir: card_dir.into(),
            pack_dir: pack_dir.into(),
            card_back: None,
        }
    }

    pub fn with_card_back(mut self, path: impl Into<PathBuf>) -> Self {
        self.card_back = Some(path.into());
        self
    }

    fn scan(dir: &Path, prefix: &str, label: &str) -> Vec<AssetHandle> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::info!("No {} directory at {}: {}", label, dir.display(), e);
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_image_named(path, prefix))
            .collect();
        paths.sort();

        log::info!("Found {} {} images", paths.len(), label);
        paths.into_iter().map(AssetHandle).collect()
    }
}

fn is_image_named(path: &Path, prefix: &str) -> bool {
    let name_ok = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(prefix));
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
    name_ok && ext_ok
}

impl AssetProvider for DirectoryAssets {
    fn card_images(&self) -> Vec<AssetHandle> {
        Self::scan(&self.card_dir, CARD_PREFIX, "card")
    }

    fn pack_images(&self) -> Vec<AssetHandle> {
        Self::scan(&self.pack_dir, "", "pack")
    }

    fn card_back(&self) -> Option<AssetHandle> {
        self.card_back
            .as_ref()
            .filter(|p| p.is_file())
            .map(|p| AssetHandle(p.clone()))
    }

    fn load_image(&self, handle: &AssetHandle) -> Result<Image, LoadError> {
        let decoded = ImageReader::open(handle.path())?
            .with_guessed_format()?
            .decode()?;
        Ok(Image::from_rgba(handle.clone(), decoded.to_rgba8()))
    }
}

/// Provider with no assets; every pack falls back to the card catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn card_images(&self) -> Vec<AssetHandle> {
        Vec::new()
    }

    fn pack_images(&self) -> Vec<AssetHandle> {
        Vec::new()
    }

    fn load_image(&self, handle: &AssetHandle) -> Result<Image, LoadError> {
        Err(LoadError::Unsupported(handle.stem()))
    }
}

/// In-memory provider with fixed dimensions, for headless runs
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    pub cards: Vec<AssetHandle>,
    pub packs: Vec<AssetHandle>,
    /// Handles that fail to load
    pub broken: Vec<AssetHandle>,
}

impl StaticAssets {
    pub const CARD_SIZE: (u32, u32) = (200, 300);
    pub const PACK_SIZE: (u32, u32) = (120, 160);
    pub const CARD_COLOR: [u8; 4] = [200, 170, 60, 255];
    pub const PACK_COLOR: [u8; 4] = [60, 90, 200, 255];

    pub fn new(card_count: usize, pack_count: usize) -> Self {
        Self {
            cards: (0..card_count)
                .map(|i| AssetHandle::new(format!("rare_card_{i:03}.png")))
                .collect(),
            packs: (0..pack_count)
                .map(|i| AssetHandle::new(format!("pack_{i:03}.png")))
                .collect(),
            broken: Vec::new(),
        }
    }

    /// Mark every asset as failing to load
    pub fn all_broken(mut self) -> Self {
        self.broken = self.cards.iter().chain(&self.packs).cloned().collect();
        self
    }
}

impl AssetProvider for StaticAssets {
    fn card_images(&self) -> Vec<AssetHandle> {
        self.cards.clone()
    }

    fn pack_images(&self) -> Vec<AssetHandle> {
        self.packs.clone()
    }

    fn load_image(&self, handle: &AssetHandle) -> Result<Image, LoadError> {
        if self.broken.contains(handle) {
            return Err(LoadError::Corrupt(handle.stem()));
        }
        let ((width, height), color) = if self.packs.contains(handle) {
            (Self::PACK_SIZE, Self::PACK_COLOR)
        } else if self.cards.contains(handle) {
            (Self::CARD_SIZE, Self::CARD_COLOR)
        } else {
            return Err(LoadError::Io(std::io::ErrorKind::NotFound.into()));
        };
        Ok(Image::solid(handle.clone(), width, height, color))
    }
}

/// Asset lists cached at startup plus the placeholder substitution policy
pub struct AssetLibrary {
    provider: Box<dyn AssetProvider>,
    card_images: Vec<AssetHandle>,
    pack_images: Vec<AssetHandle>,
    card_back: Option<Image>,
}

impl fmt::Debug for AssetLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetLibrary")
            .field("card_images", &self.card_images.len())
            .field("pack_images", &self.pack_images.len())
            .field("card_back", &self.card_back.is_some())
            .finish()
    }
}

impl Default for AssetLibrary {
    fn default() -> Self {
        Self::new(Box::new(NoAssets))
    }
}

impl AssetLibrary {
    pub fn new(provider: Box<dyn AssetProvider>) -> Self {
        let card_images = provider.card_images();
        let pack_images = provider.pack_images();
        let mut library = Self {
            provider,
            card_images,
            pack_images,
            card_back: None,
        };
        library.card_back = library
            .provider
            .card_back()
            .and_then(|handle| library.load_or_placeholder(&handle));
        library
    }

    pub fn card_images(&self) -> &[AssetHandle] {
        &self.card_images
    }

    pub fn pack_images(&self) -> &[AssetHandle] {
        &self.pack_images
    }

    pub fn card_back(&self) -> Option<&Image> {
        self.card_back.as_ref()
    }

    /// Load an image, or `None` when the caller should draw a placeholder
    pub fn load_or_placeholder(&self, handle: &AssetHandle) -> Option<Image> {
        match self.provider.load_image(handle) {
            Ok(image) if image.width() > 0 && image.height() > 0 => Some(image),
            Ok(_) => {
                log::warn!("Image {} has no pixels, using placeholder", handle.path().display());
                None
            }
            Err(e) => {
                log::warn!("Image {} failed to load ({}), using placeholder", handle.path().display(), e);
                None
            }
        }
    }

    /// Pick a pack image at random and load it
    pub fn random_pack_image(&self, rng: &mut impl Rng) -> Option<Image> {
        self.pack_images
            .choose(rng)
            .and_then(|handle| self.load_or_placeholder(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
        RgbaImage::from_pixel(width, height, Rgba(rgba)).save(path).unwrap();
    }

    #[test]
    fn test_directory_assets_scan_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cards = dir.path().join("images");
        let packs = dir.path().join("pack_images");
        std::fs::create_dir_all(&cards).unwrap();
        std::fs::create_dir_all(&packs).unwrap();

        write_png(&cards.join("rare_card_b.png"), 20, 30, [255, 0, 0, 255]);
        image::RgbImage::from_pixel(20, 30, image::Rgb([0, 0, 255]))
            .save(cards.join("rare_card_a.jpg"))
            .unwrap();
        write_png(&cards.join("other.png"), 10, 10, [0, 0, 0, 255]);
        std::fs::write(cards.join("rare_card_c.txt"), b"nope").unwrap();
        std::fs::write(packs.join("pack.webp"), b"corrupt").unwrap();

        let assets = DirectoryAssets::new(&cards, &packs);
        let listed: Vec<String> = assets.card_images().iter().map(|h| h.stem()).collect();
        assert_eq!(listed, vec!["rare_card_a", "rare_card_b"]);

        let image = assets.load_image(&assets.card_images()[1]).unwrap();
        assert_eq!((image.width(), image.height()), (20, 30));
        assert_eq!(image.sample(0.5, 0.5), Some([255, 0, 0, 255]));

        let jpeg = assets.load_image(&assets.card_images()[0]).unwrap();
        assert_eq!((jpeg.width(), jpeg.height()), (20, 30));

        let pack = &assets.pack_images()[0];
        assert!(assets.load_image(pack).is_err());
    }

    #[test]
    fn test_corrupt_body_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rare_card_broken.png");
        write_png(&path, 200, 300, [10, 200, 10, 255]);

        // Keep the signature and IHDR chunk, replace the rest with junk
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.truncate(8 + 25);
        bytes.extend(std::iter::repeat_n(0xA5u8, 512));
        std::fs::write(&path, &bytes).unwrap();

        let assets = DirectoryAssets::new(dir.path(), dir.path());
        assert!(matches!(
            assets.load_image(&AssetHandle::new(&path)),
            Err(LoadError::Decode(_))
        ));

        let library = AssetLibrary::new(Box::new(assets));
        assert_eq!(library.card_images().len(), 1);
        assert!(library.load_or_placeholder(&library.card_images()[0]).is_none());
    }

    #[test]
    fn test_large_image_is_downsampled() {
        let image = Image::solid(AssetHandle::new("big.png"), 600, 900, [1, 2, 3, 255]);
        assert_eq!((image.width(), image.height()), (600, 900));
        assert_eq!(image.pixels().dimensions(), (85, MAX_STORED_EDGE));
        assert!((image.aspect_ratio() - 600.0 / 900.0).abs() < 1e-6);
        assert_eq!(image.sample(2.0, -1.0), Some([1, 2, 3, 255]));
    }

    #[test]
    fn test_empty_image_has_no_samples() {
        let image = Image::solid(AssetHandle::new("empty.png"), 0, 0, [0; 4]);
        assert_eq!(image.sample(0.5, 0.5), None);
    }

    #[test]
    fn test_directory_assets_missing_dirs() {
        let assets = DirectoryAssets::new("/nonexistent/cards", "/nonexistent/packs");
        assert!(assets.card_images().is_empty());
        assert!(assets.pack_images().is_empty());
        assert!(assets.card_back().is_none());
    }

    #[test]
    fn test_library_substitutes_placeholder() {
        let library = AssetLibrary::new(Box::new(StaticAssets::new(5, 2).all_broken()));
        assert_eq!(library.card_images().len(), 5);
        assert!(library.load_or_placeholder(&library.card_images()[0]).is_none());

        let mut rng = Pcg32::seed_from_u64(1);
        assert!(library.random_pack_image(&mut rng).is_none());
    }

    #[test]
    fn test_library_random_pack_image() {
        let library = AssetLibrary::new(Box::new(StaticAssets::new(0, 3)));
        let mut rng = Pcg32::seed_from_u64(1);
        let image = library.random_pack_image(&mut rng).unwrap();
        assert_eq!((image.width(), image.height()), StaticAssets::PACK_SIZE);
        assert_eq!(image.sample(0.5, 0.5), Some(StaticAssets::PACK_COLOR));
    }
}
