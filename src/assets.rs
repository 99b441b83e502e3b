//! Image atlas
//!
//! The simulation only needs to know how big each image is: sprite bounds
//! come from image sizes. The atlas is built once at startup (from the
//! bundled table or a JSON manifest) and handed to `GameState`.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, read_to_string};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImageId {
    Background,
    Ship,
    Floor,
    SpireTop,
    SpireBottom,
    Asteroid1,
    Asteroid2,
    Asteroid3,
    Asteroid4,
    AsteroidExplosion,
    Star,
    Shield,
}

/// Number of distinct images
pub const IMAGE_COUNT: usize = 12;

impl ImageId {
    pub const ALL: [ImageId; IMAGE_COUNT] = [
        ImageId::Background,
        ImageId::Ship,
        ImageId::Floor,
        ImageId::SpireTop,
        ImageId::SpireBottom,
        ImageId::Asteroid1,
        ImageId::Asteroid2,
        ImageId::Asteroid3,
        ImageId::Asteroid4,
        ImageId::AsteroidExplosion,
        ImageId::Star,
        ImageId::Shield,
    ];

    /// The four asteroid variants
    pub const ASTEROIDS: [ImageId; 4] = [
        ImageId::Asteroid1,
        ImageId::Asteroid2,
        ImageId::Asteroid3,
        ImageId::Asteroid4,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bundled file name under `assets/`
    pub fn file_name(self) -> &'static str {
        match self {
            ImageId::Background => "background.png",
            ImageId::Ship => "spaceship.png",
            ImageId::Floor => "groundDirt.png",
            ImageId::SpireTop => "rock-top.png",
            ImageId::SpireBottom => "rock-bottom.png",
            ImageId::Asteroid1 => "meteorBrown_big1.png",
            ImageId::Asteroid2 => "meteorBrown_big2.png",
            ImageId::Asteroid3 => "meteorBrown_big3.png",
            ImageId::Asteroid4 => "meteorBrown_big4.png",
            ImageId::AsteroidExplosion => "meteorExplosion.png",
            ImageId::Star => "starGold.png",
            ImageId::Shield => "shield.png",
        }
    }
}

/// Pixel size of one image, as written in the manifest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f32,
    pub height: f32,
}

/// On-disk manifest format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtlasManifest {
    pub images: BTreeMap<ImageId, ImageSize>,
}

/// Image sizes indexed by `ImageId`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atlas {
    sizes: [Vec2; IMAGE_COUNT],
}

impl Default for Atlas {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Atlas {
    /// Sizes of the images bundled with the game
    pub fn builtin() -> Self {
        let mut sizes = [Vec2::ZERO; IMAGE_COUNT];
        for image in ImageId::ALL {
            let (w, h) = match image {
                ImageId::Background => (1920.0, 1080.0),
                ImageId::Ship => (99.0, 75.0),
                ImageId::Floor => (808.0, 71.0),
                ImageId::SpireTop | ImageId::SpireBottom => (108.0, 239.0),
                ImageId::Asteroid1 => (101.0, 84.0),
                ImageId::Asteroid2 => (120.0, 98.0),
                ImageId::Asteroid3 => (89.0, 82.0),
                ImageId::Asteroid4 => (98.0, 96.0),
                ImageId::AsteroidExplosion => (98.0, 96.0),
                ImageId::Star => (31.0, 30.0),
                ImageId::Shield => (133.0, 108.0),
            };
            sizes[image.index()] = Vec2::new(w, h);
        }
        Self { sizes }
    }

    /// Build an atlas from a manifest. Every image must be present with a
    /// positive size.
    pub fn from_manifest(manifest: &AtlasManifest) -> Result<Self, GameError> {
        let mut sizes = [Vec2::ZERO; IMAGE_COUNT];
        for image in ImageId::ALL {
            let size = manifest
                .images
                .get(&image)
                .ok_or_else(|| GameError::InvalidAsset {
                    image,
                    reason: "missing from manifest".to_string(),
                })?;
            if !(size.width > 0.0 && size.height > 0.0) {
                return Err(GameError::InvalidAsset {
                    image,
                    reason: format!("bad size {}x{}", size.width, size.height),
                });
            }
            sizes[image.index()] = Vec2::new(size.width, size.height);
        }
        Ok(Self { sizes })
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let manifest: AtlasManifest = serde_json::from_str(json)?;
        Self::from_manifest(&manifest)
    }

    /// Load a manifest file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = read_to_string(path.as_ref())?;
        let atlas = Self::from_json(&json)?;
        log::info!("Loaded atlas from {}", path.as_ref().display());
        Ok(atlas)
    }

    /// Manifest describing this atlas
    pub fn to_manifest(&self) -> AtlasManifest {
        let images = ImageId::ALL
            .iter()
            .map(|&image| {
                let size = self.size(image);
                (
                    image,
                    ImageSize {
                        width: size.x,
                        height: size.y,
                    },
                )
            })
            .collect();
        AtlasManifest { images }
    }

    #[inline]
    pub fn size(&self, image: ImageId) -> Vec2 {
        self.sizes[image.index()]
    }

    #[inline]
    pub fn width(&self, image: ImageId) -> f32 {
        self.sizes[image.index()].x
    }

    #[inline]
    pub fn height(&self, image: ImageId) -> f32 {
        self.sizes[image.index()].y
    }
}
