//! Sprite factories and short-lived effect sprites

use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sprite::Sprite;
use crate::assets::{Atlas, ImageId};

/// Spawns sprites with a random image at a random spot inside a box.
/// Always has at least one image to pick from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteFactory {
    first: ImageId,
    rest: Vec<ImageId>,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl SpriteFactory {
    /// Range bounds are inclusive
    pub fn new<const N: usize>(
        images: [ImageId; N],
        x: RangeInclusive<f32>,
        y: RangeInclusive<f32>,
    ) -> Self {
        const { assert!(N > 0, "a sprite factory needs at least one image") };
        Self {
            first: images[0],
            rest: images[1..].to_vec(),
            min_x: *x.start(),
            max_x: *x.end(),
            min_y: *y.start(),
            max_y: *y.end(),
        }
    }

    /// Sprite at rest somewhere in the box
    pub fn generate<R: Rng + ?Sized>(&self, atlas: &Atlas, rng: &mut R) -> Sprite {
        let image = if self.rest.is_empty() {
            self.first
        } else {
            match rng.random_range(0..=self.rest.len()) {
                0 => self.first,
                i => self.rest[i - 1],
            }
        };
        let x = random_in(rng, self.min_x, self.max_x);
        let y = random_in(rng, self.min_y, self.max_y);
        Sprite::new(atlas, image, Vec2::new(x, y))
    }
}

fn random_in<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}

/// A sprite that expires after a fixed number of frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientSprite {
    pub sprite: Sprite,
    /// Frame the effect was created on
    pub created_at: u64,
    /// Frames the effect lives for
    pub lifetime: u64,
    pub expired: bool,
}

impl TransientSprite {
    pub fn new(sprite: Sprite, created_at: u64, lifetime: u64) -> Self {
        Self {
            sprite,
            created_at,
            lifetime,
            expired: false,
        }
    }

    /// Move the sprite and mark it expired once its lifetime has passed
    pub fn update(&mut self, now: u64) {
        self.sprite.update();
        if now.saturating_sub(self.created_at) > self.lifetime {
            self.expired = true;
        }
    }
}
