//! Scrolling floor and ceiling
//!
//! Each strip is a fixed ring of tiles wide enough to cover the screen plus
//! two tiles. When the leading tile has fully scrolled off the left edge it
//! is moved behind the last tile; tiles are never added or dropped.

use std::collections::VecDeque;
use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::Sprite;
use crate::assets::{Atlas, ImageId};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Which edge of the screen a strip runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundSide {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundStrip {
    pub side: GroundSide,
    tiles: VecDeque<Sprite>,
}

impl GroundStrip {
    /// Lay out a full strip starting at x = 0
    pub fn new(atlas: &Atlas, side: GroundSide, speed: f32) -> Self {
        let size = atlas.size(ImageId::Floor);
        let count = Self::tile_count(size.x);
        let (y, rotation) = match side {
            GroundSide::Top => (0.0, PI),
            GroundSide::Bottom => (SCREEN_HEIGHT - size.y, 0.0),
        };

        let tiles = (0..count)
            .map(|i| {
                Sprite::new(atlas, ImageId::Floor, Vec2::new(size.x * i as f32, y))
                    .with_velocity(Vec2::new(-speed, 0.0))
                    .with_rotation(rotation)
            })
            .collect();

        Self { side, tiles }
    }

    /// Tiles needed to cover the screen plus two tile widths
    pub fn tile_count(tile_width: f32) -> usize {
        if tile_width <= 0.0 {
            return 1;
        }
        ((SCREEN_WIDTH + tile_width * 2.0) / tile_width).ceil() as usize
    }

    /// Scroll every tile at `speed`, then recycle the leading tile if it is
    /// fully off screen
    pub fn update(&mut self, speed: f32) {
        for tile in self.tiles.iter_mut() {
            tile.vel.x = -speed;
            tile.update();
        }

        let Some(first) = self.tiles.front() else {
            return;
        };
        let width = first.size.x;
        if first.pos.x <= -width {
            self.tiles.rotate_left(1);
            let len = self.tiles.len();
            if len > 1 {
                let next_x = self.tiles[len - 2].pos.x + width;
                self.tiles[len - 1].pos.x = next_x;
            }
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Sprite> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
