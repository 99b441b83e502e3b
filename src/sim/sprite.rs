//! Moving sprites
//!
//! A sprite is an image placed at its top-left corner with a per-frame
//! velocity. Positions are in screen pixels, velocities in pixels/frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::assets::{Atlas, ImageId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub image: ImageId,
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    /// Radians, about the sprite centre (visual only)
    pub rotation: f32,
    /// Image size, copied from the atlas
    pub size: Vec2,
}

impl Sprite {
    /// A resting sprite at `pos`
    pub fn new(atlas: &Atlas, image: ImageId, pos: Vec2) -> Self {
        Self {
            image,
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            size: atlas.size(image),
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Advance one frame
    #[inline]
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn apply_impulse(&mut self, dx: f32, dy: f32) {
        self.vel += Vec2::new(dx, dy);
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn is_colliding(&self, other: &Sprite) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_integrates_velocity() {
        let atlas = Atlas::builtin();
        let mut sprite = Sprite::new(&atlas, ImageId::Star, Vec2::new(10.0, 20.0))
            .with_velocity(Vec2::new(-3.0, 0.5));
        sprite.update();
        sprite.update();
        assert_eq!(sprite.pos, Vec2::new(4.0, 21.0));
    }

    #[test]
    fn test_impulse_accumulates() {
        let atlas = Atlas::builtin();
        let mut sprite = Sprite::new(&atlas, ImageId::Asteroid1, Vec2::ZERO);
        sprite.apply_impulse(-10.0, 2.0);
        sprite.apply_impulse(-1.0, -3.0);
        assert_eq!(sprite.vel, Vec2::new(-11.0, -1.0));
    }

    #[test]
    fn test_rotation_does_not_change_bounds() {
        let atlas = Atlas::builtin();
        let a = Sprite::new(&atlas, ImageId::Floor, Vec2::new(5.0, 5.0));
        let b = a.clone().with_rotation(std::f32::consts::PI);
        assert_eq!(a.bounds(), b.bounds());
    }
}
