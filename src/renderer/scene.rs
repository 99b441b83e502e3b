//! Builds the frame's geometry from the game state
//!
//! Draw order, back to front: background, stars, spires, ground, asteroids,
//! explosions, ship, shield.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, image_color};
use crate::assets::ImageId;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::settings::Settings;
use crate::sim::{GameState, Sprite};

/// Outline width for debug hitboxes
const HITBOX_THICKNESS: f32 = 2.0;

fn push_sprite(out: &mut Vec<Vertex>, sprite: &Sprite, high_contrast: bool) {
    let color = image_color(sprite.image, high_contrast);
    out.extend(shapes::rotated_rect(sprite.pos, sprite.size, sprite.rotation, color));
}

/// Background scaled up to cover the screen, anchored top-left
fn background(state: &GameState, high_contrast: bool) -> Vec<Vertex> {
    let size = state.atlas.size(ImageId::Background);
    let scale = (SCREEN_WIDTH / size.x).max(SCREEN_HEIGHT / size.y);
    shapes::rect(
        Vec2::ZERO,
        size * scale,
        image_color(ImageId::Background, high_contrast),
    )
}

/// All sprites the state would draw, in draw order
pub fn sprites<'a>(state: &'a GameState, settings: &Settings) -> Vec<&'a Sprite> {
    let mut out: Vec<&'a Sprite> = Vec::new();
    out.extend(state.stars.iter());
    out.extend(state.spires.iter());
    out.extend(state.top_ground.tiles());
    out.extend(state.bottom_ground.tiles());
    out.extend(state.asteroids.iter());
    if settings.effective_explosions() {
        out.extend(state.explosions.iter().map(|e| &e.sprite));
    }
    out.push(&state.ship);
    if let Some(shield) = &state.shield {
        out.push(shield);
    }
    out
}

/// Vertices for the whole frame in screen pixels
pub fn build(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let hc = settings.high_contrast;
    let sprites = sprites(state, settings);

    let mut vertices = background(state, hc);
    vertices.reserve(sprites.len() * 6);
    for sprite in &sprites {
        push_sprite(&mut vertices, sprite, hc);
    }

    if settings.show_hitboxes {
        for sprite in &sprites {
            let b = sprite.bounds();
            vertices.extend(shapes::rect_outline(
                b.min,
                b.size(),
                HITBOX_THICKNESS,
                colors::HITBOX,
            ));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Mode;

    #[test]
    fn test_title_frame_has_ground_and_ship() {
        let state = GameState::new(1);
        let settings = Settings::default();
        let sprites = sprites(&state, &settings);
        let tiles = state.top_ground.len() + state.bottom_ground.len();
        assert_eq!(sprites.len(), tiles + 1);
        assert_eq!(sprites.last().unwrap().image, ImageId::Ship);

        let vertices = build(&state, &settings);
        assert_eq!(vertices.len(), 6 * (1 + sprites.len()));
    }

    #[test]
    fn test_shield_drawn_last() {
        let mut state = GameState::new(1);
        state.mode = Mode::Game;
        state.boosting = true;
        state.sync_shield();
        let settings = Settings::default();
        let sprites = sprites(&state, &settings);
        assert_eq!(sprites.last().unwrap().image, ImageId::Shield);
    }

    #[test]
    fn test_reduced_motion_hides_explosions() {
        let mut state = GameState::new(1);
        state.spawn_explosion(Vec2::new(500.0, 300.0));
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(
            sprites(&state, &settings)
                .iter()
                .all(|s| s.image != ImageId::AsteroidExplosion)
        );
    }

    #[test]
    fn test_hitboxes_add_outlines() {
        let state = GameState::new(1);
        let plain = build(&state, &Settings::default());
        let debug = build(
            &state,
            &Settings {
                show_hitboxes: true,
                ..Default::default()
            },
        );
        let sprite_count = sprites(&state, &Settings::default()).len();
        assert_eq!(debug.len(), plain.len() + 24 * sprite_count);
    }
}
