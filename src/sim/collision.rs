//! Collision detection and response
//!
//! Every test is an axis-aligned bounding box overlap between two sprites.
//! Entity counts stay in the tens, so all pairs are checked each frame with
//! no broad phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// The ship touched the ground, a spire or an asteroid
    pub ship_hit: bool,
    /// Asteroids destroyed by terrain or the shield
    pub asteroids_destroyed: usize,
    pub stars_collected: usize,
}

/// Run every collision check for one frame and apply the results.
///
/// - ship vs ground/spire/asteroid: the run ends (once, however many hit)
/// - asteroid vs ground/spire: asteroid explodes
/// - shield vs asteroid: asteroid explodes before it can reach the ship
/// - ship vs star: star is picked up; every star adds to the boost
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut destroyed = vec![false; state.asteroids.len()];

    let terrain = state
        .top_ground
        .tiles()
        .chain(state.bottom_ground.tiles())
        .chain(state.spires.iter());
    for obstacle in terrain {
        if state.ship.is_colliding(obstacle) {
            report.ship_hit = true;
        }
        for (i, asteroid) in state.asteroids.iter().enumerate() {
            if !destroyed[i] && asteroid.is_colliding(obstacle) {
                destroyed[i] = true;
            }
        }
    }

    if let Some(shield) = &state.shield {
        for (i, asteroid) in state.asteroids.iter().enumerate() {
            if !destroyed[i] && shield.is_colliding(asteroid) {
                destroyed[i] = true;
            }
        }
    }

    for (i, asteroid) in state.asteroids.iter().enumerate() {
        if !destroyed[i] && state.ship.is_colliding(asteroid) {
            report.ship_hit = true;
        }
    }

    let explosion_sites: Vec<Vec2> = state
        .asteroids
        .iter()
        .zip(&destroyed)
        .filter(|(_, gone)| **gone)
        .map(|(asteroid, _)| asteroid.pos)
        .collect();
    report.asteroids_destroyed = explosion_sites.len();
    if !explosion_sites.is_empty() {
        let mut flags = destroyed.iter();
        state.asteroids.retain(|_| !flags.next().copied().unwrap_or(false));
        for pos in explosion_sites {
            state.spawn_explosion(pos);
        }
    }

    let ship = &state.ship;
    let before = state.stars.len();
    state.stars.retain(|star| !ship.is_colliding(star));
    report.stars_collected = before - state.stars.len();
    for _ in 0..report.stars_collected {
        state.collect_star();
    }

    if report.ship_hit {
        state.end_run();
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageId;
    use crate::sim::Mode;
    use crate::sim::sprite::Sprite;

    fn playing_state() -> GameState {
        let mut state = GameState::new(1);
        state.mode = Mode::Game;
        state
    }

    fn sprite_at(state: &GameState, image: ImageId, x: f32, y: f32) -> Sprite {
        Sprite::new(&state.atlas, image, Vec2::new(x, y))
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_pos_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_pos_size(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let d = Aabb::from_pos_size(Vec2::new(0.0, 20.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c), "shared edge is not an overlap");
        assert!(!a.overlaps(&d));
        assert_eq!(a.size(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_clear_sky_no_collisions() {
        let mut state = playing_state();
        let report = resolve_collisions(&mut state);
        assert_eq!(report, CollisionReport::default());
        assert_eq!(state.mode, Mode::Game);
    }

    #[test]
    fn test_ship_hits_floor() {
        let mut state = playing_state();
        state.ship.pos.y = 700.0;
        let report = resolve_collisions(&mut state);
        assert!(report.ship_hit);
        assert_eq!(state.mode, Mode::GameOver);
    }

    #[test]
    fn test_many_overlaps_end_run_once() {
        let mut state = playing_state();
        let (x, y) = (state.ship.pos.x, state.ship.pos.y);
        state.spires.push(sprite_at(&state, ImageId::SpireTop, x, y - 100.0));
        state.spires.push(sprite_at(&state, ImageId::SpireBottom, x, y));
        state.asteroids.push(sprite_at(&state, ImageId::Asteroid1, x + 10.0, y + 10.0));

        resolve_collisions(&mut state);
        let destroyed = state
            .events
            .iter()
            .filter(|e| matches!(e, crate::sim::GameEvent::ShipDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
        assert_eq!(state.mode, Mode::GameOver);
    }

    #[test]
    fn test_asteroid_explodes_on_spire() {
        let mut state = playing_state();
        state.spires.push(sprite_at(&state, ImageId::SpireBottom, 800.0, 400.0));
        state.asteroids.push(sprite_at(&state, ImageId::Asteroid2, 790.0, 420.0));
        state.asteroids.push(sprite_at(&state, ImageId::Asteroid3, 600.0, 200.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.asteroids_destroyed, 1);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].image, ImageId::Asteroid3);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].sprite.pos, Vec2::new(790.0, 420.0));
        assert_eq!(state.explosions[0].sprite.vel.x, -state.speed);
        assert_eq!(state.mode, Mode::Game);
    }

    #[test]
    fn test_asteroid_touching_two_obstacles_explodes_once() {
        let mut state = playing_state();
        state.spires.push(sprite_at(&state, ImageId::SpireBottom, 800.0, 400.0));
        state.spires.push(sprite_at(&state, ImageId::SpireBottom, 850.0, 400.0));
        state.asteroids.push(sprite_at(&state, ImageId::Asteroid1, 820.0, 450.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.asteroids_destroyed, 1);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_shield_destroys_asteroid_and_protects_ship() {
        let mut state = playing_state();
        state.boosting = true;
        state.sync_shield();
        let (x, y) = (state.ship.pos.x, state.ship.pos.y);
        state.asteroids.push(sprite_at(&state, ImageId::Asteroid1, x + 20.0, y));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.asteroids_destroyed, 1);
        assert!(!report.ship_hit);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.mode, Mode::Game);
    }

    #[test]
    fn test_no_shield_asteroid_kills_ship() {
        let mut state = playing_state();
        let (x, y) = (state.ship.pos.x, state.ship.pos.y);
        state.asteroids.push(sprite_at(&state, ImageId::Asteroid1, x + 20.0, y));
        let report = resolve_collisions(&mut state);
        assert!(report.ship_hit);
        assert_eq!(report.asteroids_destroyed, 0);
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_star_pickup_boosts() {
        let mut state = playing_state();
        let (x, y) = (state.ship.pos.x, state.ship.pos.y);
        state.stars.push(sprite_at(&state, ImageId::Star, x + 30.0, y + 30.0));
        state.stars.push(sprite_at(&state, ImageId::Star, 900.0, 300.0));
        state.frame_count = 42;

        let report = resolve_collisions(&mut state);
        assert_eq!(report.stars_collected, 1);
        assert_eq!(state.stars.len(), 1);
        assert!(state.boosting);
        assert_eq!(state.speed, 1.0 + state.boost_factor);
        assert_eq!(state.last_boost_tick, 42);
    }

    #[test]
    fn test_star_while_boosting_adds_again() {
        let mut state = playing_state();
        let (x, y) = (state.ship.pos.x, state.ship.pos.y);
        state.stars.push(sprite_at(&state, ImageId::Star, x + 30.0, y + 30.0));
        resolve_collisions(&mut state);
        assert_eq!(state.speed, 1.0 + state.boost_factor);

        state.frame_count = 90;
        state.stars.push(sprite_at(&state, ImageId::Star, x + 40.0, y + 20.0));
        let report = resolve_collisions(&mut state);
        assert_eq!(report.stars_collected, 1);
        assert!(state.boosting);
        assert_eq!(state.speed, 1.0 + 2.0 * state.boost_factor);
        assert_eq!(state.last_boost_tick, 90);
    }

    #[test]
    fn test_two_stars_in_one_frame_both_count() {
        let mut state = playing_state();
        let (x, y) = (state.ship.pos.x, state.ship.pos.y);
        state.stars.push(sprite_at(&state, ImageId::Star, x + 10.0, y + 10.0));
        state.stars.push(sprite_at(&state, ImageId::Star, x + 50.0, y + 30.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.stars_collected, 2);
        assert!(state.stars.is_empty());
        assert_eq!(state.speed, 1.0 + 2.0 * state.boost_factor);
        let collected = state
            .events
            .iter()
            .filter(|e| matches!(e, crate::sim::GameEvent::StarCollected))
            .count();
        assert_eq!(collected, 2);
    }
}
