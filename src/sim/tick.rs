//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame. All velocities are in
//! pixels per frame, so there is no `dt`.

use super::collision::resolve_collisions;
use super::state::{GameEvent, GameState, Mode};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Thrust held (space or left mouse)
    pub thrust: bool,
    /// Start pressed this frame (title screen)
    pub start: bool,
    /// Restart pressed this frame (game over screen)
    pub restart: bool,
    /// Demo mode - the autopilot flies the ship
    pub autopilot: bool,
}

type ModeHandler = fn(&mut GameState, &TickInput);

/// Per-mode update, indexed by `Mode::index`
const MODE_HANDLERS: [ModeHandler; 3] = [update_title, update_game, update_game_over];

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    let autopiloted;
    let input = if input.autopilot {
        // The player can still restart a demo run
        autopiloted = TickInput {
            restart: input.restart,
            ..autopilot_input(state)
        };
        &autopiloted
    } else {
        input
    };

    MODE_HANDLERS[state.mode.index()](state, input);
}

fn update_title(state: &mut GameState, input: &TickInput) {
    if input.start {
        state.mode = Mode::Game;
        state.events.push(GameEvent::GameStarted);
        log::info!("Game started (seed {})", state.seed);
    }
}

fn update_game(state: &mut GameState, input: &TickInput) {
    // Distance and difficulty ramp
    state.distance += state.speed.max(0.0) as u64;
    if state.distance > state.speed_increase_threshold {
        state.speed_increase_threshold = state.speed_increase_threshold.saturating_mul(2).max(1);
        state.speed += 1.0;
        state.events.push(GameEvent::SpeedIncreased { speed: state.speed });
        log::info!("Speed up to {} at {} m", state.speed, state.distance);
    }

    state.check_boost_expiry();

    move_ship(state, input.thrust);
    state.sync_shield();

    update_scrolling(state);

    let report = resolve_collisions(state);
    if report.asteroids_destroyed > 0 || report.stars_collected > 0 {
        log::debug!(
            "Frame {}: {} asteroids destroyed, {} stars collected",
            state.frame_count,
            report.asteroids_destroyed,
            report.stars_collected
        );
    }

    // Threshold spawns; each threshold moves on by a fixed interval
    if state.distance > state.spire_spawn_threshold {
        state.spawn_spire();
        state.spire_spawn_threshold += state.tuning.spire_interval;
    }
    if state.distance > state.asteroid_spawn_threshold {
        state.spawn_asteroid();
        state.asteroid_spawn_threshold += state.tuning.asteroid_interval;
    }
    if state.distance > state.star_spawn_threshold {
        state.spawn_star();
        state.star_spawn_threshold += state.tuning.star_interval;
    }

    let now = state.frame_count;
    for explosion in state.explosions.iter_mut() {
        explosion.update(now);
    }
    state.explosions.retain(|e| !e.expired);

    state.frame_count += 1;
}

fn update_game_over(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.reset();
        state.mode = Mode::Title;
        state.events.push(GameEvent::Restarted);
        log::info!("Restarted");
    }
}

/// Thrust, gravity, integrate, then tilt the nose with vertical speed
fn move_ship(state: &mut GameState, thrust: bool) {
    let ship = &mut state.ship;
    if thrust {
        ship.vel.y -= state.tuning.thrust;
    }
    ship.vel.y += state.tuning.gravity;
    ship.update();
    ship.rotation = ship.vel.y / SHIP_TILT_DIVISOR * std::f32::consts::FRAC_PI_2;
}

/// Move the ground, spires, asteroids and stars; drop anything that has
/// left the screen on the left
fn update_scrolling(state: &mut GameState) {
    let speed = state.speed;
    state.top_ground.update(speed);
    state.bottom_ground.update(speed);

    for spire in state.spires.iter_mut() {
        spire.vel.x = -speed;
        spire.update();
    }
    state.spires.retain(|s| s.pos.x > OUT_OF_BOUNDS_X);

    // Asteroids keep their own launch velocity
    for asteroid in state.asteroids.iter_mut() {
        asteroid.update();
    }
    state.asteroids.retain(|a| a.pos.x > OUT_OF_BOUNDS_X);

    for star in state.stars.iter_mut() {
        star.vel.x = -speed;
        star.update();
    }
    state.stars.retain(|s| s.pos.x > OUT_OF_BOUNDS_X);
}

/// Look this far ahead of the ship for something to dodge
const AUTOPILOT_LOOKAHEAD: f32 = 320.0;
/// Frames of vertical motion the autopilot predicts
const AUTOPILOT_PREDICT_FRAMES: f32 = 6.0;

/// Demo mode: start the run, then hold a height that clears the nearest
/// obstacle ahead. Stars are chased when nothing is in the way. A finished
/// run is left on the game over screen.
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.mode {
        Mode::Title => TickInput {
            start: true,
            ..Default::default()
        },
        Mode::GameOver => TickInput::default(),
        Mode::Game => {
            let ship = state.ship.bounds();
            let ceiling = state.atlas.height(crate::ImageId::Floor);
            let floor = SCREEN_HEIGHT - ceiling;
            let mid = (ceiling + floor) / 2.0;

            let ahead = |b: &super::collision::Aabb| {
                b.max.x > ship.min.x && b.min.x < ship.max.x + AUTOPILOT_LOOKAHEAD
            };

            let threat = state
                .spires
                .iter()
                .chain(state.asteroids.iter())
                .map(|s| s.bounds())
                .filter(|b| ahead(b))
                .min_by(|a, b| a.min.x.total_cmp(&b.min.x));

            let target = match threat {
                Some(obstacle) => {
                    let center = (obstacle.min.y + obstacle.max.y) / 2.0;
                    if center < mid {
                        (obstacle.max.y.max(ceiling) + floor) / 2.0
                    } else {
                        (ceiling + obstacle.min.y.min(floor)) / 2.0
                    }
                }
                None => state
                    .stars
                    .iter()
                    .map(|s| s.bounds())
                    .filter(|b| ahead(b))
                    .min_by(|a, b| a.min.x.total_cmp(&b.min.x))
                    .map_or(mid, |star| (star.min.y + star.max.y) / 2.0),
            };

            let predicted = state.ship.center().y + state.ship.vel.y * AUTOPILOT_PREDICT_FRAMES;
            TickInput {
                thrust: predicted > target,
                ..Default::default()
            }
        }
    }
}
