//! Game state and core simulation types
//!
//! Everything one run needs lives in `GameState`; the atlas and tuning it
//! was built with are owned copies, read-only once the game starts.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::factory::{SpriteFactory, TransientSprite};
use super::ground::{GroundSide, GroundStrip};
use super::sprite::Sprite;
use crate::assets::{Atlas, ImageId};
use crate::consts::*;
use crate::error::GameError;
use crate::tuning::Tuning;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Waiting for the start key
    #[default]
    Title,
    /// Active gameplay
    Game,
    /// Run ended, waiting for restart
    GameOver,
}

impl Mode {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Things that happened during a tick, for the host to log or show
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    ShipDestroyed { distance: u64 },
    AsteroidDestroyed { pos: Vec2 },
    StarCollected,
    BoostExpired,
    SpeedIncreased { speed: f32 },
    Restarted,
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "unseeded_rng")]
    rng: Pcg32,
    pub tuning: Tuning,
    pub atlas: Atlas,

    pub mode: Mode,
    pub ship: Sprite,
    /// Present only while boosting
    pub shield: Option<Sprite>,

    pub top_ground: GroundStrip,
    pub bottom_ground: GroundStrip,

    pub top_spire_factory: SpriteFactory,
    pub bottom_spire_factory: SpriteFactory,
    pub asteroid_factory: SpriteFactory,
    pub star_factory: SpriteFactory,

    pub spires: Vec<Sprite>,
    pub asteroids: Vec<Sprite>,
    pub stars: Vec<Sprite>,
    /// Short-lived explosions left by destroyed asteroids
    pub explosions: Vec<TransientSprite>,

    /// Distance travelled (the score)
    pub distance: u64,
    /// Scroll speed in pixels per frame
    pub speed: f32,
    /// Distance of the next speed increase
    pub speed_increase_threshold: u64,
    /// Speed added per star collected
    pub boost_factor: f32,
    pub boosting: bool,
    /// Speed the current boost has added so far
    pub boost_speed: f32,
    /// Frame the current boost started on
    pub last_boost_tick: u64,
    pub spire_spawn_threshold: u64,
    pub asteroid_spawn_threshold: u64,
    pub star_spawn_threshold: u64,
    /// Frames spent in Game mode this run
    pub frame_count: u64,

    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New game on the title screen with default tuning and bundled assets
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Atlas::builtin())
    }

    pub fn with_config(seed: u64, tuning: Tuning, atlas: Atlas) -> Self {
        let speed = tuning.initial_speed;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: Mode::Title,
            ship: Self::initial_ship(&atlas),
            shield: None,
            top_ground: GroundStrip::new(&atlas, GroundSide::Top, speed),
            bottom_ground: GroundStrip::new(&atlas, GroundSide::Bottom, speed),
            top_spire_factory: Self::top_spire_factory(),
            bottom_spire_factory: Self::bottom_spire_factory(&atlas),
            asteroid_factory: Self::field_factory(ImageId::ASTEROIDS),
            star_factory: Self::field_factory([ImageId::Star]),
            spires: Vec::new(),
            asteroids: Vec::new(),
            stars: Vec::new(),
            explosions: Vec::new(),
            distance: 0,
            speed,
            speed_increase_threshold: 0,
            boost_factor: 0.0,
            boosting: false,
            boost_speed: 0.0,
            last_boost_tick: 0,
            spire_spawn_threshold: 0,
            asteroid_spawn_threshold: 0,
            star_spawn_threshold: 0,
            frame_count: 0,
            events: Vec::new(),
            tuning,
            atlas,
        };
        state.reset();
        state
    }

    /// Restore a snapshot written with `serde_json`. The RNG is not part of
    /// the snapshot, so it is reseeded from the run seed and frame count.
    pub fn from_snapshot(json: &str) -> Result<Self, GameError> {
        let mut state: GameState = serde_json::from_str(json)?;
        state.rng = Pcg32::seed_from_u64(state.seed ^ state.frame_count);
        Ok(state)
    }

    /// Put every counter and collection back to its starting value.
    /// The mode is left alone.
    pub fn reset(&mut self) {
        let tuning = &self.tuning;
        self.ship = Self::initial_ship(&self.atlas);
        self.shield = None;

        self.distance = 0;
        self.frame_count = 0;
        self.boosting = false;
        self.boost_speed = 0.0;
        self.boost_factor = tuning.boost_factor;
        self.last_boost_tick = 0;
        self.speed = tuning.initial_speed;
        self.speed_increase_threshold = tuning.speed_increase_threshold;
        self.spire_spawn_threshold = tuning.spire_first;
        self.asteroid_spawn_threshold = tuning.asteroid_first;
        self.star_spawn_threshold = tuning.star_first;

        self.explosions.clear();
        self.spires.clear();
        self.asteroids.clear();
        self.stars.clear();

        self.top_ground = GroundStrip::new(&self.atlas, GroundSide::Top, self.speed);
        self.bottom_ground = GroundStrip::new(&self.atlas, GroundSide::Bottom, self.speed);
        self.top_spire_factory = Self::top_spire_factory();
        self.bottom_spire_factory = Self::bottom_spire_factory(&self.atlas);
        self.asteroid_factory = Self::field_factory(ImageId::ASTEROIDS);
        self.star_factory = Self::field_factory([ImageId::Star]);
    }

    fn initial_ship(atlas: &Atlas) -> Sprite {
        Sprite::new(
            atlas,
            ImageId::Ship,
            Vec2::new(SCREEN_WIDTH / 4.0, SCREEN_HEIGHT / 2.0),
        )
    }

    fn top_spire_factory() -> SpriteFactory {
        let x = SCREEN_WIDTH + 150.0;
        SpriteFactory::new([ImageId::SpireTop], x..=x, -200.0..=0.0)
    }

    fn bottom_spire_factory(atlas: &Atlas) -> SpriteFactory {
        let x = SCREEN_WIDTH + 150.0;
        let top = SCREEN_HEIGHT - atlas.height(ImageId::SpireBottom);
        SpriteFactory::new([ImageId::SpireBottom], x..=x, top..=top + 200.0)
    }

    /// Asteroids and stars enter anywhere between the floor and ceiling
    fn field_factory<const N: usize>(images: [ImageId; N]) -> SpriteFactory {
        let x = SCREEN_WIDTH + 100.0;
        SpriteFactory::new(images, x..=x, 100.0..=SCREEN_HEIGHT - 100.0)
    }

    /// Game time in seconds, derived from the frame counter
    pub fn game_time_secs(&self) -> f32 {
        self.frame_count as f32 / FRAMES_PER_SECOND as f32
    }

    /// Pick up a star: speed goes up by the boost factor and the boost
    /// timer restarts. Stars collected during a boost stack.
    pub fn collect_star(&mut self) {
        self.speed += self.boost_factor;
        self.boost_speed += self.boost_factor;
        self.boosting = true;
        self.last_boost_tick = self.frame_count;
        self.events.push(GameEvent::StarCollected);
        log::info!("Boost: speed {}", self.speed);
    }

    /// End the boost once it has run for longer than the boost duration,
    /// taking back everything it added
    pub fn check_boost_expiry(&mut self) {
        if !self.boosting {
            return;
        }
        let elapsed = self.frame_count.saturating_sub(self.last_boost_tick);
        if elapsed > self.tuning.boost_duration_ticks() {
            self.speed -= self.boost_speed;
            self.boost_speed = 0.0;
            self.boosting = false;
            self.events.push(GameEvent::BoostExpired);
            log::info!("Boost expired: speed {}", self.speed);
        }
    }

    /// Show the shield around the ship while boosting
    pub fn sync_shield(&mut self) {
        self.shield = if self.boosting {
            let pos = self.ship.pos + Vec2::new(SHIELD_OFFSET_X, SHIELD_OFFSET_Y);
            Some(Sprite::new(&self.atlas, ImageId::Shield, pos))
        } else {
            None
        };
    }

    /// Leave an explosion where an asteroid was destroyed
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        let rotation = self.rng.random::<f32>() * std::f32::consts::PI;
        let sprite = Sprite::new(&self.atlas, ImageId::AsteroidExplosion, pos)
            .with_velocity(Vec2::new(-self.speed, 0.0))
            .with_rotation(rotation);
        let lifetime = self.tuning.explosion_lifetime_ticks();
        self.explosions
            .push(TransientSprite::new(sprite, self.frame_count, lifetime));
        self.events.push(GameEvent::AsteroidDestroyed { pos });
    }

    /// Spawn a spire at the top or bottom, chosen at random
    pub fn spawn_spire(&mut self) {
        let factory = if self.rng.random_bool(0.5) {
            &self.top_spire_factory
        } else {
            &self.bottom_spire_factory
        };
        let spire = factory.generate(&self.atlas, &mut self.rng);
        log::debug!("Spire at y={} (distance {})", spire.pos.y, self.distance);
        self.spires.push(spire);
    }

    /// Spawn an asteroid with a random leftward launch impulse
    pub fn spawn_asteroid(&mut self) {
        let mut asteroid = self.asteroid_factory.generate(&self.atlas, &mut self.rng);
        let t = &self.tuning;
        let dx = random_offset(&mut self.rng, t.asteroid_impulse_x_min, t.asteroid_impulse_x_span);
        let dy = random_offset(&mut self.rng, t.asteroid_impulse_y_min, t.asteroid_impulse_y_span);
        asteroid.apply_impulse(dx, dy);
        log::debug!("Asteroid at y={} vel={}", asteroid.pos.y, asteroid.vel);
        self.asteroids.push(asteroid);
    }

    pub fn spawn_star(&mut self) {
        let star = self.star_factory.generate(&self.atlas, &mut self.rng);
        log::debug!("Star at y={} (distance {})", star.pos.y, self.distance);
        self.stars.push(star);
    }

    /// End the run. Returns false if the run had already ended.
    pub fn end_run(&mut self) -> bool {
        if self.mode != Mode::Game {
            return false;
        }
        self.mode = Mode::GameOver;
        self.events.push(GameEvent::ShipDestroyed {
            distance: self.distance,
        });
        log::info!("Ship destroyed at distance {} m", self.distance);
        true
    }

    /// Number of live sprites, ignoring the ground strips
    pub fn entity_count(&self) -> usize {
        self.spires.len() + self.asteroids.len() + self.stars.len() + self.explosions.len()
    }
}

/// Integer offset in [min, min + span), or `min` if the span is empty
fn random_offset<R: Rng + ?Sized>(rng: &mut R, min: i32, span: i32) -> f32 {
    if span <= 0 {
        min as f32
    } else {
        (rng.random_range(0..span) + min) as f32
    }
}
