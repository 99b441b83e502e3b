//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here so a run can be tuned from
//! a JSON file without touching the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, read_to_string};
use crate::seconds_to_ticks;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to the ship every frame
    pub gravity: f32,
    /// Upward acceleration while thrust is held
    pub thrust: f32,
    /// Scroll speed at the start of a run (pixels/frame)
    pub initial_speed: f32,
    /// Speed added by collecting a star
    pub boost_factor: f32,
    /// How long a boost lasts
    pub boost_seconds: f32,
    /// Distance of the first speed increase (doubles after each one)
    pub speed_increase_threshold: u64,

    /// Distance of the first spire, then spacing between spires
    pub spire_first: u64,
    pub spire_interval: u64,
    /// Distance of the first asteroid, then spacing between asteroids
    pub asteroid_first: u64,
    pub asteroid_interval: u64,
    /// Distance of the first star, then spacing between stars
    pub star_first: u64,
    pub star_interval: u64,

    /// Asteroid launch impulse: x in [min, min + span), y likewise
    pub asteroid_impulse_x_min: i32,
    pub asteroid_impulse_x_span: i32,
    pub asteroid_impulse_y_min: i32,
    pub asteroid_impulse_y_span: i32,

    /// Lifetime of an asteroid explosion
    pub explosion_millis: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.25,
            thrust: 0.5,
            initial_speed: 1.0,
            boost_factor: 2.0,
            boost_seconds: 5.0,
            speed_increase_threshold: 500,

            spire_first: 600,
            spire_interval: 600,
            asteroid_first: 200,
            asteroid_interval: 200,
            star_first: 50,
            star_interval: 2000,

            asteroid_impulse_x_min: -15,
            asteroid_impulse_x_span: 10,
            asteroid_impulse_y_min: -3,
            asteroid_impulse_y_span: 6,

            explosion_millis: 100,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Boost duration in frames
    pub fn boost_duration_ticks(&self) -> u64 {
        seconds_to_ticks(self.boost_seconds)
    }

    /// Explosion lifetime in frames
    pub fn explosion_lifetime_ticks(&self) -> u64 {
        seconds_to_ticks(self.explosion_millis as f32 / 1000.0)
    }
}
