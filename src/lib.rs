//! Galactic Asteroid Belt - a side-scrolling arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `ui`: Title / score / game over text overlay
//! - `assets`: Image atlas passed into the simulation at construction
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use assets::{Atlas, ImageId};
pub use error::GameError;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical screen size in pixels (y grows downward)
    pub const SCREEN_WIDTH: f32 = 1028.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Fixed simulation rate
    pub const FRAMES_PER_SECOND: u64 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FRAMES_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Sprites at or left of this x are destroyed
    pub const OUT_OF_BOUNDS_X: f32 = -200.0;

    /// Shield is drawn offset from the ship's top-left corner
    pub const SHIELD_OFFSET_X: f32 = -17.0;
    pub const SHIELD_OFFSET_Y: f32 = -15.0;

    /// Ship tilt: rotation = vel.y / SHIP_TILT_DIVISOR * π/2
    pub const SHIP_TILT_DIVISOR: f32 = 96.0;

    /// Overlay text sizes
    pub const FONT_SIZE: f32 = 24.0;
    pub const TITLE_FONT_SIZE: f32 = FONT_SIZE * 1.5;
}

/// Convert a duration in seconds to whole simulation frames
#[inline]
pub fn seconds_to_ticks(seconds: f32) -> u64 {
    (seconds * consts::FRAMES_PER_SECOND as f32).round().max(0.0) as u64
}
