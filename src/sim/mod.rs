//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod factory;
pub mod ground;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionReport, resolve_collisions};
pub use factory::{SpriteFactory, TransientSprite};
pub use ground::{GroundSide, GroundStrip};
pub use sprite::Sprite;
pub use state::{GameEvent, GameState, Mode};
pub use tick::{TickInput, autopilot_input, tick};
