//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ball;
pub mod entity;
pub mod player;
pub mod state;
pub mod tick;
pub mod transform;

pub use ball::{Ball, Outcome, Side};
pub use entity::{Entity, MaterialId, MeshId};
pub use player::Player;
pub use state::{GameEvent, GameState, MatchScore, score_title};
pub use tick::{TickInput, tick};
pub use transform::Transform;
