//! Space Tennis - a tennis match floating in space
//!
//! Core modules:
//! - `sim`: Deterministic simulation (transforms, ball physics, players, scoring)
//! - `camera`: Follow camera producing the view/projection matrices for draw calls
//! - `render`: Boundary contract the external renderer implements
//! - `settings`: Runtime configuration

pub mod camera;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Court dimensions - the singles court the ball must land in
    pub const COURT_HALF_WIDTH: f32 = 8.0;
    pub const COURT_HALF_HEIGHT: f32 = 14.0;
    /// Playable bounding area around the court (walls the ball bounces off)
    pub const AREA_HALF_WIDTH: f32 = 20.0;
    pub const AREA_HALF_HEIGHT: f32 = 17.0;
    /// Landing further than this outside the court lines is out
    pub const OUT_BUFFER: f32 = 1.0;

    /// Net, centered on the z = 0 line
    pub const NET_TOP_Y: f32 = 3.0;
    pub const NET_HALF_DEPTH: f32 = 0.3;
    /// Players may not walk closer to the net than this
    pub const NET_STANDOFF: f32 = 1.0;

    /// Ball defaults
    pub const BALL_FLOOR_Y: f32 = 0.5;
    pub const GRAVITY: f32 = 9.8;
    /// Serve placement relative to the server and its launch speed
    pub const SERVE_HEIGHT: f32 = 1.5;
    pub const SERVE_REACH: f32 = 1.0;
    pub const SERVE_SPEED: f32 = 9.0;

    /// Player movement
    pub const PLAYER_ACCEL: f32 = 90.0;
    pub const PLAYER_MAX_SPEED: f32 = 13.0;
    /// Strafing is slower while winding up a swing
    pub const PLAYER_SWING_MAX_SPEED: f32 = 6.5;
    /// Speed shed per frame while grounded
    pub const GROUND_FRICTION: f32 = 0.7;
    pub const PLAYER_MIN_Y: f32 = 1.0;
    pub const JUMP_SPEED: f32 = 8.0;
    /// Gravity multiplier while the float key is held (variable jump height)
    pub const FLOAT_GRAVITY_SCALE: f32 = 0.45;

    /// Racket swing
    pub const SWING_COOLDOWN: f32 = 0.5;
    pub const SWING_REACH_X: f32 = 1.5;
    pub const SWING_REACH_Z: f32 = 0.8;
    pub const SWING_RADIUS_SQ: f32 = 4.0;
    pub const GROUNDSTROKE_VY: f32 = 8.0;
    pub const GROUNDSTROKE_VZ: f32 = 13.0;
    /// Spike launch shape: flattens and deepens with the player's height
    pub const SPIKE_BASE_VY: f32 = 10.0;
    pub const SPIKE_BASE_VZ: f32 = 13.0;
    /// Sideways push added when aiming left/right during a swing
    pub const AIM_NUDGE: f32 = 3.0;

    /// Racket sub-entity offsets from the body
    pub const RACKET_HANDLE_X: f32 = 0.9;
    pub const RACKET_HEAD_X: f32 = 1.5;

    /// Enemy AI
    pub const ENEMY_SPEED: f32 = 8.0;
    pub const ENEMY_DEADZONE: f32 = 1.0;
    pub const ENEMY_JUMP_DEPTH: f32 = 4.0;
    pub const ENEMY_JUMP_MIN_Y: f32 = 3.0;
    pub const ENEMY_REST_Y: f32 = 1.5;
    pub const ENEMY_HIT_DEPTH: f32 = 2.0;
    pub const ENEMY_HIT_X: f32 = 1.0;
    pub const ENEMY_HIT_Y: f32 = 2.0;
    pub const ENEMY_RETURN_VY: f32 = 8.0;
    pub const ENEMY_RETURN_VZ: f32 = 13.0;

    /// Follow camera
    pub const CAMERA_HEIGHT: f32 = 15.0;
    pub const CAMERA_BACK: f32 = 3.5;
    pub const CAMERA_PITCH: f32 = 0.6;
}

/// Rescale `v` to the given magnitude, keeping its direction.
///
/// A zero vector has no direction to scale along and is returned unchanged.
/// A negative `length` flips the vector.
#[inline]
pub fn set_length(v: Vec3, length: f32) -> Vec3 {
    let old = v.length();
    if old == 0.0 {
        return v;
    }
    v / old * length
}

/// Extend `v` by `length` along its current direction (shorten when negative).
#[inline]
pub fn add_length(v: Vec3, length: f32) -> Vec3 {
    v + set_length(v, length)
}
