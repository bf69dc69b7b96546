//! Entity transforms with lazily cached world matrices
//!
//! Every renderable thing in the game owns one of these. Mutators only touch
//! the position/rotation/scale fields and flag the cached matrices dirty; the
//! matrix getters recompute on demand so a burst of per-frame mutations costs
//! one matrix build at draw time.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, intrinsic Euler rotation (pitch/yaw/roll) and scale, plus the
/// derived world matrix and its inverse-transpose (for transforming normals
/// under non-uniform scale).
#[derive(Debug, Clone)]
pub struct Transform {
    position: Vec3,
    pitch_yaw_roll: Vec3,
    scale: Vec3,
    world: Mat4,
    world_inverse_transpose: Mat4,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            pitch_yaw_roll: Vec3::ZERO,
            scale: Vec3::ONE,
            world: Mat4::IDENTITY,
            world_inverse_transpose: Mat4::IDENTITY,
            dirty: false,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    pub fn set_pitch_yaw_roll(&mut self, pitch_yaw_roll: Vec3) {
        self.pitch_yaw_roll = pitch_yaw_roll;
        self.dirty = true;
    }

    /// Shift the position in world space.
    pub fn move_absolute(&mut self, offset: Vec3) {
        self.position += offset;
        self.dirty = true;
    }

    /// Shift the position in local space: the offset is rotated by the
    /// current orientation before being applied.
    pub fn move_relative(&mut self, offset: Vec3) {
        self.position += self.rotation() * offset;
        self.dirty = true;
    }

    /// Accumulate Euler angles additively. Gimbal lock is a known,
    /// accepted limitation.
    pub fn rotate(&mut self, pitch_yaw_roll: Vec3) {
        self.pitch_yaw_roll += pitch_yaw_roll;
        self.dirty = true;
    }

    /// Multiply the existing scale componentwise.
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.dirty = true;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn pitch_yaw_roll(&self) -> Vec3 {
        self.pitch_yaw_roll
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Local +X rotated into world space.
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Local +Y rotated into world space.
    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Local +Z rotated into world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    pub fn world_matrix(&mut self) -> Mat4 {
        if self.dirty {
            self.update_matrices();
        }
        self.world
    }

    pub fn world_inverse_transpose(&mut self) -> Mat4 {
        if self.dirty {
            self.update_matrices();
        }
        self.world_inverse_transpose
    }

    // Yaw, then pitch, then roll applied innermost - matches the DirectX
    // roll/pitch/yaw convention the shaders were built against.
    fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.pitch_yaw_roll.y,
            self.pitch_yaw_roll.x,
            self.pitch_yaw_roll.z,
        )
    }

    fn update_matrices(&mut self) {
        self.world = Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.position);
        self.world_inverse_transpose = self.world.inverse().transpose();
        self.dirty = false;
    }
}
