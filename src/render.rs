//! Renderer boundary
//!
//! The simulation never talks to a graphics API. Entities flatten themselves
//! into [`DrawCall`]s - matrices plus opaque resource handles - and push them
//! through whatever [`DrawContext`] the embedder supplies. Nothing flows back.

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::sim::{MaterialId, MeshId};

/// Everything the external renderer needs to issue one mesh draw.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    pub world: Mat4,
    pub world_inverse_transpose: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub mesh: MeshId,
    pub material: MaterialId,
}

/// Implemented by the external renderer. Draws are fire-and-forget; failures
/// are the rendering layer's concern.
pub trait DrawContext {
    fn draw(&mut self, call: DrawCall);
}

/// Discards every draw call. Used by the headless demo binary and tests.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub draws: usize,
}

impl DrawContext for NullRenderer {
    fn draw(&mut self, _call: DrawCall) {
        self.draws += 1;
    }
}

impl DrawCall {
    pub fn new(
        world: Mat4,
        world_inverse_transpose: Mat4,
        camera: &Camera,
        mesh: MeshId,
        material: MaterialId,
    ) -> Self {
        Self {
            world,
            world_inverse_transpose,
            view: camera.view(),
            projection: camera.projection(),
            camera_position: camera.position(),
            mesh,
            material,
        }
    }
}
