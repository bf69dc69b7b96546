//! Renderable entities
//!
//! An entity is one transform paired with non-owning mesh and material
//! handles. The handles are fixed at construction; only the transform
//! mutates over the entity's life. The actual mesh and material data live
//! on the renderer's side of the [`DrawContext`] boundary.

use crate::camera::Camera;
use crate::render::{DrawCall, DrawContext};

use super::transform::Transform;

/// Opaque handle to a mesh owned by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Opaque handle to a material owned by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

#[derive(Debug, Clone)]
pub struct Entity {
    transform: Transform,
    mesh: MeshId,
    material: MaterialId,
}

impl Entity {
    pub fn new(mesh: MeshId, material: MaterialId) -> Self {
        Self {
            transform: Transform::new(),
            mesh,
            material,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Push this entity's matrices and resource handles to the renderer.
    /// Needs `&mut self` because reading the world matrix may recompute the
    /// lazy cache.
    pub fn draw(&mut self, ctx: &mut dyn DrawContext, camera: &Camera) {
        let world = self.transform.world_matrix();
        let world_inverse_transpose = self.transform.world_inverse_transpose();
        ctx.draw(DrawCall::new(
            world,
            world_inverse_transpose,
            camera,
            self.mesh,
            self.material,
        ));
    }
}
