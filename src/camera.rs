//! Follow camera
//!
//! Owns a [`Transform`] like any entity, but derives view and projection
//! matrices instead of a world matrix. The shader pipeline is left-handed,
//! so the `_lh` matrix constructors are used throughout.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::consts::{CAMERA_BACK, CAMERA_HEIGHT, CAMERA_PITCH};
use crate::sim::Transform;

#[derive(Debug, Clone)]
pub struct Camera {
    transform: Transform,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(aspect_ratio: f32, position: Vec3) -> Self {
        let mut transform = Transform::new();
        transform.set_position(position);
        transform.set_pitch_yaw_roll(Vec3::new(CAMERA_PITCH, 0.0, 0.0));

        let mut camera = Self {
            transform,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix(aspect_ratio);
        camera
    }

    /// Track the player from a fixed offset, looking down the court.
    pub fn follow(&mut self, player_position: Vec3) {
        self.transform.set_position(Vec3::new(
            player_position.x,
            CAMERA_HEIGHT,
            player_position.z - CAMERA_BACK,
        ));
        self.update_view_matrix();
    }

    pub fn update_view_matrix(&mut self) {
        self.view = Mat4::look_to_lh(
            self.transform.position(),
            self.transform.forward(),
            Vec3::Y,
        );
    }

    pub fn update_projection_matrix(&mut self, aspect_ratio: f32) {
        self.projection = Mat4::perspective_lh(FRAC_PI_2, aspect_ratio, 0.1, 1000.0);
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}
