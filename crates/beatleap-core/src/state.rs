//! Plain state types shared by the engine components and the snapshot.
//!
//! These types avoid platform-specific APIs. A renderer consumes them
//! read-only to build camera matrices and place the ball.

use glam::{Mat4, Vec3};
use serde::Serialize;

use crate::constants::{rest_position, CAMERA_FOVY_DEGREES, CAMERA_ZFAR, CAMERA_ZNEAR};

/// Phase of the ball's jump cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum MotionMode {
    #[default]
    Grounded,
    Jumping,
    Landing,
}

/// The single ball, owned and mutated by the motion state machine.
///
/// `jump_progress` runs 0..1 across one jump and stays at 1 until the next
/// jump begins; `landing_timer` runs 1..0 across the landing bounce.
#[derive(Clone, Debug, PartialEq)]
pub struct BallState {
    pub position: Vec3,
    pub scale: Vec3,
    pub mode: MotionMode,
    pub jump_progress: f32,
    pub landing_timer: f32,
    pub current_target_index: usize,
    pub jump_intensity: f32,
    pub jump_origin: Vec3,
}

impl Default for BallState {
    fn default() -> Self {
        Self {
            position: rest_position(),
            scale: Vec3::ONE,
            mode: MotionMode::Grounded,
            jump_progress: 0.0,
            landing_timer: 0.0,
            current_target_index: 0,
            jump_intensity: 1.0,
            jump_origin: rest_position(),
        }
    }
}

/// Volume-preserving scale for a given vertical stretch.
#[inline]
pub fn squash_stretch_scale(vertical: f32) -> Vec3 {
    let lateral = 1.0 / vertical.max(f32::EPSILON).sqrt();
    Vec3::new(lateral, vertical, lateral)
}

/// Right-handed follow camera.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CameraState {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}

impl CameraState {
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, self.up)
    }

    /// Compute the clip-space projection matrix for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            CAMERA_FOVY_DEGREES.to_radians(),
            aspect,
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        )
    }
}
