use glam::Vec3;

use crate::constants::{
    CAMERA_FORWARD_SMOOTHING, CAMERA_LATERAL_SMOOTHING, CAMERA_LOOK_AHEAD, CAMERA_LOOK_HEIGHT,
    CAMERA_OFFSET,
};
use crate::state::CameraState;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Follow camera trailing behind and above the ball.
///
/// Forward (Z) tracking is snappier than lateral (X) tracking; height is
/// fixed. The look-at point sits ahead of the ball along the travel axis.
pub struct CameraController {
    state: CameraState,
}

impl CameraController {
    pub fn new(ball_position: Vec3) -> Self {
        Self {
            state: CameraState {
                eye: Self::desired_eye(ball_position),
                look_at: Self::look_at_for(ball_position),
                up: Vec3::Y,
            },
        }
    }

    pub fn desired_eye(ball_position: Vec3) -> Vec3 {
        Vec3::new(
            ball_position.x + CAMERA_OFFSET.x,
            CAMERA_OFFSET.y,
            ball_position.z + CAMERA_OFFSET.z,
        )
    }

    pub fn look_at_for(ball_position: Vec3) -> Vec3 {
        Vec3::new(
            ball_position.x,
            CAMERA_LOOK_HEIGHT,
            ball_position.z - CAMERA_LOOK_AHEAD,
        )
    }

    /// One tick of exponential smoothing toward the desired pose.
    pub fn update(&mut self, ball_position: Vec3) {
        let desired = Self::desired_eye(ball_position);
        let eye = &mut self.state.eye;
        eye.z = lerp(eye.z, desired.z, CAMERA_FORWARD_SMOOTHING);
        eye.x = lerp(eye.x, desired.x, CAMERA_LATERAL_SMOOTHING);
        eye.y = desired.y;
        self.state.look_at = Self::look_at_for(ball_position);
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }
}
