//! First-person camera state machine
//!
//! The camera is a plain value: each frame the loop feeds it one input
//! symbol and the elapsed time, and gets the next pose back.

use crate::math::{direction, rotation_x, rotation_z, truncate, Vec3};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

/// Margin kept between the pitch and its hard limits
pub const PITCH_EPSILON: f64 = 0.01;

/// Lowest allowed pitch (looking down)
pub const PITCH_MIN: f64 = -FRAC_PI_3 + PITCH_EPSILON;

/// Highest allowed pitch (looking up). Stays short of straight up so the
/// view basis never degenerates.
pub const PITCH_MAX: f64 = FRAC_PI_2 - PITCH_EPSILON;

/// Input symbols understood by the render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No key this frame
    None,
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Rise,
    Sink,
    YawDecrease,
    YawIncrease,
    PitchDecrease,
    PitchIncrease,
    Reset,
    Pause,
    Quit,
}

impl Action {
    /// Map a plain key character to its action
    pub fn from_char(c: char) -> Self {
        match c {
            'w' => Action::Forward,
            's' => Action::Back,
            'a' => Action::StrafeLeft,
            'd' => Action::StrafeRight,
            'q' => Action::Rise,
            'e' => Action::Sink,
            'j' => Action::YawDecrease,
            'l' => Action::YawIncrease,
            'i' => Action::PitchDecrease,
            'k' => Action::PitchIncrease,
            'r' => Action::Reset,
            ' ' => Action::Pause,
            _ => Action::None,
        }
    }
}

/// Movement and turning rates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSpeeds {
    /// Units per second for planar moves, units per press for vertical moves
    pub move_speed: f64,
    /// Radians per press
    pub rot_speed: f64,
}

impl Default for CameraSpeeds {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rot_speed: 0.1,
        }
    }
}

/// Look direction for a yaw and pitch: +Y tilted by pitch about X, then
/// turned by yaw about Z.
pub fn forward_vector(yaw: f64, pitch: f64) -> Vec3 {
    let base = direction(Vec3::new(0.0, 1.0, 0.0));
    truncate(rotation_z(yaw) * (rotation_x(pitch) * base))
}

pub fn clamp_pitch(pitch: f64) -> f64 {
    pitch.clamp(PITCH_MIN, PITCH_MAX)
}

/// Camera pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -10.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraState {
    /// Current look direction, including pitch
    pub fn forward(&self) -> Vec3 {
        forward_vector(self.yaw, self.pitch)
    }

    /// Produce the pose after one frame of `action` lasting `dt` seconds
    pub fn advance(self, action: Action, dt: f64, speeds: &CameraSpeeds) -> Self {
        let mut next = self;

        // Planar moves ignore pitch
        let forward_dir = forward_vector(self.yaw, 0.0).normalize();
        let right_dir = forward_vector(self.yaw + FRAC_PI_2, 0.0).normalize();
        let step = speeds.move_speed * dt;

        match action {
            Action::Forward => next.position += forward_dir * step,
            Action::Back => next.position -= forward_dir * step,
            Action::StrafeLeft => next.position += right_dir * step,
            Action::StrafeRight => next.position -= right_dir * step,
            // Vertical moves are per press, not per second
            Action::Rise => next.position.z += speeds.move_speed,
            Action::Sink => next.position.z -= speeds.move_speed,
            Action::YawDecrease => next.yaw -= speeds.rot_speed,
            Action::YawIncrease => next.yaw += speeds.rot_speed,
            Action::PitchDecrease => next.pitch -= speeds.rot_speed,
            Action::PitchIncrease => next.pitch += speeds.rot_speed,
            Action::None | Action::Reset | Action::Pause | Action::Quit => {}
        }

        next.pitch = clamp_pitch(next.pitch);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn speeds(move_speed: f64, rot_speed: f64) -> CameraSpeeds {
        CameraSpeeds { move_speed, rot_speed }
    }

    #[test]
    fn test_default_pose() {
        let cam = CameraState::default();
        assert_eq!(cam.position, Vec3::new(0.0, -10.0, 0.0));
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.pitch, 0.0);
        assert!((cam.forward() - Vec3::new(0.0, 1.0, 0.0)).magnitude() < EPS);
    }

    #[test]
    fn test_forward_moves_exactly_move_speed_times_dt() {
        for pitch in [PITCH_MIN, -0.5, 0.0, 0.7, PITCH_MAX] {
            let cam = CameraState { pitch, yaw: 0.4, ..CameraState::default() };
            let next = cam.advance(Action::Forward, 1.0, &speeds(100.0, 0.1));
            let moved = next.position - cam.position;
            assert!((moved.magnitude() - 100.0).abs() < 1e-9);
            let expected = forward_vector(0.4, 0.0).normalize() * 100.0;
            assert!((moved - expected).magnitude() < 1e-9);
            assert_eq!(moved.z, 0.0);
        }
    }

    #[test]
    fn test_back_reverses_forward() {
        let s = speeds(3.0, 0.1);
        let cam = CameraState::default();
        let there = cam.advance(Action::Forward, 0.5, &s);
        let back = there.advance(Action::Back, 0.5, &s);
        assert!((back.position - cam.position).magnitude() < EPS);
    }

    #[test]
    fn test_strafe_is_perpendicular_to_forward() {
        let cam = CameraState { yaw: 1.1, ..CameraState::default() };
        let next = cam.advance(Action::StrafeLeft, 0.25, &speeds(8.0, 0.1));
        let moved = next.position - cam.position;
        assert!((moved.magnitude() - 2.0).abs() < EPS);
        assert!(moved.dot(&forward_vector(1.1, 0.0)).abs() < EPS);

        // At yaw 0, "a" heads toward -X and "d" toward +X
        let left = CameraState::default().advance(Action::StrafeLeft, 1.0, &speeds(1.0, 0.1));
        assert!((left.position.x + 1.0).abs() < EPS);
        let right = CameraState::default().advance(Action::StrafeRight, 1.0, &speeds(1.0, 0.1));
        assert!((right.position.x - 1.0).abs() < EPS);
    }

    #[test]
    fn test_vertical_move_ignores_dt() {
        let cam = CameraState::default();
        let up = cam.advance(Action::Rise, 0.001, &speeds(4.0, 0.1));
        assert_eq!(up.position.z, 4.0);
        let down = cam.advance(Action::Sink, 10.0, &speeds(4.0, 0.1));
        assert_eq!(down.position.z, -4.0);
    }

    #[test]
    fn test_yaw_keys() {
        let s = speeds(1.0, 0.25);
        let cam = CameraState::default();
        assert_eq!(cam.advance(Action::YawDecrease, 1.0, &s).yaw, -0.25);
        assert_eq!(cam.advance(Action::YawIncrease, 1.0, &s).yaw, 0.25);
    }

    #[test]
    fn test_pitch_keys() {
        let s = speeds(1.0, 0.25);
        let cam = CameraState::default();
        assert_eq!(cam.advance(Action::PitchDecrease, 1.0, &s).pitch, -0.25);
        assert_eq!(cam.advance(Action::PitchIncrease, 1.0, &s).pitch, 0.25);
    }

    #[test]
    fn test_pitch_stays_clamped() {
        let s = speeds(1.0, 0.37);
        let mut cam = CameraState::default();
        let script = [
            Action::PitchIncrease, Action::PitchIncrease, Action::PitchIncrease,
            Action::PitchIncrease, Action::PitchIncrease, Action::PitchIncrease,
            Action::PitchDecrease, Action::PitchDecrease, Action::PitchDecrease,
            Action::PitchDecrease, Action::PitchDecrease, Action::PitchDecrease,
            Action::PitchDecrease, Action::PitchDecrease, Action::PitchIncrease,
        ];
        for action in script {
            cam = cam.advance(action, 0.016, &s);
            assert!(cam.pitch >= PITCH_MIN && cam.pitch <= PITCH_MAX, "{}", cam.pitch);
        }
        let top = (0..20).fold(CameraState::default(), |c, _| c.advance(Action::PitchIncrease, 0.0, &s));
        assert_eq!(top.pitch, PITCH_MAX);
        let bottom = (0..20).fold(CameraState::default(), |c, _| c.advance(Action::PitchDecrease, 0.0, &s));
        assert_eq!(bottom.pitch, PITCH_MIN);
    }

    #[test]
    fn test_other_symbols_are_identity() {
        let cam = CameraState { position: Vec3::new(1.0, 2.0, 3.0), yaw: 0.3, pitch: -0.2 };
        for action in [Action::None, Action::Reset, Action::Pause, Action::Quit] {
            assert_eq!(cam.advance(action, 1.0, &CameraSpeeds::default()), cam);
        }
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Action::from_char('w'), Action::Forward);
        assert_eq!(Action::from_char('e'), Action::Sink);
        assert_eq!(Action::from_char('j'), Action::YawDecrease);
        assert_eq!(Action::from_char('k'), Action::PitchIncrease);
        assert_eq!(Action::from_char('$'), Action::None);
        assert_eq!(Action::from_char('W'), Action::None);
    }

    #[test]
    fn test_forward_vector_pitch_tilts_toward_z() {
        let up = forward_vector(0.0, 0.5);
        assert!((up - Vec3::new(0.0, 0.5f64.cos(), 0.5f64.sin())).magnitude() < EPS);
        let turned = forward_vector(FRAC_PI_2, 0.0);
        assert!((turned - Vec3::new(-1.0, 0.0, 0.0)).magnitude() < EPS);
    }
}
