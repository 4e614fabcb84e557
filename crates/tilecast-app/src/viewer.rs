//! Scripted viewer that circles the subject, standing in for a tracked camera.

use glam::{Quat, Vec3};

/// A viewer walking around the subject at a constant angular step.
///
/// At angle 0 the viewer stands in front of the subject and looks along -Z,
/// straight at the front tile. Positive angles rotate about +Y.
#[derive(Clone, Debug)]
pub struct OrbitingViewer {
    angle_deg: f32,
    step_deg: f32,
}

impl OrbitingViewer {
    /// Start at `start_deg` and advance `step_deg` per tick.
    pub fn new(start_deg: f32, step_deg: f32) -> Self {
        Self {
            angle_deg: start_deg,
            step_deg,
        }
    }

    /// Current gaze direction (unit length).
    pub fn gaze(&self) -> Vec3 {
        Quat::from_rotation_y(self.angle_deg.to_radians()) * Vec3::NEG_Z
    }

    /// Current angle in degrees, wrapped into `[0, 360)`.
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg.rem_euclid(360.0)
    }

    /// Return the current gaze and advance one step.
    pub fn advance(&mut self) -> Vec3 {
        let gaze = self.gaze();
        self.angle_deg = (self.angle_deg + self.step_deg).rem_euclid(360.0);
        gaze
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a} != {b}");
    }

    #[test]
    fn test_starts_facing_front() {
        assert_close(OrbitingViewer::new(0.0, 10.0).gaze(), Vec3::NEG_Z);
    }

    #[test]
    fn test_quarter_turns() {
        let mut viewer = OrbitingViewer::new(0.0, 90.0);
        assert_close(viewer.advance(), Vec3::NEG_Z);
        assert_close(viewer.advance(), Vec3::NEG_X);
        assert_close(viewer.advance(), Vec3::Z);
        assert_close(viewer.advance(), Vec3::X);
        assert_close(viewer.advance(), Vec3::NEG_Z);
    }

    #[test]
    fn test_angle_wraps() {
        let mut viewer = OrbitingViewer::new(350.0, 20.0);
        viewer.advance();
        assert!((viewer.angle_deg() - 10.0).abs() < 1e-4);
    }
}
