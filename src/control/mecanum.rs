//! Mecanum wheel kinematics
//!
//! Maps between a body-frame velocity command (vx forward, vy left, wz
//! counter-clockwise) and the four wheel shaft rates. Wheel order is
//! front-left, front-right, rear-left, rear-right.

use serde::{Deserialize, Serialize};

/// Chassis geometry for the kinematic maps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MecanumGeometry {
    /// Half wheelbase (m), chassis center to axle
    pub lx: f32,
    /// Half track (m), chassis center to wheel contact
    pub ly: f32,
    /// Wheel radius (m)
    pub wheel_radius: f32,
}

impl MecanumGeometry {
    /// Inverse kinematics: body velocity to wheel rates (rad/s)
    pub fn inverse(&self, vx: f32, vy: f32, wz: f32) -> [f32; 4] {
        let k = (self.lx + self.ly) * wz;
        let r = self.wheel_radius;
        [
            (vx - vy - k) / r, // front-left
            (vx + vy + k) / r, // front-right
            (vx + vy - k) / r, // rear-left
            (vx - vy + k) / r, // rear-right
        ]
    }

    /// Forward kinematics: wheel rates (rad/s) to body velocity
    pub fn forward(&self, w: &[f32; 4]) -> (f32, f32, f32) {
        let r = self.wheel_radius;
        let vx = (w[0] + w[1] + w[2] + w[3]) * r / 4.0;
        let vy = (-w[0] + w[1] + w[2] - w[3]) * r / 4.0;
        let wz = (-w[0] + w[1] - w[2] + w[3]) * r / (4.0 * (self.lx + self.ly));
        (vx, vy, wz)
    }
}

impl Default for MecanumGeometry {
    fn default() -> Self {
        Self {
            lx: 0.20,
            ly: 0.22,
            wheel_radius: 0.076,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> MecanumGeometry {
        MecanumGeometry {
            lx: 0.2,
            ly: 0.25,
            wheel_radius: 0.05,
        }
    }

    #[test]
    fn test_pure_forward_drives_all_wheels_equally() {
        let w = geometry().inverse(1.0, 0.0, 0.0);
        assert_eq!(w[0], w[1]);
        assert_eq!(w[1], w[2]);
        assert_eq!(w[2], w[3]);
        assert!(w[0] > 0.0);
    }

    #[test]
    fn test_pure_strafe_is_antisymmetric() {
        let w = geometry().inverse(0.0, 1.0, 0.0);
        assert_eq!(w[0], -w[1]);
        assert_eq!(w[0], -w[2]);
        assert_eq!(w[0], w[3]);
    }

    #[test]
    fn test_pure_rotation_splits_sides() {
        let w = geometry().inverse(0.0, 0.0, 1.0);
        // Left wheels reverse, right wheels forward for CCW
        assert!(w[0] < 0.0 && w[2] < 0.0);
        assert!(w[1] > 0.0 && w[3] > 0.0);
    }

    #[test]
    fn test_forward_inverts_inverse() {
        let g = geometry();
        let cases = [(0.8, -0.3, 0.5), (0.0, 0.0, 0.0), (-1.2, 0.4, -2.0)];
        for (vx, vy, wz) in cases {
            let (bx, by, bz) = g.forward(&g.inverse(vx, vy, wz));
            assert!((bx - vx).abs() < 1e-5);
            assert!((by - vy).abs() < 1e-5);
            assert!((bz - wz).abs() < 1e-5);
        }
    }
}
