//! Vector and matrix primitives for the render pipeline
//!
//! Vectors and matrices are plain nalgebra `f64` values. Addition, scaling,
//! negation, magnitude, normalization, dot and cross products all come from
//! nalgebra directly; this module only adds the axis rotations and the
//! helpers that move between 3D and homogeneous 4D coordinates.

use nalgebra::{Matrix4, Vector3, Vector4};

pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;
pub type Mat4 = Matrix4<f64>;

/// Rotation about the X axis by `angle` radians (right-handed)
pub fn rotation_x(angle: f64) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, c, -s, 0.0,
        0.0, s, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about the Y axis by `angle` radians (right-handed)
pub fn rotation_y(angle: f64) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::new(
        c, 0.0, s, 0.0,
        0.0, 1.0, 0.0, 0.0,
        -s, 0.0, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about the Z axis by `angle` radians (right-handed)
pub fn rotation_z(angle: f64) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::new(
        c, -s, 0.0, 0.0,
        s, c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Lift a position into homogeneous coordinates (w = 1, affected by translation)
pub fn point(v: Vec3) -> Vec4 {
    Vec4::new(v.x, v.y, v.z, 1.0)
}

/// Lift a direction into homogeneous coordinates (w = 0, ignores translation)
pub fn direction(v: Vec3) -> Vec4 {
    Vec4::new(v.x, v.y, v.z, 0.0)
}

/// Drop the w component
pub fn truncate(v: Vec4) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn sample_vectors() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, -3.0, 0.5),
            Vec3::new(2.5, 1.25, -7.0),
            Vec3::new(-0.001, 0.002, 0.0005),
            Vec3::new(100.0, -250.0, 42.0),
        ]
    }

    #[test]
    fn test_normalize_gives_unit_length() {
        for v in sample_vectors() {
            assert!((v.normalize().magnitude() - 1.0).abs() < EPS, "{:?}", v);
        }
    }

    #[test]
    fn test_cross_is_orthogonal() {
        let vs = sample_vectors();
        for a in &vs {
            for b in &vs {
                let c = a.cross(b);
                let tol = 1e-9 * (1.0 + a.magnitude() * b.magnitude()).powi(2);
                assert!(a.dot(&c).abs() < tol);
                assert!(b.dot(&c).abs() < tol);
            }
        }
    }

    #[test]
    fn test_cross_is_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert!((x.cross(&y) - Vec3::new(0.0, 0.0, 1.0)).magnitude() < EPS);
    }

    #[test]
    fn test_rotations_preserve_length() {
        for angle in [0.0, 0.3, -1.7, PI, 5.9] {
            for m in [rotation_x(angle), rotation_y(angle), rotation_z(angle)] {
                for v in sample_vectors() {
                    let r = truncate(m * point(v));
                    assert!((r.magnitude() - v.magnitude()).abs() < 1e-9 * (1.0 + v.magnitude()));
                }
            }
        }
    }

    #[test]
    fn test_rotation_round_trip() {
        let angle = 0.83;
        let ctors: [fn(f64) -> Mat4; 3] = [rotation_x, rotation_y, rotation_z];
        for ctor in ctors {
            for v in sample_vectors() {
                let back = truncate(ctor(-angle) * (ctor(angle) * direction(v)));
                assert!((back - v).magnitude() < 1e-9 * (1.0 + v.magnitude()));
            }
        }
    }

    #[test]
    fn test_quarter_turns() {
        let y = Vec3::new(0.0, 1.0, 0.0);
        // +Y about X goes to +Z, about Z goes to -X
        let rx = truncate(rotation_x(FRAC_PI_2) * direction(y));
        assert!((rx - Vec3::new(0.0, 0.0, 1.0)).magnitude() < EPS);
        let rz = truncate(rotation_z(FRAC_PI_2) * direction(y));
        assert!((rz - Vec3::new(-1.0, 0.0, 0.0)).magnitude() < EPS);

        let z = Vec3::new(0.0, 0.0, 1.0);
        let ry = truncate(rotation_y(FRAC_PI_2) * direction(z));
        assert!((ry - Vec3::new(1.0, 0.0, 0.0)).magnitude() < EPS);
    }

    #[test]
    fn test_point_and_direction_lifts() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let mut translate = Mat4::identity();
        translate[(0, 3)] = 10.0;
        assert_eq!(truncate(translate * point(v)), Vec3::new(11.0, 2.0, 3.0));
        assert_eq!(truncate(translate * direction(v)), v);
    }
}
