//! Torus surface sampling
//!
//! The donut is swept by two angles: the sweep angle walks the tube's center
//! circle in the XZ plane, the tube angle walks the circular cross-section
//! around that center.

use crate::math::Vec3;
use std::f64::consts::TAU;

/// A point on the torus surface together with its (unnormalized) outward normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Donut shape and sampling density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutGeometry {
    pub hole_diameter: f64,
    pub thickness: f64,
    /// Step for both the sweep and the tube angle, in radians
    pub angle_step: f64,
}

impl Default for DonutGeometry {
    fn default() -> Self {
        Self {
            hole_diameter: 2.0,
            thickness: 1.0,
            angle_step: 0.03,
        }
    }
}

impl DonutGeometry {
    pub fn new(hole_diameter: f64, thickness: f64, angle_step: f64) -> Self {
        Self { hole_diameter, thickness, angle_step }
    }

    /// Radius of the circle running through the middle of the tube
    pub fn center_radius(&self) -> f64 {
        (self.hole_diameter + 2.0 * self.thickness) / 2.0
    }

    /// Radius of the tube cross-section
    pub fn tube_radius(&self) -> f64 {
        self.thickness / 2.0
    }

    /// Number of angle values in `[0, 2π)` for the configured step
    pub fn steps_per_turn(&self) -> usize {
        (TAU / self.angle_step).ceil() as usize
    }

    /// Iterate every (sweep, tube) sample of the surface
    pub fn samples(&self) -> impl Iterator<Item = SurfaceSample> + '_ {
        let steps = self.steps_per_turn();
        let step = self.angle_step;
        let d_radius = self.center_radius();
        let c_radius = self.tube_radius();

        (0..steps).flat_map(move |i| {
            let sweep = i as f64 * step;
            let center = Vec3::new(sweep.sin() * d_radius, 0.0, sweep.cos() * d_radius);
            let out = center.normalize() * c_radius;
            let right = Vec3::new(0.0, c_radius, 0.0);

            (0..steps).map(move |j| {
                let tube = j as f64 * step;
                let offset = out * tube.sin() + right * tube.cos();
                SurfaceSample {
                    point: center + offset,
                    normal: offset,
                }
            })
        })
    }
}
