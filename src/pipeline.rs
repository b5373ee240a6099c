//! Model → world → camera → clip → screen transform chain
//!
//! Everything that does not depend on the individual sample (spin matrices,
//! view basis, projection) is built once per frame by [`FrameTransform::new`]
//! and then applied to every surface sample.

use crate::camera::CameraState;
use crate::math::{direction, point, rotation_x, rotation_y, rotation_z, truncate, Mat4, Vec3, Vec4};
use crate::torus::SurfaceSample;

/// Spin rates about each axis, in radians per second of animation time
pub const SPIN_RATE_X: f64 = 2.0;
pub const SPIN_RATE_Y: f64 = 0.1;
pub const SPIN_RATE_Z: f64 = 1.3;

/// Model rotation at a given time.
///
/// Applied innermost first: Z, then Y, then X. The order is what gives the
/// donut its tumble, so the three matrices are kept separate instead of
/// being folded into one product.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    x: Mat4,
    y: Mat4,
    z: Mat4,
}

impl Spin {
    pub fn at(time: f64) -> Self {
        Self {
            x: rotation_x(SPIN_RATE_X * time),
            y: rotation_y(SPIN_RATE_Y * time),
            z: rotation_z(SPIN_RATE_Z * time),
        }
    }

    pub fn apply(&self, v: Vec4) -> Vec4 {
        self.x * (self.y * (self.z * v))
    }
}

/// World-to-camera transform built from the camera pose
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    translate: Mat4,
    orient: Mat4,
}

impl ViewTransform {
    pub fn from_camera(camera: &CameraState) -> Self {
        let plus_z = Vec3::new(0.0, 0.0, 1.0);
        let c = camera.position;

        // Camera looks down its -f axis
        let f = -camera.forward().normalize();
        let r = plus_z.cross(&f).normalize();
        let u = f.cross(&r).normalize();

        let translate = Mat4::new(
            1.0, 0.0, 0.0, -c.x,
            0.0, 1.0, 0.0, -c.y,
            0.0, 0.0, 1.0, -c.z,
            0.0, 0.0, 0.0, 1.0,
        );
        let orient = Mat4::new(
            r.x, r.y, r.z, 0.0,
            u.x, u.y, u.z, 0.0,
            f.x, f.y, f.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        Self { translate, orient }
    }

    pub fn apply(&self, v: Vec4) -> Vec4 {
        self.orient * (self.translate * v)
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub near: f64,
    pub half_width: f64,
    pub half_height: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            near: 1.0,
            half_width: 1.0,
            half_height: 1.0,
        }
    }
}

impl Projection {
    /// Camera space to clip space: `(x, y, z, 1)` → `(n·x/hw, n·y/hh, -z-2n, -z)`
    pub fn matrix(&self) -> Mat4 {
        let n = self.near;
        Mat4::new(
            n / self.half_width, 0.0, 0.0, 0.0,
            0.0, n / self.half_height, 0.0, 0.0,
            0.0, 0.0, -1.0, -2.0 * n,
            0.0, 0.0, -1.0, 0.0,
        )
    }
}

/// Map NDC x/y in `[-1, 1]` to integer pixel coordinates. Results outside
/// the grid are returned as-is; bounds are the caller's concern.
pub fn screen_map(ndc_x: f64, ndc_y: f64, width: usize, height: usize) -> (i64, i64) {
    let x = ((ndc_x + 1.0) / 2.0 * width as f64).round() as i64;
    let y = ((ndc_y + 1.0) / 2.0 * height as f64).round() as i64;
    (x, y)
}

/// A surface sample after the full transform chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedSample {
    pub screen_x: i64,
    pub screen_y: i64,
    /// Clip-space z before the perspective divide. Positive only in front
    /// of the near plane; smaller is nearer.
    pub depth: f64,
    /// Spun normal in world space, unnormalized
    pub world_normal: Vec3,
}

/// All per-frame transforms, ready to be applied to samples
#[derive(Debug, Clone, Copy)]
pub struct FrameTransform {
    spin: Spin,
    view: ViewTransform,
    projection: Mat4,
    width: usize,
    height: usize,
}

impl FrameTransform {
    pub fn new(
        time: f64,
        camera: &CameraState,
        projection: &Projection,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            spin: Spin::at(time),
            view: ViewTransform::from_camera(camera),
            projection: projection.matrix(),
            width,
            height,
        }
    }

    /// Camera-space position of a model-space point
    pub fn to_camera(&self, model_point: Vec3) -> Vec4 {
        self.view.apply(self.spin.apply(point(model_point)))
    }

    pub fn project(&self, sample: &SurfaceSample) -> ProjectedSample {
        let world_normal = truncate(self.spin.apply(direction(sample.normal)));
        let clip = self.projection * self.to_camera(sample.point);

        let (screen_x, screen_y) =
            screen_map(clip.x / clip.w, clip.y / clip.w, self.width, self.height);

        ProjectedSample {
            screen_x,
            screen_y,
            depth: clip.z,
            world_normal,
        }
    }
}
