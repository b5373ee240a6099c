//! Frame buffers, depth testing and shading
//!
//! The luminance and depth buffers are fully rewritten every frame. A sample
//! only lands in them if it is on screen, in front of the camera, and nearer
//! than whatever already occupies its pixel.

use crate::math::Vec3;
use crate::pipeline::ProjectedSample;

/// Fixed light direction (pointing from the light into the scene)
pub const LIGHT_DIRECTION: [f64; 3] = [-1.0, 0.5, 2.0];

/// Owned 2D grid, row-major, bounds-checked on every access
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write a cell; returns false (and writes nothing) when out of range
    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// One row of cells, left to right
    pub fn row(&self, y: usize) -> Option<&[T]> {
        (y < self.height).then(|| &self.cells[y * self.width..(y + 1) * self.width])
    }
}

/// What happened to a sample offered to the frame buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Written,
    Occluded,
    BehindCamera,
    OffScreen,
}

/// Lambertian brightness of a surface facing `normal`, lit along `light`.
/// Negative when the surface faces away; clamping happens at quantization.
pub fn lambert(normal: &Vec3, light: &Vec3) -> f64 {
    normal.normalize().dot(&-light.normalize())
}

/// Per-frame luminance and depth buffers
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffers {
    pub luminance: Grid<f64>,
    pub depth: Grid<f64>,
    light: Vec3,
}

impl FrameBuffers {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            luminance: Grid::new(width, height, 0.0),
            depth: Grid::new(width, height, f64::INFINITY),
            light: Vec3::from(LIGHT_DIRECTION),
        }
    }

    pub fn width(&self) -> usize {
        self.luminance.width()
    }

    pub fn height(&self) -> usize {
        self.luminance.height()
    }

    /// Reset for a new frame: no luminance, infinitely far depth
    pub fn clear(&mut self) {
        self.luminance.fill(0.0);
        self.depth.fill(f64::INFINITY);
    }

    /// Depth-test a sample and shade it if it wins its pixel. Equal depth
    /// keeps the sample already stored.
    pub fn resolve(&mut self, sample: &ProjectedSample) -> Resolution {
        let (x, y) = match (usize::try_from(sample.screen_x), usize::try_from(sample.screen_y)) {
            (Ok(x), Ok(y)) if x < self.width() && y < self.height() => (x, y),
            _ => return Resolution::OffScreen,
        };

        if !(sample.depth > 0.0) {
            return Resolution::BehindCamera;
        }

        match self.depth.get(x, y) {
            Some(nearest) if sample.depth < nearest => {
                let lum = lambert(&sample.world_normal, &self.light);
                self.luminance.set(x, y, lum);
                self.depth.set(x, y, sample.depth);
                Resolution::Written
            }
            _ => Resolution::Occluded,
        }
    }
}
