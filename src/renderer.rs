//! CPU donut renderer
//!
//! Runs every surface sample through the transform chain and resolves it
//! against the frame buffers.

use crate::buffer::{FrameBuffers, Grid, Resolution};
use crate::camera::CameraState;
use crate::pipeline::{FrameTransform, Projection};
use crate::raster::GlyphGrid;
use crate::torus::{DonutGeometry, SurfaceSample};

/// How the samples of one frame were resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub written: usize,
    pub occluded: usize,
    pub behind_camera: usize,
    pub off_screen: usize,
}

impl FrameStats {
    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Written => self.written += 1,
            Resolution::Occluded => self.occluded += 1,
            Resolution::BehindCamera => self.behind_camera += 1,
            Resolution::OffScreen => self.off_screen += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.written + self.occluded + self.behind_camera + self.off_screen
    }
}

/// The donut renderer
pub struct Renderer {
    width: usize,
    height: usize,
    geometry: DonutGeometry,
    projection: Projection,
    // Geometry never changes, so the model-space samples are built once
    samples: Vec<SurfaceSample>,
    buffers: FrameBuffers,
}

impl Renderer {
    pub fn new(width: usize, height: usize, geometry: DonutGeometry) -> Self {
        let samples: Vec<SurfaceSample> = geometry.samples().collect();
        tracing::debug!(
            width,
            height,
            samples = samples.len(),
            center_radius = geometry.center_radius(),
            tube_radius = geometry.tube_radius(),
            "Renderer created"
        );

        Self {
            width,
            height,
            geometry,
            projection: Projection::default(),
            samples,
            buffers: FrameBuffers::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn geometry(&self) -> &DonutGeometry {
        &self.geometry
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Render one frame at animation time `time` seen from `camera`
    pub fn render(&mut self, time: f64, camera: &CameraState) -> FrameStats {
        self.buffers.clear();

        let frame = FrameTransform::new(time, camera, &self.projection, self.width, self.height);
        let mut stats = FrameStats::default();

        for sample in &self.samples {
            let projected = frame.project(sample);
            stats.record(self.buffers.resolve(&projected));
        }

        stats
    }

    pub fn luminance(&self) -> &Grid<f64> {
        &self.buffers.luminance
    }

    pub fn depth(&self) -> &Grid<f64> {
        &self.buffers.depth
    }

    /// Quantize the last frame into terminal cells
    pub fn to_glyphs(&self) -> GlyphGrid {
        GlyphGrid::from_luminance(&self.buffers.luminance)
    }

    /// Last frame as text, one line per row
    pub fn to_ascii(&self) -> String {
        self.to_glyphs().to_string()
    }
}
