//! ASCII donut
//!
//! Renders a spinning torus as ASCII art in the terminal: the surface is
//! sampled parametrically, pushed through a model/view/projection chain,
//! depth-tested into a small luminance buffer and quantized into glyphs.
//! A first-person camera moves around it under keyboard control.

pub mod app;
pub mod buffer;
pub mod camera;
pub mod config;
pub mod error;
pub mod math;
pub mod pipeline;
pub mod raster;
pub mod renderer;
pub mod terminal;
pub mod torus;

pub use app::App;
pub use camera::{Action, CameraState};
pub use config::AppConfig;
pub use renderer::Renderer;
pub use terminal::TerminalDisplay;

/// Logical pixels across. Each is drawn as two terminal cells.
pub const GRID_WIDTH: usize = 80;

/// Logical pixels down
pub const GRID_HEIGHT: usize = 80;
