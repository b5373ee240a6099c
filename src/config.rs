//! YAML configuration
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration.

use crate::camera::CameraSpeeds;
use crate::torus::DonutGeometry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest angle step that still keeps neighbouring samples close on screen
pub const MAX_ANGLE_STEP: f64 = 0.25;

/// Smallest angle step; below this the per-frame sample count explodes
pub const MIN_ANGLE_STEP: f64 = 0.001;

/// Upper bound for hole diameter and thickness, keeping the derived radii finite
pub const MAX_DIMENSION: f64 = 1.0e6;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Camera movement rates
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CameraConfig {
    /// Units per second for w/a/s/d, units per press for q/e
    #[serde(default = "default_move_speed")]
    pub move_speed: f64,
    /// Radians per press for i/j/k/l
    #[serde(default = "default_rot_speed")]
    pub rot_speed: f64,
}

fn default_move_speed() -> f64 {
    CameraSpeeds::default().move_speed
}

fn default_rot_speed() -> f64 {
    CameraSpeeds::default().rot_speed
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            rot_speed: default_rot_speed(),
        }
    }
}

impl CameraConfig {
    pub fn speeds(&self) -> CameraSpeeds {
        CameraSpeeds {
            move_speed: self.move_speed,
            rot_speed: self.rot_speed,
        }
    }
}

/// Donut shape
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeometryConfig {
    #[serde(default = "default_hole_diameter")]
    pub hole_diameter: f64,
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    #[serde(default = "default_angle_step")]
    pub angle_step: f64,
}

fn default_hole_diameter() -> f64 {
    DonutGeometry::default().hole_diameter
}

fn default_thickness() -> f64 {
    DonutGeometry::default().thickness
}

fn default_angle_step() -> f64 {
    DonutGeometry::default().angle_step
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            hole_diameter: default_hole_diameter(),
            thickness: default_thickness(),
            angle_step: default_angle_step(),
        }
    }
}

impl GeometryConfig {
    pub fn donut(&self) -> DonutGeometry {
        DonutGeometry::new(self.hole_diameter, self.thickness, self.angle_step)
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file for interactive mode. Without one, interactive runs log nothing
    /// (stderr would tear up the raw-mode screen).
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map
        let config: AppConfig = if content.trim().is_empty() {
            AppConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the given file, or fall back to built-in defaults
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Validation(format!("{} must be a positive number, got {}", name, v)))
            }
        };

        positive("camera.move_speed", self.camera.move_speed)?;
        positive("camera.rot_speed", self.camera.rot_speed)?;
        positive("geometry.thickness", self.geometry.thickness)?;
        positive("geometry.angle_step", self.geometry.angle_step)?;

        let hole = self.geometry.hole_diameter;
        if !(hole.is_finite() && hole >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "geometry.hole_diameter must be zero or positive, got {}",
                hole
            )));
        }

        for (name, v) in [
            ("geometry.hole_diameter", hole),
            ("geometry.thickness", self.geometry.thickness),
        ] {
            if v > MAX_DIMENSION {
                return Err(ConfigError::Validation(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_DIMENSION, v
                )));
            }
        }

        let step = self.geometry.angle_step;
        if !(MIN_ANGLE_STEP..=MAX_ANGLE_STEP).contains(&step) {
            return Err(ConfigError::Validation(format!(
                "geometry.angle_step must be between {} and {}, got {}",
                MIN_ANGLE_STEP, MAX_ANGLE_STEP, step
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.geometry.donut(), DonutGeometry::default());
        assert_eq!(config.camera.speeds(), CameraSpeeds::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config() {
        let result = AppConfig::from_file("/nonexistent/donut.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "camera: [move_speed").unwrap();
        assert!(matches!(AppConfig::from_file(&path).unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("donut.yaml");
        let content = r#"
camera:
  move_speed: 12.5
  rot_speed: 0.2
geometry:
  hole_diameter: 3.0
  thickness: 1.5
  angle_step: 0.05
logging:
  level: debug
  file: donut.log
"#;
        std::fs::write(&path, content).unwrap();

        let config = AppConfig::load_or_default(Some(path.as_path())).unwrap();
        assert_eq!(config.camera.move_speed, 12.5);
        assert_eq!(config.camera.rot_speed, 0.2);
        assert_eq!(config.geometry.donut(), DonutGeometry::new(3.0, 1.5, 0.05));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("donut.log")));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = AppConfig::from_yaml("geometry:\n  thickness: 0.8\n").unwrap();
        assert_eq!(config.geometry.thickness, 0.8);
        assert_eq!(config.geometry.hole_diameter, 2.0);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        for yaml in [
            "geometry:\n  thickness: 0.0\n",
            "geometry:\n  hole_diameter: -1.0\n",
            "geometry:\n  angle_step: 0.0\n",
            "geometry:\n  angle_step: 0.5\n",
            "camera:\n  move_speed: -2.0\n",
            "camera:\n  rot_speed: .nan\n",
            "geometry:\n  angle_step: 1.0e-9\n",
            "geometry:\n  thickness: 1.0e308\n",
            "geometry:\n  hole_diameter: 1.0e308\n",
        ] {
            let err = AppConfig::from_yaml(yaml).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)), "{}", yaml);
        }
    }

    #[test]
    fn test_geometry_limits_are_inclusive() {
        let yaml = format!(
            "geometry:\n  angle_step: {}\n  thickness: {}\n  hole_diameter: {}\n",
            MIN_ANGLE_STEP, MAX_DIMENSION, MAX_DIMENSION
        );
        let config = AppConfig::from_yaml(&yaml).unwrap();
        let donut = config.geometry.donut();
        assert!(donut.center_radius().is_finite());
        assert!(donut.tube_radius().is_finite());
        // Fine but bounded: a few million samples, no overflow
        assert_eq!(donut.steps_per_turn(), 6284);
        assert!(donut.steps_per_turn().checked_pow(2).is_some());
        assert!(AppConfig::from_yaml(&format!("geometry:\n  angle_step: {}\n", MAX_ANGLE_STEP)).is_ok());
    }

    #[test]
    fn test_round_trip_through_yaml() {
        let config = AppConfig::default();
        let text = serde_yaml::to_string(&config).unwrap();
        assert_eq!(AppConfig::from_yaml(&text).unwrap(), config);
    }
}
