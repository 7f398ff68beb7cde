//! Configuration of a generation run.
//!
//! Every field has a default, so a run works without any configuration
//! file. A TOML file may override any subset of the fields:
//!
//! ```toml
//! output = "random_system.properties"
//! seed = 42
//!
//! [generator]
//! bodies = 100
//! position_scale = 1000.0
//! velocity_scale = 30.0
//! mass_scale = 10000.0
//! density = 0.1
//!
//! [visualizer]
//! zipf_exponent = 1.5
//! bins = 30
//! max_point_size = 50.0
//! width = 1200
//! height = 1000
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use serde::Deserialize;

use crate::error::{ensure_positive, AutogenError, Result};

/// Parameters of the generated system.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub bodies: usize,
    /// Standard deviation of every position component.
    pub position_scale: f64,
    /// Standard deviation of every velocity component.
    pub velocity_scale: f64,
    /// Masses lie in `[mass_scale / 10, mass_scale * 2]`.
    pub mass_scale: f64,
    pub density: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bodies: 100,
            position_scale: 1000.,
            velocity_scale: 30.,
            mass_scale: 10_000.,
            density: 0.1,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("position_scale", self.position_scale)?;
        ensure_positive("velocity_scale", self.velocity_scale)?;
        ensure_positive("mass_scale", self.mass_scale)?;
        ensure_positive("density", self.density)
    }
}

/// Parameters of the distribution charts.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Exponent of the Zipf distribution the charted masses follow.
    pub zipf_exponent: f64,
    pub bins: usize,
    /// Size of the heaviest point in the 3D scatter.
    pub max_point_size: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            zipf_exponent: 1.5,
            bins: 30,
            max_point_size: 50.,
            width: 1200,
            height: 1000,
        }
    }
}

impl VisualizerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.zipf_exponent.is_finite() && self.zipf_exponent > 1.) {
            return Err(AutogenError::InvalidParameter {
                name: "zipf_exponent",
                reason: format!(
                    "expected a finite number larger than 1, got {}",
                    self.zipf_exponent
                ),
            });
        }
        if self.bins == 0 {
            return Err(AutogenError::InvalidParameter {
                name: "bins",
                reason: "need at least one histogram bin".to_string(),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(AutogenError::InvalidParameter {
                name: "width/height",
                reason: format!("window of {}x{} pixels", self.width, self.height),
            });
        }
        ensure_positive("max_point_size", self.max_point_size)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AutogenConfig {
    pub generator: GeneratorConfig,
    pub visualizer: VisualizerConfig,
    /// Where the system description is written to.
    pub output: PathBuf,
    /// Seed of the random number generator. Runs are not reproducible without one.
    pub seed: Option<u64>,
}

impl Default for AutogenConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            visualizer: VisualizerConfig::default(),
            output: PathBuf::from("random_system.properties"),
            seed: None,
        }
    }
}

impl AutogenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Read `path` if it exists, fall back to the defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!("loading configuration from {}", path.display());
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.visualizer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AutogenConfig::default();
        assert_eq!(config.generator.bodies, 100);
        assert_eq!(config.generator.position_scale, 1000.);
        assert_eq!(config.generator.velocity_scale, 30.);
        assert_eq!(config.generator.mass_scale, 10_000.);
        assert_eq!(config.generator.density, 0.1);
        assert_eq!(config.visualizer.zipf_exponent, 1.5);
        assert_eq!(config.visualizer.bins, 30);
        assert_eq!(config.output, PathBuf::from("random_system.properties"));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            AutogenConfig::from_toml_str("").unwrap(),
            AutogenConfig::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let config = AutogenConfig::from_toml_str(
            r#"
            seed = 42
            output = "out.properties"

            [generator]
            bodies = 3

            [visualizer]
            zipf_exponent = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.output, PathBuf::from("out.properties"));
        assert_eq!(config.generator.bodies, 3);
        assert_eq!(config.generator.mass_scale, 10_000.);
        assert_eq!(config.visualizer.zipf_exponent, 2.);
        assert_eq!(config.visualizer.bins, 30);
    }

    #[test]
    fn test_malformed_toml() {
        let err = AutogenConfig::from_toml_str("[generator]\nbodies = \"many\"").unwrap_err();
        assert!(matches!(err, AutogenError::Config(_)));
    }

    #[test]
    fn test_validate() {
        let mut config = AutogenConfig::default();
        config.generator.density = 0.;
        assert!(config.validate().is_err());

        let mut config = AutogenConfig::default();
        config.visualizer.zipf_exponent = 1.;
        assert!(config.validate().is_err());

        let mut config = AutogenConfig::default();
        config.visualizer.bins = 0;
        assert!(config.validate().is_err());

        let mut config = AutogenConfig::default();
        config.generator.bodies = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AutogenConfig::load_or_default(dir.path().join("autogen.toml")).unwrap();
        assert_eq!(config, AutogenConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autogen.toml");
        std::fs::write(&path, "[generator]\ndensity = 0.5\n").unwrap();

        let config = AutogenConfig::load_or_default(&path).unwrap();
        assert_eq!(config.generator.density, 0.5);
    }
}
