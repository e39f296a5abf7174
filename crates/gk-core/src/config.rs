//! Sketch configuration
//!
//! Settings that control discretization and validation. They can be
//! serialized to and loaded from RON configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{ARC_RADIUS_TOLERANCE, DEFAULT_SAMPLE_COUNT};

/// Policy for arcs whose endpoints sit at different distances from the center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RadiusCheck {
    /// Reject arcs whose radii differ by more than `tolerance` (relative)
    Enforce {
        /// Relative tolerance on the radius difference
        tolerance: f64,
    },
    /// Accept any endpoints; the radius is interpolated along the sweep
    Skip,
}

impl Default for RadiusCheck {
    fn default() -> Self {
        RadiusCheck::Enforce {
            tolerance: ARC_RADIUS_TOLERANCE,
        }
    }
}

impl RadiusCheck {
    /// Whether two radii are consistent under this policy
    pub fn accepts(&self, r1: f64, r2: f64) -> bool {
        match self {
            RadiusCheck::Enforce { tolerance } => {
                (r1 - r2).abs() <= tolerance * r1.abs().max(r2.abs())
            }
            RadiusCheck::Skip => true,
        }
    }
}

/// Sketch-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Number of points used when a sketch is discretized for hand-off
    pub sample_count: usize,
    /// Equal-radius policy for arcs
    pub arc_radius_check: RadiusCheck,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl SketchConfig {
    /// Arc radii must agree (the default)
    pub fn strict() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            arc_radius_check: RadiusCheck::default(),
        }
    }

    /// Arc endpoints are taken as given
    pub fn lenient() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            arc_radius_check: RadiusCheck::Skip,
        }
    }

    /// Set the sample count
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self.validated()
    }

    /// Set the arc radius policy
    pub fn with_arc_radius_check(mut self, check: RadiusCheck) -> Self {
        self.arc_radius_check = check;
        self.validated()
    }

    /// Clamp out-of-range values to something usable
    pub fn validated(mut self) -> Self {
        if self.sample_count < 2 {
            tracing::warn!(
                "sample_count {} is too small, using 2",
                self.sample_count
            );
            self.sample_count = 2;
        }
        if let RadiusCheck::Enforce { tolerance } = self.arc_radius_check {
            if !tolerance.is_finite() || tolerance < 0.0 {
                tracing::warn!(
                    "arc radius tolerance {} is invalid, using {}",
                    tolerance,
                    ARC_RADIUS_TOLERANCE
                );
                self.arc_radius_check = RadiusCheck::default();
            }
        }
        self
    }

    /// Parse from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: SketchConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        Ok(config.validated())
    }

    /// Serialize to a pretty RON string
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_ron_str(&content)?;
        tracing::debug!("Loaded sketch config from {}", path.display());
        Ok(config)
    }

    /// Save to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(String),
    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// The file is not a valid configuration
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SketchConfig::default();
        assert_eq!(config.sample_count, DEFAULT_SAMPLE_COUNT);
        assert!(matches!(config.arc_radius_check, RadiusCheck::Enforce { .. }));
    }

    #[test]
    fn test_radius_check() {
        let strict = RadiusCheck::default();
        assert!(strict.accepts(3.0, 3.0));
        assert!(strict.accepts(3.0, 3.0 + 1e-12));
        assert!(!strict.accepts(3.0, 3.1));
        assert!(RadiusCheck::Skip.accepts(3.0, 30.0));
    }

    #[test]
    fn test_validated_clamps() {
        let config = SketchConfig::default().with_sample_count(0);
        assert_eq!(config.sample_count, 2);

        let config = SketchConfig::default()
            .with_arc_radius_check(RadiusCheck::Enforce { tolerance: -1.0 });
        assert_eq!(config.arc_radius_check, RadiusCheck::default());
    }

    #[test]
    fn test_partial_ron() {
        let config = SketchConfig::from_ron_str("(sample_count: 16)").unwrap();
        assert_eq!(config.sample_count, 16);
        assert_eq!(config.arc_radius_check, RadiusCheck::default());

        let config = SketchConfig::from_ron_str("(arc_radius_check: Skip)").unwrap();
        assert_eq!(config, SketchConfig::lenient());

        assert!(matches!(
            SketchConfig::from_ron_str("not ron"),
            Err(ConfigError::Deserialize(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sketch.ron");

        let config = SketchConfig::lenient().with_sample_count(48);
        config.save(&path).unwrap();
        let loaded = SketchConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        assert!(matches!(
            SketchConfig::load(dir.path().join("missing.ron")),
            Err(ConfigError::Io(_))
        ));
    }
}
