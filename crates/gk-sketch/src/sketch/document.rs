//! Sketch file serialization

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gk_core::{Frame, Point2D, SketchConfig, ensure_finite};

use super::entity::SketchEntity;
use super::tags::TagIndex;
use super::Sketch;

/// Current sketch file format version
pub const SKETCH_FORMAT_VERSION: u32 = 1;

/// On-disk layout; entities are stored once, in insertion order
///
/// Shapes and the plane deserialize through their constructors, so a file
/// holding invalid geometry fails to load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SketchData {
    version: u32,
    id: Uuid,
    name: String,
    plane: Frame,
    #[serde(default)]
    config: SketchConfig,
    entities: Vec<SketchEntity>,
    current_point: Point2D,
}

impl From<&Sketch> for SketchData {
    fn from(sketch: &Sketch) -> Self {
        Self {
            version: SKETCH_FORMAT_VERSION,
            id: sketch.id,
            name: sketch.name.clone(),
            plane: sketch.plane,
            config: sketch.config.clone(),
            entities: sketch.entities().cloned().collect(),
            current_point: sketch.current_point,
        }
    }
}

impl From<SketchData> for Sketch {
    fn from(data: SketchData) -> Self {
        let mut sketch = Sketch {
            id: data.id,
            name: data.name,
            plane: data.plane,
            config: data.config.validated(),
            edges: Vec::new(),
            faces: Vec::new(),
            order: Vec::new(),
            tags: TagIndex::new(),
            current_point: Point2D::ORIGIN,
        };
        // Replaying keeps ids and rebuilds the tag index
        for entity in data.entities {
            sketch.push_entity(entity);
        }
        sketch.current_point = data.current_point;
        sketch
    }
}

impl Serialize for Sketch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SketchData::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sketch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = SketchData::deserialize(deserializer)?;
        if data.version > SKETCH_FORMAT_VERSION {
            return Err(D::Error::custom(format!(
                "sketch format version {} is newer than supported version {}",
                data.version, SKETCH_FORMAT_VERSION
            )));
        }
        ensure_finite(data.current_point, "current point").map_err(D::Error::custom)?;
        Ok(Sketch::from(data))
    }
}

impl Sketch {
    /// Save sketch to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SketchError> {
        let path = path.as_ref();
        let content = self.to_bytes()?;
        std::fs::write(path, content).map_err(|e| SketchError::Io(e.to_string()))?;
        tracing::debug!("Saved sketch '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Serialize sketch to RON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, SketchError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SketchError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load sketch from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SketchError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SketchError::Io(e.to_string()))?;
        let sketch: Sketch =
            ron::from_str(&content).map_err(|e| SketchError::Deserialize(e.to_string()))?;
        tracing::debug!(
            "Loaded sketch '{}' ({} entities) from {}",
            sketch.name,
            sketch.len(),
            path.display()
        );
        Ok(sketch)
    }

    /// Load sketch from RON bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, SketchError> {
        let content =
            std::str::from_utf8(data).map_err(|e| SketchError::Deserialize(e.to_string()))?;
        let sketch: Sketch =
            ron::from_str(content).map_err(|e| SketchError::Deserialize(e.to_string()))?;
        Ok(sketch)
    }
}

/// Sketch file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SketchError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
