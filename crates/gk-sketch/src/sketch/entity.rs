//! Sketch entities
//!
//! An entity is a shape placed in a sketch, with a unique id and an optional
//! tag. Open shapes are stored as edges and closed shapes as faces.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shapes::{Shape, ShapeGeometry};

/// Which list of the sketch an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Open curve (segment, arc)
    Edge,
    /// Closed region boundary
    Face,
}

impl EntityKind {
    /// The kind a shape is stored as
    pub fn of(shape: &Shape) -> Self {
        if shape.is_closed() {
            EntityKind::Face
        } else {
            EntityKind::Edge
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Edge => "edge",
            EntityKind::Face => "face",
        }
    }
}

/// A shape stored in a sketch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchEntity {
    /// Unique identifier
    id: Uuid,
    /// Optional, non-unique label
    tag: Option<String>,
    /// The placed shape
    shape: Shape,
}

impl SketchEntity {
    /// Wrap a shape with a fresh id
    pub fn new(shape: Shape, tag: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tag,
            shape,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::of(&self.shape)
    }

    /// Check if this entity is an open edge
    pub fn is_edge(&self) -> bool {
        self.kind() == EntityKind::Edge
    }

    /// Check if this entity is a closed face
    pub fn is_face(&self) -> bool {
        self.kind() == EntityKind::Face
    }

    /// Get the shape variant name
    pub fn type_name(&self) -> &'static str {
        self.shape.type_name()
    }
}
