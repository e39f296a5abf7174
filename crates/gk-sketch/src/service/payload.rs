//! Discretized sketch payload
//!
//! The wire form of a sketch: the plane plus every entity as a polyline of
//! world-space points. Serialized as JSON.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gk_core::Frame;

use super::traits::{ServiceError, ServiceResult};
use crate::shapes::ShapeGeometry;
use crate::sketch::{EntityKind, Sketch, SketchEntity};

/// Sketch plane in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanePayload {
    pub origin: [f64; 3],
    pub dir_x: [f64; 3],
    pub dir_y: [f64; 3],
    pub normal: [f64; 3],
}

impl From<&Frame> for PlanePayload {
    fn from(frame: &Frame) -> Self {
        Self {
            origin: frame.origin().to_array(),
            dir_x: frame.dir_x().as_dvec3().to_array(),
            dir_y: frame.dir_y().as_dvec3().to_array(),
            normal: frame.normal().as_dvec3().to_array(),
        }
    }
}

/// One discretized entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPayload {
    /// Entity id in the source sketch
    pub id: Uuid,
    pub tag: Option<String>,
    pub kind: EntityKind,
    /// Shape variant name, e.g. "Circle"
    pub shape: String,
    /// Closed entities repeat their first point at the end
    pub closed: bool,
    /// World-space sample points
    pub points: Vec<[f64; 3]>,
}

impl EntityPayload {
    fn from_entity(entity: &SketchEntity, count: usize) -> Self {
        let shape = entity.shape();
        Self {
            id: entity.id(),
            tag: entity.tag().map(str::to_string),
            kind: entity.kind(),
            shape: shape.type_name().to_string(),
            closed: shape.is_closed(),
            points: shape.points(count).map(|p| p.to_array()).collect(),
        }
    }
}

/// A sketch ready to hand to a [`ModelingService`](super::ModelingService)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchPayload {
    pub id: Uuid,
    pub name: String,
    pub plane: PlanePayload,
    pub edges: Vec<EntityPayload>,
    pub faces: Vec<EntityPayload>,
}

impl SketchPayload {
    /// Discretize every entity of `sketch` with `count` points
    pub fn from_sketch(sketch: &Sketch, count: usize) -> Self {
        Self {
            id: sketch.id(),
            name: sketch.name().to_string(),
            plane: PlanePayload::from(sketch.plane()),
            edges: sketch
                .edges()
                .iter()
                .map(|e| EntityPayload::from_entity(e, count))
                .collect(),
            faces: sketch
                .faces()
                .iter()
                .map(|e| EntityPayload::from_entity(e, count))
                .collect(),
        }
    }

    /// Total number of points across all entities
    pub fn point_count(&self) -> usize {
        self.edges
            .iter()
            .chain(&self.faces)
            .map(|e| e.points.len())
            .sum()
    }

    pub fn to_json(&self) -> ServiceResult<String> {
        serde_json::to_string(self).map_err(|e| ServiceError::Payload(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> ServiceResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ServiceError::Payload(e.to_string()))
    }

    pub fn from_json(json: &str) -> ServiceResult<Self> {
        serde_json::from_str(json).map_err(|e| ServiceError::Payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_core::{Point2D, Point3D, Vector3D};

    fn tilted_sketch() -> Sketch {
        let plane = Frame::new(
            Point3D::new(0.0, 0.0, 5.0),
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        let mut sketch = Sketch::new("tilted", plane);
        sketch
            .segment(Point2D::ORIGIN, Point2D::new(2.0, 0.0), Some("base"))
            .unwrap()
            .circle(Point2D::new(1.0, 1.0), 0.5, None)
            .unwrap();
        sketch
    }

    #[test]
    fn test_payload_counts() {
        let sketch = tilted_sketch();
        let payload = sketch.to_payload_with(10);
        assert_eq!(payload.edges.len(), 1);
        assert_eq!(payload.faces.len(), 1);
        assert_eq!(payload.point_count(), 20);
        assert_eq!(payload.edges[0].tag.as_deref(), Some("base"));
        assert_eq!(payload.edges[0].kind, EntityKind::Edge);
        assert!(payload.faces[0].closed);
        assert_eq!(payload.faces[0].shape, "Circle");

        let default = sketch.to_payload();
        assert_eq!(default.edges[0].points.len(), sketch.config().sample_count);
    }

    #[test]
    fn test_payload_projects_onto_plane() {
        let payload = tilted_sketch().to_payload_with(3);
        assert_eq!(payload.plane.normal, [0.0, -1.0, 0.0]);

        let segment = &payload.edges[0].points;
        assert_eq!(segment[0], [0.0, 0.0, 5.0]);
        assert_eq!(segment[1], [1.0, 0.0, 5.0]);
        assert_eq!(segment[2], [2.0, 0.0, 5.0]);

        // Sketch y runs along world z
        let circle_start = payload.faces[0].points[0];
        assert!((circle_start[0] - 1.5).abs() < 1e-12);
        assert!((circle_start[2] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_json_round_trip() {
        let payload = tilted_sketch().to_payload_with(4);
        let json = payload.to_json().unwrap();
        assert!(json.contains("\"name\":\"tilted\""));
        let parsed = SketchPayload::from_json(&json).unwrap();
        assert_eq!(parsed.id, payload.id);
        assert_eq!(parsed.faces[0].id, payload.faces[0].id);
        assert_eq!(parsed.point_count(), payload.point_count());
        for (a, b) in parsed.faces[0].points.iter().zip(&payload.faces[0].points) {
            for axis in 0..3 {
                assert!((a[axis] - b[axis]).abs() < 1e-12);
            }
        }

        assert!(matches!(
            SketchPayload::from_json("{"),
            Err(ServiceError::Payload(_))
        ));
    }
}
