//! Sketches
//!
//! A [`Sketch`] is an ordered, taggable collection of shapes placed on a
//! reference plane. Open shapes become edges and closed shapes become faces.
//! Every append validates first and only then touches the sketch, so a failed
//! call leaves it unchanged.

mod document;
mod entity;
mod tags;

pub use document::{SKETCH_FORMAT_VERSION, SketchError};
pub use entity::{EntityKind, SketchEntity};
pub use tags::{EntityKey, TagIndex};

use uuid::Uuid;

use gk_core::{
    Frame, GeometryResult, IntoAngle, IntoDistance, Point2D, SketchConfig, Vector2D,
};

use crate::service::SketchPayload;
use crate::shapes::{
    Arc, BoxShape, Circle, Ellipse, Polygon, Segment, Shape, ShapeGeometry, Slot, Trapezoid,
    Triangle, finite_rotation,
};

/// A named collection of edges and faces on a plane
#[derive(Debug, Clone)]
pub struct Sketch {
    id: Uuid,
    name: String,
    plane: Frame,
    config: SketchConfig,
    edges: Vec<SketchEntity>,
    faces: Vec<SketchEntity>,
    /// Insertion order across both lists
    order: Vec<EntityKey>,
    tags: TagIndex,
    /// End of the most recent edge, start of the next relative edge
    current_point: Point2D,
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new("Sketch", Frame::default())
    }
}

impl Sketch {
    /// Create an empty sketch on `plane`
    pub fn new(name: impl Into<String>, plane: Frame) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            plane,
            config: SketchConfig::default(),
            edges: Vec::new(),
            faces: Vec::new(),
            order: Vec::new(),
            tags: TagIndex::new(),
            current_point: Point2D::ORIGIN,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: SketchConfig) -> Self {
        self.config = config.validated();
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Plane every shape of this sketch is placed on
    pub fn plane(&self) -> &Frame {
        &self.plane
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Open shapes, in insertion order
    pub fn edges(&self) -> &[SketchEntity] {
        &self.edges
    }

    /// Closed shapes, in insertion order
    pub fn faces(&self) -> &[SketchEntity] {
        &self.faces
    }

    /// All entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &SketchEntity> {
        self.order.iter().map(|key| self.entity(*key))
    }

    /// Distinct tags in order of first use
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.tags()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Point relative edges start from
    pub fn current_point(&self) -> Point2D {
        self.current_point
    }

    /// Move the current point without drawing
    pub fn move_to(&mut self, point: Point2D) -> &mut Self {
        self.current_point = point;
        self
    }

    /// Every entity tagged `tag`, edges and faces mixed, in insertion order
    pub fn get(&self, tag: &str) -> Vec<&SketchEntity> {
        self.tags
            .get(tag)
            .iter()
            .map(|key| self.entity(*key))
            .collect()
    }

    /// Find an entity by its id
    pub fn get_by_id(&self, id: Uuid) -> Option<&SketchEntity> {
        self.edges
            .iter()
            .chain(self.faces.iter())
            .find(|entity| entity.id() == id)
    }

    fn entity(&self, key: EntityKey) -> &SketchEntity {
        match key.kind {
            EntityKind::Edge => &self.edges[key.index],
            EntityKind::Face => &self.faces[key.index],
        }
    }

    /// Append an already validated shape and return the new entity's id
    ///
    /// The shape is re-anchored onto this sketch's plane. Open shapes are
    /// stored as edges and move the current point to their end.
    pub fn add_shape(&mut self, shape: impl Into<Shape>, tag: Option<&str>) -> Uuid {
        let shape = shape.into().anchored(self.plane);
        if let Some(end) = shape.end_point() {
            self.current_point = end;
        }
        self.push_entity(SketchEntity::new(shape, tag.map(str::to_string)))
    }

    /// Store an entity and index it, keeping its id
    fn push_entity(&mut self, entity: SketchEntity) -> Uuid {
        let kind = entity.kind();
        let list = match kind {
            EntityKind::Edge => &mut self.edges,
            EntityKind::Face => &mut self.faces,
        };
        let key = EntityKey::new(kind, list.len());
        let id = entity.id();

        tracing::debug!(
            "Sketch '{}': added {} {} ({}){}",
            self.name,
            kind.as_str(),
            entity.type_name(),
            id,
            entity.tag().map(|t| format!(" tagged '{t}'")).unwrap_or_default()
        );

        if let Some(tag) = entity.tag() {
            self.tags.insert(tag, key);
        }
        list.push(entity);
        self.order.push(key);
        id
    }

    fn append<S: Into<Shape>>(
        &mut self,
        shape: GeometryResult<S>,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        match shape {
            Ok(shape) => {
                self.add_shape(shape, tag);
                Ok(self)
            }
            Err(e) => {
                tracing::debug!("Sketch '{}': rejected shape: {}", self.name, e);
                Err(e)
            }
        }
    }

    // ============== Edges ==============

    /// Segment from `start` to `end`
    pub fn segment(
        &mut self,
        start: Point2D,
        end: Point2D,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        self.append(Segment::new(start, end), tag)
    }

    /// Segment from the current point to `end`
    pub fn segment_to_point(&mut self, end: Point2D, tag: Option<&str>) -> GeometryResult<&mut Self> {
        self.append(Segment::new(self.current_point, end), tag)
    }

    /// Segment from the current point along `vector`
    pub fn segment_from_vector(
        &mut self,
        vector: Vector2D,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        let start = self.current_point;
        self.append(Segment::new(start, start + vector), tag)
    }

    /// Segment from `start` along `vector`
    pub fn segment_from_point_and_vector(
        &mut self,
        start: Point2D,
        vector: Vector2D,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        self.append(Segment::new(start, start + vector), tag)
    }

    /// Arc from the current point to `end` around `center`
    pub fn arc_to_point(
        &mut self,
        end: Point2D,
        center: Point2D,
        clockwise: bool,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        let start = self.current_point;
        self.arc_with_direction(start, end, center, clockwise, tag)
    }

    /// Counterclockwise arc from `start` to `end` around `center`
    pub fn arc(
        &mut self,
        start: Point2D,
        end: Point2D,
        center: Point2D,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        self.arc_with_direction(start, end, center, false, tag)
    }

    /// Arc from `start` to `end` around `center` in the given direction
    pub fn arc_with_direction(
        &mut self,
        start: Point2D,
        end: Point2D,
        center: Point2D,
        clockwise: bool,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        let arc = Arc::with_radius_check(center, start, end, clockwise, self.config.arc_radius_check);
        self.append(arc, tag)
    }

    // ============== Faces ==============

    pub fn circle(
        &mut self,
        center: Point2D,
        radius: impl IntoDistance,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        self.append(Circle::new(center, radius), tag)
    }

    pub fn ellipse(
        &mut self,
        center: Point2D,
        semi_major: impl IntoDistance,
        semi_minor: impl IntoDistance,
        rotation: impl IntoAngle,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        let ellipse = Ellipse::new(center, semi_major, semi_minor)
            .and_then(|ellipse| Ok(ellipse.with_rotation(finite_rotation(rotation)?)));
        self.append(ellipse, tag)
    }

    /// Regular polygon around its inscribed circle
    pub fn polygon(
        &mut self,
        center: Point2D,
        inner_radius: impl IntoDistance,
        n_sides: usize,
        rotation: impl IntoAngle,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        let polygon = Polygon::new(center, inner_radius, n_sides)
            .and_then(|polygon| Ok(polygon.with_rotation(finite_rotation(rotation)?)));
        self.append(polygon, tag)
    }

    pub fn slot(
        &mut self,
        center: Point2D,
        width: impl IntoDistance,
        height: impl IntoDistance,
        rotation: impl IntoAngle,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        let slot = Slot::new(center, width, height)
            .and_then(|slot| Ok(slot.with_rotation(finite_rotation(rotation)?)));
        self.append(slot, tag)
    }

    /// Rectangle centered on `center`
    pub fn box_face(
        &mut self,
        center: Point2D,
        width: impl IntoDistance,
        height: impl IntoDistance,
        rotation: impl IntoAngle,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        let rect = BoxShape::new(center, width, height)
            .and_then(|rect| Ok(rect.with_rotation(finite_rotation(rotation)?)));
        self.append(rect, tag)
    }

    pub fn triangle(
        &mut self,
        p1: Point2D,
        p2: Point2D,
        p3: Point2D,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        self.append(Triangle::new(p1, p2, p3), tag)
    }

    /// Trapezoid on a bottom base of `width`; see [`Trapezoid`]
    #[allow(clippy::too_many_arguments)]
    pub fn trapezoid(
        &mut self,
        width: impl IntoDistance,
        height: impl IntoDistance,
        angle1: impl IntoAngle,
        angle2: impl IntoAngle,
        center: Point2D,
        rotation: impl IntoAngle,
        tag: Option<&str>,
    ) -> GeometryResult<&mut Self> {
        let trapezoid = Trapezoid::new(width, height, angle1, angle2, center)
            .and_then(|trapezoid| Ok(trapezoid.with_rotation(finite_rotation(rotation)?)));
        self.append(trapezoid, tag)
    }

    // ============== Hand-off ==============

    /// Discretize every entity with the configured sample count
    pub fn to_payload(&self) -> SketchPayload {
        self.to_payload_with(self.config.sample_count)
    }

    /// Discretize every entity with `count` points each
    pub fn to_payload_with(&self, count: usize) -> SketchPayload {
        SketchPayload::from_sketch(self, count)
    }
}
