//! 2D sketch geometry
//!
//! This crate provides:
//! - Parametric shapes (circle, ellipse, polygon, slot, box, triangle,
//!   trapezoid, segment, arc) with closed-form metrics and point sampling
//! - Sketches: tagged collections of edges and faces on a reference plane
//! - RON sketch documents
//! - The payload and trait for handing sketches to a modeling service

pub mod service;
pub mod shapes;
pub mod shared;
pub mod sketch;

// Re-exports for convenience
pub use service::{
    EntityPayload, ModelingService, NullService, PlanePayload, RealizedSketch, ServiceError,
    ServiceResult, SketchPayload, default_service,
};
pub use shapes::{
    Arc, BoxShape, Circle, Ellipse, Polygon, Segment, Shape, ShapeGeometry, Slot, Trapezoid,
    Triangle,
};
pub use shared::SharedSketch;
pub use sketch::{
    EntityKey, EntityKind, SKETCH_FORMAT_VERSION, Sketch, SketchEntity, SketchError, TagIndex,
};

pub use gk_core;
