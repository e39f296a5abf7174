//! Modeling-service boundary
//!
//! Sketches are discretized into a [`SketchPayload`] and handed to a
//! [`ModelingService`].

mod payload;
mod traits;

pub use payload::{EntityPayload, PlanePayload, SketchPayload};
pub use traits::{
    ModelingService, NullService, RealizedSketch, ServiceError, ServiceResult, default_service,
};
