//! Modeling service trait definitions
//!
//! A modeling service turns a discretized sketch into geometry in an external
//! modeler. Only the hand-off is defined here; transports live with the
//! implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::payload::SketchPayload;

/// Error type for modeling service calls
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("Modeling service not available: {0}")]
    Unavailable(String),

    #[error("Sketch rejected by service: {0}")]
    Rejected(String),

    #[error("Payload error: {0}")]
    Payload(String),
}

/// Result type for modeling service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Acknowledgement returned once a service has built a sketch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizedSketch {
    /// Id of the sketch that was sent
    pub sketch_id: Uuid,
    /// Identifier the service assigned to the result
    pub remote_id: String,
    /// Number of edges the service accepted
    pub edge_count: usize,
    /// Number of faces the service accepted
    pub face_count: usize,
}

impl RealizedSketch {
    /// Acknowledge every entity of `payload`
    pub fn accepting(payload: &SketchPayload, remote_id: impl Into<String>) -> Self {
        Self {
            sketch_id: payload.id,
            remote_id: remote_id.into(),
            edge_count: payload.edges.len(),
            face_count: payload.faces.len(),
        }
    }
}

/// The modeling service trait
///
/// Implementations forward payloads to a specific modeler.
pub trait ModelingService: Send + Sync {
    /// Get the name of this service
    fn name(&self) -> &str;

    /// Check if the service can currently be reached
    fn is_available(&self) -> bool;

    /// Build the sketch remotely
    fn realize_sketch(&self, payload: &SketchPayload) -> ServiceResult<RealizedSketch>;
}

/// A service that always reports itself unavailable
#[derive(Debug, Default)]
pub struct NullService;

impl ModelingService for NullService {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn realize_sketch(&self, _payload: &SketchPayload) -> ServiceResult<RealizedSketch> {
        Err(ServiceError::Unavailable(
            "No modeling service configured".into(),
        ))
    }
}

/// Get the default modeling service
pub fn default_service() -> Box<dyn ModelingService> {
    Box::new(NullService)
}
