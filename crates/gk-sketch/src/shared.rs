//! Shared sketch handle

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::sketch::Sketch;

/// A sketch behind one mutex, cheap to clone across threads
#[derive(Debug, Clone, Default)]
pub struct SharedSketch(Arc<Mutex<Sketch>>);

impl SharedSketch {
    pub fn new(sketch: Sketch) -> Self {
        Self(Arc::new(Mutex::new(sketch)))
    }

    /// Lock the sketch for direct access
    pub fn lock(&self) -> MutexGuard<'_, Sketch> {
        self.0.lock()
    }

    /// Run `f` with shared access
    pub fn read<R>(&self, f: impl FnOnce(&Sketch) -> R) -> R {
        f(&self.0.lock())
    }

    /// Run `f` with exclusive access
    pub fn update<R>(&self, f: impl FnOnce(&mut Sketch) -> R) -> R {
        f(&mut self.0.lock())
    }

    /// Clone the current state
    pub fn snapshot(&self) -> Sketch {
        self.0.lock().clone()
    }
}

impl From<Sketch> for SharedSketch {
    fn from(sketch: Sketch) -> Self {
        Self::new(sketch)
    }
}
