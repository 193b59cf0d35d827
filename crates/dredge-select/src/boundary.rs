//! Incremental editing of a project boundary.
//!
//! The editor owns the ordered vertex list for one project. Every mutation
//! that succeeds is pushed to the registered [`BoundarySink`] right away, so
//! the stored boundary never lags behind what the user sees.

use std::fmt;

use dredge_core::models::{GeoPoint, Polygon, ProjectId};
use dredge_core::ports::ProjectStore;
use dredge_core::{DredgeError, Result};
use tracing::debug;

/// Receives the boundary after every successful edit
pub trait BoundarySink {
    /// `None` means the boundary is now empty
    fn save_boundary(&mut self, boundary: Option<&[GeoPoint]>) -> Result<()>;
}

/// Writes boundary edits for one project through a [`ProjectStore`]
#[derive(Debug, Clone)]
pub struct StoreBoundarySink<S> {
    store: S,
    project: ProjectId,
}

impl<S: ProjectStore> StoreBoundarySink<S> {
    pub fn new(store: S, project: ProjectId) -> Self {
        Self { store, project }
    }
}

impl<S: ProjectStore> BoundarySink for StoreBoundarySink<S> {
    fn save_boundary(&mut self, boundary: Option<&[GeoPoint]>) -> Result<()> {
        self.store.save_boundary(self.project, boundary.map(<[GeoPoint]>::to_vec))
    }
}

/// Ordered boundary vertices plus the click-capture flag
#[derive(Default)]
pub struct BoundaryEditor {
    vertices: Vec<GeoPoint>,
    capture_active: bool,
    sink: Option<Box<dyn BoundarySink + Send + Sync>>,
}

impl fmt::Debug for BoundaryEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryEditor")
            .field("vertices", &self.vertices)
            .field("capture_active", &self.capture_active)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl BoundaryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously persisted boundary. Nothing is written back.
    pub fn from_vertices(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices, ..Self::default() }
    }

    /// Register the sink that receives every later edit
    pub fn with_sink(mut self, sink: impl BoundarySink + Send + Sync + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture_active
    }

    pub fn set_capture(&mut self, active: bool) {
        self.capture_active = active;
    }

    /// Flip capture mode and return the new state
    pub fn toggle_capture(&mut self) -> bool {
        self.capture_active = !self.capture_active;
        self.capture_active
    }

    /// Append a vertex at the end of the ring
    pub fn append_vertex(&mut self, point: GeoPoint) -> Result<()> {
        if !point.is_finite() {
            return Err(DredgeError::InvalidCoordinate { lat: point.lat, lng: point.lng });
        }
        self.vertices.push(point);
        debug!(lat = point.lat, lng = point.lng, vertices = self.vertices.len(), "Vertex appended");
        self.persist()
    }

    /// Map click handler: appends only while capture mode is on.
    ///
    /// Returns whether the click was taken as a vertex.
    pub fn capture_click(&mut self, point: GeoPoint) -> Result<bool> {
        if !self.capture_active {
            return Ok(false);
        }
        self.append_vertex(point)?;
        Ok(true)
    }

    /// Remove the vertex at `index`, shifting later vertices down by one
    pub fn remove_vertex_at(&mut self, index: usize) -> Result<GeoPoint> {
        if index >= self.vertices.len() {
            return Err(DredgeError::IndexOutOfRange { index, len: self.vertices.len() });
        }
        let removed = self.vertices.remove(index);
        debug!(index, vertices = self.vertices.len(), "Vertex removed");
        self.persist()?;
        Ok(removed)
    }

    /// Remove the most recently appended vertex
    pub fn undo_last(&mut self) -> Result<GeoPoint> {
        let removed = self.vertices.pop().ok_or(DredgeError::EmptyBoundary)?;
        debug!(vertices = self.vertices.len(), "Last vertex undone");
        self.persist()?;
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.vertices.clear();
        debug!("Boundary cleared");
        self.persist()
    }

    /// The boundary as a polygon, once it has at least three vertices
    pub fn to_polygon(&self) -> Option<Polygon> {
        Polygon::from_vertices(&self.vertices)
    }

    // The in-memory edit stays applied even when the sink fails.
    fn persist(&mut self) -> Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        let boundary = if self.vertices.is_empty() { None } else { Some(self.vertices.as_slice()) };
        sink.save_boundary(boundary)
    }
}
