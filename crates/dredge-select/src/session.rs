//! The map session: one owner for everything a selection depends on.
//!
//! Records, the boundary editor, the ad-hoc polygon slot, the depth filter and
//! the boundary visibility toggle all live here, so stats are always computed
//! from one consistent snapshot.

use std::sync::{Arc, RwLock};

use dredge_core::models::{DepthRange, DredgeRecord, GeoPoint, Polygon, SelectionStats};
use dredge_core::Result;
use dredge_geo::spatial::polygon_area_m2;
use tracing::debug;

use crate::active::ActivePolygonSet;
use crate::aggregate::{compute_stats, select_records};
use crate::boundary::{BoundaryEditor, BoundarySink};

/// Session shared between threads
pub type SharedSession = Arc<RwLock<MapSession>>;

#[derive(Debug)]
pub struct MapSession {
    records: Vec<DredgeRecord>,
    editor: BoundaryEditor,
    adhoc: Option<Polygon>,
    show_boundary: bool,
    depth_range: DepthRange,
}

impl Default for MapSession {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            editor: BoundaryEditor::new(),
            adhoc: None,
            show_boundary: true,
            depth_range: DepthRange::default(),
        }
    }
}

impl MapSession {
    /// Session over `records` with a previously persisted boundary.
    ///
    /// The initial depth range is pulled inside the observed depths the same
    /// way later record changes are.
    pub fn new(records: Vec<DredgeRecord>, boundary: Vec<GeoPoint>, depth_range: DepthRange) -> Self {
        let mut session = Self {
            editor: BoundaryEditor::from_vertices(boundary),
            depth_range,
            ..Self::default()
        };
        session.set_records(records);
        session
    }

    /// Register where boundary edits are persisted
    pub fn with_boundary_sink(mut self, sink: impl BoundarySink + Send + Sync + 'static) -> Self {
        self.editor = self.editor.with_sink(sink);
        self
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    pub fn records(&self) -> &[DredgeRecord] {
        &self.records
    }

    /// Replace the record set and clamp the depth filter to the new data
    pub fn set_records(&mut self, records: Vec<DredgeRecord>) {
        self.records = records;
        if !self.records.is_empty() {
            let observed = self.observed_depth_range();
            let clamped = self.depth_range.clamp_to(&observed);
            if clamped != self.depth_range {
                debug!(
                    from_min = self.depth_range.min,
                    from_max = self.depth_range.max,
                    to_min = clamped.min,
                    to_max = clamped.max,
                    "Depth range clamped to observed data"
                );
                self.depth_range = clamped;
            }
        }
    }

    /// `[floor(min), ceil(max)]` of record depths, `[0, 30]` with no records
    pub fn observed_depth_range(&self) -> DepthRange {
        DepthRange::observed(self.records.iter().map(|record| record.depth))
    }

    pub fn depth_range(&self) -> DepthRange {
        self.depth_range
    }

    pub fn set_depth_range(&mut self, depth_range: DepthRange) {
        self.depth_range = depth_range;
    }

    pub fn show_boundary(&self) -> bool {
        self.show_boundary
    }

    pub fn set_show_boundary(&mut self, show: bool) {
        self.show_boundary = show;
    }

    pub fn editor(&self) -> &BoundaryEditor {
        &self.editor
    }

    pub fn boundary(&self) -> &[GeoPoint] {
        self.editor.vertices()
    }

    pub fn append_vertex(&mut self, point: GeoPoint) -> Result<()> {
        self.editor.append_vertex(point)
    }

    pub fn capture_click(&mut self, point: GeoPoint) -> Result<bool> {
        self.editor.capture_click(point)
    }

    pub fn set_capture(&mut self, active: bool) {
        self.editor.set_capture(active);
    }

    pub fn toggle_capture(&mut self) -> bool {
        self.editor.toggle_capture()
    }

    pub fn remove_vertex_at(&mut self, index: usize) -> Result<GeoPoint> {
        self.editor.remove_vertex_at(index)
    }

    pub fn undo_last(&mut self) -> Result<GeoPoint> {
        self.editor.undo_last()
    }

    pub fn clear_boundary(&mut self) -> Result<()> {
        self.editor.clear()
    }

    pub fn adhoc(&self) -> Option<&Polygon> {
        self.adhoc.as_ref()
    }

    /// Drawn polygon created or edited; replaces any previous one
    pub fn set_adhoc(&mut self, polygon: Polygon) {
        self.adhoc = Some(polygon);
    }

    /// Drawn polygon deleted
    pub fn clear_adhoc(&mut self) {
        self.adhoc = None;
    }

    /// Visible boundary with three or more vertices, plus the drawn polygon
    pub fn active_polygons(&self) -> ActivePolygonSet {
        let boundary = if self.show_boundary { self.editor.to_polygon() } else { None };
        ActivePolygonSet::new(boundary, self.adhoc.clone())
    }

    pub fn stats(&self) -> Option<SelectionStats> {
        compute_stats(&self.records, &self.active_polygons(), &self.depth_range)
    }

    /// Records selected by the current polygons and depth filter
    pub fn selection(&self) -> Vec<&DredgeRecord> {
        select_records(&self.records, &self.active_polygons(), &self.depth_range)
    }

    /// Records shallower than `threshold`, regardless of selection
    pub fn shallow_records(&self, threshold: f64) -> Vec<&DredgeRecord> {
        self.records.iter().filter(|record| record.depth < threshold).collect()
    }

    /// Geodesic area of the committed boundary, hidden or not
    pub fn boundary_area_m2(&self) -> Option<f64> {
        self.editor.to_polygon().as_ref().map(polygon_area_m2)
    }
}
