//! Depth-filtered, polygon-bounded statistics.
//!
//! Everything here is recomputed from scratch on each call. There is no cache
//! to invalidate, so two calls with the same inputs always agree.

use dredge_core::models::{DepthRange, DredgeRecord, MaterialTally, SelectionStats};
use dredge_geo::contained_in_any;
use tracing::debug;

use crate::active::ActivePolygonSet;

/// Record passes the depth filter and lies inside at least one active polygon
pub fn is_selected(
    record: &DredgeRecord,
    active: &ActivePolygonSet,
    depth_range: &DepthRange,
) -> bool {
    depth_range.contains(record.depth) && contained_in_any(record.location(), active.polygons())
}

/// Records selected by the active polygons, in input order
pub fn select_records<'a>(
    records: &'a [DredgeRecord],
    active: &ActivePolygonSet,
    depth_range: &DepthRange,
) -> Vec<&'a DredgeRecord> {
    records.iter().filter(|record| is_selected(record, active, depth_range)).collect()
}

/// Aggregate volume, depth and material mix over the selected records.
///
/// Returns `None` when there is nothing to select with or nothing to select
/// from. A selection that matches zero records still yields stats with a
/// count of 0 and an average depth of 0.
pub fn compute_stats(
    records: &[DredgeRecord],
    active: &ActivePolygonSet,
    depth_range: &DepthRange,
) -> Option<SelectionStats> {
    if active.is_empty() || records.is_empty() {
        return None;
    }

    let mut volume = 0.0;
    let mut depth_sum = 0.0;
    let mut count = 0usize;
    let mut tally = MaterialTally::new();

    for record in records.iter().filter(|record| is_selected(record, active, depth_range)) {
        volume += record.volume;
        depth_sum += record.depth;
        count += 1;
        tally.add(record.material, record.volume);
    }

    let avg_depth = if count > 0 { depth_sum / count as f64 } else { 0.0 };

    debug!(
        polygons = active.len(),
        records = records.len(),
        selected = count,
        volume,
        "Selection stats recomputed"
    );

    Some(SelectionStats {
        volume,
        count,
        avg_depth,
        material_distribution: tally.into_sorted(),
        is_official_boundary: active.is_official_boundary(),
    })
}
