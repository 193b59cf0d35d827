//! GeoJSON import and export for dredge selections.

pub mod export;
pub mod parse;
pub mod sink;

pub use export::{export_selection, export_session, suggested_filename, to_json_string};
pub use parse::polygon_from_geojson;
pub use sink::{ExportSink, FileExportSink};
