//! Scanners for the two map style inputs.
//!
//! - `style`: the osm2pgsql `.style` file listing the dedicated database columns
//! - `layers`: the CartoCSS `project.mml` layer list and its SQL queries
//! - `expression`: key extraction from hstore lookups embedded in those queries
//!
//! Scanners never print. They hand back what they noticed as [`Diagnostic`]s
//! and the CLI decides whether to show them.

pub mod expression;
pub mod layers;
pub mod style;

use crate::catalog::GeometryClass;

/// Something a scanner noticed that is worth showing in verbose mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A style row was dropped because of its flags or column name.
    StyleRowSkipped { line: usize, key: String, reason: String },
    /// A layer is about to be scanned.
    LayerVisited { id: String },
    /// The layer declares a geometry we have no object type for.
    UnknownGeometry { layer: String, geometry: String },
    /// No geometry declared and none of the known tables appear in the query.
    UnguessableTable { layer: String, table: String },
    /// A key was extracted from a layer query.
    KeyFound {
        layer: String,
        key: String,
        geometry: Option<GeometryClass>,
    },
}
