//! osm2pgsql style file scanner.
//!
//! Each data row has four whitespace-separated columns:
//!
//! ```text
//! # OsmType  Tag          DataType     Flags
//! node,way   amenity      text         polygon
//! way        highway      text         linear
//! node,way   z_order      int4         linear
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::Diagnostic;
use crate::catalog::{GeometryClass, ObjectTypes};

/// Internal columns osm2pgsql derives itself; they are not OSM keys.
pub const TECHNICAL_COLUMNS: &[&str] = &["z_order", "way_area"];

/// A key that osm2pgsql stores in its own column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleColumn {
    pub key: String,
    pub object_types: ObjectTypes,
}

#[derive(Debug, Default)]
pub struct StyleScanResult {
    pub columns: Vec<StyleColumn>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn parse_style_file(path: &Path) -> Result<StyleScanResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read style file: {}", path.display()))?;
    Ok(scan_style(&content))
}

pub fn scan_style(content: &str) -> StyleScanResult {
    let mut result = StyleScanResult::default();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        if line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [osm_type, key, _data_type, flags] = fields.as_slice() else {
            continue;
        };

        if let Some(reason) = skip_reason(key, flags) {
            result.diagnostics.push(Diagnostic::StyleRowSkipped {
                line: line_num,
                key: key.to_string(),
                reason: reason.to_string(),
            });
            continue;
        }

        result.columns.push(StyleColumn {
            key: key.to_string(),
            object_types: object_types_for(osm_type, flags),
        });
    }

    result
}

fn skip_reason(key: &str, flags: &str) -> Option<&'static str> {
    if flags == "delete" {
        Some("deleted on import")
    } else if flags.contains("nocolumn") {
        Some("no database column")
    } else if TECHNICAL_COLUMNS.contains(&key) {
        Some("technical column")
    } else {
        None
    }
}

/// Object types for a row, from its OsmType column and flags.
pub fn object_types_for(osm_type: &str, flags: &str) -> ObjectTypes {
    let mut types = ObjectTypes::new();
    if osm_type.contains("node") {
        types.insert(GeometryClass::Point);
    }
    if osm_type.contains("way") {
        types.insert(GeometryClass::Line);
        if flags.contains("polygon") {
            types.insert(GeometryClass::Area);
        }
    }
    types.close();
    types
}
