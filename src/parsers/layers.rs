//! CartoCSS `project.mml` layer scanner.
//!
//! Only PostGIS layers are of interest. For each one we work out which OSM
//! object type its rows come from, then record every hstore key its query
//! reads in the [`TagRegistry`].

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{Diagnostic, expression::extract_keys};
use crate::catalog::GeometryClass;
use crate::registry::TagRegistry;

/// Datasource type of layers backed by the osm2pgsql database.
pub const POSTGIS_TYPE: &str = "postgis";

/// osm2pgsql tables in the order they are tried when a layer has no geometry.
///
/// A query joining several tables gets the first listed one.
pub const TABLE_GEOMETRIES: &[(&str, GeometryClass)] = &[
    ("planet_osm_point", GeometryClass::Point),
    ("planet_osm_polygon", GeometryClass::Area),
    ("planet_osm_line", GeometryClass::Line),
    ("planet_osm_ways", GeometryClass::Line),
];

#[derive(Debug, Deserialize)]
pub struct ProjectDocument {
    #[serde(rename = "Layer")]
    pub layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
pub struct Layer {
    pub id: String,
    #[serde(default)]
    pub geometry: Option<String>,
    #[serde(rename = "Datasource")]
    pub datasource: Datasource,
}

#[derive(Debug, Default, Deserialize)]
pub struct Datasource {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
}

#[derive(Debug, Default)]
pub struct LayerScanResult {
    /// PostGIS layers whose query was scanned.
    pub layers_scanned: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a `project.mml` document.
///
/// Anchors and `<<` merge keys are resolved first; the stock project file
/// shares its database settings between layers that way.
pub fn parse_project(content: &str) -> Result<ProjectDocument> {
    let mut value: serde_yaml::Value =
        serde_yaml::from_str(content).context("Invalid YAML")?;
    value
        .apply_merge()
        .context("Failed to resolve YAML merge keys")?;
    serde_yaml::from_value(value).context("Unexpected project layout")
}

pub fn parse_project_file(path: &Path) -> Result<ProjectDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file: {}", path.display()))?;
    parse_project(&content)
        .with_context(|| format!("Failed to parse project file: {}", path.display()))
}

/// Geometry declared by the layer itself.
///
/// `Err` carries a declared value we have no object type for.
fn declared_geometry(geometry: &str) -> Result<GeometryClass, &str> {
    match geometry {
        "point" => Ok(GeometryClass::Point),
        "linestring" => Ok(GeometryClass::Line),
        "polygon" => Ok(GeometryClass::Area),
        other => Err(other),
    }
}

/// Geometry implied by the osm2pgsql table a query reads from.
pub fn guess_geometry(table: &str) -> Option<GeometryClass> {
    let table = table.to_lowercase();
    TABLE_GEOMETRIES
        .iter()
        .find(|(name, _)| table.contains(name))
        .map(|(_, geometry)| *geometry)
}

/// Scan one layer into the registry. Returns false if the layer was skipped.
fn scan_layer(
    layer: &Layer,
    registry: &mut TagRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    if layer.datasource.kind.as_deref() != Some(POSTGIS_TYPE) {
        return false;
    }
    let Some(table) = layer.datasource.table.as_deref() else {
        return false;
    };

    let geometry = match layer.geometry.as_deref().filter(|g| !g.is_empty()) {
        Some(declared) => match declared_geometry(declared) {
            Ok(geometry) => Some(geometry),
            Err(unknown) => {
                diagnostics.push(Diagnostic::UnknownGeometry {
                    layer: layer.id.clone(),
                    geometry: unknown.to_string(),
                });
                None
            }
        },
        None => {
            let guessed = guess_geometry(table);
            if guessed.is_none() {
                diagnostics.push(Diagnostic::UnguessableTable {
                    layer: layer.id.clone(),
                    table: table.to_lowercase(),
                });
            }
            guessed
        }
    };

    for key in extract_keys(table) {
        registry.record(&key, geometry);
        diagnostics.push(Diagnostic::KeyFound {
            layer: layer.id.clone(),
            key,
            geometry,
        });
    }
    true
}

/// Record the keys of every PostGIS layer in `registry`.
pub fn scan_layers(project: &ProjectDocument, registry: &mut TagRegistry) -> LayerScanResult {
    let mut result = LayerScanResult::default();

    for layer in &project.layers {
        result.diagnostics.push(Diagnostic::LayerVisited {
            id: layer.id.clone(),
        });
        if scan_layer(layer, registry, &mut result.diagnostics) {
            result.layers_scanned += 1;
        }
    }

    result
}
