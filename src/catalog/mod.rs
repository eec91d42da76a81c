//! Taginfo project catalog model.
//!
//! The catalog is the document registered with taginfo: fixed project metadata
//! followed by one entry per key, each listing the OSM object types the key
//! applies to.
//!
//! See <https://wiki.openstreetmap.org/wiki/Taginfo/Projects> for the format.

pub mod writer;

use serde::{Deserialize, Serialize};

pub use writer::write_catalog;

/// Version of the taginfo project file format we produce.
pub const DATA_FORMAT: u32 = 1;

/// Geometry class a key was observed on.
///
/// Serialized with taginfo's object type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeometryClass {
    #[serde(rename = "node")]
    Point,
    #[serde(rename = "way")]
    Line,
    #[serde(rename = "area")]
    Area,
    #[serde(rename = "relation")]
    Multipart,
}

impl GeometryClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryClass::Point => "node",
            GeometryClass::Line => "way",
            GeometryClass::Area => "area",
            GeometryClass::Multipart => "relation",
        }
    }
}

/// Insertion-ordered set of geometry classes.
///
/// At most four members, so a `Vec` with a membership check is all we need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObjectTypes(Vec<GeometryClass>);

impl ObjectTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class unless already present. Returns true if it was added.
    pub fn insert(&mut self, class: GeometryClass) -> bool {
        if self.0.contains(&class) {
            return false;
        }
        self.0.push(class);
        true
    }

    pub fn contains(&self, class: GeometryClass) -> bool {
        self.0.contains(&class)
    }

    /// Lines and closed ways can also be members of a multipolygon or route
    /// relation, so any key seen on either applies to relations too.
    pub fn close(&mut self) {
        if self.contains(GeometryClass::Area) || self.contains(GeometryClass::Line) {
            self.insert(GeometryClass::Multipart);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeometryClass> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[GeometryClass] {
        &self.0
    }
}

impl FromIterator<GeometryClass> for ObjectTypes {
    fn from_iter<I: IntoIterator<Item = GeometryClass>>(iter: I) -> Self {
        let mut types = ObjectTypes::new();
        for class in iter {
            types.insert(class);
        }
        types
    }
}

/// One key registered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    pub key: String,
    pub object_types: ObjectTypes,
    pub description: String,
    pub doc_url: String,
}

/// Static project block of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub description: String,
    pub project_url: String,
    pub contact_name: String,
    pub contact_email: String,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            name: "OpenStreetMap Carto keys".to_string(),
            description: "Default OpenStreetMap.org style using CartoCSS".to_string(),
            project_url: "https://github.com/gravitystorm/openstreetmap-carto".to_string(),
            contact_name: "openstreetmap-carto maintainers".to_string(),
            contact_email: "openstreetmap-carto (at) gravitystorm (dot) co (dot) uk".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub data_format: u32,
    pub project: ProjectMetadata,
    pub tags: Vec<TagEntry>,
}

impl Catalog {
    pub fn new(project: ProjectMetadata) -> Self {
        Self {
            data_format: DATA_FORMAT,
            project,
            tags: Vec::new(),
        }
    }
}
