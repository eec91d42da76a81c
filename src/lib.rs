//! taginfo-carto - taginfo project file generator for openstreetmap-carto
//!
//! Collects the OSM keys a CartoCSS map style depends on and writes them as a
//! taginfo project file, so taginfo can show which keys the style renders.
//!
//! Keys come from two places:
//!
//! - the osm2pgsql style file, which lists the keys stored in dedicated columns
//! - the hstore lookups (`tags->'key'`, `tags ?& ARRAY[...]`) inside the SQL of
//!   the `project.mml` layers
//!
//! ## Module Structure
//!
//! - `catalog`: taginfo project file model and writer
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and defaults
//! - `parsers`: Style file and layer scanners
//! - `registry`: Per-key geometry accumulator for layer keys

pub mod catalog;
pub mod cli;
pub mod config;
pub mod parsers;
pub mod registry;
