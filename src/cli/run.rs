//! Generation pipeline: scan both inputs, assemble the catalog, write it.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::{
    catalog::{Catalog, TagEntry, write_catalog},
    config::{Config, Paths, load_config},
    parsers::{
        Diagnostic,
        layers::{parse_project_file, scan_layers},
        style::parse_style_file,
    },
    registry::TagRegistry,
};

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunSummary {
    pub output_file: PathBuf,
    /// Entries contributed by the style file.
    pub style_tags: usize,
    /// Distinct keys found in layer queries.
    pub layer_tags: usize,
    pub layers_scanned: usize,
    pub config_from_file: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Catalog built from both inputs, not yet written.
#[derive(Debug)]
pub struct Generated {
    pub catalog: Catalog,
    pub style_tags: usize,
    pub layer_tags: usize,
    pub layers_scanned: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan the style and project files and assemble the catalog.
///
/// Style rows go into the catalog as they are. Layer keys are merged per key
/// and closed over relations. The two sources are not deduplicated against
/// each other, so a key can appear once from each.
pub fn generate(config: &Config, paths: &Paths) -> Result<Generated> {
    let style = parse_style_file(&paths.style_file)?;
    let project = parse_project_file(&paths.project_file)?;

    let mut registry = TagRegistry::new();
    let layers = scan_layers(&project, &mut registry);
    registry.close();

    let mut catalog = Catalog::new(config.project.clone());
    catalog
        .tags
        .extend(style.columns.into_iter().map(|column| TagEntry {
            doc_url: config.doc_url(&column.key),
            description: config.style_description.clone(),
            key: column.key,
            object_types: column.object_types,
        }));
    let style_tags = catalog.tags.len();

    let layer_tags = registry.len();
    catalog
        .tags
        .extend(registry.into_entries(&config.hstore_description, |key| config.doc_url(key)));

    let mut diagnostics = style.diagnostics;
    diagnostics.extend(layers.diagnostics);

    Ok(Generated {
        catalog,
        style_tags,
        layer_tags,
        layers_scanned: layers.layers_scanned,
        diagnostics,
    })
}

/// Run the generator with `base` as the working directory.
pub fn run(base: &Path) -> Result<RunSummary> {
    let loaded = load_config(base)?;
    let paths = Paths::resolve(&loaded.config, base);

    let generated = generate(&loaded.config, &paths)?;
    write_catalog(&generated.catalog, &paths.output_file)?;

    Ok(RunSummary {
        output_file: paths.output_file,
        style_tags: generated.style_tags,
        layer_tags: generated.layer_tags,
        layers_scanned: generated.layers_scanned,
        config_from_file: loaded.from_file,
        diagnostics: generated.diagnostics,
    })
}
