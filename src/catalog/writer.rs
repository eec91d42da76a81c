use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use super::Catalog;

/// Render the catalog as JSON with 4-space indentation and a trailing newline.
pub fn render_catalog(catalog: &Catalog) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    catalog
        .serialize(&mut ser)
        .context("Failed to serialize catalog")?;
    buf.push(b'\n');
    String::from_utf8(buf).context("Catalog JSON is not valid UTF-8")
}

/// Write the catalog to `path`, replacing whatever was there.
///
/// The document goes to a temporary file next to `path` first and is renamed
/// into place, so a failed write leaves any previous catalog untouched.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    let content = render_catalog(catalog)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
