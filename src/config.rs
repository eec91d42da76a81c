use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::catalog::ProjectMetadata;

pub const CONFIG_FILE_NAME: &str = ".taginforc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_style_file")]
    pub style_file: String,
    #[serde(default = "default_project_file")]
    pub project_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Prefix of each entry's `doc_url`; the key is appended verbatim.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_style_description")]
    pub style_description: String,
    #[serde(default = "default_hstore_description")]
    pub hstore_description: String,
    #[serde(default)]
    pub project: ProjectMetadata,
}

fn default_style_file() -> String {
    "../openstreetmap-carto.style".to_string()
}

fn default_project_file() -> String {
    "../project.mml".to_string()
}

fn default_output_file() -> String {
    "taginfo-openstreetmap-carto.json".to_string()
}

fn default_search_url() -> String {
    "https://github.com/gravitystorm/openstreetmap-carto/search?utf8=%E2%9C%93&q=".to_string()
}

fn default_style_description() -> String {
    "Used in the osm2pgsql database backend, see more in the github repo".to_string()
}

fn default_hstore_description() -> String {
    "Used as a hstore tags-> in the database backend, see more in the github repo".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style_file: default_style_file(),
            project_file: default_project_file(),
            output_file: default_output_file(),
            search_url: default_search_url(),
            style_description: default_style_description(),
            hstore_description: default_hstore_description(),
            project: ProjectMetadata::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Paths and the search URL must be non-empty.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("styleFile", &self.style_file),
            ("projectFile", &self.project_file),
            ("outputFile", &self.output_file),
            ("searchUrl", &self.search_url),
        ] {
            if value.trim().is_empty() {
                bail!("'{}' must not be empty", name);
            }
        }
        Ok(())
    }

    pub fn doc_url(&self, key: &str) -> String {
        format!("{}{}", self.search_url, key)
    }
}

/// Resolved input and output locations for one run.
#[derive(Debug, Clone)]
pub struct Paths {
    pub style_file: PathBuf,
    pub project_file: PathBuf,
    pub output_file: PathBuf,
}

impl Paths {
    /// Resolve the configured paths against `base`. Absolute paths are kept.
    pub fn resolve(config: &Config, base: &Path) -> Self {
        Self {
            style_file: base.join(&config.style_file),
            project_file: base.join(&config.project_file),
            output_file: base.join(&config.output_file),
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

/// Load `.taginforc.json` from `dir`, falling back to defaults when absent.
pub fn load_config(dir: &Path) -> Result<ConfigLoadResult> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        });
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        from_file: true,
    })
}
