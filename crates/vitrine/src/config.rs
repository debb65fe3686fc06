//! Configuration file loading (gallery.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure (gallery.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub tools: ToolsSection,
    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogSection {
    #[serde(default = "default_catalog_url")]
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Local catalog file; when set, no fetch happens.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct PathsSection {
    #[serde(default = "default_templates")]
    pub templates: PathBuf,
    #[serde(default = "default_themes")]
    pub themes: PathBuf,
    #[serde(default = "default_site")]
    pub site: PathBuf,
    #[serde(default = "default_logs")]
    pub logs: PathBuf,
    #[serde(default = "default_main")]
    pub main: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ToolsSection {
    #[serde(default = "default_uv")]
    pub uv: String,
    #[serde(default = "default_builder")]
    pub builder: String,
    #[serde(default = "default_shooter")]
    pub shooter: String,
    #[serde(default = "default_builder")]
    pub main_builder: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildSection {
    /// Worker pool size; defaults to available cores.
    pub jobs: Option<usize>,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

fn default_title() -> String {
    "Theme Gallery".to_string()
}
fn default_catalog_url() -> String {
    "https://raw.githubusercontent.com/mkdocs/catalog/main/projects.yaml".to_string()
}
fn default_category() -> String {
    "theming".to_string()
}
fn default_templates() -> PathBuf {
    PathBuf::from("templates")
}
fn default_themes() -> PathBuf {
    PathBuf::from("themes")
}
fn default_site() -> PathBuf {
    PathBuf::from("site")
}
fn default_logs() -> PathBuf {
    PathBuf::from("logs")
}
fn default_main() -> PathBuf {
    PathBuf::from(".")
}
fn default_uv() -> String {
    "uv".to_string()
}
fn default_builder() -> String {
    "mkdocs".to_string()
}
fn default_shooter() -> String {
    "shot-scraper".to_string()
}
fn default_minify() -> bool {
    true
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            url: String::new(),
        }
    }
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            category: default_category(),
            file: None,
        }
    }
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            templates: default_templates(),
            themes: default_themes(),
            site: default_site(),
            logs: default_logs(),
            main: default_main(),
        }
    }
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            uv: default_uv(),
            builder: default_builder(),
            shooter: default_shooter(),
            main_builder: default_builder(),
        }
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            jobs: None,
            minify: default_minify(),
        }
    }
}

impl ConfigFile {
    /// Load configuration from `path` if it exists, falling back to
    /// defaults. Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: ConfigFile = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            return Ok(config);
        }
        Ok(ConfigFile::default())
    }
}
