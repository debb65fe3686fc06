//! Package resolution from rendered site configs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use vitrine_catalog::{Catalog, Theme};

use crate::stages::StageError;

/// The subset of a rendered site config that drives dependency resolution.
#[derive(Debug, Deserialize)]
struct SiteConfig {
    #[serde(default)]
    theme: Option<ThemeField>,
    #[serde(default)]
    plugins: Vec<PluginField>,
}

/// `theme:` is either a bare name or a mapping with a `name` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThemeField {
    Name(String),
    Detailed { name: Option<String> },
}

/// Plugin entries are either a bare name or a single-key mapping carrying
/// the plugin's options.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PluginField {
    Name(String),
    Detailed(BTreeMap<String, serde_yaml::Value>),
}

impl PluginField {
    fn name(&self) -> Option<&str> {
        match self {
            PluginField::Name(name) => Some(name),
            PluginField::Detailed(map) => map.keys().next().map(String::as_str),
        }
    }
}

/// Derive the packages to install for one theme from its rendered config.
///
/// The site generator package is always included. The theme's own package
/// comes from the config's theme name mapped through the catalog, falling
/// back to the theme entry's package spec; built-in themes contribute none.
/// Plugins unknown to the catalog are skipped.
pub fn resolve_packages(
    config_path: &Path,
    catalog: &Catalog,
    theme: &Theme,
    generator: &str,
) -> Result<Vec<String>, StageError> {
    let raw = fs::read_to_string(config_path).map_err(|source| StageError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;
    let config: SiteConfig = serde_yaml::from_str(&raw).map_err(|e| StageError::Config {
        path: config_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut packages = vec![generator.to_string()];

    let theme_name = match &config.theme {
        Some(ThemeField::Name(name)) => Some(name.as_str()),
        Some(ThemeField::Detailed { name }) => name.as_deref(),
        None => None,
    };

    if let Some(name) = theme_name {
        if let Some(package) = catalog.package_for(name) {
            packages.push(package);
        } else if name == theme.id && !theme.builtin && !theme.pypi_package.is_empty() {
            packages.push(theme.pypi_package.clone());
        }
    }

    for plugin in &config.plugins {
        let Some(name) = plugin.name() else { continue };
        match catalog.package_for(name) {
            Some(package) => packages.push(package),
            None => {
                tracing::debug!(plugin = name, "no package known for plugin");
            }
        }
    }

    let mut seen = Vec::with_capacity(packages.len());
    for package in packages {
        if !seen.contains(&package) {
            seen.push(package);
        }
    }

    Ok(seen)
}
