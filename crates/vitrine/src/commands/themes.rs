//! Theme listing command.

use std::path::Path;

use anyhow::{Context, Result};

use vitrine_catalog::{Catalog, CatalogClient};

use crate::config::ConfigFile;

/// Run the themes command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = ConfigFile::load(config_path)?;

    let catalog = match &config.catalog.file {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to read catalog from {}", path.display()))?,
        None => CatalogClient::new()?
            .fetch(&config.catalog.url)
            .await
            .context("Failed to fetch theme catalog")?,
    };

    let themes = catalog.themes(&config.catalog.category);

    let name_width = column_width(themes.iter().map(|t| t.name.len()), "NAME");
    let id_width = column_width(themes.iter().map(|t| t.id.len()), "ID");
    let package_width = column_width(themes.iter().map(|t| package_of(t).len()), "PACKAGE");

    println!(
        "{:<name_width$}  {:<id_width$}  {:<package_width$}  URL",
        "NAME", "ID", "PACKAGE"
    );
    for theme in &themes {
        println!(
            "{:<name_width$}  {:<id_width$}  {:<package_width$}  {}",
            theme.name,
            theme.id,
            package_of(theme),
            theme.url
        );
    }
    println!("\n{} themes", themes.len());

    Ok(())
}

fn package_of(theme: &vitrine_catalog::Theme) -> &str {
    if theme.builtin {
        "(builtin)"
    } else {
        &theme.pypi_package
    }
}

fn column_width(lengths: impl Iterator<Item = usize>, header: &str) -> usize {
    lengths.max().unwrap_or(0).max(header.len())
}
