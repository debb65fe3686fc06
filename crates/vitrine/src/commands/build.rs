//! Full gallery build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use vitrine_catalog::{Catalog, CatalogClient};
use vitrine_pipeline::{Pipeline, PipelineConfig, StageOpts, Tools};
use vitrine_scaffold::{write_gallery_stylesheet, SiteMeta, SiteRenderer};

use crate::config::ConfigFile;

/// Build command flags.
#[derive(Debug, Default)]
pub struct BuildOpts {
    pub no_deps: bool,
    pub no_themes: bool,
    pub no_shots: bool,
    pub jobs: Option<usize>,
    pub catalog_file: Option<PathBuf>,
}

/// Run the build command.
pub async fn run(config_path: &Path, opts: BuildOpts) -> Result<()> {
    let config = ConfigFile::load(config_path)?;

    // Catalog: local file when configured, remote fetch otherwise.
    let catalog_file = opts.catalog_file.clone().or(config.catalog.file.clone());
    let catalog = match catalog_file {
        Some(path) => Catalog::from_path(&path)
            .with_context(|| format!("Failed to read catalog from {}", path.display()))?,
        None => CatalogClient::new()?
            .fetch(&config.catalog.url)
            .await
            .context("Failed to fetch theme catalog")?,
    };

    let themes = catalog.themes(&config.catalog.category);
    tracing::info!("Catalog resolved to {} themes", themes.len());

    // Materialize every demo project and the gallery's own site source.
    let site = SiteMeta {
        title: config.site.title.clone(),
        url: config.site.url.clone(),
    };
    let renderer = SiteRenderer::new();

    for theme in &themes {
        renderer
            .prepare_theme(
                &config.paths.templates,
                &config.paths.themes,
                &site,
                &themes,
                theme,
            )
            .with_context(|| format!("Failed to prepare theme {}", theme.id))?;
    }
    tracing::info!("Prepared {} theme sites", themes.len());

    renderer
        .prepare_main(&config.paths.templates, &config.paths.main, &site, &themes)
        .context("Failed to prepare the gallery site")?;
    let css = write_gallery_stylesheet(&config.paths.main, config.build.minify)?;
    tracing::debug!("Wrote {}", css.display());

    // External stages: install, build, screenshot.
    let pipeline_config = PipelineConfig {
        themes_dir: config.paths.themes.clone(),
        site_dir: config.paths.site.clone(),
        logs_dir: config.paths.logs.clone(),
        main_dir: config.paths.main.clone(),
        tools: Tools {
            uv: config.tools.uv.clone(),
            builder: config.tools.builder.clone(),
            shooter: config.tools.shooter.clone(),
            main_builder: config.tools.main_builder.clone(),
        },
        jobs: opts
            .jobs
            .or(config.build.jobs)
            .unwrap_or_else(PipelineConfig::default_jobs),
    };
    let stage_opts = StageOpts {
        install: !opts.no_deps,
        build: !opts.no_themes,
        screenshots: !opts.no_shots,
    };

    let pipeline = Pipeline::new(pipeline_config, catalog);
    let report = pipeline.run(&themes, &stage_opts)?;

    for stage in &report.stages {
        if stage.skipped {
            tracing::info!("{}: skipped", stage.stage);
        } else {
            tracing::info!(
                "{}: {} succeeded, {} failed in {:.1}s",
                stage.stage,
                stage.succeeded,
                stage.failed.len(),
                stage.duration.as_secs_f64()
            );
        }
    }

    pipeline.build_gallery().context("Gallery build failed")?;

    if report.is_clean() {
        tracing::info!("Gallery complete: {}", config.paths.site.display());
    } else {
        tracing::warn!(
            "Gallery complete with {} item failures, see {}",
            report.total_failures(),
            config.paths.logs.display()
        );
    }

    Ok(())
}
