//! Parallel stage execution.

use std::fs;
use std::process::Command;
use std::time::Instant;

use rayon::prelude::*;

use vitrine_catalog::{Catalog, Theme};

use crate::config::PipelineConfig;
use crate::report::{PipelineReport, StageKind, StageReport};
use crate::stages::{self, StageError};

/// Which stages to run.
#[derive(Debug, Clone, Copy)]
pub struct StageOpts {
    pub install: bool,
    pub build: bool,
    pub screenshots: bool,
}

impl Default for StageOpts {
    fn default() -> Self {
        Self {
            install: true,
            build: true,
            screenshots: true,
        }
    }
}

/// Executes the install, build, and screenshot stages over a theme list.
pub struct Pipeline {
    config: PipelineConfig,
    catalog: Catalog,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    /// Run the enabled stages in order, fanning each out over `themes`.
    ///
    /// Item failures are logged, recorded in the stage report, and never
    /// stop the run. The returned error covers setup problems only, like an
    /// unwritable logs directory.
    pub fn run(&self, themes: &[Theme], opts: &StageOpts) -> Result<PipelineReport, StageError> {
        fs::create_dir_all(&self.config.logs_dir).map_err(|source| StageError::Io {
            path: self.config.logs_dir.clone(),
            source,
        })?;

        let mut report = PipelineReport::default();

        if opts.install {
            report.stages.push(self.run_stage(StageKind::Install, themes)?);
        } else {
            tracing::info!("skipping dependency installation");
            report.stages.push(StageReport::skipped(StageKind::Install));
        }

        if opts.build {
            // Drop outputs of themes no longer in the catalog.
            let out = self.config.site_dir.join("themes");
            let _ = fs::remove_dir_all(&out);
            fs::create_dir_all(&out).map_err(|source| StageError::Io { path: out, source })?;
            report.stages.push(self.run_stage(StageKind::Build, themes)?);
        } else {
            tracing::info!("skipping theme builds");
            report.stages.push(StageReport::skipped(StageKind::Build));
        }

        if opts.screenshots {
            let img = self.config.main_dir.join("docs").join("assets").join("img");
            fs::create_dir_all(&img).map_err(|source| StageError::Io { path: img, source })?;
            report
                .stages
                .push(self.run_stage(StageKind::Screenshot, themes)?);
        } else {
            tracing::info!("skipping screenshots");
            report
                .stages
                .push(StageReport::skipped(StageKind::Screenshot));
        }

        Ok(report)
    }

    fn run_stage(&self, stage: StageKind, themes: &[Theme]) -> Result<StageReport, StageError> {
        let start = Instant::now();
        let mut report = StageReport {
            stage,
            succeeded: 0,
            failed: Vec::new(),
            duration: start.elapsed(),
            skipped: false,
        };

        if themes.is_empty() {
            return Ok(report);
        }

        tracing::info!(%stage, themes = themes.len(), jobs = self.config.jobs, "running stage");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| StageError::Pool(e.to_string()))?;

        let results: Vec<(String, Result<(), StageError>)> = pool.install(|| {
            themes
                .par_iter()
                .map(|theme| {
                    let result = match stage {
                        StageKind::Install => {
                            stages::install_theme(&self.config, &self.catalog, theme)
                        }
                        StageKind::Build => stages::build_theme(&self.config, theme),
                        StageKind::Screenshot => stages::screenshot_theme(&self.config, theme),
                    };
                    (theme.id.clone(), result)
                })
                .collect()
        });

        for (id, result) in results {
            match result {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    tracing::warn!(%stage, theme = %id, error = %e, "stage item failed");
                    report.failed.push((id, e.to_string()));
                }
            }
        }

        report.duration = start.elapsed();
        Ok(report)
    }

    /// Build the gallery's own site.
    ///
    /// Runs the main builder with `--dirty` so the per-theme sites already
    /// under the site directory are left intact.
    pub fn build_gallery(&self) -> Result<(), StageError> {
        tracing::info!("building gallery site");

        let log = self.config.logs_dir.join("gallery.log");
        let mut cmd = Command::new(&self.config.tools.main_builder);
        cmd.arg("build")
            .arg("--dirty")
            .current_dir(&self.config.main_dir);
        stages::run_logged(cmd, &self.config.tools.main_builder, &log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    use crate::config::Tools;

    fn theme(id: &str) -> Theme {
        Theme {
            name: id.to_string(),
            id: id.to_string(),
            url: String::new(),
            pypi_package: String::new(),
            builtin: true,
        }
    }

    fn config(root: &Path, tools: Tools) -> PipelineConfig {
        PipelineConfig {
            themes_dir: root.join("themes"),
            site_dir: root.join("site"),
            logs_dir: root.join("logs"),
            main_dir: root.join("main"),
            tools,
            jobs: 2,
        }
    }

    fn seed_theme_dirs(config: &PipelineConfig, ids: &[&str]) {
        for id in ids {
            let dir = config.themes_dir.join(id);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("mkdocs.yml"), "theme:\n  name: mkdocs\n").unwrap();
        }
    }

    #[test]
    fn item_failures_never_stop_the_run() {
        let temp = tempdir().unwrap();
        // `true` makes installs succeed; the build stage then fails for every
        // theme because no venv builder binary exists.
        let config = config(
            temp.path(),
            Tools {
                uv: "true".to_string(),
                ..Tools::default()
            },
        );
        seed_theme_dirs(&config, &["alpha", "beta"]);

        let catalog = Catalog::parse("projects: []").unwrap();
        let pipeline = Pipeline::new(config, catalog);
        let themes = vec![theme("alpha"), theme("beta")];

        let report = pipeline.run(&themes, &StageOpts::default()).unwrap();

        assert_eq!(report.stages.len(), 3);
        assert_eq!(report.stages[0].succeeded, 2);
        assert_eq!(report.stages[1].failed.len(), 2);
        // No index.html was built, so screenshots skip but still complete.
        assert_eq!(report.stages[2].succeeded, 2);
        assert_eq!(report.total_failures(), 2);
    }

    #[test]
    fn disabled_stages_are_reported_as_skipped() {
        let temp = tempdir().unwrap();
        let config = config(temp.path(), Tools::default());
        let catalog = Catalog::parse("projects: []").unwrap();
        let pipeline = Pipeline::new(config, catalog);

        let opts = StageOpts {
            install: false,
            build: false,
            screenshots: false,
        };
        let report = pipeline.run(&[theme("alpha")], &opts).unwrap();

        assert!(report.stages.iter().all(|s| s.skipped));
        assert!(report.is_clean());
    }

    #[test]
    fn zero_themes_produce_an_empty_report() {
        let temp = tempdir().unwrap();
        let config = config(temp.path(), Tools::default());
        let catalog = Catalog::parse("projects: []").unwrap();
        let pipeline = Pipeline::new(config, catalog);

        let report = pipeline.run(&[], &StageOpts::default()).unwrap();

        assert_eq!(report.stages.len(), 3);
        assert!(report.is_clean());
        assert!(report.stages.iter().all(|s| s.succeeded == 0));
    }

    #[test]
    fn build_stage_clears_stale_outputs() {
        let temp = tempdir().unwrap();
        let config = config(
            temp.path(),
            Tools {
                uv: "true".to_string(),
                ..Tools::default()
            },
        );
        let stale = config.site_dir.join("themes/removed-theme/index.html");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();
        seed_theme_dirs(&config, &["alpha"]);

        let catalog = Catalog::parse("projects: []").unwrap();
        let pipeline = Pipeline::new(config, catalog);

        let opts = StageOpts {
            install: false,
            build: true,
            screenshots: false,
        };
        pipeline.run(&[theme("alpha")], &opts).unwrap();

        assert!(!stale.exists());
    }

    #[test]
    fn gallery_build_failure_is_an_error() {
        let temp = tempdir().unwrap();
        let mut config = config(
            temp.path(),
            Tools {
                main_builder: "false".to_string(),
                ..Tools::default()
            },
        );
        config.main_dir = temp.path().to_path_buf();
        fs::create_dir_all(&config.logs_dir).unwrap();

        let catalog = Catalog::parse("projects: []").unwrap();
        let pipeline = Pipeline::new(config, catalog);

        assert!(matches!(
            pipeline.build_gallery(),
            Err(StageError::Exit { .. })
        ));
    }
}
