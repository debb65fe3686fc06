//! The three per-theme external stages.
//!
//! Each stage runs an external program for one theme, confining its output
//! to the theme's working directory, its output directory under the site
//! tree, and its own log file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use vitrine_catalog::{Catalog, Theme};

use crate::config::PipelineConfig;
use crate::deps::resolve_packages;

/// Errors from a single stage item.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exit {
        program: String,
        status: std::process::ExitStatus,
    },

    #[error("invalid site config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to start worker pool: {0}")]
    Pool(String),
}

/// Create the theme's isolated environment and install its packages.
///
/// The environment is created only when missing; the install always runs.
pub fn install_theme(
    config: &PipelineConfig,
    catalog: &Catalog,
    theme: &Theme,
) -> Result<(), StageError> {
    let theme_dir = config.themes_dir.join(&theme.id);
    let venv = theme_dir.join(".venv");
    let log = config.logs_dir.join(format!("{}.install.log", theme.id));

    if !venv.exists() {
        let mut cmd = Command::new(&config.tools.uv);
        cmd.arg("venv").arg("--seed").arg(&venv);
        run_logged(cmd, &config.tools.uv, &log)?;
    }

    let packages = resolve_packages(
        &theme_dir.join("mkdocs.yml"),
        catalog,
        theme,
        &config.tools.builder,
    )?;

    tracing::debug!(theme = %theme.id, ?packages, "installing packages");

    let mut cmd = Command::new(&config.tools.uv);
    cmd.arg("pip")
        .arg("install")
        .args(&packages)
        .env("VIRTUAL_ENV", &venv)
        .env("UV_PROJECT_ENVIRONMENT", &venv);
    run_logged(cmd, &config.tools.uv, &log)
}

/// Build one theme's site into `<site>/themes/<id>`.
pub fn build_theme(config: &PipelineConfig, theme: &Theme) -> Result<(), StageError> {
    let theme_dir = absolute(&config.themes_dir.join(&theme.id))?;
    let dest = absolute(&config.site_dir.join("themes").join(&theme.id))?;
    let builder = theme_dir
        .join(".venv")
        .join("bin")
        .join(&config.tools.builder);
    let log = config.logs_dir.join(format!("{}.build.log", theme.id));

    tracing::info!(theme = %theme.id, "building theme site");

    let mut cmd = Command::new(&builder);
    cmd.arg("build")
        .arg("-d")
        .arg(&dest)
        .current_dir(&theme_dir);
    run_logged(cmd, &builder.display().to_string(), &log)
}

/// Capture a screenshot of one theme's built site.
///
/// Skipped with a warning when the build left no `index.html` behind.
pub fn screenshot_theme(config: &PipelineConfig, theme: &Theme) -> Result<(), StageError> {
    let index = config
        .site_dir
        .join("themes")
        .join(&theme.id)
        .join("index.html");
    if !index.exists() {
        tracing::warn!(theme = %theme.id, "no built index.html, skipping screenshot");
        return Ok(());
    }

    let shot = config
        .main_dir
        .join("docs")
        .join("assets")
        .join("img")
        .join(format!("{}.png", theme.id));
    let log = config.logs_dir.join(format!("{}.shot.log", theme.id));

    let mut cmd = Command::new(&config.tools.shooter);
    cmd.arg(&index).arg("-o").arg(&shot);
    run_logged(cmd, &config.tools.shooter, &log)
}

/// Run a command to completion, appending its output to `log_path`.
pub(crate) fn run_logged(
    mut cmd: Command,
    program: &str,
    log_path: &Path,
) -> Result<(), StageError> {
    let output = cmd.output().map_err(|source| StageError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|source| StageError::Io {
            path: log_path.to_path_buf(),
            source,
        })?;
    log.write_all(&output.stdout)
        .and_then(|()| log.write_all(&output.stderr))
        .map_err(|source| StageError::Io {
            path: log_path.to_path_buf(),
            source,
        })?;

    if !output.status.success() {
        return Err(StageError::Exit {
            program: program.to_string(),
            status: output.status,
        });
    }

    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf, StageError> {
    std::path::absolute(path).map_err(|source| StageError::Io {
        path: path.to_path_buf(),
        source,
    })
}
