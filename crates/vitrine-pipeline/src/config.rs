//! Pipeline configuration.

use std::path::PathBuf;

/// External programs the pipeline shells out to.
#[derive(Debug, Clone)]
pub struct Tools {
    /// Environment and package tool.
    pub uv: String,
    /// Site generator run from each theme's environment.
    pub builder: String,
    /// Screenshot capture tool.
    pub shooter: String,
    /// Site generator for the gallery's own site.
    pub main_builder: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            uv: "uv".to_string(),
            builder: "mkdocs".to_string(),
            shooter: "shot-scraper".to_string(),
            main_builder: "mkdocs".to_string(),
        }
    }
}

/// Directory layout and execution settings for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Per-theme working directories live under here, one per theme id.
    pub themes_dir: PathBuf,
    /// Built sites land under `<site_dir>/themes/<id>`.
    pub site_dir: PathBuf,
    /// Per-item log files.
    pub logs_dir: PathBuf,
    /// The gallery's own site source; screenshots land under its docs tree.
    pub main_dir: PathBuf,
    pub tools: Tools,
    /// Worker pool size for each stage.
    pub jobs: usize,
}

impl PipelineConfig {
    /// Default pool size: one worker per available core.
    pub fn default_jobs() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            themes_dir: PathBuf::from("themes"),
            site_dir: PathBuf::from("site"),
            logs_dir: PathBuf::from("logs"),
            main_dir: PathBuf::from("."),
            tools: Tools::default(),
            jobs: Self::default_jobs(),
        }
    }
}
