//! Per-theme and main-site preparation.

use std::path::{Path, PathBuf};

use vitrine_catalog::Theme;

use crate::renderer::{RenderContext, ScaffoldError, SiteMeta, SiteRenderer};

impl SiteRenderer {
    /// Materialize the demo project for one theme under `themes_root/<id>`.
    ///
    /// The shared `templates/specimen` tree is rendered first; when
    /// `templates/themes/<id>` exists it is rendered on top, so per-theme
    /// override files win.
    pub fn prepare_theme(
        &self,
        templates_dir: &Path,
        themes_root: &Path,
        site: &SiteMeta,
        themes: &[Theme],
        theme: &Theme,
    ) -> Result<PathBuf, ScaffoldError> {
        let theme_dir = themes_root.join(&theme.id);
        let ctx = RenderContext {
            site,
            themes,
            theme: Some(theme),
        };

        self.render_tree(&templates_dir.join("specimen"), &theme_dir, &ctx)?;

        let overrides = templates_dir.join("themes").join(&theme.id);
        if overrides.is_dir() {
            tracing::debug!(theme = %theme.id, "applying theme overrides");
            self.render_tree(&overrides, &theme_dir, &ctx)?;
        }

        Ok(theme_dir)
    }

    /// Materialize the gallery's own site source from `templates/main`.
    pub fn prepare_main(
        &self,
        templates_dir: &Path,
        main_dir: &Path,
        site: &SiteMeta,
        themes: &[Theme],
    ) -> Result<(), ScaffoldError> {
        let ctx = RenderContext {
            site,
            themes,
            theme: None,
        };
        self.render_tree(&templates_dir.join("main"), main_dir, &ctx)?;
        Ok(())
    }
}
