//! Template-tree rendering.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{context, Environment};
use walkdir::WalkDir;

use vitrine_catalog::Theme;

/// Gallery-wide metadata exposed to templates as `site`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SiteMeta {
    /// Gallery title.
    pub title: String,
    /// Public URL of the deployed gallery, empty when unknown.
    pub url: String,
}

/// Values available to every expanded template.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub site: &'a SiteMeta,
    /// The full resolved theme list.
    pub themes: &'a [Theme],
    /// The theme being prepared, or none for the gallery's own site.
    pub theme: Option<&'a Theme>,
}

/// Errors from site preparation.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("template directory not found: {0}")]
    MissingTemplates(PathBuf),

    #[error("failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template error in {path}: {message}")]
    Template { path: PathBuf, message: String },

    #[error("stylesheet error: {0}")]
    Css(String),
}

/// Renders template trees into site sources.
pub struct SiteRenderer {
    env: Environment<'static>,
}

// Only these source extensions are template-expanded; everything else is
// copied byte for byte.
const RENDERED_EXTENSIONS: [&str; 2] = ["md", "yml"];

impl SiteRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Preserve file contents as-is; minijinja strips the final
        // newline by default.
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Render the tree under `src` into `dest`.
    ///
    /// Every file under `src` lands at the same relative path under `dest`,
    /// with parent directories created as needed. Returns the number of
    /// files written.
    pub fn render_tree(
        &self,
        src: &Path,
        dest: &Path,
        ctx: &RenderContext<'_>,
    ) -> Result<usize, ScaffoldError> {
        if !src.is_dir() {
            return Err(ScaffoldError::MissingTemplates(src.to_path_buf()));
        }

        fs::create_dir_all(dest).map_err(|source| ScaffoldError::Io {
            path: dest.to_path_buf(),
            source,
        })?;

        let mut written = 0;

        for entry in WalkDir::new(src).follow_links(true) {
            let entry = entry.map_err(|e| ScaffoldError::Walk {
                path: src.to_path_buf(),
                message: e.to_string(),
            })?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(src).unwrap_or(path);
            let target = dest.join(relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|source| ScaffoldError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if RENDERED_EXTENSIONS.contains(&ext) {
                self.render_file(path, &target, ctx)?;
            } else {
                fs::copy(path, &target).map_err(|source| ScaffoldError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            }

            written += 1;
        }

        Ok(written)
    }

    fn render_file(
        &self,
        src: &Path,
        dest: &Path,
        ctx: &RenderContext<'_>,
    ) -> Result<(), ScaffoldError> {
        let source = fs::read_to_string(src).map_err(|e| ScaffoldError::Io {
            path: src.to_path_buf(),
            source: e,
        })?;

        let rendered = self
            .env
            .render_str(
                &source,
                context! {
                    site => ctx.site,
                    themes => ctx.themes,
                    theme => ctx.theme,
                },
            )
            .map_err(|e| ScaffoldError::Template {
                path: src.to_path_buf(),
                message: e.to_string(),
            })?;

        fs::write(dest, rendered).map_err(|e| ScaffoldError::Io {
            path: dest.to_path_buf(),
            source: e,
        })
    }
}

impl Default for SiteRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn site() -> SiteMeta {
        SiteMeta {
            title: "Gallery".to_string(),
            url: String::new(),
        }
    }

    fn sample_theme() -> Theme {
        Theme {
            name: "Zephyr".to_string(),
            id: "zephyr".to_string(),
            url: "https://github.com/zephyr/zephyr-theme".to_string(),
            pypi_package: "zephyr-theme".to_string(),
            builtin: false,
        }
    }

    #[test]
    fn expands_markdown_and_yaml_templates() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");

        fs::create_dir_all(src.join("docs")).unwrap();
        fs::write(src.join("docs/index.md"), "# {{ theme.name }}\n").unwrap();
        fs::write(src.join("mkdocs.yml"), "site_name: {{ theme.name }}\n").unwrap();

        let renderer = SiteRenderer::new();
        let site = site();
        let theme = sample_theme();
        let themes = vec![theme.clone()];
        let written = renderer
            .render_tree(
                &src,
                &dest,
                &RenderContext {
                    site: &site,
                    themes: &themes,
                    theme: Some(&theme),
                },
            )
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            fs::read_to_string(dest.join("docs/index.md")).unwrap(),
            "# Zephyr\n"
        );
        assert_eq!(
            fs::read_to_string(dest.join("mkdocs.yml")).unwrap(),
            "site_name: Zephyr\n"
        );
    }

    #[test]
    fn copies_other_files_verbatim() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");

        fs::create_dir_all(src.join("docs/assets")).unwrap();
        fs::write(src.join("docs/assets/logo.png"), b"{{ not a template }}").unwrap();
        // .yaml is not in the rendered set, only .yml
        fs::write(src.join("extra.yaml"), "value: {{ theme.name }}\n").unwrap();

        let renderer = SiteRenderer::new();
        let site = site();
        renderer
            .render_tree(
                &src,
                &dest,
                &RenderContext {
                    site: &site,
                    themes: &[],
                    theme: None,
                },
            )
            .unwrap();

        assert_eq!(
            fs::read(dest.join("docs/assets/logo.png")).unwrap(),
            b"{{ not a template }}"
        );
        assert_eq!(
            fs::read_to_string(dest.join("extra.yaml")).unwrap(),
            "value: {{ theme.name }}\n"
        );
    }

    #[test]
    fn renders_theme_loop_without_current_theme() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");

        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("index.md"),
            "{% if theme %}{{ theme.name }}{% else %}main{% endif %}\
             :{% for t in themes %}{{ t.id }} {% endfor %}",
        )
        .unwrap();

        let renderer = SiteRenderer::new();
        let site = site();
        let themes = vec![sample_theme()];
        renderer
            .render_tree(
                &src,
                &dest,
                &RenderContext {
                    site: &site,
                    themes: &themes,
                    theme: None,
                },
            )
            .unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("index.md")).unwrap(),
            "main:zephyr "
        );
    }

    #[test]
    fn errors_on_missing_source_dir() {
        let temp = tempdir().unwrap();
        let renderer = SiteRenderer::new();
        let site = site();

        let result = renderer.render_tree(
            &temp.path().join("nope"),
            &temp.path().join("dest"),
            &RenderContext {
                site: &site,
                themes: &[],
                theme: None,
            },
        );

        assert!(matches!(result, Err(ScaffoldError::MissingTemplates(_))));
    }

    #[test]
    fn template_errors_carry_the_file_path() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("broken.md"), "{% if %}").unwrap();

        let renderer = SiteRenderer::new();
        let site = site();
        let result = renderer.render_tree(
            &src,
            &temp.path().join("dest"),
            &RenderContext {
                site: &site,
                themes: &[],
                theme: None,
            },
        );

        match result {
            Err(ScaffoldError::Template { path, .. }) => {
                assert!(path.ends_with("broken.md"));
            }
            other => panic!("expected template error, got {other:?}"),
        }
    }
}
