//! Catalog document parsing and theme resolution.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::theme::{builtin_themes, Theme};

/// The parsed remote catalog: a flat list of projects.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// A single project entry in the catalog.
#[derive(Debug, Deserialize)]
pub struct Project {
    pub name: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub github_id: Option<String>,

    #[serde(default)]
    pub gitlab_id: Option<String>,

    #[serde(default)]
    pub pypi_id: Option<String>,

    /// Theme id(s) this project provides, if any.
    #[serde(default)]
    pub mkdocs_theme: Option<IdList>,

    /// Plugin id(s) this project provides, if any.
    #[serde(default)]
    pub mkdocs_plugin: Option<IdList>,
}

/// A project declares either a single id or a list of ids.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdList {
    One(String),
    Many(Vec<String>),
}

impl IdList {
    fn ids(&self) -> &[String] {
        match self {
            IdList::One(id) => std::slice::from_ref(id),
            IdList::Many(ids) => ids,
        }
    }
}

/// Errors from catalog retrieval and parsing.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog fetch returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Project {
    fn repo_url(&self) -> String {
        if let Some(id) = &self.github_id {
            format!("https://github.com/{id}")
        } else if let Some(id) = &self.gitlab_id {
            format!("https://gitlab.com/{id}")
        } else {
            String::new()
        }
    }

    /// Package spec for this project: the PyPI id when published, otherwise
    /// a direct VCS install from its repository.
    fn package(&self) -> Option<String> {
        if let Some(pypi) = &self.pypi_id {
            return Some(pypi.clone());
        }
        let url = self.repo_url();
        if url.is_empty() {
            None
        } else {
            Some(format!("git+{url}"))
        }
    }
}

impl Catalog {
    /// Parse a catalog document from YAML text.
    pub fn parse(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a catalog from a local file instead of the network.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Resolve the projects in `category` into the gallery's theme list.
    ///
    /// Projects without a theme declaration are ignored. A project declaring
    /// several theme ids expands into one entry per id, named
    /// `"{project} - {Id}"`. Entries are sorted case-insensitively by name,
    /// with the built-in themes prepended.
    pub fn themes(&self, category: &str) -> Vec<Theme> {
        let mut themes = Vec::new();

        for project in &self.projects {
            if project.category.as_deref() != Some(category) {
                continue;
            }
            let Some(declared) = &project.mkdocs_theme else {
                continue;
            };

            let url = project.repo_url();
            let package = project.package().unwrap_or_else(|| "git+".to_string());
            let single = matches!(declared, IdList::One(_)) || declared.ids().len() == 1;

            for id in declared.ids() {
                if !is_safe_id(id) {
                    tracing::warn!(project = %project.name, id, "skipping theme with unsafe id");
                    continue;
                }
                let name = if single {
                    project.name.clone()
                } else {
                    format!("{} - {}", project.name, title_case(id))
                };
                themes.push(Theme {
                    name,
                    id: id.clone(),
                    url: url.clone(),
                    pypi_package: package.clone(),
                    builtin: false,
                });
            }
        }

        themes.sort_by_key(|theme| theme.name.to_lowercase());

        let mut all = builtin_themes();
        all.extend(themes);
        all
    }

    /// Look up the package providing `id`, matching declared theme ids,
    /// plugin ids, and PyPI ids across all categories.
    pub fn package_for(&self, id: &str) -> Option<String> {
        for project in &self.projects {
            let declared = project
                .mkdocs_theme
                .iter()
                .chain(project.mkdocs_plugin.iter())
                .flat_map(|list| list.ids())
                .any(|declared| declared == id);

            if declared || project.pypi_id.as_deref() == Some(id) {
                if let Some(package) = project.package() {
                    return Some(package);
                }
            }
        }
        None
    }
}

/// Theme ids become directory names, so restrict them to a safe subset.
fn is_safe_id(id: &str) -> bool {
    static SAFE_ID: OnceLock<Regex> = OnceLock::new();
    SAFE_ID
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid pattern"))
        .is_match(id)
}

/// Uppercase the first letter of every word, like Python's `str.title()`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
projects:
- name: Zephyr
  category: theming
  github_id: zephyr/zephyr-theme
  pypi_id: zephyr-theme
  mkdocs_theme: zephyr
- name: Aurora
  category: theming
  gitlab_id: aurora/mkdocs-aurora
  mkdocs_theme:
  - aurora-light
  - aurora-dark
- name: Bare
  category: theming
  github_id: someone/bare
  mkdocs_theme: bare
- name: NotATheme
  category: theming
  github_id: someone/tool
- name: OtherCategory
  category: plugins
  pypi_id: mkdocs-shiny
  mkdocs_plugin: shiny
- name: NoCategory
  mkdocs_theme: orphan
"#;

    #[test]
    fn resolves_and_orders_themes() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let themes = catalog.themes("theming");

        let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "MkDocs",
                "ReadTheDocs",
                "Aurora - Aurora-Dark",
                "Aurora - Aurora-Light",
                "Bare",
                "Zephyr",
            ]
        );
        assert!(themes[0].builtin);
        assert!(themes[1].builtin);
        assert!(!themes[2].builtin);
    }

    #[test]
    fn single_theme_keeps_project_name() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let themes = catalog.themes("theming");
        let zephyr = themes.iter().find(|t| t.id == "zephyr").unwrap();

        assert_eq!(zephyr.name, "Zephyr");
        assert_eq!(zephyr.url, "https://github.com/zephyr/zephyr-theme");
        assert_eq!(zephyr.pypi_package, "zephyr-theme");
    }

    #[test]
    fn list_of_one_behaves_as_single() {
        let catalog = Catalog::parse(
            "projects:\n- name: Solo\n  category: theming\n  github_id: x/solo\n  mkdocs_theme:\n  - solo\n",
        )
        .unwrap();
        let themes = catalog.themes("theming");
        let solo = themes.iter().find(|t| t.id == "solo").unwrap();

        assert_eq!(solo.name, "Solo");
    }

    #[test]
    fn unpublished_theme_installs_from_vcs() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let themes = catalog.themes("theming");
        let aurora = themes.iter().find(|t| t.id == "aurora-dark").unwrap();

        assert_eq!(aurora.url, "https://gitlab.com/aurora/mkdocs-aurora");
        assert_eq!(
            aurora.pypi_package,
            "git+https://gitlab.com/aurora/mkdocs-aurora"
        );
    }

    #[test]
    fn empty_catalog_yields_builtins_only() {
        let catalog = Catalog::parse("projects: []").unwrap();
        let themes = catalog.themes("theming");

        assert_eq!(themes.len(), 2);
        assert!(themes.iter().all(|t| t.builtin));
    }

    #[test]
    fn missing_category_is_skipped() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let themes = catalog.themes("theming");

        assert!(!themes.iter().any(|t| t.id == "orphan"));
    }

    #[test]
    fn unsafe_ids_are_dropped() {
        let catalog = Catalog::parse(
            "projects:\n- name: Evil\n  category: theming\n  github_id: x/evil\n  mkdocs_theme: ../evil\n",
        )
        .unwrap();
        let themes = catalog.themes("theming");

        assert_eq!(themes.len(), 2);
    }

    #[test]
    fn looks_up_packages_across_categories() {
        let catalog = Catalog::parse(SAMPLE).unwrap();

        assert_eq!(catalog.package_for("shiny"), Some("mkdocs-shiny".into()));
        assert_eq!(catalog.package_for("zephyr"), Some("zephyr-theme".into()));
        assert_eq!(catalog.package_for("unknown"), None);
    }

    #[test]
    fn reads_catalog_from_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.yaml");
        fs::write(&path, SAMPLE).unwrap();

        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.themes("theming").len(), 6);
    }

    #[test]
    fn title_cases_like_python() {
        assert_eq!(title_case("windmill-dark"), "Windmill-Dark");
        assert_eq!(title_case("terminal"), "Terminal");
        assert_eq!(title_case("UPPER"), "Upper");
    }
}
