//! Theme model shared across the gallery pipeline.

use serde::Serialize;

/// A single theme showcased by the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Display name shown on the landing page.
    pub name: String,

    /// Identifier the site generator selects the theme by. Also used as the
    /// per-theme working-directory name, so it must be filesystem-safe.
    pub id: String,

    /// Repository URL, empty when the catalog lists none.
    pub url: String,

    /// Package spec installed into the theme's isolated environment.
    pub pypi_package: String,

    /// Ships with the site generator; nothing to install.
    pub builtin: bool,
}

impl Theme {
    fn builtin(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
            url: String::new(),
            pypi_package: String::new(),
            builtin: true,
        }
    }
}

/// The two themes bundled with the site generator itself.
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        Theme::builtin("MkDocs", "mkdocs"),
        Theme::builtin("ReadTheDocs", "readthedocs"),
    ]
}
