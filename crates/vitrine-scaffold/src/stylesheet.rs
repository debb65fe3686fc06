//! Landing-page stylesheet asset.

use std::fs;
use std::path::{Path, PathBuf};

use crate::renderer::ScaffoldError;

/// Write the gallery stylesheet under `main_dir/docs/assets/css/`.
///
/// Returns the path of the written file.
pub fn write_gallery_stylesheet(main_dir: &Path, minify: bool) -> Result<PathBuf, ScaffoldError> {
    let css_dir = main_dir.join("docs").join("assets").join("css");
    fs::create_dir_all(&css_dir).map_err(|source| ScaffoldError::Io {
        path: css_dir.clone(),
        source,
    })?;

    let css = if minify {
        minify_css(GALLERY_CSS)?
    } else {
        GALLERY_CSS.to_string()
    };

    let path = css_dir.join("gallery.css");
    fs::write(&path, css).map_err(|source| ScaffoldError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Minify CSS using lightningcss.
fn minify_css(css: &str) -> Result<String, ScaffoldError> {
    use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

    let stylesheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| ScaffoldError::Css(format!("CSS parse error: {e}")))?;

    let minified = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| ScaffoldError::Css(format!("CSS minify error: {e}")))?;

    Ok(minified.code)
}

const GALLERY_CSS: &str = r#"/* Gallery landing page */

:root {
  --card-max-width: 720px;
  --shadow: 0px 16px 10px rgba(100, 100, 100, 0.6);
}

article img {
  max-width: var(--card-max-width);
  width: 100%;
  border-radius: 4px;
  filter: drop-shadow(var(--shadow));
  transition: transform 0.15s;
}

article img:hover {
  transform: translateY(-2px);
}

article h3 {
  margin-top: 2.5rem;
}

article hr {
  margin: 2rem 0;
  border: none;
  border-top: 1px solid rgba(100, 100, 100, 0.3);
}

.theme-link {
  font-size: 0.875rem;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_stylesheet() {
        let temp = tempdir().unwrap();

        let path = write_gallery_stylesheet(temp.path(), false).unwrap();

        assert_eq!(path, temp.path().join("docs/assets/css/gallery.css"));
        let css = fs::read_to_string(&path).unwrap();
        assert!(css.contains("drop-shadow"));
    }

    #[test]
    fn minifies_when_enabled() {
        let temp = tempdir().unwrap();

        let path = write_gallery_stylesheet(temp.path(), true).unwrap();

        let css = fs::read_to_string(&path).unwrap();
        assert!(!css.contains('\n'));
        assert!(css.contains("article img"));
    }
}
