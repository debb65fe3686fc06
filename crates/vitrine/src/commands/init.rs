//! Initialize a gallery project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing vitrine...");

    let templates_dir = Path::new("templates");

    if templates_dir.exists() && !yes {
        tracing::warn!("templates/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    write_file(Path::new("gallery.toml"), DEFAULT_CONFIG, yes)?;
    write_file(
        &templates_dir.join("specimen/mkdocs.yml"),
        SPECIMEN_CONFIG,
        yes,
    )?;
    write_file(
        &templates_dir.join("specimen/docs/index.md"),
        SPECIMEN_INDEX,
        yes,
    )?;
    write_file(
        &templates_dir.join("specimen/docs/elements.md"),
        SPECIMEN_ELEMENTS,
        yes,
    )?;
    write_file(&templates_dir.join("main/mkdocs.yml"), MAIN_CONFIG, yes)?;
    write_file(&templates_dir.join("main/docs/index.md"), MAIN_INDEX, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'vitrine build' to build the gallery.");

    Ok(())
}

fn write_file(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Vitrine configuration

[site]
# Gallery title shown on the landing page
title = "Theme Gallery"

# Public URL of the deployed gallery
url = ""

[catalog]
# Remote catalog of theme projects
url = "https://raw.githubusercontent.com/mkdocs/catalog/main/projects.yaml"

# Catalog category to pick themes from
category = "theming"

# Uncomment to read the catalog from a local file instead
# file = "projects.yaml"

[paths]
templates = "templates"
themes = "themes"
site = "site"
logs = "logs"
main = "."

[tools]
uv = "uv"
builder = "mkdocs"
shooter = "shot-scraper"
main_builder = "mkdocs"

[build]
# Worker pool size; defaults to available cores
# jobs = 4

# Minify the gallery stylesheet
minify = true
"#;

const SPECIMEN_CONFIG: &str = r#"site_name: "{{ theme.name }}"
use_directory_urls: false

theme:
  name: {{ theme.id }}

nav:
- Home: index.md
- Elements: elements.md
"#;

const SPECIMEN_INDEX: &str = r#"# {{ theme.name }}

This demo site is rendered with the **{{ theme.name }}** theme.
{% if theme.url %}
Project page: <{{ theme.url }}>
{% endif %}

## About this gallery

Every theme in the gallery renders this same demo project, so you can
compare how each one handles common documentation content. The gallery
currently showcases {{ themes | length }} themes.

## Sample text

Lorem ipsum dolor sit amet, consectetur adipiscing elit. *Emphasis*,
**strong emphasis**, and `inline code` should all be readable at a glance.

> Blockquotes matter too: a good theme keeps them distinct without
> making them shout.

[Continue to the elements page](elements.md) for headings, lists, tables,
and code blocks.
"#;

const SPECIMEN_ELEMENTS: &str = r#"# Elements

## Lists

- Unordered item
- Another item
    - Nested item
- Last item

1. First step
2. Second step
3. Third step

## Table

| Feature    | Supported | Notes               |
| ---------- | --------- | ------------------- |
| Tables     | yes       | Plain Markdown      |
| Code       | yes       | Fenced blocks       |
| Navigation | yes       | Two pages           |

## Code

```python
def greet(name: str) -> str:
    return f"Hello, {name}!"
```

## Links

Back to the [home page](index.md).
"#;

const MAIN_CONFIG: &str = r#"site_name: "{{ site.title }}"
{% if site.url %}site_url: {{ site.url }}
{% endif %}use_directory_urls: false

theme:
  name: mkdocs

extra_css:
- assets/css/gallery.css
"#;

const MAIN_INDEX: &str = r#"# {{ site.title }}

Click a screenshot to browse the themed demo site.

## Built-in themes

{% for theme in themes %}{% if theme.builtin %}### {{ theme.name }}

[![{{ theme.name }}](assets/img/{{ theme.id }}.png)](themes/{{ theme.id }}/index.html)

---

{% endif %}{% endfor %}
## Third-party themes

{% for theme in themes %}{% if not theme.builtin %}### {{ theme.name }}

[![{{ theme.name }}](assets/img/{{ theme.id }}.png)](themes/{{ theme.id }}/index.html)
{% if theme.url %}
<p class="theme-link"><a href="{{ theme.url }}">Project page</a></p>
{% endif %}
---

{% endif %}{% endfor %}
"#;
