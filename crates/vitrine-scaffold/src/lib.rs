//! Demo-site materialization.
//!
//! Turns template trees into per-theme demo projects and the gallery's own
//! site source: files are copied recursively, with `.md` and `.yml` sources
//! expanded through the template engine on the way.

pub mod prepare;
pub mod renderer;
pub mod stylesheet;

pub use renderer::{RenderContext, ScaffoldError, SiteMeta, SiteRenderer};
pub use stylesheet::write_gallery_stylesheet;
