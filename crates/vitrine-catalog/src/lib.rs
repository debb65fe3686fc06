//! Theme catalog for the gallery.
//!
//! This crate fetches the remote catalog of documentation-site themes,
//! parses it into a typed model, and resolves the flat project list into
//! the ordered set of themes the gallery showcases.

pub mod catalog;
pub mod client;
pub mod theme;

pub use catalog::{Catalog, CatalogError};
pub use client::CatalogClient;
pub use theme::{builtin_themes, Theme};
