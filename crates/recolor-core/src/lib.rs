//! Solid background colors for PDF pages
//!
//! This crate puts a filled rectangle underneath the content of every page
//! of a PDF, using lopdf for parsing and serialization.
//!
//! The pipeline is split into small stages that can be used on their own:
//! - `geometry::page_box`: resolve a page's MediaBox
//! - `background::build_background`: a one-page PDF holding a single fill
//! - `composite::underlay`: place that page underneath an existing page
//! - `recolor_document` / `recolor_file` / `recolor`: the whole run

pub mod background;
pub mod color;
pub mod composite;
pub mod error;
pub mod geometry;
pub mod recolor;
pub mod report;

pub use color::{Rgb, DEFAULT_BACKGROUND};
pub use error::RecolorError;
pub use geometry::PageBox;
pub use recolor::{recolor, recolor_document, recolor_file, RecolorOutput};
pub use report::ProcessMetrics;

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, RecolorError> {
    let doc =
        lopdf::Document::load_mem(bytes).map_err(|e| RecolorError::ParseError(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}
