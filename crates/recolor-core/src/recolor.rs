//! The recolor pipeline
//!
//! For every page, in order:
//! 1. Resolve the page's MediaBox
//! 2. Generate a one-page background document of the same geometry
//! 3. Composite the original page content over that background
//!
//! The output is serialized into memory before anything is written, so a
//! failed run never leaves a half-written file behind.

use crate::background::build_background;
use crate::color::Rgb;
use crate::composite::underlay;
use crate::error::{RecolorError, Result};
use crate::geometry::page_box;
use crate::report::ProcessMetrics;
use lopdf::{Document, ObjectId};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// A recolored document held in memory
#[derive(Debug, Clone)]
pub struct RecolorOutput {
    pub data: Vec<u8>,
    pub page_count: u32,
}

/// Put a solid `color` background under every page of the PDF in `bytes`
pub fn recolor_document(bytes: &[u8], color: Rgb) -> Result<RecolorOutput> {
    let mut doc =
        Document::load_mem(bytes).map_err(|e| RecolorError::ParseError(e.to_string()))?;

    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();

    for (page_number, page_id) in &pages {
        let page_box = page_box(&doc, *page_number, *page_id)?;
        debug!(
            page = page_number,
            width = page_box.width,
            height = page_box.height,
            "Compositing background"
        );

        let background = build_background(&page_box, color)?;
        underlay(&mut doc, *page_id, &background)?;
    }

    // Background catalogs and page trees are unreachable after compositing
    doc.prune_objects();
    doc.compress();

    let mut data = Vec::new();
    doc.save_to(&mut data)
        .map_err(|e| RecolorError::SerializationError(format!("Save failed: {}", e)))?;

    Ok(RecolorOutput {
        data,
        page_count: pages.len() as u32,
    })
}

/// Recolor `input` into `output`, overwriting any existing file
pub fn recolor_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    color: Rgb,
) -> Result<ProcessMetrics> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let start = Instant::now();

    info!(input = %input.display(), r = color.r, g = color.g, b = color.b, "Recoloring PDF");

    let bytes = fs::read(input)?;
    let result = recolor_document(&bytes, color)?;
    fs::write(output, &result.data)?;

    Ok(ProcessMetrics {
        input_size_bytes: bytes.len(),
        output_size_bytes: result.data.len(),
        page_count: result.page_count,
        processing_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Recolor `input` into `output`, reporting the outcome instead of returning it
///
/// Every failure is logged and turned into `false`.
pub fn recolor(input: impl AsRef<Path>, output: impl AsRef<Path>, color: Rgb) -> bool {
    let output = output.as_ref();
    match recolor_file(input, output, color) {
        Ok(metrics) => {
            info!(
                output = %output.display(),
                pages = metrics.page_count,
                "Successfully created PDF with modified background"
            );
            true
        }
        Err(e) => {
            error!("An error occurred: {}", e);
            false
        }
    }
}
