//! Solid-color background pages
//!
//! Each background is a standalone one-page PDF holding a single filled
//! rectangle. It is serialized to an in-memory buffer so that compositing
//! consumes it exactly like any other parsed document.

use crate::color::Rgb;
use crate::error::{RecolorError, Result};
use crate::geometry::PageBox;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};

/// Content stream that fills `page_box` with `color`, no stroke
///
/// The fill is wrapped in `q`/`Q` so the color never leaks into whatever
/// content is drawn after it. Page content streams are concatenated when
/// read, so the bytes end in a newline to keep `Q` a separate token.
pub fn background_content(page_box: &PageBox, color: Rgb) -> Result<Vec<u8>> {
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "rg",
                color.channels().into_iter().map(Object::Real).collect(),
            ),
            Operation::new(
                "re",
                vec![
                    Object::Real(page_box.x),
                    Object::Real(page_box.y),
                    Object::Real(page_box.width),
                    Object::Real(page_box.height),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ],
    };

    let mut bytes = content
        .encode()
        .map_err(|e| RecolorError::OperationError(format!("Encode background: {}", e)))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Build a serialized one-page PDF whose MediaBox is `page_box`
pub fn build_background(page_box: &PageBox, color: Rgb) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        background_content(page_box, color)?,
    ));

    let page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        ("MediaBox", page_box.to_media_box()),
        ("Resources", Object::Dictionary(Dictionary::new())),
        ("Contents", Object::Reference(content_id)),
    ]);
    let page_id = doc.add_object(page);

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(1)),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RecolorError::SerializationError(format!("Background save failed: {}", e)))?;

    Ok(buffer)
}
