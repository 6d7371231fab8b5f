//! Page geometry lookup
//!
//! PDF uses a bottom-left origin. A page's MediaBox is `[llx lly urx ury]` and
//! may live on the page itself or on any ancestor `Pages` node.

use crate::error::{RecolorError, Result};
use lopdf::{Document, Object, ObjectId};
use serde::Serialize;

/// Upper bound on `Parent` hops, guards against cyclic page trees
const MAX_TREE_DEPTH: usize = 64;

/// A page rectangle in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PageBox {
    /// Build from the four corner coordinates of a PDF rectangle
    pub fn from_corners(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Self {
            x: llx.min(urx),
            y: lly.min(ury),
            width: (urx - llx).abs(),
            height: (ury - lly).abs(),
        }
    }

    pub fn to_media_box(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.x),
            Object::Real(self.y),
            Object::Real(self.x + self.width),
            Object::Real(self.y + self.height),
        ])
    }
}

/// Resolve the MediaBox of a page, following inheritance up the page tree
///
/// `page_number` is 1-indexed and only used for error reporting.
pub fn page_box(doc: &Document, page_number: u32, page_id: ObjectId) -> Result<PageBox> {
    let mut current = Some(page_id);

    for _ in 0..MAX_TREE_DEPTH {
        let Some(node_id) = current else {
            break;
        };
        let node = doc.get_dictionary(node_id).map_err(|e| {
            RecolorError::ParseError(format!("Page {} tree node: {}", page_number, e))
        })?;

        if let Ok(media_box) = node.get(b"MediaBox") {
            return parse_rect(doc, media_box).ok_or(RecolorError::MissingMediaBox(page_number));
        }

        current = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Err(RecolorError::MissingMediaBox(page_number))
}

fn parse_rect(doc: &Document, obj: &Object) -> Option<PageBox> {
    let values = match resolve(doc, obj)? {
        Object::Array(values) if values.len() == 4 => values,
        _ => return None,
    };

    let mut corners = [0.0f32; 4];
    for (slot, value) in corners.iter_mut().zip(values) {
        *slot = number(resolve(doc, value)?)?;
    }

    let [llx, lly, urx, ury] = corners;
    Some(PageBox::from_corners(llx, lly, urx, ury))
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(f) if f.is_finite() => Some(*f),
        _ => None,
    }
}
