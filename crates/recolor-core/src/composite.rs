//! Compositing a background page underneath an existing page
//!
//! The background document's objects are imported into the destination with
//! an ID offset (the same scheme multi-document merging uses), then the
//! background page's content streams are placed ahead of the page's own
//! content so the original draws on top. Objects imported but no longer
//! reachable (the background's catalog and page tree) are left for
//! `Document::prune_objects`.

use crate::error::{RecolorError, Result};
use lopdf::{Document, Object, ObjectId};

/// Place the single page of `background` underneath page `page_id` of `doc`
pub fn underlay(doc: &mut Document, page_id: ObjectId, background: &[u8]) -> Result<()> {
    let source = Document::load_mem(background)
        .map_err(|e| RecolorError::ParseError(format!("Background page: {}", e)))?;

    let source_page = source
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| RecolorError::OperationError("Background has no pages".into()))?;
    let source_contents = content_refs(&source, source_page)?;

    let id_offset = import_objects(doc, source);
    let background_refs: Vec<Object> = source_contents
        .into_iter()
        .map(|id| Object::Reference((id.0 + id_offset, id.1)))
        .collect();

    prepend_contents(doc, page_id, background_refs)
}

/// Move every object of `source` into `doc`, returning the applied ID offset
fn import_objects(doc: &mut Document, source: Document) -> u32 {
    let id_offset = doc.max_id;
    let source_max_id = source.max_id;

    for (old_id, object) in source.objects.into_iter() {
        let new_id = (old_id.0 + id_offset, old_id.1);
        doc.objects.insert(new_id, remap_object_refs(object, id_offset));
    }

    doc.max_id = doc.max_id.max(source_max_id + id_offset);
    id_offset
}

/// Recursively remap object references in an object
fn remap_object_refs(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(arr) => Object::Array(
            arr.into_iter()
                .map(|o| remap_object_refs(o, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = remap_object_refs(std::mem::replace(value, Object::Null), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = remap_object_refs(std::mem::replace(value, Object::Null), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Content stream IDs of a page, in drawing order
fn content_refs(doc: &Document, page_id: ObjectId) -> Result<Vec<ObjectId>> {
    let page = doc
        .get_dictionary(page_id)
        .map_err(|e| RecolorError::ParseError(format!("Invalid page: {}", e)))?;

    let refs = match page.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(items)) => references(items),
            _ => vec![*id],
        },
        Ok(Object::Array(items)) => references(items),
        _ => Vec::new(),
    };
    Ok(refs)
}

fn references(items: &[Object]) -> Vec<ObjectId> {
    items
        .iter()
        .filter_map(|item| item.as_reference().ok())
        .collect()
}

/// Put `refs` ahead of the page's existing content streams
fn prepend_contents(doc: &mut Document, page_id: ObjectId, refs: Vec<Object>) -> Result<()> {
    let existing = doc
        .get_dictionary(page_id)
        .map_err(|e| RecolorError::ParseError(format!("Invalid page: {}", e)))?
        .get(b"Contents")
        .ok()
        .cloned();

    let original: Vec<Object> = match existing {
        Some(Object::Reference(id)) => match doc.get_object(id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => vec![Object::Reference(id)],
        },
        Some(Object::Array(items)) => items,
        // Inline content streams are not valid PDF, but lopdf will parse them
        Some(Object::Stream(stream)) => vec![Object::Reference(doc.add_object(stream))],
        _ => Vec::new(),
    };

    let mut contents = refs;
    contents.extend(original);

    match doc.get_object_mut(page_id) {
        Ok(Object::Dictionary(page)) => {
            page.set("Contents", Object::Array(contents));
            Ok(())
        }
        _ => Err(RecolorError::OperationError(format!(
            "Page object {:?} is not a dictionary",
            page_id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::build_background;
    use crate::color::Rgb;
    use crate::geometry::PageBox;
    use lopdf::content::Content;
    use lopdf::{Dictionary, Stream};
    use pretty_assertions::assert_eq;

    /// One-page document; `contents` is whatever should sit in /Contents
    fn single_page_doc(contents: Option<Vec<&str>>) -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        );
        if let Some(streams) = contents {
            let refs: Vec<Object> = streams
                .into_iter()
                .map(|s| {
                    Object::Reference(
                        doc.add_object(Stream::new(Dictionary::new(), s.as_bytes().to_vec())),
                    )
                })
                .collect();
            if refs.len() == 1 {
                page.set("Contents", refs[0].clone());
            } else {
                page.set("Contents", Object::Array(refs));
            }
        }
        let page_id = doc.add_object(page);

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(1)),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        (doc, page_id)
    }

    fn background() -> Vec<u8> {
        build_background(
            &PageBox::from_corners(0.0, 0.0, 612.0, 792.0),
            Rgb::from_u8(200, 220, 255),
        )
        .unwrap()
    }

    fn stream_bytes(doc: &Document, obj: &Object) -> Vec<u8> {
        let id = obj.as_reference().unwrap();
        let stream = doc.get_object(id).unwrap().as_stream().unwrap();
        stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone())
    }

    fn contents_of(doc: &Document, page_id: ObjectId) -> Vec<Object> {
        doc.get_dictionary(page_id)
            .unwrap()
            .get(b"Contents")
            .unwrap()
            .as_array()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_underlay_single_reference() {
        let (mut doc, page_id) = single_page_doc(Some(vec!["BT (Hello) Tj ET"]));
        underlay(&mut doc, page_id, &background()).unwrap();

        let contents = contents_of(&doc, page_id);
        assert_eq!(contents.len(), 2);

        let first = Content::decode(&stream_bytes(&doc, &contents[0])).unwrap();
        assert!(first.operations.iter().any(|op| op.operator == "re"));
        assert_eq!(stream_bytes(&doc, &contents[1]), b"BT (Hello) Tj ET".to_vec());
    }

    #[test]
    fn test_underlay_keeps_operators_separate_when_joined() {
        let (mut doc, page_id) =
            single_page_doc(Some(vec!["BT /F1 12 Tf 72 720 Td (Hi) Tj ET"]));
        underlay(&mut doc, page_id, &background()).unwrap();

        let ops: Vec<String> = doc
            .get_and_decode_page_content(page_id)
            .unwrap()
            .operations
            .into_iter()
            .map(|op| op.operator)
            .collect();
        assert_eq!(
            ops,
            vec!["q", "rg", "re", "f", "Q", "BT", "Tf", "Td", "Tj", "ET"]
        );
    }

    #[test]
    fn test_underlay_twice_keeps_save_restore_balanced() {
        let (mut doc, page_id) = single_page_doc(Some(vec!["BT (Hi) Tj ET"]));
        underlay(&mut doc, page_id, &background()).unwrap();
        underlay(&mut doc, page_id, &background()).unwrap();

        let ops: Vec<String> = doc
            .get_and_decode_page_content(page_id)
            .unwrap()
            .operations
            .into_iter()
            .map(|op| op.operator)
            .collect();
        let saves = ops.iter().filter(|op| *op == "q").count();
        let restores = ops.iter().filter(|op| *op == "Q").count();
        assert_eq!((saves, restores), (2, 2));
        assert!(!ops.iter().any(|op| op.len() > 1 && op.starts_with('Q')));
    }

    #[test]
    fn test_underlay_array_keeps_order() {
        let (mut doc, page_id) = single_page_doc(Some(vec!["q", "Q"]));
        underlay(&mut doc, page_id, &background()).unwrap();

        let contents = contents_of(&doc, page_id);
        assert_eq!(contents.len(), 3);
        assert_eq!(stream_bytes(&doc, &contents[1]), b"q".to_vec());
        assert_eq!(stream_bytes(&doc, &contents[2]), b"Q".to_vec());
    }

    #[test]
    fn test_underlay_blank_page_gets_background_only() {
        let (mut doc, page_id) = single_page_doc(None);
        underlay(&mut doc, page_id, &background()).unwrap();

        let contents = contents_of(&doc, page_id);
        assert_eq!(contents.len(), 1);
        let ops: Vec<String> = Content::decode(&stream_bytes(&doc, &contents[0]))
            .unwrap()
            .operations
            .into_iter()
            .map(|op| op.operator)
            .collect();
        assert_eq!(ops, vec!["q", "rg", "re", "f", "Q"]);
    }

    #[test]
    fn test_underlay_does_not_clobber_existing_objects() {
        let (mut doc, page_id) = single_page_doc(Some(vec!["BT (Keep) Tj ET"]));
        let before: Vec<ObjectId> = doc.objects.keys().copied().collect();
        let max_before = doc.max_id;

        underlay(&mut doc, page_id, &background()).unwrap();

        for id in before {
            assert!(doc.objects.contains_key(&id));
        }
        assert!(doc.max_id > max_before);
        let new_ids = doc.objects.keys().filter(|id| id.0 > max_before).count();
        assert!(new_ids > 0);
    }

    #[test]
    fn test_underlay_rejects_garbage_background() {
        let (mut doc, page_id) = single_page_doc(None);
        let result = underlay(&mut doc, page_id, b"not a pdf");
        assert!(matches!(result, Err(RecolorError::ParseError(_))));
    }

    #[test]
    fn test_remap_object_refs_nested() {
        let obj = Object::Array(vec![
            Object::Reference((1, 0)),
            Object::Dictionary(Dictionary::from_iter(vec![(
                "Inner",
                Object::Reference((2, 0)),
            )])),
        ]);
        let remapped = remap_object_refs(obj, 10);
        let items = remapped.as_array().unwrap();
        assert_eq!(items[0].as_reference().unwrap(), (11, 0));
        let inner = items[1].as_dict().unwrap().get(b"Inner").unwrap();
        assert_eq!(inner.as_reference().unwrap(), (12, 0));
    }
}
