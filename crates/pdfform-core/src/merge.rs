//! Page-appending merge of form documents
//!
//! Used to stack filled copies of a template: the pages (and the widgets
//! hanging off them) of every later document are appended to the first.

use crate::error::FormError;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use tracing::debug;

/// Merge PDFs in order into one.
///
/// The algorithm:
/// 1. If empty, return error
/// 2. If single document, return it as-is
/// 3. Use the first document as the destination
/// 4. For each later document:
///    a. Offset its object ids past the destination's highest id
///    b. Import all objects with remapped references
///    c. Append its pages to the destination page list
/// 5. Rewrite the page tree, compress and serialize
pub fn merge_documents(documents: Vec<Vec<u8>>) -> Result<Vec<u8>, FormError> {
    let mut documents = documents.into_iter();
    let Some(first) = documents.next() else {
        return Err(FormError::StructureError("No documents to merge".into()));
    };

    let rest: Vec<Vec<u8>> = documents.collect();
    if rest.is_empty() {
        return Ok(first);
    }

    let mut dest = Document::load_mem(&first)
        .map_err(|e| FormError::ParseError(format!("Failed to load document 0: {}", e)))?;
    let mut dest_max_id = dest.max_id;
    let mut dest_page_refs = page_references(&dest);

    for (i, bytes) in rest.iter().enumerate() {
        let source = Document::load_mem(bytes).map_err(|e| {
            FormError::ParseError(format!("Failed to load document {}: {}", i + 1, e))
        })?;
        let source_pages = page_references(&source);
        let id_offset = dest_max_id;

        let remapped: BTreeMap<ObjectId, Object> = source
            .objects
            .into_iter()
            .map(|(old_id, object)| {
                let new_id = (old_id.0 + id_offset, old_id.1);
                (new_id, remap_object_refs(object, id_offset))
            })
            .collect();
        dest.objects.extend(remapped);

        dest_page_refs.extend(
            source_pages
                .into_iter()
                .map(|(num, generation)| (num + id_offset, generation)),
        );

        dest_max_id = (source.max_id + id_offset).max(dest_max_id);
    }

    update_page_tree(&mut dest, &dest_page_refs)?;
    dest.max_id = dest_max_id;
    debug!(pages = dest_page_refs.len(), "merged documents");

    dest.compress();

    let mut buffer = Vec::new();
    dest.save_to(&mut buffer).map_err(|e| {
        FormError::SerializationError(format!("Failed to save merged PDF: {}", e))
    })?;

    Ok(buffer)
}

fn page_references(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Recursively shift every indirect reference by `offset`
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

/// Point the catalog's page tree at `page_refs`
fn update_page_tree(doc: &mut Document, page_refs: &[ObjectId]) -> Result<(), FormError> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| FormError::StructureError("No Root reference in trailer".into()))?;

    let pages_id = doc
        .get_dictionary(catalog_id)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|_| FormError::StructureError("No Pages reference in catalog".into()))?;

    let kids = page_refs.iter().map(|&id| Object::Reference(id)).collect();

    match doc.objects.get_mut(&pages_id) {
        Some(Object::Dictionary(pages_dict)) => {
            pages_dict.set("Kids", Object::Array(kids));
            pages_dict.set("Count", Object::Integer(page_refs.len() as i64));
        }
        _ => {
            return Err(FormError::StructureError(
                "Invalid pages dictionary".into(),
            ))
        }
    }

    // Appended pages still point at their old tree
    for page_id in page_refs {
        if let Some(Object::Dictionary(page)) = doc.objects.get_mut(page_id) {
            page.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok(())
}
