//! Form field discovery and classification
//!
//! Walks every page's `/Annots` array and decides which annotation records
//! are form fields, what they are called and what kind of field they are.
//!
//! Two layouts are understood:
//! - the common layout, where a widget carries its own `T`/`FT` or, for radio
//!   groups, points at a parent holding them
//! - the Sejda layout (`sejda = true`), where every widget's name and type
//!   live on its parent

use crate::constants::{
    ANNOTATION_FIELD_KEY, ANNOTATION_KEY, CHECKBOX_FIELD_VALUE_KEY, COMB_FLAG_BIT,
    ELEMENT_TYPE_KEY, FIELD_FLAG_KEY, PARENT_KEY, SELECTABLE_IDENTIFIER, SEPARATOR, SUBTYPE_KEY,
    TEXT_FIELD_IDENTIFIER, TEXT_FIELD_MAX_LENGTH_KEY, WIDGET_SUBTYPE_KEY,
};
use crate::error::FormError;
use crate::object::{
    as_integer, decode_text, encode_text, get, get_inherited, is_truthy, name_eq, parent,
    resolve,
};
use crate::patterns::{Pattern, PatternValue, ELEMENT_KEY_PATTERNS, ELEMENT_TYPE_PATTERNS};
use crate::utils::generate_stream;
use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfform_types::ElementType;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// One annotation record found on a page
#[derive(Debug, Clone, Copy)]
pub struct Annotation<'a> {
    /// 1-based page number
    pub page: u32,
    pub page_id: ObjectId,
    /// Position in the page's `/Annots` array
    pub index: usize,
    /// Object id when the array entry is an indirect reference
    pub id: Option<ObjectId>,
    pub dict: &'a Dictionary,
}

/// The `/Annots` array of a page, resolved
fn page_annots<'a>(doc: &'a Document, page_id: ObjectId) -> Option<&'a Vec<Object>> {
    let page = doc.get_dictionary(page_id).ok()?;
    get(doc, page, ANNOTATION_KEY)?.as_array().ok()
}

/// Every dictionary in a page's `/Annots` array, in order
fn page_annotations(doc: &Document, page: u32, page_id: ObjectId) -> Vec<Annotation<'_>> {
    let Some(annots) = page_annots(doc, page_id) else {
        return Vec::new();
    };

    annots
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let id = entry.as_reference().ok();
            match resolve(doc, entry).as_dict() {
                Ok(dict) => Some(Annotation {
                    page,
                    page_id,
                    index,
                    id,
                    dict,
                }),
                Err(_) => {
                    trace!(page, index, "skipping non-dictionary annotation");
                    None
                }
            }
        })
        .collect()
}

fn is_form_element(doc: &Document, element: &Dictionary, sejda: bool) -> bool {
    if sejda {
        return parent(doc, element)
            .and_then(|p| get(doc, p, ELEMENT_TYPE_KEY))
            .is_some_and(is_truthy);
    }

    let is_named_widget = get(doc, element, SUBTYPE_KEY)
        .is_some_and(|s| name_eq(s, WIDGET_SUBTYPE_KEY))
        && get(doc, element, ANNOTATION_FIELD_KEY).is_some_and(is_truthy);
    let is_grouped_button = get(doc, element, CHECKBOX_FIELD_VALUE_KEY).is_some_and(is_truthy)
        && get(doc, element, PARENT_KEY).is_some_and(is_truthy);

    is_named_widget || is_grouped_button
}

fn matches_any_type_pattern(doc: &Document, element: &Dictionary) -> bool {
    ELEMENT_TYPE_PATTERNS.iter().any(|entry| {
        entry
            .patterns
            .iter()
            .all(|pattern| find_pattern_match(doc, pattern, element))
    })
}

/// All form elements of the document, page by page
pub fn iterate_elements(doc: &Document, sejda: bool) -> Vec<Annotation<'_>> {
    elements_by_page(doc, sejda).into_values().flatten().collect()
}

/// Form elements grouped by 1-based page number. Every page gets an entry.
pub fn elements_by_page(doc: &Document, sejda: bool) -> BTreeMap<u32, Vec<Annotation<'_>>> {
    collect_by_page(doc, |element| is_form_element(doc, element, sejda))
}

/// Like [`elements_by_page`], but membership is decided by the type pattern table
pub fn elements_by_page_matching(doc: &Document) -> BTreeMap<u32, Vec<Annotation<'_>>> {
    collect_by_page(doc, |element| matches_any_type_pattern(doc, element))
}

fn collect_by_page<'a>(
    doc: &'a Document,
    keep: impl Fn(&Dictionary) -> bool,
) -> BTreeMap<u32, Vec<Annotation<'a>>> {
    let mut result = BTreeMap::new();

    for (page, page_id) in doc.get_pages() {
        let elements: Vec<_> = page_annotations(doc, page, page_id)
            .into_iter()
            .filter(|annotation| keep(annotation.dict))
            .collect();
        debug!(page, count = elements.len(), "collected form elements");
        result.insert(page, elements);
    }

    result
}

/// The field's key. Sejda widgets are named by their parent; otherwise the
/// widget's own name wins and the parent's is the fallback.
pub fn element_key(doc: &Document, element: &Dictionary, sejda: bool) -> Option<String> {
    let own = if sejda {
        None
    } else {
        get(doc, element, ANNOTATION_FIELD_KEY).filter(|v| is_truthy(v))
    };

    own.or_else(|| parent(doc, element).and_then(|p| get(doc, p, ANNOTATION_FIELD_KEY)))
        .and_then(decode_text)
}

/// Depth-first walk of `pattern` through `element`, returning the first set
/// value found under a [`PatternValue::Present`] leaf.
pub fn traverse_pattern<'a>(
    doc: &'a Document,
    pattern: &Pattern,
    element: &'a Dictionary,
) -> Option<&'a Object> {
    pattern.iter().find_map(|entry| {
        let value = get(doc, element, entry.key)?;
        match entry.value {
            PatternValue::Nested(inner) => traverse_pattern(doc, inner, value.as_dict().ok()?),
            PatternValue::Present if is_truthy(value) => Some(value),
            _ => None,
        }
    })
}

/// The field's key, found through [`ELEMENT_KEY_PATTERNS`]
pub fn element_key_by_pattern(doc: &Document, element: &Dictionary) -> Option<String> {
    ELEMENT_KEY_PATTERNS
        .iter()
        .find_map(|pattern| traverse_pattern(doc, pattern, element))
        .and_then(decode_text)
}

/// The field's kind from its `FT` entry.
///
/// Without a recognized own type, a widget with a parent is taken to be a
/// radio button.
pub fn element_type(doc: &Document, element: &Dictionary, sejda: bool) -> Option<ElementType> {
    if sejda {
        let parent = parent(doc, element)?;
        let field_type = get(doc, parent, ELEMENT_TYPE_KEY)?;
        if name_eq(field_type, TEXT_FIELD_IDENTIFIER) {
            return Some(ElementType::Text);
        }
        if name_eq(field_type, SELECTABLE_IDENTIFIER) {
            let parent_is_widget =
                get(doc, parent, SUBTYPE_KEY).is_some_and(|s| name_eq(s, WIDGET_SUBTYPE_KEY));
            return Some(if parent_is_widget {
                ElementType::Checkbox
            } else {
                ElementType::Radio
            });
        }
        return None;
    }

    let own_type = get(doc, element, ELEMENT_TYPE_KEY).and_then(|field_type| {
        if name_eq(field_type, SELECTABLE_IDENTIFIER) {
            Some(ElementType::Checkbox)
        } else if name_eq(field_type, TEXT_FIELD_IDENTIFIER) {
            Some(ElementType::Text)
        } else {
            None
        }
    });

    own_type.or_else(|| {
        get(doc, element, PARENT_KEY)
            .filter(|p| is_truthy(p))
            .map(|_| ElementType::Radio)
    })
}

/// Whether `pattern` is a subset of `element`'s nested structure.
///
/// Every pattern key must exist in the record. Name leaves compare by
/// equality, presence leaves require a set value, nested patterns recurse
/// into dictionary values (following indirect references).
pub fn find_pattern_match(doc: &Document, pattern: &Pattern, element: &Dictionary) -> bool {
    pattern.iter().all(|entry| {
        let Some(value) = get(doc, element, entry.key) else {
            return false;
        };
        match entry.value {
            PatternValue::Name(expected) => name_eq(value, expected),
            PatternValue::Present => is_truthy(value),
            PatternValue::Nested(inner) => value
                .as_dict()
                .map(|dict| find_pattern_match(doc, inner, dict))
                .unwrap_or(false),
        }
    })
}

/// The field's kind from the first matching entry of [`ELEMENT_TYPE_PATTERNS`]
pub fn element_type_by_pattern(doc: &Document, element: &Dictionary) -> Option<ElementType> {
    ELEMENT_TYPE_PATTERNS
        .iter()
        .find(|entry| {
            entry
                .patterns
                .iter()
                .all(|pattern| find_pattern_match(doc, pattern, element))
        })
        .map(|entry| entry.element_type)
}

/// The field's `MaxLen`, inherited from the parent when absent
pub fn text_field_max_length(doc: &Document, element: &Dictionary) -> Option<usize> {
    get_inherited(doc, element, TEXT_FIELD_MAX_LENGTH_KEY)
        .and_then(as_integer)
        .and_then(|value| usize::try_from(value).ok())
}

/// Whether the field's characters are laid out in comb cells
pub fn is_text_field_comb(doc: &Document, element: &Dictionary) -> bool {
    let Some(flags) = get_inherited(doc, element, FIELD_FLAG_KEY).and_then(as_integer) else {
        return false;
    };

    // Flags below 2^24 never have the comb bit set.
    flags & (1 << COMB_FLAG_BIT) != 0
}

/// Empty every page's `/Annots` array
pub fn remove_all_elements(pdf: &[u8]) -> Result<Vec<u8>, FormError> {
    let mut doc = crate::parse_document(pdf)?;

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for page_id in page_ids {
        if let Some(annots) = page_annots_mut(&mut doc, page_id) {
            annots.clear();
        }
    }

    generate_stream(&mut doc)
}

fn page_annots_mut(doc: &mut Document, page_id: ObjectId) -> Option<&mut Vec<Object>> {
    let annots_ref = doc
        .get_dictionary(page_id)
        .ok()?
        .get(ANNOTATION_KEY)
        .ok()?
        .as_reference()
        .ok();

    match annots_ref {
        Some(id) => doc.get_object_mut(id).ok()?.as_array_mut().ok(),
        None => doc
            .get_object_mut(page_id)
            .ok()?
            .as_dict_mut()
            .ok()?
            .get_mut(ANNOTATION_KEY)
            .ok()?
            .as_array_mut()
            .ok(),
    }
}

/// Where a field's name is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum NameHolder {
    Object(ObjectId),
    Inline { page_id: ObjectId, index: usize },
}

fn name_holder(doc: &Document, annotation: &Annotation<'_>) -> Option<NameHolder> {
    if get(doc, annotation.dict, ANNOTATION_FIELD_KEY).is_some_and(is_truthy) {
        return Some(match annotation.id {
            Some(id) => NameHolder::Object(id),
            None => NameHolder::Inline {
                page_id: annotation.page_id,
                index: annotation.index,
            },
        });
    }

    annotation
        .dict
        .get(PARENT_KEY)
        .ok()?
        .as_reference()
        .ok()
        .map(NameHolder::Object)
}

fn holder_dict_mut(doc: &mut Document, holder: NameHolder) -> Option<&mut Dictionary> {
    match holder {
        NameHolder::Object(id) => doc.get_object_mut(id).ok()?.as_dict_mut().ok(),
        NameHolder::Inline { page_id, index } => {
            page_annots_mut(doc, page_id)?.get_mut(index)?.as_dict_mut().ok()
        }
    }
}

/// Tag every field key with `,<uuid>` so keys stay unique across merged documents.
///
/// Keys that already carry a tag keep it; one fresh uuid is shared by all
/// untagged keys of the call. The tag is written where the key lives, so
/// radio kids named by their parent rename the whole group.
pub fn assign_uuid(pdf: &[u8]) -> Result<Vec<u8>, FormError> {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    let mut doc = crate::parse_document(pdf)?;

    let mut updates: BTreeMap<NameHolder, String> = BTreeMap::new();
    for element in iterate_elements(&doc, false) {
        let Some(key) = element_key(&doc, element.dict, false) else {
            continue;
        };
        let Some(holder) = name_holder(&doc, &element) else {
            warn!(page = element.page, key = %key, "field name holder is not addressable");
            continue;
        };

        let (base_key, tag) = match key.split_once(SEPARATOR) {
            Some((base, tag)) if !tag.is_empty() => (base.to_string(), tag.to_string()),
            Some((base, _)) => (base.to_string(), uuid.clone()),
            None => (key.clone(), uuid.clone()),
        };
        updates
            .entry(holder)
            .or_insert_with(|| format!("{}{}{}", base_key, SEPARATOR, tag));
    }

    debug!(count = updates.len(), "tagging field keys");
    for (holder, key) in updates {
        if let Some(dict) = holder_dict_mut(&mut doc, holder) {
            dict.set(ANNOTATION_FIELD_KEY, encode_text(&key));
        }
    }

    generate_stream(&mut doc)
}
