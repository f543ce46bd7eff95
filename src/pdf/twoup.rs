//! 2-in-1 layout conversion
//!
//! Pairs of consecutive pages are placed side by side on new double-width
//! pages. Each source page is carried over as a Form XObject so its content
//! streams, fonts, and images survive untouched; the new page content just
//! positions the two XObjects.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::pdf::PdfSource;

/// Pages-tree walks give up after this many Parent hops on malformed files.
const INHERIT_DEPTH: usize = 10;

/// US Letter, the fallback when no MediaBox can be resolved.
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Convert a document to a 2-in-1 layout and save it.
///
/// An input of N pages produces ceil(N / 2) output pages, each sized from
/// the first input page: double the width, same height. Page pairs keep
/// their original order; when N is odd the last output page has an empty
/// right half.
///
/// # Example
///
/// ```no_run
/// use pdf_pagetools::pdf::two_up;
/// use std::path::Path;
///
/// two_up(Path::new("slides.pdf").into(), Path::new("handout.pdf"))
///     .expect("Failed to build 2-in-1 layout");
/// ```
pub fn two_up(source: PdfSource, output_path: &Path) -> Result<()> {
    let src = source.into_document()?;

    let page_ids: Vec<ObjectId> = src.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(Error::General("document has no pages".to_string()));
    }

    // Slot geometry comes from the first page, matching the common case of
    // uniformly sized documents. Oddly sized pages are clipped to their own
    // BBox but placed on the first page's grid.
    let base = page_box(&src, page_ids[0]);
    let width = base[2] - base[0];
    let height = base[3] - base[1];

    // Build a Form XObject per source page before the source's object table
    // is consumed below.
    let mut forms = Vec::with_capacity(page_ids.len());
    for &page_id in &page_ids {
        let bbox = page_box(&src, page_id);
        let resources = page_resources(&src, page_id);
        let content = src.get_page_content(page_id)?;
        forms.push((bbox, form_xobject(bbox, resources, content)));
    }

    // Carry every source object across unchanged so references inside the
    // resources dictionaries stay valid; unreachable leftovers (the old
    // catalog, page tree, and content streams) are pruned before saving.
    let mut doc = Document::with_version("1.5");
    let src_max_id = src.max_id;
    doc.objects.extend(src.objects);
    doc.max_id = src_max_id;

    let mut new_page_ids = Vec::new();
    for pair in forms.chunks(2) {
        let (left_box, left_form) = &pair[0];
        let left_id = doc.add_object(left_form.clone());

        let mut ops = String::new();
        ops.push_str(&placement(LEFT_NAME, -left_box[0], -left_box[1]));

        let mut xobjects = Dictionary::new();
        xobjects.set(LEFT_NAME, Object::Reference(left_id));

        if let Some((right_box, right_form)) = pair.get(1) {
            let right_id = doc.add_object(right_form.clone());
            ops.push_str(&placement(RIGHT_NAME, width - right_box[0], -right_box[1]));
            xobjects.set(RIGHT_NAME, Object::Reference(right_id));
        }

        let content_id = doc.add_object(Stream::new(Dictionary::new(), ops.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(width * 2.0),
                Object::Real(height),
            ]),
        );
        page.set("Resources", Object::Dictionary(resources));
        page.set("Contents", Object::Reference(content_id));
        new_page_ids.push(doc.add_object(page));
    }

    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = new_page_ids
        .iter()
        .map(|&id| Object::Reference(id))
        .collect();

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(new_page_ids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    doc.objects.insert(catalog_id, Object::Dictionary(catalog));

    doc.trailer.set("Root", Object::Reference(catalog_id));

    for &page_id in &new_page_ids {
        if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    doc.prune_objects();
    doc.compress();
    doc.save(output_path)?;

    Ok(())
}

/// XObject names for the left and right halves of an output page.
const LEFT_NAME: &str = "L";
const RIGHT_NAME: &str = "R";

/// Draw one placed XObject, isolated in its own graphics state.
fn placement(name: &str, tx: f32, ty: f32) -> String {
    format!("q 1 0 0 1 {} {} cm /{} Do Q\n", tx, ty, name)
}

/// Wrap a page's decoded content in a Form XObject.
fn form_xobject(bbox: [f32; 4], resources: Object, content: Vec<u8>) -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Form".to_vec()));
    dict.set("FormType", Object::Integer(1));
    dict.set(
        "BBox",
        Object::Array(bbox.iter().map(|&v| Object::Real(v)).collect()),
    );
    dict.set("Resources", resources);
    Stream::new(dict, content)
}

/// Resolve a page's MediaBox, walking up the Pages tree for inherited
/// values. Handles indirect boxes; falls back to US Letter.
fn page_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    match inherited_attr(doc, page_id, b"MediaBox") {
        Some(obj) => media_box_values(doc, &obj).unwrap_or(DEFAULT_MEDIA_BOX),
        None => DEFAULT_MEDIA_BOX,
    }
}

fn media_box_values(doc: &Document, obj: &Object) -> Option<[f32; 4]> {
    let arr = match obj {
        Object::Array(arr) => arr.clone(),
        Object::Reference(id) => match doc.get_object(*id) {
            Ok(Object::Array(arr)) => arr.clone(),
            _ => return None,
        },
        _ => return None,
    };

    let values: Vec<f32> = arr
        .iter()
        .filter_map(|o| match o {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r),
            _ => None,
        })
        .collect();

    if values.len() == 4 {
        Some([values[0], values[1], values[2], values[3]])
    } else {
        None
    }
}

/// Resolve a page's Resources, inherited like MediaBox. Pages without any
/// resources get an empty dictionary.
fn page_resources(doc: &Document, page_id: ObjectId) -> Object {
    inherited_attr(doc, page_id, b"Resources")
        .unwrap_or_else(|| Object::Dictionary(Dictionary::new()))
}

/// Look up a page attribute on the page itself or any ancestor Pages node.
fn inherited_attr(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = page_id;
    for _ in 0..INHERIT_DEPTH {
        let dict = match doc.get_object(current) {
            Ok(Object::Dictionary(dict)) => dict,
            _ => return None,
        };

        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => current = *parent_id,
            _ => return None,
        }
    }
    None
}
