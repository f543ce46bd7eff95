//! PDF merging using lopdf

use std::collections::BTreeMap;
use std::path::PathBuf;

use glob::glob;
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Expand glob patterns in a list of merge inputs.
///
/// Merge order is part of the operation's contract, so patterns keep the
/// order they were given and only the matches within a single pattern are
/// sorted. Arguments without glob characters pass through as literal paths.
pub fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let entries = glob(pattern).map_err(|_| Error::InvalidGlob(pattern.clone()))?;

            let mut matches: Vec<PathBuf> = entries.filter_map(|entry| entry.ok()).collect();
            if matches.is_empty() {
                return Err(Error::NoFilesMatched(pattern.clone()));
            }

            matches.sort();
            paths.extend(matches);
        } else {
            // No glob characters, treat as literal path
            paths.push(PathBuf::from(pattern));
        }
    }

    Ok(paths)
}

/// Options for merging PDFs
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Input PDF file paths in the order they should be merged
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

/// Merge multiple PDF files into a single PDF.
///
/// Each input's internal page order is preserved and documents are appended
/// in the order given.
///
/// # Example
///
/// ```no_run
/// use pdf_pagetools::pdf::{merge_pdfs, MergeOptions};
/// use std::path::PathBuf;
///
/// let options = MergeOptions {
///     input_paths: vec![
///         PathBuf::from("first.pdf"),
///         PathBuf::from("second.pdf"),
///     ],
///     output_path: PathBuf::from("merged.pdf"),
/// };
///
/// merge_pdfs(&options).expect("Failed to merge");
/// ```
pub fn merge_pdfs(options: &MergeOptions) -> Result<()> {
    if options.input_paths.is_empty() {
        return Err(Error::General("No input files provided".to_string()));
    }

    // Renumber every source document into one shared ID space, collecting
    // page IDs in input order and all objects except each source's own
    // catalog and page tree root (a fresh tree is built below).
    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for path in &options.input_paths {
        if !path.exists() {
            return Err(Error::FileNotFound(path.clone()));
        }

        let mut doc = Document::load(path)?;
        if doc.get_pages().is_empty() {
            return Err(Error::EmptyPdf(path.clone()));
        }

        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        page_ids.extend(doc.get_pages().into_values());

        for (id, object) in doc.objects {
            match object.type_name().unwrap_or(b"") {
                b"Catalog" | b"Pages" => {}
                _ => {
                    objects.insert(id, object);
                }
            }
        }
    }

    let mut merged = Document::with_version("1.5");
    merged.objects.extend(objects);
    // new_object_id() must not collide with the IDs just carried over
    merged.max_id = max_id - 1;

    let pages_id = merged.new_object_id();

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(page_ids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));
    merged.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = merged.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    merged.objects.insert(catalog_id, Object::Dictionary(catalog));

    merged.trailer.set("Root", Object::Reference(catalog_id));

    // Reparent every page onto the new tree
    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(ref mut dict)) = merged.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    // Sources may carry objects (outlines, metadata) reachable only from
    // their dropped catalogs
    merged.prune_objects();
    merged.compress();
    merged.save(&options.output_path)?;

    Ok(())
}
