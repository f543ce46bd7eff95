//! Splitting a PDF into single-page or multi-page files

use std::path::{Path, PathBuf};

use lopdf::Document;

use crate::error::{Error, Result};
use crate::pages::chunk_bounds;
use crate::pdf::document::load_document;

/// Split a PDF into one file per page.
///
/// Output files are named `{stem}_p{page}.pdf` and written to `output_dir`,
/// or next to the input when no directory is given. Returns the written
/// paths in page order.
pub fn split_pages(input_path: &Path, output_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let doc = load_document(input_path)?;
    let total = doc.get_pages().len() as u32;

    let dir = resolve_output_dir(input_path, output_dir)?;
    let stem = file_stem(input_path);

    let mut written = Vec::with_capacity(total as usize);
    for page in 1..=total {
        let mut single = extract_page_run(&doc, page, page, total);
        let path = dir.join(format!("{}_p{}.pdf", stem, page));
        single.save(&path)?;
        written.push(path);
    }

    Ok(written)
}

/// Split a PDF into consecutive chunks of `pages_per_chunk` pages.
///
/// The final chunk may be shorter; a document of N pages produces
/// ceil(N / K) files named `{stem}_1.pdf`, `{stem}_2.pdf`, and so on.
pub fn split_chunks(
    input_path: &Path,
    pages_per_chunk: usize,
    output_dir: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    if pages_per_chunk == 0 {
        return Err(Error::InvalidChunkSize(pages_per_chunk));
    }

    let doc = load_document(input_path)?;
    let total = doc.get_pages().len() as u32;

    let dir = resolve_output_dir(input_path, output_dir)?;
    let stem = file_stem(input_path);

    let mut written = Vec::new();
    for (chunk, (start, end)) in chunk_bounds(total, pages_per_chunk as u32)
        .into_iter()
        .enumerate()
    {
        let mut part = extract_page_run(&doc, start, end, total);
        let path = dir.join(format!("{}_{}.pdf", stem, chunk + 1));
        part.save(&path)?;
        written.push(path);
    }

    Ok(written)
}

/// Extract the inclusive page run `start..=end` into a new document by
/// cloning the source and batch-deleting everything else.
fn extract_page_run(doc: &Document, start: u32, end: u32, total: u32) -> Document {
    let mut out = doc.clone();

    let to_delete: Vec<u32> = (1..=total).filter(|p| *p < start || *p > end).collect();
    if !to_delete.is_empty() {
        out.delete_pages(&to_delete);
    }

    out.prune_objects();
    out
}

/// Output directory: the one requested (created if missing), else the
/// input's parent.
fn resolve_output_dir(input_path: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            Ok(dir.to_path_buf())
        }
        None => Ok(input_path.parent().unwrap_or(Path::new("")).to_path_buf()),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("out")
        .to_string()
}
