//! Page deletion

use std::path::Path;

use crate::error::Result;
use crate::pages::check_page_bounds;
use crate::pdf::PdfSource;

/// Delete the given 1-based pages from a document and save the result.
///
/// Remaining pages keep their original relative order. Deletion happens
/// through a single batch call that resolves all targets up front, so the
/// caller never has to worry about index shifting.
///
/// # Example
///
/// ```no_run
/// use pdf_pagetools::pdf::delete_pages;
/// use std::path::Path;
///
/// delete_pages(Path::new("input.pdf").into(), &[1, 3], Path::new("out.pdf"))
///     .expect("Failed to delete pages");
/// ```
pub fn delete_pages(source: PdfSource, pages: &[u32], output_path: &Path) -> Result<()> {
    let mut doc = source.into_document()?;

    let total = doc.get_pages().len() as u32;
    check_page_bounds(pages, total)?;

    doc.delete_pages(pages);
    doc.prune_objects();
    doc.save(output_path)?;

    Ok(())
}
