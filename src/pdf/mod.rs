//! PDF manipulation module

pub mod delete;
pub mod document;
pub mod merge;
pub mod split;
pub mod twoup;

// Re-export commonly used items
pub use delete::delete_pages;
pub use document::{count_pages, load_document, PdfSource};
pub use merge::{expand_globs, merge_pdfs, MergeOptions};
pub use split::{split_chunks, split_pages};
pub use twoup::two_up;
