//! PDF Page Tools Library
//!
//! A small library for page-level PDF manipulation. It provides
//! functionality to:
//! - Convert a document to a 2-in-1 (two pages side by side) layout
//! - Delete a set of pages given as a page-spec string like "1,3-5"
//! - Merge multiple PDF files in order
//! - Split a document into single-page or fixed-size chunks
//!
//! All PDF decoding and persistence is delegated to `lopdf`; this crate
//! contributes page-index arithmetic and orchestration.
//!
//! # Example
//!
//! ```no_run
//! use pdf_pagetools::pages::parse_page_spec;
//! use pdf_pagetools::pdf::delete_pages;
//! use std::path::Path;
//!
//! let pages = parse_page_spec("1,3-5").expect("bad page spec");
//! delete_pages(Path::new("input.pdf").into(), &pages, Path::new("out.pdf"))
//!     .expect("Failed to delete pages");
//! ```

pub mod error;
pub mod pages;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};
