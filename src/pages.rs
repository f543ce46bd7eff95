//! Page index arithmetic: page-spec parsing and chunk boundaries
//!
//! Page numbers are 1-based throughout, matching what users type on the
//! command line. Translation to whatever the PDF engine expects happens at
//! the call site.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Parse a page specification string into a sorted, duplicate-free list of
/// 1-based page numbers.
///
/// Tokens are separated by commas and/or whitespace. Each token is either a
/// single positive integer or an inclusive range `a-b` with `a <= b`:
///
/// ```
/// use pdf_pagetools::pages::parse_page_spec;
///
/// let pages = parse_page_spec("1,3-5,7").unwrap();
/// assert_eq!(pages, vec![1, 3, 4, 5, 7]);
/// ```
///
/// The parser is document-agnostic; callers check the result against the
/// actual page count.
pub fn parse_page_spec(spec: &str) -> Result<Vec<u32>> {
    let mut pages = BTreeSet::new();

    let tokens = spec
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    for token in tokens {
        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_page_number(start, token)?;
                let end = parse_page_number(end, token)?;
                if start > end {
                    return Err(Error::InvalidPageSpec(format!(
                        "range start exceeds end in '{}'",
                        token
                    )));
                }
                pages.extend(start..=end);
            }
            None => {
                pages.insert(parse_page_number(token, token)?);
            }
        }
    }

    if pages.is_empty() {
        return Err(Error::InvalidPageSpec("no page numbers given".to_string()));
    }

    Ok(pages.into_iter().collect())
}

fn parse_page_number(s: &str, token: &str) -> Result<u32> {
    let n: u32 = s
        .trim()
        .parse()
        .map_err(|_| Error::InvalidPageSpec(format!("invalid page number in '{}'", token)))?;
    if n == 0 {
        return Err(Error::InvalidPageSpec(format!(
            "page numbers are 1-based, got 0 in '{}'",
            token
        )));
    }
    Ok(n)
}

/// Validate a parsed page list against a document's page count.
pub fn check_page_bounds(pages: &[u32], total: u32) -> Result<()> {
    for &page in pages {
        if page == 0 || page > total {
            return Err(Error::PageOutOfRange { page, total });
        }
    }
    Ok(())
}

/// Partition `total` pages into consecutive chunks of `size` pages.
///
/// Returns 1-based inclusive `(start, end)` bounds; the final chunk may be
/// shorter. A document of N pages yields ceil(N / size) chunks.
pub fn chunk_bounds(total: u32, size: u32) -> Vec<(u32, u32)> {
    if total == 0 || size == 0 {
        return Vec::new();
    }
    (1..=total)
        .step_by(size as usize)
        .map(|start| (start, (start + size - 1).min(total)))
        .collect()
}
