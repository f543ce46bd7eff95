//! Integration tests for the pdf-pagetools library
//!
//! Fixture PDFs are generated on the fly with lopdf: every page carries a
//! unique "(Page N)" text marker so page identity and order can be checked
//! in the outputs.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pdf_pagetools::pdf::{
    count_pages, delete_pages, merge_pdfs, split_chunks, split_pages, two_up, MergeOptions,
};

/// Write a PDF with `num_pages` US Letter pages, each containing the text
/// "Page N".
fn create_test_pdf(path: &Path, num_pages: u32) {
    let mut doc = Document::with_version("1.5");
    let page_tree_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let resources_id = doc.add_object(Dictionary::from_iter([(
        "Font",
        Object::Dictionary(Dictionary::from_iter([(
            "F1",
            Object::Reference(font_id),
        )])),
    )]));

    let mut kids = Vec::new();
    for page_num in 1..=num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("Page {}", page_num))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_bytes = content.encode().expect("failed to encode content");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content_bytes));

        let page_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(page_tree_id)),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
            (
                "MediaBox",
                Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
            ),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let page_tree = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(page_tree_id, Object::Dictionary(page_tree));

    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(page_tree_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.save(path).expect("failed to save fixture PDF");
}

/// Decoded content stream of the given 1-based page.
fn page_content(path: &Path, page: u32) -> Vec<u8> {
    let doc = Document::load(path).expect("failed to load PDF");
    let pages = doc.get_pages();
    let page_id = *pages.get(&page).expect("page not present");
    doc.get_page_content(page_id)
        .expect("failed to read page content")
}

fn assert_page_marker(path: &Path, page: u32, original_page: u32) {
    let content = page_content(path, page);
    let marker = format!("(Page {})", original_page);
    assert!(
        content
            .windows(marker.len())
            .any(|w| w == marker.as_bytes()),
        "page {} of {} should contain marker {}",
        page,
        path.display(),
        marker
    );
}

#[test]
fn test_delete_pages_keeps_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("input.pdf");
    let output = temp_dir.path().join("trimmed.pdf");
    create_test_pdf(&input, 5);

    delete_pages(input.as_path().into(), &[1, 3], &output).expect("Failed to delete pages");

    assert_eq!(count_pages(&output).unwrap(), 3);
    // Original pages 2, 4, 5 in order
    assert_page_marker(&output, 1, 2);
    assert_page_marker(&output, 2, 4);
    assert_page_marker(&output, 3, 5);
}

#[test]
fn test_delete_out_of_range_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("input.pdf");
    let output = temp_dir.path().join("trimmed.pdf");
    create_test_pdf(&input, 3);

    let result = delete_pages(input.as_path().into(), &[4], &output);
    assert!(result.is_err(), "page 4 of a 3-page document must be rejected");
    assert!(!output.exists(), "no output should be written on failure");
}

#[test]
fn test_merge_concatenates_in_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = temp_dir.path().join("first.pdf");
    let second = temp_dir.path().join("second.pdf");
    let output = temp_dir.path().join("merged.pdf");
    create_test_pdf(&first, 2);
    create_test_pdf(&second, 3);

    let options = MergeOptions {
        input_paths: vec![first, second],
        output_path: output.clone(),
    };
    merge_pdfs(&options).expect("Failed to merge PDFs");

    assert_eq!(count_pages(&output).unwrap(), 5);
    // First two pages from the first input, remaining three from the second
    assert_page_marker(&output, 1, 1);
    assert_page_marker(&output, 2, 2);
    assert_page_marker(&output, 3, 1);
    assert_page_marker(&output, 4, 2);
    assert_page_marker(&output, 5, 3);
}

#[test]
fn test_merge_drops_source_outlines() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = temp_dir.path().join("first.pdf");
    let second = temp_dir.path().join("second.pdf");
    let output = temp_dir.path().join("merged.pdf");
    create_test_pdf(&first, 2);
    create_test_pdf(&second, 1);

    // Hang an Outlines dictionary off the first input's catalog. It is only
    // reachable through that catalog, which the merge discards.
    let mut doc = Document::load(&first).expect("failed to load fixture");
    let outlines_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Outlines".to_vec())),
        ("Count", Object::Integer(0)),
    ]));
    let catalog_id = match doc.trailer.get(b"Root").expect("no Root") {
        Object::Reference(id) => *id,
        _ => panic!("Root is not a reference"),
    };
    if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(catalog_id) {
        dict.set("Outlines", Object::Reference(outlines_id));
    }
    doc.save(&first).expect("failed to save fixture");

    let options = MergeOptions {
        input_paths: vec![first, second],
        output_path: output.clone(),
    };
    merge_pdfs(&options).expect("Failed to merge PDFs");

    assert_eq!(count_pages(&output).unwrap(), 3);

    let merged = Document::load(&output).expect("failed to load output");
    let leftover = merged.objects.values().any(|object| {
        matches!(object, Object::Dictionary(dict)
            if matches!(dict.get(b"Type"), Ok(Object::Name(n)) if n.as_slice() == b"Outlines"))
    });
    assert!(!leftover, "source outlines should be pruned from the output");
}

#[test]
fn test_merge_nonexistent_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = temp_dir.path().join("merged.pdf");

    let options = MergeOptions {
        input_paths: vec![PathBuf::from("nonexistent.pdf")],
        output_path: output,
    };

    let result = merge_pdfs(&options);
    assert!(result.is_err(), "Should fail with nonexistent file");
}

#[test]
fn test_split_per_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("scan.pdf");
    create_test_pdf(&input, 7);

    let written = split_pages(&input, None).expect("Failed to split PDF");

    assert_eq!(written.len(), 7);
    for (i, path) in written.iter().enumerate() {
        let page_num = (i + 1) as u32;
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("scan_p{}.pdf", page_num)
        );
        assert_eq!(count_pages(path).unwrap(), 1);
        assert_page_marker(path, 1, page_num);
    }
}

#[test]
fn test_split_into_output_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("scan.pdf");
    let out_dir = temp_dir.path().join("pages");
    create_test_pdf(&input, 2);

    // The output directory is created on demand
    let written = split_pages(&input, Some(&out_dir)).expect("Failed to split PDF");

    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|p| p.parent() == Some(out_dir.as_path())));
}

#[test]
fn test_split_chunks_sizes() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("manual.pdf");
    create_test_pdf(&input, 10);

    let written = split_chunks(&input, 4, None).expect("Failed to split PDF");

    assert_eq!(written.len(), 3);
    let expected_sizes = [4, 4, 2];
    for (i, path) in written.iter().enumerate() {
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("manual_{}.pdf", i + 1)
        );
        assert_eq!(count_pages(path).unwrap(), expected_sizes[i]);
    }

    // The final chunk starts at page 9
    assert_page_marker(&written[2], 1, 9);
    assert_page_marker(&written[2], 2, 10);
}

#[test]
fn test_two_up_page_count_and_geometry() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("slides.pdf");
    let output = temp_dir.path().join("handout.pdf");
    create_test_pdf(&input, 5);

    two_up(input.as_path().into(), &output).expect("Failed to build 2-in-1 layout");

    assert_eq!(count_pages(&output).unwrap(), 3);

    let doc = Document::load(&output).expect("failed to load output");
    let pages = doc.get_pages();

    // Output pages are double width, same height
    let first_id = *pages.get(&1).unwrap();
    let page_dict = match doc.get_object(first_id).unwrap() {
        Object::Dictionary(dict) => dict,
        _ => panic!("page is not a dictionary"),
    };
    let media_box = match page_dict.get(b"MediaBox").unwrap() {
        Object::Array(arr) => arr,
        _ => panic!("MediaBox is not an array"),
    };
    let values: Vec<f32> = media_box
        .iter()
        .map(|o| match o {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            _ => panic!("unexpected MediaBox entry"),
        })
        .collect();
    assert!((values[2] - 1224.0).abs() < 0.01, "width should double");
    assert!((values[3] - 792.0).abs() < 0.01, "height should be unchanged");

    // Full pairs draw two XObjects, the odd final page only one
    let first_content = page_content(&output, 1);
    let last_content = page_content(&output, 3);
    let draws = |content: &[u8]| content.windows(4).filter(|w| *w == b"Do Q").count();
    assert_eq!(draws(&first_content), 2);
    assert_eq!(draws(&last_content), 1);
}

#[test]
fn test_two_up_odd_page_content_survives() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("slides.pdf");
    let output = temp_dir.path().join("handout.pdf");
    create_test_pdf(&input, 5);

    two_up(input.as_path().into(), &output).expect("Failed to build 2-in-1 layout");

    // The fifth original page ends up as the sole (left) XObject of output
    // page 3.
    let doc = Document::load(&output).expect("failed to load output");
    let pages = doc.get_pages();
    let last_id = *pages.get(&3).unwrap();

    let page_dict = match doc.get_object(last_id).unwrap() {
        Object::Dictionary(dict) => dict,
        _ => panic!("page is not a dictionary"),
    };
    let resources = match page_dict.get(b"Resources").unwrap() {
        Object::Dictionary(dict) => dict,
        _ => panic!("Resources is not a dictionary"),
    };
    let xobjects = match resources.get(b"XObject").unwrap() {
        Object::Dictionary(dict) => dict,
        _ => panic!("XObject is not a dictionary"),
    };

    assert!(xobjects.has(b"L"), "left half should be filled");
    assert!(!xobjects.has(b"R"), "right half should be empty");

    let left_id = match xobjects.get(b"L").unwrap() {
        Object::Reference(id) => *id,
        _ => panic!("XObject entry is not a reference"),
    };
    let form = match doc.get_object(left_id).unwrap() {
        Object::Stream(stream) => stream,
        _ => panic!("XObject is not a stream"),
    };
    let content = form
        .decompressed_content()
        .unwrap_or_else(|_| form.content.clone());
    let marker = b"(Page 5)";
    assert!(
        content.windows(marker.len()).any(|w| w == marker),
        "fifth page content should be embedded in the final form"
    );
}
