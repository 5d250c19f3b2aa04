mod common;

use common::*;
use pdf_compose::render::{page_dimensions, rotation};
use pdf_compose::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_trim_arithmetic() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), "a4.pdf", 2, 595, 842);
    let out_dir = TempDir::new().unwrap();

    let result = run_batch(&[input], out_dir.path(), &Transform::trim(190.0, 190.0)).unwrap();
    assert!(result.is_complete());
    assert_eq!(result.outputs, vec![out_dir.path().join("a4_trimmed.pdf")]);

    let doc = load(&result.outputs[0]);
    for page_id in page_ids(&doc) {
        assert_eq!(own_box(&doc, page_id, b"MediaBox"), Some([0.0, 190.0, 595.0, 652.0]));
        assert_eq!(own_box(&doc, page_id, b"CropBox"), Some([0.0, 190.0, 595.0, 652.0]));
    }
}

#[test]
fn test_trim_too_far_fails_only_that_item() {
    let dir = TempDir::new().unwrap();
    let short = write_test_pdf(dir.path(), "short.pdf", 1, 595, 300);
    let tall = write_test_pdf(dir.path(), "tall.pdf", 1, 595, 842);

    let result = run_batch(&[short.clone(), tall], dir.path(), &Transform::trim(190.0, 190.0)).unwrap();
    assert_eq!(result.succeeded, 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].path, short);
    assert!(matches!(result.failures[0].error, ComposeError::Config(_)));
    assert!(!dir.path().join("short_trimmed.pdf").exists());
    assert!(dir.path().join("tall_trimmed.pdf").exists());
}

#[test]
fn test_rotation_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), "scan.pdf", 3, 612, 792);

    let clockwise = dir.path().join("cw.pdf");
    apply_transform(&input, &clockwise, &Transform::Rotate(Rotation::Clockwise90)).unwrap();
    let doc = load(&clockwise);
    for page_id in page_ids(&doc) {
        assert_eq!(rotation(&doc, page_id), 90);
    }

    let back = dir.path().join("back.pdf");
    apply_transform(
        &clockwise,
        &back,
        &Transform::Rotate(Rotation::Clockwise90.inverse()),
    )
    .unwrap();
    let doc = load(&back);
    for page_id in page_ids(&doc) {
        assert_eq!(rotation(&doc, page_id), 0);
        assert_eq!(page_dimensions(&doc, page_id), (612.0, 792.0));
    }
}

#[test]
fn test_counter_clockwise_wraps_to_270() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), "upright.pdf", 1, 612, 792);
    let result = run_batch(
        &[input],
        dir.path(),
        &Transform::Rotate(Rotation::CounterClockwise90),
    )
    .unwrap();

    let doc = load(&result.outputs[0]);
    let page_id = page_ids(&doc)[0];
    assert_eq!(rotation(&doc, page_id), 270);
}

#[test]
fn test_remove_pages() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), "book.pdf", 5, 612, 792);
    let transform = Transform::remove_pages("2-3").unwrap();

    let result = run_batch(&[input], dir.path(), &transform).unwrap();
    assert_eq!(result.outputs, vec![dir.path().join("book_pages_removed.pdf")]);

    let doc = load(&result.outputs[0]);
    let texts: Vec<String> = page_ids(&doc).into_iter().map(|id| page_text(&doc, id)).collect();
    assert_eq!(texts.len(), 3);
    assert!(texts[0].contains("book 1"));
    assert!(texts[1].contains("book 4"));
    assert!(texts[2].contains("book 5"));
}

#[test]
fn test_remove_pages_then_resize_boundary() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), "mixed.pdf", 4, 612, 792);
    let output = dir.path().join("out.pdf");
    let transform = Transform::RemovePages {
        range: PageRange::parse("4-4").unwrap(),
        resize_to: Some((595.0, 842.0)),
        fit: PageFit::Boundary,
    };

    apply_transform(&input, &output, &transform).unwrap();
    let doc = load(&output);
    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 3);
    for page_id in pages {
        assert_eq!(own_box(&doc, page_id, b"MediaBox"), Some([0.0, 0.0, 595.0, 842.0]));
    }
}

#[test]
fn test_removing_every_page_is_a_failure() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), "tiny.pdf", 2, 612, 792);
    let transform = Transform::remove_pages("1-2").unwrap();

    let result = run_batch(&[input], dir.path(), &transform).unwrap();
    assert_eq!(result.succeeded, 0);
    assert!(matches!(result.failures[0].error, ComposeError::EmptyResult(_)));
    assert!(!dir.path().join("tiny_pages_removed.pdf").exists());
}

#[test]
fn test_resize_modes() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), "letter.pdf", 2, 612, 792);

    let result = run_batch(&[input.clone()], dir.path(), &Transform::resize(595.0, 842.0)).unwrap();
    let doc = load(&result.outputs[0]);
    for page_id in page_ids(&doc) {
        assert_eq!(page_dimensions(&doc, page_id), (595.0, 842.0));
        let text = page_text(&doc, page_id);
        assert!(text.starts_with("q "));
        assert!(text.contains(" cm"));
    }

    let boundary_out = dir.path().join("boundary.pdf");
    let boundary = Transform::Resize {
        width: 595.0,
        height: 842.0,
        fit: PageFit::Boundary,
    };
    apply_transform(&input, &boundary_out, &boundary).unwrap();
    let doc = load(&boundary_out);
    for page_id in page_ids(&doc) {
        assert_eq!(page_dimensions(&doc, page_id), (595.0, 842.0));
        assert!(!page_text(&doc, page_id).contains(" cm"));
    }
}

#[test]
fn test_resize_after_trim_keeps_trimmed_strips_hidden() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), "page.pdf", 1, 595, 842);
    let trimmed = dir.path().join("trimmed.pdf");
    let resized = dir.path().join("resized.pdf");

    apply_transform(&input, &trimmed, &Transform::trim(190.0, 190.0)).unwrap();
    apply_transform(&trimmed, &resized, &Transform::resize(595.0, 842.0)).unwrap();

    let doc = load(&resized);
    let page_id = page_ids(&doc)[0];
    assert_eq!(own_box(&doc, page_id, b"MediaBox"), Some([0.0, 0.0, 595.0, 842.0]));
    assert_eq!(own_box(&doc, page_id, b"CropBox"), None);

    let text = page_text(&doc, page_id);
    assert!(text.contains("0 190 595 462 re W n"), "content was: {}", text);
    let clip = text.find("re W n").unwrap();
    assert!(clip < text.find("page 1").unwrap());
}

#[test]
fn test_scale_content_turns_rotated_pages_upright() {
    let dir = TempDir::new().unwrap();
    let mut doc = create_test_pdf("turned", 1, 612, 792);
    for page_id in page_ids(&doc) {
        doc.get_dictionary_mut(page_id)
            .unwrap()
            .set("Rotate", lopdf::Object::Integer(90));
    }
    let input = write_pdf(dir.path(), "turned.pdf", doc);
    let output = dir.path().join("upright.pdf");

    apply_transform(&input, &output, &Transform::resize(595.0, 842.0)).unwrap();

    let doc = load(&output);
    let page_id = page_ids(&doc)[0];
    assert_eq!(rotation(&doc, page_id), 0);
    assert_eq!(page_dimensions(&doc, page_id), (595.0, 842.0));

    // Displayed 792 x 612 source scaled by 595/792 onto the portrait page
    let text = page_text(&doc, page_id);
    assert!(text.contains("0 -1 1 0 0 612 cm"), "content was: {}", text);
    assert!(text.contains("0 0 612 792 re W n"), "content was: {}", text);
}

#[test]
fn test_batch_keeps_going_after_bad_inputs() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let first = write_test_pdf(dir.path(), "first.pdf", 1, 612, 792);
    let missing = dir.path().join("missing.pdf");
    let photo = write_test_image(dir.path(), "photo.png", 20, 20);
    let last = write_test_pdf(dir.path(), "last.pdf", 1, 612, 792);

    let inputs = vec![first, missing.clone(), photo.clone(), last];
    let result = run_batch(&inputs, out_dir.path(), &Transform::Rotate(Rotation::Clockwise90)).unwrap();

    assert_eq!(result.attempted, 4);
    assert_eq!(result.succeeded, 2);
    assert_eq!(
        result.outputs,
        vec![
            out_dir.path().join("first_rotated.pdf"),
            out_dir.path().join("last_rotated.pdf"),
        ]
    );
    assert_eq!(result.failures[0].path, missing);
    assert!(matches!(result.failures[0].error, ComposeError::MissingFile(_)));
    assert_eq!(result.failures[1].path, photo);
    assert!(matches!(result.failures[1].error, ComposeError::UnsupportedKind(_)));
}

#[test]
fn test_invalid_parameters_abort_before_io() {
    let dir = TempDir::new().unwrap();
    let input = write_test_pdf(dir.path(), "a.pdf", 1, 612, 792);

    let result = run_batch(&[input.clone()], dir.path(), &Transform::resize(-1.0, 842.0));
    assert!(matches!(result, Err(ComposeError::Config(_))));

    let not_a_dir = dir.path().join("a.pdf");
    let result = run_batch(&[input], &not_a_dir, &Transform::trim(1.0, 1.0));
    assert!(matches!(result, Err(ComposeError::WriteFailure { .. })));

    assert!(matches!(
        PageRange::parse("abc-9"),
        Err(ComposeError::InvalidRange(_))
    ));
    let range = PageRange::parse(" 9 - 25 ").unwrap();
    assert_eq!(range.indices(), 8..=24);
}

#[tokio::test]
async fn test_run_batch_async() {
    let dir = TempDir::new().unwrap();
    let inputs: Vec<PathBuf> = (0..3)
        .map(|i| write_test_pdf(dir.path(), &format!("doc{}.pdf", i), 1, 612, 792))
        .collect();

    let result = run_batch_async(inputs, dir.path().to_path_buf(), Transform::trim(10.0, 20.0))
        .await
        .unwrap();
    assert_eq!(result.succeeded, 3);
    for output in &result.outputs {
        let doc = load_pdf(output).await.unwrap();
        let page_id = page_ids(&doc)[0];
        assert_eq!(page_dimensions(&doc, page_id), (612.0, 762.0));
    }
}
