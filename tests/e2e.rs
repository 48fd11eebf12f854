mod common;

use common::synthetic_tab::{clear_behind, label_tokens, tab_page, token, Staff};
use std::fs;
use tabscan::image::io::load_grayscale_image;
use tabscan::{
    FixedTokens, ReconstructParams, Reconstructor, RunLengthDetector, TabError, TokenFile,
};

const W: usize = 600;
const H: usize = 420;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn staff(top: usize) -> Staff {
    Staff {
        top,
        spacing: 14,
        left: 30,
        right: 570,
    }
}

fn reconstructor(tokens: Vec<tabscan::types::Token>) -> Reconstructor<RunLengthDetector, FixedTokens> {
    Reconstructor::new(
        ReconstructParams::default(),
        RunLengthDetector::default(),
        FixedTokens(tokens),
    )
    .expect("default params are valid")
}

#[test]
fn drawn_staff_renders_notes_and_bars() {
    init_logging();
    let s = staff(80);
    let mut page = tab_page(W, H, &[s], &[30, 300, 570]);
    clear_behind(&mut page, &s, 2, 150, 4);
    clear_behind(&mut page, &s, 3, 150, 4);
    clear_behind(&mut page, &s, 0, 200, 8);
    clear_behind(&mut page, &s, 5, 420, 4);

    let mut tokens = label_tokens(&s, 15.0);
    tokens.extend([
        token(100.0, 30.0, "♩ = 100"),
        token(35.0, 55.0, "1"),
        token(150.0, s.center(2), "5"),
        token(150.0, s.center(3), "3"),
        token(200.0, s.center(0), "12"),
        token(420.0, s.center(5), "x"),
    ]);

    let report = reconstructor(tokens).process(page.as_view()).unwrap();
    let expected = [
        "Song: OCR Result",
        "BPM: 100",
        "",
        "| 1 |",
        "e||--12-|--|",
        "B||-----|--|",
        "G||5----|--|",
        "D||3----|--|",
        "A||-----|--|",
        "E||-----|x-|",
        "| | | |",
        "",
    ]
    .join("\n");
    assert_eq!(report.document, expected, "\n{}", report.document);

    let trace = &report.trace;
    assert_eq!(trace.string_lines, vec![81, 95, 109, 123, 137, 151]);
    assert_eq!(trace.systems[0].bars, vec![31, 301, 571]);
    assert_eq!(trace.systems[0].tokens.measure_numbers.len(), 1);
    assert!(!trace.used_anchor_fallback);
}

#[test]
fn two_staffs_become_two_blocks_in_page_order() {
    init_logging();
    let (upper, lower) = (staff(60), staff(260));
    let page = tab_page(W, H, &[upper, lower], &[30, 570]);
    let tokens = vec![
        token(250.0, lower.center(4), "7"),
        token(250.0, upper.center(1), "2"),
    ];

    let report = reconstructor(tokens).process(page.as_view()).unwrap();
    assert_eq!(report.trace.systems.len(), 2);
    let blocks: Vec<&str> = report.document.split("\n\n").skip(1).collect();
    assert_eq!(blocks.len(), 2, "{}", report.document);
    assert!(blocks[0].contains("B||2-|"), "{}", blocks[0]);
    assert!(blocks[1].contains("A||7-|"), "{}", blocks[1]);
}

#[test]
fn tuning_labels_stand_in_for_missing_lines() {
    init_logging();
    let s = staff(100);
    // No ink at all: only OCR knows where the strings are.
    let page = tab_page(W, H, &[], &[]);
    let mut tokens = label_tokens(&s, 12.0);
    tokens.push(token(240.0, s.center(4), "0"));

    let report = reconstructor(tokens).process(page.as_view()).unwrap();
    assert!(report.trace.used_anchor_fallback);
    assert!(report.document.contains("\nA|0-\n"), "{}", report.document);
}

#[test]
fn blank_page_without_labels_fails() {
    init_logging();
    let page = tab_page(W, H, &[], &[]);
    let err = reconstructor(vec![token(50.0, 50.0, "Intro")])
        .process(page.as_view())
        .unwrap_err();
    assert!(matches!(err, TabError::StructuralDetection));
}

#[test]
fn image_file_with_ocr_sidecar() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("riff.png");
    let s = staff(80);
    let page = tab_page(W, H, &[s], &[]);
    let view = page.as_view();
    image::GrayImage::from_raw(W as u32, H as u32, view.data.to_vec())
        .unwrap()
        .save(&image_path)
        .unwrap();
    fs::write(
        dir.path().join("riff.ocr.json"),
        r#"[{"bbox": [[296, 131], [304, 131], [304, 143], [296, 143]], "text": "9", "confidence": 0.8}]"#,
    )
    .unwrap();

    let gray = load_grayscale_image(&image_path).unwrap();
    let reconstructor = Reconstructor::new(
        ReconstructParams::default(),
        RunLengthDetector::default(),
        TokenFile::sidecar_for(&image_path),
    )
    .unwrap();
    let document = reconstructor.convert(gray.as_view()).unwrap();
    assert!(document.contains("\nA|9-\n"), "{document}");
}
