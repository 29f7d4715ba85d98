//! Tests for the file and directory conversion API.

use std::fs;

use pssvg_core::api::find_inputs;
use pssvg_core::{ConvertOptions, PsSvgError, convert, convert_dir, convert_file};
use tempfile::tempdir;

const SQUARE: &str = "%!PS-Adobe-3.0
%%BoundingBox: 0 0 100 100
newpath 10 10 moveto 90 10 lineto 90 90 lineto 10 90 lineto closepath stroke
showpage
";

#[test]
fn test_square_stays_inside_canvas() {
    let svg = convert(SQUARE);
    assert!(svg.contains(r#"viewBox="0 0 100 100""#));
    assert!(svg.contains(r#"<path d="M 10 10 L 90 10 L 90 90 L 10 90 Z" fill="none" stroke="black" />"#));
}

#[test]
fn test_empty_document_is_valid_envelope() {
    let svg = convert("");
    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
    assert!(svg.ends_with("</g>\n</svg>"));
    assert!(!svg.contains("<defs>"));
}

#[test]
fn test_garbage_degrades_gracefully() {
    let svg = convert("}}} ] >> 1 2 3 nosuchop (unterminated");
    assert!(svg.contains("<!-- Unhandled operator: nosuchop -->"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn test_image_placeholder() {
    let svg = convert("10 10 8 [1 0 0 1 0 0] {} image");
    assert!(svg.contains("<!-- image/imagemask not implemented -->"));
    assert!(svg.contains("<image "));
}

#[test]
fn test_convert_file_writes_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("square.ps");
    let output = dir.path().join("square.svg");
    fs::write(&input, SQUARE).unwrap();

    let svg = convert_file(&input, Some(&output), &ConvertOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), svg);
}

#[test]
fn test_convert_file_missing_input() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.ps");
    let err = convert_file(&missing, None, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, PsSvgError::NotFound(path) if path == missing));
}

#[test]
fn test_convert_file_invalid_utf8() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("latin1.ps");
    fs::write(&input, b"0 0 moveto 5 5 lineto stroke (caf\xe9) pop\n").unwrap();
    let svg = convert_file(&input, None, &ConvertOptions::default()).unwrap();
    assert!(svg.contains(r#"d="M 0 0 L 5 5""#));
}

#[test]
fn test_find_inputs_filters_and_sorts() {
    let dir = tempdir().unwrap();
    for name in ["b.eps", "a.PS", "notes.txt", "c.ps"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    fs::create_dir(dir.path().join("nested.ps")).unwrap();

    let names: Vec<String> = find_inputs(dir.path())
        .unwrap()
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["a.PS", "b.eps", "c.ps"]);
}

#[test]
fn test_find_inputs_errors() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.ps");
    fs::write(&file, "").unwrap();

    assert!(matches!(
        find_inputs(&dir.path().join("nope")),
        Err(PsSvgError::NotFound(_))
    ));
    assert!(matches!(find_inputs(&file), Err(PsSvgError::NotADirectory(_))));
}

#[test]
fn test_convert_dir_into_new_directory() {
    let input_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("one.ps"), SQUARE).unwrap();
    fs::write(input_dir.path().join("two.eps"), "").unwrap();
    let output_dir = input_dir.path().join("out");

    let options = ConvertOptions {
        threads: Some(2),
        ..ConvertOptions::default()
    };
    let entries = convert_dir(input_dir.path(), Some(&output_dir), &options).unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.is_ok()));
    assert_eq!(entries[0].output, output_dir.join("one.svg"));
    assert_eq!(entries[1].output, output_dir.join("two.svg"));
    let svg = fs::read_to_string(output_dir.join("one.svg")).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 100 100""#));
}

#[test]
fn test_convert_dir_reports_failures_per_file() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("good.ps"), SQUARE).unwrap();
    fs::write(input_dir.path().join("bad.ps"), SQUARE).unwrap();
    // A directory where the output file should go makes the write fail
    fs::create_dir(output_dir.path().join("bad.svg")).unwrap();

    let entries = convert_dir(input_dir.path(), Some(output_dir.path()), &ConvertOptions::default())
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert!(matches!(entries[0].result, Err(PsSvgError::Io { .. })));
    assert!(entries[1].is_ok());
    assert!(output_dir.path().join("good.svg").is_file());
}

#[test]
fn test_convert_dir_defaults_to_input_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.ps"), SQUARE).unwrap();
    let entries = convert_dir(dir.path(), None, &ConvertOptions::default()).unwrap();
    assert_eq!(entries.len(), 1);
    assert!(dir.path().join("x.svg").is_file());
}

#[test]
fn test_deeply_nested_arrays_degrade() {
    let svg = convert(&"[".repeat(500_000));
    assert!(svg.contains("<!-- literal nesting limit reached -->"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn test_deeply_nested_dicts_degrade() {
    let svg = convert(&"<< /a ".repeat(500_000));
    assert!(svg.contains("<!-- literal nesting limit reached -->"));
    assert!(svg.ends_with("</svg>"));
}
