//! Edge-case coverage for segmentation and loading on hostile inputs.

mod common;

use common::DataDirBuilder;
use serde_json::json;
use streamit_migrate::{parse_concatenated, read_text_file};

#[test]
fn test_large_concatenated_file_roundtrip() {
    let mut content = String::new();
    for i in 0..5_000 {
        content.push_str(&format!(r#"{{"_id": "FAC-{i}", "n": {i}}}"#));
    }
    let outcome = parse_concatenated(&content);
    assert_eq!(outcome.documents.len(), 5_000);
    assert_eq!(outcome.skipped_spans, 0);
    assert_eq!(outcome.documents[4_999]["n"], json!(4_999));
}

#[test]
fn test_deeply_nested_document() {
    let mut content = String::new();
    for _ in 0..200 {
        content.push_str(r#"{"v":"#);
    }
    content.push('1');
    content.push_str(&"}".repeat(200));
    // Followed by a sibling object with no separator.
    content.push_str(r#"{"after": true}"#);

    let outcome = parse_concatenated(&content);
    // serde_json's recursion limit rejects the deep object; the scanner
    // still recovers the sibling.
    assert_eq!(*outcome.documents.last().unwrap(), json!({"after": true}));
}

#[test]
fn test_pathological_unterminated_string_scans_to_end() {
    let mut content = String::from(r#"{"a": 1}{"b": ""#);
    content.push_str(&"x".repeat(100_000));
    let outcome = parse_concatenated(&content);
    assert_eq!(outcome.documents, vec![json!({"a": 1})]);
    assert_eq!(outcome.skipped_spans, 0);
}

#[test]
fn test_escape_heavy_content() {
    let content = r#"{"path": "a\\b\\c", "quote": "say \"hi\" {now}"}{"next": "\\\""}"#;
    let outcome = parse_concatenated(content);
    assert_eq!(outcome.documents.len(), 2);
    assert_eq!(outcome.documents[0]["quote"], json!("say \"hi\" {now}"));
    assert_eq!(outcome.documents[1]["next"], json!("\\\""));
}

#[test]
fn test_multibyte_utf8_across_segments() {
    let content = r#"{"emoji": "🎬🎬"}{"text": "función"}"#;
    let outcome = parse_concatenated(content);
    assert_eq!(outcome.documents.len(), 2);
    assert_eq!(outcome.documents[0]["emoji"], json!("🎬🎬"));
}

#[test]
fn test_loader_replaces_undecodable_sequences() {
    // 0x81 is unmapped junk in some legacy dumps; Windows-1252 still maps it
    // per WHATWG, so the load succeeds with substituted text either way.
    let data = DataDirBuilder::new().with_bytes("junk.json", b"{\"k\": \"\x81\xFF\"}");
    let files = streamit_migrate::discover_json_files(data.path()).unwrap();
    let decoded = read_text_file(&files[0]).expect("load should succeed");
    assert_eq!(decoded.encoding, "windows-1252");

    let outcome = parse_concatenated(&decoded.content);
    assert_eq!(outcome.documents.len(), 1);
}
