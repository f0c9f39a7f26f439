use serde_json::Value;

/// Result of one segmentation pass over a raw text buffer.
///
/// `documents` are the decoded values in input order. `skipped_spans` counts
/// balanced-brace spans that failed to decode and were dropped; when it is
/// non-zero the document count understates the true record count.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseOutcome {
    pub documents: Vec<Value>,
    pub skipped_spans: usize,
}

/// Parse a text buffer that may contain multiple back-to-back JSON objects
/// with no separators between them, e.g. `{...}{...}{...}`.
///
/// Tries the whole buffer as a single JSON value first: an array yields its
/// elements as the documents, any other value yields a one-element list. Only
/// when that decode fails does the character-scanning segmenter run, tracking
/// brace depth and string/escape state so braces inside string literals never
/// perturb nesting. Each balanced top-level span is handed to `serde_json`
/// independently; spans that fail to decode are dropped and counted, never
/// raised.
///
/// The scan is a pure function of the input: one left-to-right pass, no I/O,
/// no shared state. A trailing unterminated fragment at end of input is
/// discarded.
///
/// # Examples
///
/// ```
/// use streamit_migrate::parsers::parse_concatenated;
///
/// let outcome = parse_concatenated(r#"{"a":1}{"b":2}"#);
/// assert_eq!(outcome.documents.len(), 2);
/// assert_eq!(outcome.skipped_spans, 0);
/// ```
pub fn parse_concatenated(content: &str) -> ParseOutcome {
    // Fast path: the buffer may already be one valid JSON value (an array
    // produced by an earlier conversion run, or a single object).
    if let Ok(value) = serde_json::from_str::<Value>(content) {
        let documents = match value {
            Value::Array(elements) => elements,
            other => vec![other],
        };
        return ParseOutcome { documents, skipped_spans: 0 };
    }

    scan_segments(content)
}

/// Single-pass brace/string/escape scanner for concatenated objects.
///
/// Invariants:
/// - `depth` only changes while outside a string literal.
/// - A span is decoded only when `depth` returns to 0 and the accumulated
///   text is non-blank.
fn scan_segments(content: &str) -> ParseOutcome {
    let mut documents = Vec::new();
    let mut skipped_spans = 0;

    let mut depth: u32 = 0;
    let mut in_string = false;
    let mut escape_next = false;
    let mut buffer = String::new();

    for c in content.chars() {
        if escape_next {
            // The escaped character is literal: it cannot toggle string state
            // or brace depth.
            buffer.push(c);
            escape_next = false;
            continue;
        }

        if c == '\\' {
            escape_next = true;
            buffer.push(c);
            continue;
        }

        if c == '"' {
            in_string = !in_string;
        }

        let mut closed_span = false;
        if !in_string {
            if c == '{' {
                if depth == 0 {
                    // Stray text between objects (whitespace, commas, corrupt
                    // fragments) is dropped when a new top-level object opens.
                    buffer.clear();
                }
                depth += 1;
            } else if c == '}' && depth > 0 {
                depth -= 1;
                closed_span = depth == 0;
            }
        }

        buffer.push(c);

        // A document is emitted only when depth returns to 0 after having
        // been greater than 0, i.e. a balanced top-level span just closed.
        if closed_span && !buffer.trim().is_empty() {
            match serde_json::from_str::<Value>(buffer.trim()) {
                Ok(value) => documents.push(value),
                Err(_) => skipped_spans += 1,
            }
            buffer.clear();
        }
    }

    // A non-empty buffer with depth != 0 here is an unterminated fragment;
    // it produces no document and no error.
    ParseOutcome { documents, skipped_spans }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_single_object_returns_one_document() {
        let outcome = parse_concatenated(r#"{"a": 1, "b": "two"}"#);
        assert_eq!(outcome.documents, vec![json!({"a": 1, "b": "two"})]);
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_valid_array_returns_its_elements() {
        let outcome = parse_concatenated(r#"[{"a": 1}, {"a": 2}, {"a": 3}]"#);
        assert_eq!(
            outcome.documents,
            vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 3})]
        );
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_valid_bare_value_returns_one_document() {
        // Fast path succeeds for any single JSON value, not only objects.
        let outcome = parse_concatenated("42");
        assert_eq!(outcome.documents, vec![json!(42)]);
    }

    #[test]
    fn test_three_empty_objects_back_to_back() {
        let outcome = parse_concatenated("{}{}{}");
        assert_eq!(outcome.documents, vec![json!({}), json!({}), json!({})]);
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_concatenated_objects_with_whitespace_between() {
        let outcome = parse_concatenated("{\"a\":1}\n\n  {\"b\":2}\r\n{\"c\":3}");
        assert_eq!(
            outcome.documents,
            vec![json!({"a": 1}), json!({"b": 2}), json!({"c": 3})]
        );
    }

    #[test]
    fn test_brace_inside_string_does_not_split() {
        let outcome = parse_concatenated(r#"{"a": "}"}"#);
        assert_eq!(outcome.documents, vec![json!({"a": "}"})]);
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_open_brace_inside_string_does_not_nest() {
        let outcome = parse_concatenated(r#"{"a": "{{{"}{"b": 2}"#);
        assert_eq!(outcome.documents, vec![json!({"a": "{{{"}), json!({"b": 2})]);
    }

    #[test]
    fn test_escaped_quote_does_not_toggle_string_state() {
        // The value is `"}` : an escaped quote followed by a closing brace,
        // both inside the string literal.
        let outcome = parse_concatenated(r#"{"a": "\"}"}"#);
        assert_eq!(outcome.documents, vec![json!({"a": "\"}"})]);
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote() {
        // `\\` ends the escape before the quote, so the quote closes the
        // string normally.
        let outcome = parse_concatenated(r#"{"path": "C:\\"}{"b": 2}"#);
        assert_eq!(
            outcome.documents,
            vec![json!({"path": "C:\\"}), json!({"b": 2})]
        );
    }

    #[test]
    fn test_malformed_segment_between_valid_ones_is_dropped() {
        let outcome = parse_concatenated(r#"{"ok":1}{bad json}{"ok":2}"#);
        assert_eq!(outcome.documents, vec![json!({"ok": 1}), json!({"ok": 2})]);
        assert_eq!(outcome.skipped_spans, 1);
    }

    #[test]
    fn test_stray_text_between_objects_is_discarded() {
        let outcome = parse_concatenated(r#"{"a":1} , garbage , {"b":2}"#);
        assert_eq!(outcome.documents, vec![json!({"a": 1}), json!({"b": 2})]);
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_stray_bare_values_between_objects_are_not_emitted() {
        let outcome = parse_concatenated(r#"{"a":1} 5 {"b":2}"#);
        assert_eq!(outcome.documents, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_stray_closing_brace_is_ignored() {
        let outcome = parse_concatenated(r#"} {"a":1}"#);
        assert_eq!(outcome.documents, vec![json!({"a": 1})]);
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_empty_input_returns_no_documents() {
        let outcome = parse_concatenated("");
        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_whitespace_only_input_returns_no_documents() {
        let outcome = parse_concatenated("  \n\t  \r\n ");
        assert!(outcome.documents.is_empty());
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_trailing_unterminated_fragment_is_discarded() {
        let outcome = parse_concatenated(r#"{"a":1}{"b": "#);
        assert_eq!(outcome.documents, vec![json!({"a": 1})]);
        assert_eq!(outcome.skipped_spans, 0);
    }

    #[test]
    fn test_unterminated_string_runs_to_end_of_buffer() {
        // Everything after the unclosed quote is string content, so no
        // further document is emitted.
        let outcome = parse_concatenated(r#"{"a":1}{"b": "unclosed}{"c":3}"#);
        assert_eq!(outcome.documents, vec![json!({"a": 1})]);
    }

    #[test]
    fn test_nested_objects_emit_only_at_top_level() {
        let outcome =
            parse_concatenated(r#"{"outer": {"inner": {"deep": 1}}}{"next": 2}"#);
        assert_eq!(
            outcome.documents,
            vec![json!({"outer": {"inner": {"deep": 1}}}), json!({"next": 2})]
        );
    }

    #[test]
    fn test_non_ascii_content_survives_segmentation() {
        let outcome = parse_concatenated(
            r#"{"name": "Peña", "town": "Logroño"}{"name": "Müller"}"#,
        );
        assert_eq!(
            outcome.documents,
            vec![
                json!({"name": "Peña", "town": "Logroño"}),
                json!({"name": "Müller"})
            ]
        );
    }

    #[test]
    fn test_reserialized_output_reparses_to_same_documents() {
        let input = r#"{"a":1}{"b":{"c":"}"}} {"d":[1,2,3]}"#;
        let first = parse_concatenated(input);
        assert_eq!(first.documents.len(), 3);

        let reserialized: String =
            first.documents.iter().map(|d| d.to_string()).collect();
        let second = parse_concatenated(&reserialized);
        assert_eq!(second.documents, first.documents);
        assert_eq!(second.skipped_spans, 0);
    }

    #[test]
    fn test_invoice_shaped_documents() {
        let input = concat!(
            r#"{"_id": "FAC-001", "Client": {"name": "Ana"}, "TOTAL": 12.5, "Movies": [{"title": "Alien"}]}"#,
            r#"{"_id": "FAC-002", "Client": {"name": "Luis"}, "TOTAL": 8, "Series": []}"#,
        );
        let outcome = parse_concatenated(input);
        assert_eq!(outcome.documents.len(), 2);
        assert_eq!(outcome.documents[0]["_id"], json!("FAC-001"));
        assert_eq!(outcome.documents[1]["Client"]["name"], json!("Luis"));
    }
}
