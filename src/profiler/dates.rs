use chrono::NaiveDate;
use serde_json::Value;

use crate::profiler::report::json_type_name;

/// Classify a date field value into one of the format buckets seen in the
/// source data. Non-string values get a `type:` bucket so mixed-type fields
/// are visible in the same distribution.
pub fn classify_date_format(value: &Value) -> String {
    let Some(text) = value.as_str() else {
        return format!("type:{}", json_type_name(value));
    };

    if NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok() {
        return "YYYY-MM-DD (ISO)".to_string();
    }
    if matches_slashed(text, 4) {
        return "DD/MM/YYYY".to_string();
    }
    if matches_slashed(text, 2) {
        return "DD/MM/YY".to_string();
    }
    if matches_month_year(text) {
        return "Month YYYY".to_string();
    }

    if text.chars().count() > 20 {
        let prefix: String = text.chars().take(20).collect();
        format!("other: '{}...'", prefix)
    } else {
        format!("other: '{}'", text)
    }
}

/// `DD/MM/YYYY` when `year_len` is 4, `DD/MM/YY` when 2. Shape check only;
/// calendar validity is not this pass's concern.
fn matches_slashed(text: &str, year_len: usize) -> bool {
    let parts: Vec<&str> = text.split('/').collect();
    parts.len() == 3
        && parts[0].len() == 2
        && parts[1].len() == 2
        && parts[2].len() == year_len
        && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()))
}

/// A month name followed by a four-digit year, e.g. `January 2022`.
fn matches_month_year(text: &str) -> bool {
    let parts: Vec<&str> = text.split(' ').collect();
    parts.len() == 2
        && !parts[0].is_empty()
        && parts[0].chars().all(|c| c.is_alphabetic())
        && parts[1].len() == 4
        && parts[1].chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_iso_date() {
        assert_eq!(classify_date_format(&json!("2022-05-07")), "YYYY-MM-DD (ISO)");
    }

    #[test]
    fn test_slashed_formats() {
        assert_eq!(classify_date_format(&json!("07/05/2022")), "DD/MM/YYYY");
        assert_eq!(classify_date_format(&json!("07/05/22")), "DD/MM/YY");
    }

    #[test]
    fn test_month_year() {
        assert_eq!(classify_date_format(&json!("May 2022")), "Month YYYY");
        assert_eq!(classify_date_format(&json!("Mayo 2022")), "Month YYYY");
    }

    #[test]
    fn test_non_string_values_get_type_buckets() {
        assert_eq!(classify_date_format(&json!(20220507)), "type:number");
        assert_eq!(classify_date_format(&json!(null)), "type:null");
    }

    #[test]
    fn test_unrecognized_short_value() {
        assert_eq!(classify_date_format(&json!("soon")), "other: 'soon'");
    }

    #[test]
    fn test_unrecognized_long_value_is_truncated() {
        let classified =
            classify_date_format(&json!("sometime in the spring of next year"));
        assert_eq!(classified, "other: 'sometime in the spri...'");
    }

    #[test]
    fn test_invalid_iso_calendar_date_is_not_iso() {
        // Right shape, impossible date: chrono rejects it.
        assert_eq!(classify_date_format(&json!("2022-13-45")), "other: '2022-13-45'");
    }
}
