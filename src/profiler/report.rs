use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::profiler::dates::classify_date_format;

/// Billing date fields the source data is known to carry, with their
/// historical inconsistent spellings.
const DATE_FIELDS: [&str; 3] = ["charge date", "dump date", "billing"];

/// At most this many example values are kept per date field.
const MAX_DATE_EXAMPLES: usize = 3;

/// Identifier statistics over the document stream.
#[derive(Debug, Default, Clone)]
pub struct IdStats {
    pub missing: usize,
    pub unique: usize,
    /// Id value -> occurrence count, only for ids seen more than once.
    pub duplicates: BTreeMap<String, usize>,
    /// Digit-masked shape (e.g. `FAC-N`) -> document count.
    pub shapes: BTreeMap<String, usize>,
}

/// Per-field statistics for one date field.
#[derive(Debug, Default, Clone)]
pub struct DateFieldStats {
    pub missing: usize,
    /// Detected format bucket -> document count.
    pub formats: BTreeMap<String, usize>,
    pub examples: Vec<String>,
}

/// Structure statistics for one embedded subdocument (Client, contract,
/// product).
#[derive(Debug, Default, Clone)]
pub struct StructureStats {
    pub missing: usize,
    pub not_an_object: usize,
    /// Field name -> set of JSON types observed for it. More than one type
    /// means the field is mixed-typed across documents.
    pub field_types: BTreeMap<String, BTreeSet<&'static str>>,
}

impl StructureStats {
    /// Fields observed with more than one JSON type.
    pub fn mixed_type_fields(&self) -> Vec<&str> {
        self.field_types
            .iter()
            .filter(|(_, types)| types.len() > 1)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Statistics for one embedded content array (Movies, Series).
#[derive(Debug, Default, Clone)]
pub struct EmbedStats {
    pub missing: usize,
    pub total_entries: usize,
    pub fields: BTreeSet<String>,
}

/// Statistics for the TOTAL amount field.
#[derive(Debug, Default, Clone)]
pub struct NumericStats {
    pub missing: usize,
    pub types: BTreeMap<&'static str, usize>,
    pub non_numeric: usize,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub negatives: usize,
    pub zeros: usize,
}

impl NumericStats {
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Aggregated quality picture of one parsed document stream.
#[derive(Debug, Default, Clone)]
pub struct QualityReport {
    pub total_documents: usize,
    pub files_loaded: usize,
    pub files_failed: usize,
    pub skipped_spans: usize,
    pub ids: IdStats,
    /// Keyed by the entries of `DATE_FIELDS`.
    pub dates: BTreeMap<String, DateFieldStats>,
    pub client: StructureStats,
    pub contract: StructureStats,
    pub product: StructureStats,
    pub movies: EmbedStats,
    pub series: EmbedStats,
    pub total_amount: NumericStats,
}

/// JSON type name of a value, as reported in type inventories.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Profile a parsed document stream.
///
/// Pure aggregation over already-parsed documents; absent fields and
/// explicit nulls both count as missing, matching how the source data mixes
/// the two.
pub fn profile(documents: &[Value]) -> QualityReport {
    let mut report = QualityReport { total_documents: documents.len(), ..Default::default() };

    for field in DATE_FIELDS {
        report.dates.insert(field.to_string(), DateFieldStats::default());
    }

    let mut id_counts: BTreeMap<String, usize> = BTreeMap::new();

    for doc in documents {
        profile_id(doc, &mut report.ids, &mut id_counts);
        profile_dates(doc, &mut report.dates);
        profile_structure(doc.get("Client"), &mut report.client);
        profile_structure(doc.get("contract"), &mut report.contract);
        let product = doc.get("contract").and_then(|c| c.get("product"));
        profile_structure(product, &mut report.product);
        profile_embeds(doc.get("Movies"), &mut report.movies);
        profile_embeds(doc.get("Series"), &mut report.series);
        profile_total(doc.get("TOTAL"), &mut report.total_amount);
    }

    report.ids.unique = id_counts.len();
    report.ids.duplicates =
        id_counts.into_iter().filter(|(_, count)| *count > 1).collect();

    report
}

fn profile_id(doc: &Value, ids: &mut IdStats, counts: &mut BTreeMap<String, usize>) {
    match doc.get("_id") {
        None | Some(Value::Null) => ids.missing += 1,
        Some(value) => {
            let key = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            *counts.entry(key).or_insert(0) += 1;
            if let Value::String(s) = value {
                *ids.shapes.entry(mask_digits(s)).or_insert(0) += 1;
            }
        }
    }
}

/// Collapse every digit run to a single `N`, so `FAC-00123` and `FAC-7`
/// fall into the same `FAC-N` shape bucket.
fn mask_digits(id: &str) -> String {
    let mut shape = String::with_capacity(id.len());
    let mut in_digits = false;
    for c in id.chars() {
        if c.is_ascii_digit() {
            if !in_digits {
                shape.push('N');
                in_digits = true;
            }
        } else {
            shape.push(c);
            in_digits = false;
        }
    }
    shape
}

fn profile_dates(doc: &Value, dates: &mut BTreeMap<String, DateFieldStats>) {
    for field in DATE_FIELDS {
        let stats = dates.entry(field.to_string()).or_default();
        match doc.get(field) {
            None | Some(Value::Null) => stats.missing += 1,
            Some(value) => {
                let format = classify_date_format(value);
                *stats.formats.entry(format).or_insert(0) += 1;
                if stats.examples.len() < MAX_DATE_EXAMPLES {
                    if let Some(text) = value.as_str() {
                        stats.examples.push(text.to_string());
                    }
                }
            }
        }
    }
}

fn profile_structure(value: Option<&Value>, stats: &mut StructureStats) {
    match value {
        None | Some(Value::Null) => stats.missing += 1,
        Some(Value::Object(map)) => {
            for (key, field_value) in map {
                stats
                    .field_types
                    .entry(key.clone())
                    .or_default()
                    .insert(json_type_name(field_value));
            }
        }
        Some(_) => stats.not_an_object += 1,
    }
}

fn profile_embeds(value: Option<&Value>, stats: &mut EmbedStats) {
    match value {
        None | Some(Value::Null) => stats.missing += 1,
        Some(Value::Array(entries)) => {
            stats.total_entries += entries.len();
            for entry in entries {
                if let Value::Object(map) = entry {
                    stats.fields.extend(map.keys().cloned());
                }
            }
        }
        // A non-array Movies/Series value is a structural inconsistency;
        // it contributes no entries.
        Some(_) => {}
    }
}

fn profile_total(value: Option<&Value>, stats: &mut NumericStats) {
    match value {
        None | Some(Value::Null) => stats.missing += 1,
        Some(value) => {
            *stats.types.entry(json_type_name(value)).or_insert(0) += 1;
            let numeric = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            match numeric {
                Some(n) => {
                    if stats.count == 0 {
                        stats.min = n;
                        stats.max = n;
                    } else {
                        stats.min = stats.min.min(n);
                        stats.max = stats.max.max(n);
                    }
                    stats.count += 1;
                    stats.sum += n;
                    if n < 0.0 {
                        stats.negatives += 1;
                    } else if n == 0.0 {
                        stats.zeros += 1;
                    }
                }
                None => stats.non_numeric += 1,
            }
        }
    }
}

/// Dump the report counters to stdout.
pub fn print_report(report: &QualityReport) {
    println!("Data Quality Report");
    println!("===================");
    if report.files_loaded > 0 || report.files_failed > 0 {
        println!(
            "Files loaded: {} ({} failed), skipped spans: {}",
            report.files_loaded, report.files_failed, report.skipped_spans
        );
    }
    println!("Total documents: {}", report.total_documents);
    println!();

    println!("Ids");
    println!("  Missing _id: {}", report.ids.missing);
    println!("  Unique ids: {}", report.ids.unique);
    println!("  Duplicated ids: {}", report.ids.duplicates.len());
    for (id, count) in report.ids.duplicates.iter().take(5) {
        println!("    '{}': {} times", id, count);
    }
    for (shape, count) in &report.ids.shapes {
        println!("  Shape {}: {} documents", shape, count);
    }

    for (field, stats) in &report.dates {
        println!();
        println!("Date field '{}'", field);
        println!("  Missing/null: {}", stats.missing);
        for (format, count) in &stats.formats {
            println!("  {}: {} documents", format, count);
        }
        if !stats.examples.is_empty() {
            println!("  Examples: {:?}", stats.examples);
        }
        if stats.formats.len() > 1 {
            println!("  Warning: heterogeneous date formats");
        }
    }

    for (name, stats) in [
        ("Client", &report.client),
        ("contract", &report.contract),
        ("contract.product", &report.product),
    ] {
        println!();
        println!("Structure '{}'", name);
        println!("  Missing/null: {}", stats.missing);
        println!("  Not an object: {}", stats.not_an_object);
        println!("  Fields: {}", stats.field_types.len());
        for field in stats.mixed_type_fields() {
            println!("  Warning: mixed types in field '{}'", field);
        }
    }

    for (name, stats) in [("Movies", &report.movies), ("Series", &report.series)] {
        println!();
        println!("Embedded '{}'", name);
        println!("  Documents without {}: {}", name, stats.missing);
        println!("  Total entries: {}", stats.total_entries);
        println!("  Unique entry fields: {}", stats.fields.len());
    }

    println!();
    println!("TOTAL");
    println!("  Missing/null: {}", report.total_amount.missing);
    println!("  Non-numeric: {}", report.total_amount.non_numeric);
    if let Some(mean) = report.total_amount.mean() {
        println!(
            "  Min: {:.2}  Max: {:.2}  Mean: {:.2}",
            report.total_amount.min, report.total_amount.max, mean
        );
    }
    if report.total_amount.negatives > 0 {
        println!("  Warning: {} negative values", report.total_amount.negatives);
    }
    if report.total_amount.zeros > 0 {
        println!("  Warning: {} zero values", report.total_amount.zeros);
    }
}
