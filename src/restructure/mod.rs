//! Denormalization of embedded invoice content into separate collections
//!
//! The source invoices embed full movie and series records in every document
//! that references them. This pass extracts each title once into a catalog,
//! assigns it a fresh id, and rewrites the invoices to carry lightweight
//! viewing references instead.
//!
//! The title-to-id mapping is an explicit [`ContentMap`] value passed into
//! and returned from each extraction call; there is no shared mutable state
//! between calls.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use uuid::Uuid;

use crate::loader::{discover_json_files, read_text_file};
use crate::models::{
    CastMember, ClientSummary, ContentMetadata, ContractSummary, Movie, MovieCast,
    MovieDetails, MovieViewing, ProductSummary, RestructureMetadata, RestructuredInvoice,
    Series, SeriesViewing,
};
use crate::parsers::parse_concatenated;

/// Dedup key (trimmed, lowercased title) -> catalog document id.
pub type ContentMap = HashMap<String, Uuid>;

/// Counters from a full restructuring run.
#[derive(Debug, Default)]
pub struct RestructureSummary {
    pub files_loaded: usize,
    pub files_failed: usize,
    pub invoices: usize,
    pub movies: usize,
    pub series: usize,
}

fn title_of(entry: &Value) -> Option<(String, String)> {
    let title = entry.get("title")?.as_str()?.trim();
    if title.is_empty() {
        return None;
    }
    Some((title.to_string(), title.to_lowercase()))
}

fn str_field(value: &Value, key: &str) -> String {
    value.get(key).and_then(Value::as_str).map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Integer coercion with the source data's tolerances: numbers (truncating
/// floats), numeric strings, everything else 0.
fn i64_field(value: &Value, key: &str) -> i64 {
    match value.get(key) {
        Some(Value::Number(n)) => {
            n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0)
        }
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn f64_field(value: &Value, key: &str) -> f64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract the deduplicated movie catalog from a batch of invoices.
///
/// Movies are keyed by trimmed, lowercased title; the first occurrence of a
/// title supplies the catalog document, later occurrences only add viewing
/// references. Entries without a usable title are skipped.
pub fn extract_movies(invoices: &[Value]) -> (Vec<Movie>, ContentMap) {
    let mut movies = Vec::new();
    let mut map = ContentMap::new();

    for invoice in invoices {
        let Some(entries) = invoice.get("Movies").and_then(Value::as_array) else {
            continue;
        };
        for entry in entries {
            let Some((title, key)) = title_of(entry) else { continue };
            if map.contains_key(&key) {
                continue;
            }
            let id = Uuid::new_v4();
            map.insert(key, id);
            movies.push(Movie {
                id,
                title,
                details: extract_movie_details(entry.get("details").unwrap_or(&Value::Null)),
                metadata: ContentMetadata::now(),
            });
        }
    }

    (movies, map)
}

fn extract_movie_details(details: &Value) -> MovieDetails {
    // The director appears both as an object and as a bare name string in
    // the source data.
    let director = match details.get("director") {
        Some(d @ Value::Object(_)) => {
            CastMember { name: str_field(d, "name"), facebook_likes: i64_field(d, "facebookLikes") }
        }
        Some(Value::String(name)) => {
            CastMember { name: name.trim().to_string(), facebook_likes: 0 }
        }
        _ => CastMember::default(),
    };

    let cast = match details.get("cast") {
        Some(cast @ Value::Object(_)) => {
            let stars = match cast.get("stars") {
                Some(Value::Array(stars)) => stars
                    .iter()
                    .filter(|s| s.is_object())
                    .filter_map(|s| {
                        let name = str_field(s, "player");
                        (!name.is_empty()).then(|| CastMember {
                            name,
                            facebook_likes: i64_field(s, "facebookLikes"),
                        })
                    })
                    .collect(),
                _ => Vec::new(),
            };
            MovieCast { facebook_likes: i64_field(cast, "facebookLikes"), stars }
        }
        _ => MovieCast::default(),
    };

    MovieDetails {
        year: details.get("year").and_then(Value::as_i64),
        country: str_field(details, "country"),
        color: str_field(details, "color"),
        aspect_ratio: details.get("aspectRatio").and_then(Value::as_f64),
        content_rating: str_field(details, "contentRating"),
        budget: i64_field(details, "budget"),
        gross: i64_field(details, "gross"),
        director,
        cast,
        language: str_field(details, "language"),
        genres: string_list(details, "genres"),
        keywords: string_list(details, "keywords"),
        faces_in_poster: i64_field(details, "facesInPoster"),
        imdb_score: f64_field(details, "imdbScore"),
        imdb_link: str_field(details, "imdbLink"),
        critic_reviews: i64_field(details, "criticReviews"),
        user_reviews: i64_field(details, "userReviews"),
        voted_users: i64_field(details, "votedUsers"),
        facebook_likes: i64_field(details, "facebookLikes"),
        duration: i64_field(details, "duration"),
    }
}

/// Extract the deduplicated series catalog. Same keying as movies.
pub fn extract_series(invoices: &[Value]) -> (Vec<Series>, ContentMap) {
    let mut series = Vec::new();
    let mut map = ContentMap::new();

    for invoice in invoices {
        let Some(entries) = invoice.get("Series").and_then(Value::as_array) else {
            continue;
        };
        for entry in entries {
            let Some((title, key)) = title_of(entry) else { continue };
            if map.contains_key(&key) {
                continue;
            }
            let id = Uuid::new_v4();
            map.insert(key, id);
            series.push(Series {
                id,
                title,
                total_seasons: i64_field(entry, "totalSeasons"),
                total_episodes: i64_field(entry, "totalEpisodes"),
                avg_duration: i64_field(entry, "avgDuration"),
                metadata: ContentMetadata::now(),
            });
        }
    }

    (series, map)
}

/// First value present under any of the given keys. The cleaned and raw
/// dumps disagree on field spelling (`chargeDate` vs `charge date`), so the
/// rewrite accepts both.
fn first_of(doc: &Value, keys: &[&str]) -> Option<Value> {
    keys.iter().find_map(|k| doc.get(*k)).cloned()
}

/// Rewrite invoices against the extracted catalogs.
///
/// Embedded movie/series entries become viewing references carrying the
/// per-viewing fields; entries whose title is not in the corresponding map
/// (blank or missing titles) are dropped, as the source pipeline did.
pub fn rewrite_invoices(
    invoices: &[Value],
    movies: &ContentMap,
    series: &ContentMap,
) -> Vec<RestructuredInvoice> {
    invoices.iter().map(|invoice| rewrite_invoice(invoice, movies, series)).collect()
}

fn rewrite_invoice(
    invoice: &Value,
    movies: &ContentMap,
    series: &ContentMap,
) -> RestructuredInvoice {
    let empty = Value::Null;
    let client = invoice.get("Client").unwrap_or(&empty);
    let contract = invoice.get("contract").unwrap_or(&empty);
    let product = contract.get("product").unwrap_or(&empty);

    let movie_refs = match invoice.get("Movies").and_then(Value::as_array) {
        Some(entries) => entries
            .iter()
            .filter_map(|entry| {
                let (_, key) = title_of(entry)?;
                let movie_id = *movies.get(&key)?;
                Some(MovieViewing {
                    movie_id,
                    date: entry.get("date").cloned(),
                    time: entry.get("time").cloned(),
                    viewing_pct: f64_field(entry, "viewingPct"),
                    license: entry.get("license").cloned().unwrap_or_else(
                        || Value::Object(Default::default()),
                    ),
                })
            })
            .collect(),
        None => Vec::new(),
    };

    let series_refs = match invoice.get("Series").and_then(Value::as_array) {
        Some(entries) => entries
            .iter()
            .filter_map(|entry| {
                let (_, key) = title_of(entry)?;
                let series_id = *series.get(&key)?;
                Some(SeriesViewing {
                    series_id,
                    season: i64_field(entry, "season"),
                    episode: i64_field(entry, "episode"),
                    date: entry.get("date").cloned(),
                    time: entry.get("time").cloned(),
                    viewing_pct: f64_field(entry, "viewingPct"),
                    license: entry.get("license").cloned().unwrap_or_else(
                        || Value::Object(Default::default()),
                    ),
                })
            })
            .collect(),
        None => Vec::new(),
    };

    RestructuredInvoice {
        id: invoice.get("_id").cloned().unwrap_or(Value::Null),
        client: ClientSummary {
            customer_code: client.get("customerCode").cloned(),
            name: client.get("name").cloned(),
            surname: client.get("surname").cloned(),
            email: client.get("email").cloned(),
            phone: client.get("phone").cloned(),
            dni: client.get("dni").cloned(),
            birth_date: client.get("birthDate").cloned(),
            age: client.get("age").cloned(),
        },
        contract: ContractSummary {
            contract_id: contract.get("contractId").cloned(),
            start_date: contract.get("startDate").cloned(),
            end_date: contract.get("endDate").cloned(),
            address: contract.get("address").cloned(),
            zip: contract.get("zip").cloned(),
            town: contract.get("town").cloned(),
            country: contract.get("country").cloned(),
            product: ProductSummary {
                reference: product.get("reference").cloned(),
                product_type: product.get("type").cloned(),
                monthly_fee: product.get("monthlyFee").cloned(),
                cost_per_day: product.get("costPerDay").cloned(),
                cost_per_minute: product.get("costPerMinute").cloned(),
                cost_per_content: product.get("costPerContent").cloned(),
                zapping: product.get("zapping").and_then(Value::as_bool).unwrap_or(false),
                promotion: str_field(product, "promotion"),
            },
        },
        billing: invoice.get("billing").cloned(),
        charge_date: first_of(invoice, &["chargeDate", "charge date"]),
        dump_date: first_of(invoice, &["dumpDate", "dump date"]),
        total: first_of(invoice, &["total", "TOTAL"]),
        content_stats: invoice
            .get("contentStats")
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default())),
        movies: movie_refs,
        series: series_refs,
        metadata: RestructureMetadata::now(),
    }
}

/// Full restructuring run over a directory of invoice dumps.
///
/// Loads and segments every `.json` file, extracts the catalogs, rewrites
/// the invoices, and writes `movies.json`, `series.json` and
/// `invoices_restructured.json` arrays to the output directory. Per-file
/// load failures are logged and skipped; a rewritten-count mismatch is
/// reported as a warning, matching the original validation step.
///
/// # Errors
///
/// Returns an error if the input directory cannot be scanned or an output
/// file cannot be written.
pub fn run(input_dir: &Path, output_dir: &Path) -> Result<RestructureSummary> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let mut invoices = Vec::new();
    let mut summary = RestructureSummary::default();

    for path in discover_json_files(input_dir)? {
        match read_text_file(&path) {
            Ok(decoded) => {
                let outcome = parse_concatenated(&decoded.content);
                invoices.extend(outcome.documents);
                summary.files_loaded += 1;
            }
            Err(e) => {
                eprintln!("Warning: Skipping {}: {}", path.display(), e);
                summary.files_failed += 1;
            }
        }
    }

    let (movies, movies_map) = extract_movies(&invoices);
    let (series, series_map) = extract_series(&invoices);
    let rewritten = rewrite_invoices(&invoices, &movies_map, &series_map);

    if rewritten.len() != invoices.len() {
        eprintln!(
            "Warning: {} of {} invoices were not rewritten",
            invoices.len() - rewritten.len(),
            invoices.len()
        );
    }

    write_array(&output_dir.join("movies.json"), &movies)?;
    write_array(&output_dir.join("series.json"), &series)?;
    write_array(&output_dir.join("invoices_restructured.json"), &rewritten)?;

    summary.invoices = rewritten.len();
    summary.movies = movies.len();
    summary.series = series.len();
    Ok(summary)
}

fn write_array<T: serde::Serialize>(path: &Path, documents: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(documents)
        .context("Failed to serialize output documents")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}
