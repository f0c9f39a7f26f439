use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Simplified invoice with catalog references instead of embedded content.
///
/// Projection fields stay as raw `Value` (serialized as `null` when absent)
/// because the source documents carry them inconsistently; only the
/// reference arrays and metadata are strictly typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestructuredInvoice {
    #[serde(rename = "_id")]
    pub id: Value,
    pub client: ClientSummary,
    pub contract: ContractSummary,
    pub billing: Option<Value>,
    #[serde(rename = "chargeDate")]
    pub charge_date: Option<Value>,
    #[serde(rename = "dumpDate")]
    pub dump_date: Option<Value>,
    pub total: Option<Value>,
    #[serde(rename = "contentStats", default)]
    pub content_stats: Value,
    pub movies: Vec<MovieViewing>,
    pub series: Vec<SeriesViewing>,
    #[serde(rename = "_metadata")]
    pub metadata: RestructureMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub customer_code: Option<Value>,
    pub name: Option<Value>,
    pub surname: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub dni: Option<Value>,
    pub birth_date: Option<Value>,
    pub age: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
    pub contract_id: Option<Value>,
    pub start_date: Option<Value>,
    pub end_date: Option<Value>,
    pub address: Option<Value>,
    pub zip: Option<Value>,
    pub town: Option<Value>,
    pub country: Option<Value>,
    pub product: ProductSummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub reference: Option<Value>,
    #[serde(rename = "type")]
    pub product_type: Option<Value>,
    pub monthly_fee: Option<Value>,
    pub cost_per_day: Option<Value>,
    pub cost_per_minute: Option<Value>,
    pub cost_per_content: Option<Value>,
    pub zapping: bool,
    pub promotion: String,
}

/// One movie viewing, pointing at the catalog by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieViewing {
    pub movie_id: Uuid,
    pub date: Option<Value>,
    pub time: Option<Value>,
    pub viewing_pct: f64,
    pub license: Value,
}

/// One series viewing, pointing at the catalog by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesViewing {
    pub series_id: Uuid,
    pub season: i64,
    pub episode: i64,
    pub date: Option<Value>,
    pub time: Option<Value>,
    pub viewing_pct: f64,
    pub license: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestructureMetadata {
    #[serde(rename = "restructuredAt")]
    pub restructured_at: DateTime<Utc>,
    pub version: String,
}

impl RestructureMetadata {
    pub fn now() -> Self {
        Self { restructured_at: Utc::now(), version: "2.0".to_string() }
    }
}
