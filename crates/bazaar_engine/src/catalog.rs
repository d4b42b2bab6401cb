//! Lenient ingestion of the listings and price-history documents.
//!
//! Coercion happens once here, at the boundary; the rest of the system only
//! sees typed values. A document that is not a JSON array yields zero
//! listings rather than an error.

use bazaar_logging::{bazaar_debug, bazaar_warn};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::{Listing, ListingStatus, PriceHistorySeries};

/// Parses the listings document. Non-array content is treated as an empty
/// collection; individual records are coerced leniently and skipped only
/// when they carry no usable id.
pub fn parse_listings(doc: &Value) -> Vec<Listing> {
    let Some(records) = doc.as_array() else {
        bazaar_warn!("listings document is not an array; treating as empty");
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| {
            let listing = parse_listing(record);
            if listing.is_none() {
                bazaar_debug!("skipping listing record without id: {record}");
            }
            listing
        })
        .collect()
}

fn parse_listing(record: &Value) -> Option<Listing> {
    let fields = record.as_object()?;
    let id = coerce_id(fields.get("id")?)?;

    Some(Listing {
        id,
        title: string_field(fields.get("title")),
        price: coerce_price(fields.get("price")),
        status: coerce_status(fields.get("status")),
        listed_at: fields
            .get("listedAt")
            .and_then(Value::as_str)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()),
        platform: string_field(fields.get("platform")),
        image: string_field(fields.get("image")),
        url: string_field(fields.get("url")),
    })
}

fn string_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_price(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    };
    raw.max(0.0)
}

fn coerce_status(value: Option<&Value>) -> ListingStatus {
    match value.and_then(Value::as_str) {
        Some("sold") => ListingStatus::Sold,
        _ => ListingStatus::Active,
    }
}

#[derive(Debug, Deserialize)]
struct RawPriceHistory {
    labels: Vec<String>,
    avg: Vec<f64>,
}

/// Parses a price-history document. Returns `None` for anything that
/// violates the labels/avg contract so the caller can hide the chart.
pub fn parse_price_history(doc: &Value) -> Option<PriceHistorySeries> {
    let raw: RawPriceHistory = serde_json::from_value(doc.clone()).ok()?;
    if raw.labels.is_empty() || raw.labels.len() != raw.avg.len() {
        bazaar_warn!(
            "price-history document malformed: {} labels, {} averages",
            raw.labels.len(),
            raw.avg.len()
        );
        return None;
    }
    Some(PriceHistorySeries {
        labels: raw.labels,
        avg: raw.avg,
    })
}
