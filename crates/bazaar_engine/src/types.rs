use std::fmt;

use chrono::NaiveDate;

/// A marketplace listing as produced by catalog ingestion. The app crate
/// maps this onto the core's listing type.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub status: ListingStatus,
    pub listed_at: Option<NaiveDate>,
    pub platform: String,
    pub image: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Active,
    Sold,
}

/// The two fixed price-history documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDocKey {
    Iphone13,
    SonyA7c,
}

impl PriceDocKey {
    /// Path of the document relative to the data base URL.
    pub fn document_path(self) -> &'static str {
        match self {
            PriceDocKey::Iphone13 => "data/prices-iphone-13.json",
            PriceDocKey::SonyA7c => "data/prices-sony-a7c.json",
        }
    }
}

/// Averaged price series: `labels` and `avg` are parallel, non-empty, and of
/// equal length (enforced by `parse_price_history`).
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistorySeries {
    pub labels: Vec<String>,
    pub avg: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ListingsLoaded {
        generation: u64,
        listings: Vec<Listing>,
    },
    ListingsFailed {
        generation: u64,
        error: FetchError,
    },
    PriceHistoryLoaded {
        key: PriceDocKey,
        series: PriceHistorySeries,
    },
    PriceHistoryUnavailable {
        key: PriceDocKey,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
