use chrono::NaiveDate;

/// Unique identifier of a listing within the loaded collection.
pub type ListingId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Active,
    Sold,
}

/// A single marketplace listing, parsed once at the ingestion boundary.
///
/// The pipeline treats listings as read-only; `listed_at` is `None` when the
/// source document carried an unparsable date, which sorts as the oldest
/// entry under the `latest` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub price: f64,
    pub status: ListingStatus,
    pub listed_at: Option<NaiveDate>,
    pub platform: String,
    pub image: String,
    pub url: String,
}
