use chrono::NaiveDate;

use crate::listing::{ListingId, ListingStatus};
use crate::state::{SortKey, Tab};

/// What the presentation layer renders after an update. Snapshot only; the
/// presenter never reaches back into `AppState`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub query: String,
    pub tab: Tab,
    pub sort: SortKey,
    pub only_favorites: bool,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub items: Vec<ListingCard>,
    pub recent_queries: Vec<String>,
    pub banner: Banner,
    pub chart: Option<ChartView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub id: ListingId,
    pub title: String,
    pub price: f64,
    pub status: ListingStatus,
    pub listed_at: Option<NaiveDate>,
    pub platform: String,
    pub image: String,
    pub url: String,
    pub favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Loading,
    /// The last fetch failed; offer a retry.
    Error,
    Ready,
}

/// Data for the optional price-history chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub labels: Vec<String>,
    pub avg: Vec<f64>,
    /// The most recent average, shown next to the chart.
    pub latest_avg: f64,
}
