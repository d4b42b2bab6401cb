use std::collections::BTreeSet;

use crate::chart::{ChartKey, PriceHistory};
use crate::listing::{Listing, ListingId};
use crate::pipeline;
use crate::view_model::{AppViewModel, Banner, ChartView, ListingCard};

/// Listings shown per page unless the session is configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Session-fixed knobs. The page size is configuration, not forked logic:
/// the compact variant of the page runs the same pipeline with 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub page_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Active,
    Sold,
}

impl Tab {
    pub fn as_param(self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Active => "active",
            Tab::Sold => "sold",
        }
    }

    /// Parses a URL parameter; unrecognized values yield `None` so the
    /// caller can fall back to the default.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Tab::All),
            "active" => Some(Tab::Active),
            "sold" => Some(Tab::Sold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Latest,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub fn as_param(self) -> &'static str {
        match self {
            SortKey::Latest => "latest",
            SortKey::PriceAsc => "priceAsc",
            SortKey::PriceDesc => "priceDesc",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "latest" => Some(SortKey::Latest),
            "priceAsc" => Some(SortKey::PriceAsc),
            "priceDesc" => Some(SortKey::PriceDesc),
            _ => None,
        }
    }
}

/// The filter/sort/page state driving the pipeline. One instance per page
/// session; `page` is clamped into `[1, total_pages]` after every recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub tab: Tab,
    pub sort: SortKey,
    pub only_favorites: bool,
    pub page: usize,
    pub page_size: usize,
}

impl FilterState {
    fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            tab: Tab::All,
            sort: SortKey::Latest,
            only_favorites: false,
            page: 1,
            page_size: page_size.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// A listings fetch is in flight (including the initial one).
    #[default]
    Loading,
    Ready,
    /// The last fetch failed; the collection is empty and retryable.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ChartStatus {
    Hidden,
    Pending(ChartKey),
    Shown(ChartKey, PriceHistory),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub(crate) filter: FilterState,
    pub(crate) listings: Vec<Listing>,
    pub(crate) favorites: BTreeSet<ListingId>,
    pub(crate) recent_queries: Vec<String>,
    pub(crate) load: LoadStatus,
    pub(crate) generation: u64,
    pub(crate) chart: ChartStatus,
    pub(crate) dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(SessionConfig::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            filter: FilterState::new(config.page_size),
            listings: Vec::new(),
            favorites: BTreeSet::new(),
            recent_queries: Vec::new(),
            load: LoadStatus::Loading,
            generation: 0,
            chart: ChartStatus::Hidden,
            dirty: false,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Returns and clears the dirty flag; the platform re-renders only when
    /// this was set.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Re-runs the pipeline and writes the effective page back. A previously
    /// valid page can become invalid after a filter narrows the result set
    /// and must snap back rather than show an empty page.
    pub(crate) fn clamp_page(&mut self) {
        let page = pipeline::visible_page(&self.listings, &self.filter, &self.favorites);
        self.filter.page = page.page;
    }

    pub fn view(&self) -> AppViewModel {
        let page = pipeline::visible_page(&self.listings, &self.filter, &self.favorites);
        AppViewModel {
            query: self.filter.query.clone(),
            tab: self.filter.tab,
            sort: self.filter.sort,
            only_favorites: self.filter.only_favorites,
            page: page.page,
            total_pages: page.total_pages,
            has_prev: page.page > 1,
            has_next: page.page < page.total_pages,
            items: page
                .items
                .into_iter()
                .map(|listing| ListingCard {
                    favorite: self.favorites.contains(&listing.id),
                    id: listing.id,
                    title: listing.title,
                    price: listing.price,
                    status: listing.status,
                    listed_at: listing.listed_at,
                    platform: listing.platform,
                    image: listing.image,
                    url: listing.url,
                })
                .collect(),
            recent_queries: self.recent_queries.clone(),
            banner: match self.load {
                LoadStatus::Loading => Banner::Loading,
                LoadStatus::Failed => Banner::Error,
                LoadStatus::Ready => Banner::Ready,
            },
            chart: match &self.chart {
                ChartStatus::Shown(_, series) => Some(ChartView {
                    labels: series.labels.clone(),
                    avg: series.avg.clone(),
                    latest_avg: series.avg.last().copied().unwrap_or_default(),
                }),
                _ => None,
            },
            dirty: self.dirty,
        }
    }
}
