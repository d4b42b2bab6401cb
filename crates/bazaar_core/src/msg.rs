use crate::chart::{ChartKey, PriceHistory};
use crate::listing::{Listing, ListingId};
use crate::state::{SortKey, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    Prev,
    Next,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Apply the location query string at startup, before the first fetch.
    UrlRestored(String),
    /// Restore the persisted favorites ledger.
    FavoritesRestored(Vec<ListingId>),
    /// Restore the persisted recent-queries ledger.
    RecentQueriesRestored(Vec<String>),
    /// User submitted the search box.
    QuerySubmitted(String),
    /// User picked an entry from the recent-queries list.
    RecentQueryPicked(String),
    /// User switched the status tab.
    TabSelected(Tab),
    /// User changed the sort order.
    SortSelected(SortKey),
    /// User clicked the pager.
    PageRequested(PageMove),
    /// User toggled the favorites-only filter.
    OnlyFavoritesToggled(bool),
    /// User toggled a listing's favorite flag.
    FavoriteToggled(ListingId),
    /// User clicked retry on the error banner.
    RetryClicked,
    /// Back/forward navigation restored this query string.
    NavigatedBack(String),
    /// Listings document arrived for the given fetch generation.
    ListingsLoaded {
        generation: u64,
        listings: Vec<Listing>,
    },
    /// Listings fetch for the given generation failed.
    ListingsFailed { generation: u64 },
    /// Price-history document arrived for a recognized query.
    PriceHistoryLoaded {
        key: ChartKey,
        series: PriceHistory,
    },
    /// Price-history document is missing or malformed; hide the chart.
    PriceHistoryUnavailable { key: ChartKey },
    /// Fallback for placeholder wiring.
    NoOp,
}
