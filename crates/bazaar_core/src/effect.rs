use crate::chart::ChartKey;
use crate::listing::ListingId;

/// How a URL sync should interact with the browser history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// User-driven state change: a new history entry.
    Push,
    /// Initial load or a clamp correction: rewrite the current entry.
    Replace,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the listings document. The generation tags the response so a
    /// stale fetch cannot overwrite fresher state.
    FetchListings { generation: u64 },
    /// Fetch the price-history document for a recognized query.
    FetchPriceHistory { key: ChartKey },
    /// Rewrite the persisted favorites ledger.
    PersistFavorites(Vec<ListingId>),
    /// Rewrite the persisted recent-queries ledger.
    PersistRecentQueries(Vec<String>),
    /// Mirror the filter state into the address bar.
    SyncUrl { query: String, mode: HistoryMode },
}
