use std::collections::BTreeSet;

use crate::listing::ListingId;

/// Upper bound on the recent-queries ledger.
pub const RECENT_QUERY_CAP: usize = 5;

/// Records a query in the recent list: trim, drop any exact-match entry,
/// prepend, truncate. Returns `false` for the empty-query no-op.
pub(crate) fn remember_query(recent: &mut Vec<String>, raw: &str) -> bool {
    let query = raw.trim();
    if query.is_empty() {
        return false;
    }
    recent.retain(|existing| existing != query);
    recent.insert(0, query.to_string());
    recent.truncate(RECENT_QUERY_CAP);
    true
}

/// Flips favorite membership for a listing; returns the new membership.
pub(crate) fn toggle_favorite(favorites: &mut BTreeSet<ListingId>, id: ListingId) -> bool {
    if favorites.remove(&id) {
        false
    } else {
        favorites.insert(id);
        true
    }
}
