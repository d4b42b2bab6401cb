use std::collections::BTreeSet;

use crate::listing::{Listing, ListingId, ListingStatus};
use crate::state::{FilterState, SortKey, Tab};

/// The slice of listings to display plus pager metadata. `page` is the
/// effective (clamped) page, which the reducer writes back into the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub items: Vec<Listing>,
    pub page: usize,
    pub total_pages: usize,
}

/// Filter, sort, and paginate the collection. Pure: same inputs, same page.
///
/// Steps run in a fixed order so the page count is correct before slicing:
/// keyword filter, favorites filter, tab filter, stable sort, paginate.
pub fn visible_page(
    items: &[Listing],
    filter: &FilterState,
    favorites: &BTreeSet<ListingId>,
) -> PageView {
    let needle = filter.query.trim().to_lowercase();

    let mut kept: Vec<&Listing> = items
        .iter()
        .filter(|it| needle.is_empty() || it.title.to_lowercase().contains(&needle))
        .filter(|it| !filter.only_favorites || favorites.contains(&it.id))
        .filter(|it| match filter.tab {
            Tab::All => true,
            Tab::Active => it.status == ListingStatus::Active,
            Tab::Sold => it.status == ListingStatus::Sold,
        })
        .collect();

    // Stable sort; ties keep their original relative order. Missing dates
    // compare as the oldest (`None < Some`), so they land at the end of the
    // `latest` order deterministically.
    match filter.sort {
        SortKey::Latest => kept.sort_by(|a, b| b.listed_at.cmp(&a.listed_at)),
        SortKey::PriceAsc => kept.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => kept.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    let total_pages = kept.len().div_ceil(filter.page_size).max(1);
    let page = filter.page.clamp(1, total_pages);
    let start = (page - 1) * filter.page_size;
    let items = kept
        .into_iter()
        .skip(start)
        .take(filter.page_size)
        .cloned()
        .collect();

    PageView {
        items,
        page,
        total_pages,
    }
}
