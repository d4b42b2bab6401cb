use crate::chart::ChartKey;
use crate::effect::{Effect, HistoryMode};
use crate::ledger;
use crate::msg::{Msg, PageMove};
use crate::state::{AppState, ChartStatus, LoadStatus};
use crate::url_state;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlRestored(raw) => {
            let decoded = url_state::decode_query_string(&raw);
            state.filter.query = decoded.query;
            state.filter.tab = decoded.tab;
            state.filter.sort = decoded.sort;
            // The decoded page is kept as-is until the data arrives; the
            // clamp (and the Replace sync) happen on ListingsLoaded.
            state.filter.page = decoded.page;
            state.load = LoadStatus::Loading;
            state.generation += 1;
            state.mark_dirty();
            let mut effects = vec![Effect::FetchListings {
                generation: state.generation,
            }];
            if let Some(effect) = refresh_chart(&mut state) {
                effects.push(effect);
            }
            effects
        }
        Msg::FavoritesRestored(ids) => {
            state.favorites = ids.into_iter().collect();
            state.mark_dirty();
            Vec::new()
        }
        Msg::RecentQueriesRestored(mut list) => {
            list.truncate(ledger::RECENT_QUERY_CAP);
            state.recent_queries = list;
            state.mark_dirty();
            Vec::new()
        }
        Msg::QuerySubmitted(raw) | Msg::RecentQueryPicked(raw) => {
            state.filter.query = raw.trim().to_string();
            state.filter.page = 1;
            state.clamp_page();
            state.mark_dirty();

            let mut effects = Vec::new();
            let query = state.filter.query.clone();
            if ledger::remember_query(&mut state.recent_queries, &query) {
                effects.push(Effect::PersistRecentQueries(state.recent_queries.clone()));
            }
            if let Some(effect) = refresh_chart(&mut state) {
                effects.push(effect);
            }
            effects.push(sync_url(&state, HistoryMode::Push));
            effects
        }
        Msg::TabSelected(tab) => {
            state.filter.tab = tab;
            state.filter.page = 1;
            state.clamp_page();
            state.mark_dirty();
            vec![sync_url(&state, HistoryMode::Push)]
        }
        Msg::SortSelected(sort) => {
            state.filter.sort = sort;
            state.filter.page = 1;
            state.clamp_page();
            state.mark_dirty();
            vec![sync_url(&state, HistoryMode::Push)]
        }
        Msg::PageRequested(direction) => {
            let before = state.filter.page;
            state.filter.page = match direction {
                PageMove::Prev => before.saturating_sub(1).max(1),
                PageMove::Next => before + 1,
            };
            state.clamp_page();
            if state.filter.page == before {
                Vec::new()
            } else {
                state.mark_dirty();
                vec![sync_url(&state, HistoryMode::Push)]
            }
        }
        Msg::OnlyFavoritesToggled(enabled) => {
            // Not part of the shareable contract, so no URL sync.
            state.filter.only_favorites = enabled;
            state.filter.page = 1;
            state.clamp_page();
            state.mark_dirty();
            Vec::new()
        }
        Msg::FavoriteToggled(id) => {
            ledger::toggle_favorite(&mut state.favorites, id);
            // An active favorites-only filter may have just narrowed.
            state.clamp_page();
            state.mark_dirty();
            vec![Effect::PersistFavorites(
                state.favorites.iter().copied().collect(),
            )]
        }
        Msg::RetryClicked => {
            state.load = LoadStatus::Loading;
            state.generation += 1;
            state.mark_dirty();
            vec![Effect::FetchListings {
                generation: state.generation,
            }]
        }
        Msg::NavigatedBack(raw) => {
            let decoded = url_state::decode_query_string(&raw);
            state.filter.query = decoded.query;
            state.filter.tab = decoded.tab;
            state.filter.sort = decoded.sort;
            state.filter.page = decoded.page;
            state.clamp_page();
            state.mark_dirty();
            // The history already moved; no SyncUrl here.
            match refresh_chart(&mut state) {
                Some(effect) => vec![effect],
                None => Vec::new(),
            }
        }
        Msg::ListingsLoaded {
            generation,
            listings,
        } => {
            if generation != state.generation {
                // Stale response from an abandoned fetch; a newer load owns
                // the state now.
                return (state, Vec::new());
            }
            state.listings = listings;
            state.load = LoadStatus::Ready;
            state.clamp_page();
            state.mark_dirty();
            vec![sync_url(&state, HistoryMode::Replace)]
        }
        Msg::ListingsFailed { generation } => {
            if generation != state.generation {
                return (state, Vec::new());
            }
            state.listings.clear();
            state.load = LoadStatus::Failed;
            state.clamp_page();
            state.mark_dirty();
            Vec::new()
        }
        Msg::PriceHistoryLoaded { key, series } => {
            if ChartKey::for_query(&state.filter.query) != Some(key) {
                // The query moved on while the document was in flight.
                return (state, Vec::new());
            }
            state.chart = if series.is_well_formed() {
                ChartStatus::Shown(key, series)
            } else {
                ChartStatus::Hidden
            };
            state.mark_dirty();
            Vec::new()
        }
        Msg::PriceHistoryUnavailable { key } => {
            if ChartKey::for_query(&state.filter.query) == Some(key) {
                state.chart = ChartStatus::Hidden;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn sync_url(state: &AppState, mode: HistoryMode) -> Effect {
    Effect::SyncUrl {
        query: url_state::encode_query_string(&state.filter),
        mode,
    }
}

/// Keeps the chart status in step with the current query: a recognized query
/// requests its document (unless already pending or shown), anything else
/// hides the chart.
fn refresh_chart(state: &mut AppState) -> Option<Effect> {
    match ChartKey::for_query(&state.filter.query) {
        Some(key) => {
            let already = match &state.chart {
                ChartStatus::Pending(current) | ChartStatus::Shown(current, _) => *current == key,
                ChartStatus::Hidden => false,
            };
            if already {
                return None;
            }
            state.chart = ChartStatus::Pending(key);
            Some(Effect::FetchPriceHistory { key })
        }
        None => {
            state.chart = ChartStatus::Hidden;
            None
        }
    }
}
