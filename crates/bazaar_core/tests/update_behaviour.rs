use std::sync::Once;

use bazaar_core::{
    update, AppState, Banner, ChartKey, Effect, HistoryMode, Listing, ListingStatus, Msg,
    PageMove, PriceHistory, SortKey, Tab,
};
use chrono::NaiveDate;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bazaar_logging::initialize_for_tests);
}

fn listing(id: i64, title: &str, price: f64, status: ListingStatus) -> Listing {
    Listing {
        id,
        title: title.to_string(),
        price,
        status,
        listed_at: NaiveDate::from_ymd_opt(2024, 6, 1),
        platform: "Marketplace".to_string(),
        image: String::new(),
        url: String::new(),
    }
}

fn fetch_generation(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchListings { generation } => Some(*generation),
            _ => None,
        })
        .expect("fetch effect")
}

/// Startup plus a successful load of the given collection.
fn loaded_state(listings: Vec<Listing>) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::UrlRestored(String::new()));
    let generation = fetch_generation(&effects);
    let (state, _) = update(
        state,
        Msg::ListingsLoaded {
            generation,
            listings,
        },
    );
    state
}

fn many_listings(count: i64) -> Vec<Listing> {
    (0..count)
        .map(|i| listing(i, &format!("camera {i}"), f64::from(i as u32), ListingStatus::Active))
        .collect()
}

#[test]
fn url_restored_applies_parameters_and_fetches() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::UrlRestored("?q=a7c&tab=sold&sort=priceDesc&page=2".to_string()),
    );
    let view = state.view();

    assert_eq!(view.query, "a7c");
    assert_eq!(view.tab, Tab::Sold);
    assert_eq!(view.sort, SortKey::PriceDesc);
    assert_eq!(view.banner, Banner::Loading);
    assert!(view.dirty);

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::FetchListings { generation: 1 });
    assert_eq!(
        effects[1],
        Effect::FetchPriceHistory {
            key: ChartKey::SonyA7c
        }
    );
}

#[test]
fn listings_loaded_marks_ready_and_replaces_url() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::UrlRestored(String::new()));
    let generation = fetch_generation(&effects);
    let (state, effects) = update(
        state,
        Msg::ListingsLoaded {
            generation,
            listings: many_listings(3),
        },
    );

    assert_eq!(state.view().banner, Banner::Ready);
    assert_eq!(state.view().items.len(), 3);
    assert_eq!(
        effects,
        vec![Effect::SyncUrl {
            query: String::new(),
            mode: HistoryMode::Replace,
        }]
    );
}

#[test]
fn stale_listings_response_is_ignored() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::UrlRestored(String::new()));
    let first_generation = fetch_generation(&first);
    let (state, second) = update(state, Msg::RetryClicked);
    let second_generation = fetch_generation(&second);
    assert!(second_generation > first_generation);

    // The abandoned first fetch resolves late; nothing must change.
    let (state, effects) = update(
        state,
        Msg::ListingsLoaded {
            generation: first_generation,
            listings: many_listings(10),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().banner, Banner::Loading);
    assert!(state.view().items.is_empty());

    let (state, _) = update(
        state,
        Msg::ListingsLoaded {
            generation: second_generation,
            listings: many_listings(2),
        },
    );
    assert_eq!(state.view().banner, Banner::Ready);
    assert_eq!(state.view().items.len(), 2);
}

#[test]
fn fetch_failure_is_retryable() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::UrlRestored(String::new()));
    let generation = fetch_generation(&effects);
    let (state, effects) = update(state, Msg::ListingsFailed { generation });

    assert!(effects.is_empty());
    assert_eq!(state.view().banner, Banner::Error);
    assert!(state.view().items.is_empty());

    let (state, effects) = update(state, Msg::RetryClicked);
    let retry_generation = fetch_generation(&effects);
    assert_eq!(state.view().banner, Banner::Loading);

    let (state, _) = update(
        state,
        Msg::ListingsLoaded {
            generation: retry_generation,
            listings: many_listings(1),
        },
    );
    assert_eq!(state.view().banner, Banner::Ready);
}

#[test]
fn search_submit_resets_page_records_query_and_pushes_url() {
    init_logging();
    let state = loaded_state(many_listings(60));
    let (state, _) = update(state, Msg::PageRequested(PageMove::Next));
    assert_eq!(state.view().page, 2);

    let (state, effects) = update(state, Msg::QuerySubmitted("  camera 1  ".to_string()));
    let view = state.view();
    assert_eq!(view.query, "camera 1");
    assert_eq!(view.page, 1);
    assert_eq!(view.recent_queries, vec!["camera 1".to_string()]);

    assert_eq!(
        effects,
        vec![
            Effect::PersistRecentQueries(vec!["camera 1".to_string()]),
            Effect::SyncUrl {
                query: "q=camera+1".to_string(),
                mode: HistoryMode::Push,
            },
        ]
    );
}

#[test]
fn empty_query_is_not_recorded() {
    init_logging();
    let state = loaded_state(many_listings(3));
    let (state, effects) = update(state, Msg::QuerySubmitted("   ".to_string()));

    assert!(state.view().recent_queries.is_empty());
    assert_eq!(
        effects,
        vec![Effect::SyncUrl {
            query: String::new(),
            mode: HistoryMode::Push,
        }]
    );
}

#[test]
fn recent_queries_dedup_and_cap_at_five() {
    init_logging();
    let mut state = loaded_state(many_listings(3));
    for query in ["one", "two", "three", "four", "five", "six"] {
        let (next, _) = update(state, Msg::QuerySubmitted(query.to_string()));
        state = next;
    }
    assert_eq!(
        state.view().recent_queries,
        vec!["six", "five", "four", "three", "two"]
    );

    // Re-submitting an existing query moves it to the front, no duplicate.
    let (state, _) = update(state, Msg::QuerySubmitted("four".to_string()));
    assert_eq!(
        state.view().recent_queries,
        vec!["four", "six", "five", "three", "two"]
    );
}

#[test]
fn recent_query_pick_behaves_like_submit() {
    init_logging();
    let state = loaded_state(many_listings(3));
    let (state, effects) = update(state, Msg::RecentQueryPicked("camera 2".to_string()));
    assert_eq!(state.view().query, "camera 2");
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, Effect::SyncUrl { mode: HistoryMode::Push, .. })));
}

#[test]
fn tab_and_sort_changes_reset_page_and_push() {
    init_logging();
    let state = loaded_state(many_listings(60));
    let (state, _) = update(state, Msg::PageRequested(PageMove::Next));

    let (state, effects) = update(state, Msg::TabSelected(Tab::Active));
    assert_eq!(state.view().page, 1);
    assert_eq!(
        effects,
        vec![Effect::SyncUrl {
            query: "tab=active".to_string(),
            mode: HistoryMode::Push,
        }]
    );

    let (state, effects) = update(state, Msg::SortSelected(SortKey::PriceDesc));
    assert_eq!(state.view().page, 1);
    assert_eq!(
        effects,
        vec![Effect::SyncUrl {
            query: "tab=active&sort=priceDesc".to_string(),
            mode: HistoryMode::Push,
        }]
    );
}

#[test]
fn pager_moves_are_clamped_and_silent_at_bounds() {
    init_logging();
    // 60 listings at page size 24: three pages.
    let state = loaded_state(many_listings(60));

    let (state, effects) = update(state, Msg::PageRequested(PageMove::Prev));
    assert_eq!(state.view().page, 1);
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::PageRequested(PageMove::Next));
    assert_eq!(state.view().page, 2);
    assert_eq!(
        effects,
        vec![Effect::SyncUrl {
            query: "page=2".to_string(),
            mode: HistoryMode::Push,
        }]
    );

    let (state, _) = update(state, Msg::PageRequested(PageMove::Next));
    assert_eq!(state.view().page, 3);
    let (state, effects) = update(state, Msg::PageRequested(PageMove::Next));
    assert_eq!(state.view().page, 3);
    assert!(effects.is_empty());
}

#[test]
fn reload_with_fewer_items_snaps_page_back() {
    init_logging();
    let state = loaded_state(many_listings(60));
    let (state, _) = update(state, Msg::PageRequested(PageMove::Next));
    assert_eq!(state.view().page, 2);

    let (state, effects) = update(state, Msg::RetryClicked);
    let generation = fetch_generation(&effects);
    let (state, effects) = update(
        state,
        Msg::ListingsLoaded {
            generation,
            listings: many_listings(5),
        },
    );
    assert_eq!(state.view().page, 1);
    assert_eq!(state.view().total_pages, 1);
    assert_eq!(
        effects,
        vec![Effect::SyncUrl {
            query: String::new(),
            mode: HistoryMode::Replace,
        }]
    );
}

#[test]
fn favorite_toggle_round_trips_and_persists() {
    init_logging();
    let state = loaded_state(many_listings(3));

    let (state, effects) = update(state, Msg::FavoriteToggled(1));
    assert_eq!(effects, vec![Effect::PersistFavorites(vec![1])]);
    assert!(state.view().items.iter().any(|it| it.id == 1 && it.favorite));

    let (state, effects) = update(state, Msg::FavoriteToggled(1));
    assert_eq!(effects, vec![Effect::PersistFavorites(Vec::new())]);
    assert!(state.view().items.iter().all(|it| !it.favorite));
}

#[test]
fn only_favorites_filters_without_touching_the_url() {
    init_logging();
    let state = loaded_state(many_listings(3));
    let (state, _) = update(state, Msg::FavoriteToggled(2));

    let (state, effects) = update(state, Msg::OnlyFavoritesToggled(true));
    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.only_favorites);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].id, 2);
}

#[test]
fn restored_ledgers_are_applied() {
    init_logging();
    let state = loaded_state(many_listings(3));
    let (state, effects) = update(state, Msg::FavoritesRestored(vec![0, 2]));
    assert!(effects.is_empty());
    assert_eq!(
        state
            .view()
            .items
            .iter()
            .filter(|it| it.favorite)
            .count(),
        2
    );

    let too_many: Vec<String> = (0..9).map(|i| format!("q{i}")).collect();
    let (state, _) = update(state, Msg::RecentQueriesRestored(too_many));
    assert_eq!(state.view().recent_queries.len(), 5);
}

#[test]
fn chart_shows_for_recognized_query_and_ignores_stale_series() {
    init_logging();
    let state = loaded_state(many_listings(3));

    let (state, effects) = update(state, Msg::QuerySubmitted("iPhone 13 Pro".to_string()));
    assert!(effects.contains(&Effect::FetchPriceHistory {
        key: ChartKey::Iphone13
    }));
    assert!(state.view().chart.is_none());

    let series = PriceHistory {
        labels: vec!["w1".to_string(), "w2".to_string()],
        avg: vec![700_000.0, 680_000.0],
    };
    let (state, _) = update(
        state,
        Msg::PriceHistoryLoaded {
            key: ChartKey::Iphone13,
            series,
        },
    );
    let chart = state.view().chart.expect("chart shown");
    assert_eq!(chart.latest_avg, 680_000.0);

    // Query moves on; a late document for the old key must not resurface.
    let (state, _) = update(state, Msg::QuerySubmitted("radio".to_string()));
    assert!(state.view().chart.is_none());
    let (state, _) = update(
        state,
        Msg::PriceHistoryLoaded {
            key: ChartKey::Iphone13,
            series: PriceHistory {
                labels: vec!["w1".to_string()],
                avg: vec![1.0],
            },
        },
    );
    assert!(state.view().chart.is_none());
}

#[test]
fn malformed_or_missing_series_hides_the_chart() {
    init_logging();
    let state = loaded_state(many_listings(3));
    let (state, _) = update(state, Msg::QuerySubmitted("sony a7c".to_string()));

    // Parallel sequences of unequal length are malformed.
    let (state, _) = update(
        state,
        Msg::PriceHistoryLoaded {
            key: ChartKey::SonyA7c,
            series: PriceHistory {
                labels: vec!["w1".to_string(), "w2".to_string()],
                avg: vec![1.0],
            },
        },
    );
    assert!(state.view().chart.is_none());

    let (state, _) = update(state, Msg::QuerySubmitted("a7c body".to_string()));
    let (state, _) = update(
        state,
        Msg::PriceHistoryUnavailable {
            key: ChartKey::SonyA7c,
        },
    );
    assert!(state.view().chart.is_none());
}

#[test]
fn navigated_back_restores_filter_without_syncing() {
    init_logging();
    let state = loaded_state(many_listings(3));
    let (state, effects) = update(state, Msg::NavigatedBack("?tab=sold&page=2".to_string()));

    assert_eq!(state.view().tab, Tab::Sold);
    assert!(effects
        .iter()
        .all(|effect| !matches!(effect, Effect::SyncUrl { .. })));
}
