use std::sync::mpsc;
use std::thread;

use bazaar_core::{ChartKey, Effect, HistoryMode, Listing, Msg, PriceHistory};
use bazaar_engine::{EngineConfig, EngineEvent, EngineHandle, FetchError, PriceDocKey};
use bazaar_logging::{bazaar_info, bazaar_warn};

use crate::history::AddressBar;
use crate::persistence::LocalStore;

/// Executes the effects the reducer returns: engine fetches, ledger writes,
/// and address-bar updates. Engine events come back as messages on the
/// channel handed to [`EffectRunner::new`].
pub struct EffectRunner {
    engine: EngineHandle,
    store: LocalStore,
    address: AddressBar,
}

impl EffectRunner {
    pub fn new(
        msg_tx: mpsc::Sender<Msg>,
        config: EngineConfig,
        store: LocalStore,
    ) -> Result<Self, FetchError> {
        let (engine, events) = EngineHandle::new(config)?;
        spawn_event_loop(events, msg_tx);
        Ok(Self {
            engine,
            store,
            address: AddressBar::new(),
        })
    }

    /// Messages that restore the persisted ledgers at startup.
    pub fn restore_messages(&self) -> Vec<Msg> {
        vec![
            Msg::FavoritesRestored(self.store.load_favorites()),
            Msg::RecentQueriesRestored(self.store.load_recent_queries()),
        ]
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchListings { generation } => {
                    bazaar_info!("FetchListings generation={}", generation);
                    self.engine.load_listings(generation);
                }
                Effect::FetchPriceHistory { key } => {
                    self.engine.load_price_history(map_chart_key(key));
                }
                Effect::PersistFavorites(ids) => {
                    self.store.save_favorites(&ids);
                }
                Effect::PersistRecentQueries(queries) => {
                    self.store.save_recent_queries(&queries);
                }
                Effect::SyncUrl { query, mode } => match mode {
                    HistoryMode::Push => self.address.push(query),
                    HistoryMode::Replace => self.address.replace(query),
                },
            }
        }
    }

    pub fn current_url(&self) -> &str {
        self.address.current()
    }

    pub fn history_back(&mut self) -> Option<String> {
        self.address.back()
    }

    pub fn history_forward(&mut self) -> Option<String> {
        self.address.forward()
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        for event in events {
            let msg = match event {
                EngineEvent::ListingsLoaded {
                    generation,
                    listings,
                } => Msg::ListingsLoaded {
                    generation,
                    listings: listings.into_iter().map(map_listing).collect(),
                },
                EngineEvent::ListingsFailed { generation, error } => {
                    bazaar_warn!("listings fetch failed: {}", error);
                    Msg::ListingsFailed { generation }
                }
                EngineEvent::PriceHistoryLoaded { key, series } => Msg::PriceHistoryLoaded {
                    key: map_doc_key(key),
                    series: PriceHistory {
                        labels: series.labels,
                        avg: series.avg,
                    },
                },
                EngineEvent::PriceHistoryUnavailable { key } => Msg::PriceHistoryUnavailable {
                    key: map_doc_key(key),
                },
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

fn map_listing(listing: bazaar_engine::Listing) -> Listing {
    Listing {
        id: listing.id,
        title: listing.title,
        price: listing.price,
        status: match listing.status {
            bazaar_engine::ListingStatus::Active => bazaar_core::ListingStatus::Active,
            bazaar_engine::ListingStatus::Sold => bazaar_core::ListingStatus::Sold,
        },
        listed_at: listing.listed_at,
        platform: listing.platform,
        image: listing.image,
        url: listing.url,
    }
}

fn map_chart_key(key: ChartKey) -> PriceDocKey {
    match key {
        ChartKey::Iphone13 => PriceDocKey::Iphone13,
        ChartKey::SonyA7c => PriceDocKey::SonyA7c,
    }
}

fn map_doc_key(key: PriceDocKey) -> ChartKey {
    match key {
        PriceDocKey::Iphone13 => ChartKey::Iphone13,
        PriceDocKey::SonyA7c => ChartKey::SonyA7c,
    }
}
