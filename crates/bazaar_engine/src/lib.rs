//! Bazaar engine: document fetching and effect execution.
mod catalog;
mod engine;
mod fetch;
mod persist;
mod types;

pub use catalog::{parse_listings, parse_price_history};
pub use engine::{EngineConfig, EngineHandle, LISTINGS_PATH};
pub use fetch::{DocumentFetcher, FetchSettings, ReqwestFetcher};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, FailureKind, FetchError, Listing, ListingStatus, PriceDocKey, PriceHistorySeries,
};
